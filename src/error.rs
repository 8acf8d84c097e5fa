//! # Errores del Servidor
//! src/error.rs
//!
//! Errores a nivel de proceso. Los errores de una conexión se quedan en esa
//! conexión: se loguean y el loop de accept sigue.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
