//! # Logging
//! src/logging.rs
//!
//! Inicializa el subscriber global de `tracing`. Se llama una sola vez
//! desde `main`; los tests no instalan subscriber.

use crate::error::{Result, ServerError};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Convierte "info", "DEBUG", etc. en un nivel de tracing
pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim())
        .map_err(|_| ServerError::InvalidConfig(format!("unknown log level {level:?}")))
}

/// Instala el subscriber de formato con el nivel máximo indicado
pub fn init(level: &str) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(level)?)
        .with_thread_names(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ServerError::Logging(e.to_string()))
}
