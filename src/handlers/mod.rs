//! # Handlers del Servidor
//!
//! Todo lo que el router puede despachar:
//!
//! - **api**: Endpoints dinámicos de ejemplo (hello, time, sum, pi)
//! - **static_files**: Archivos servidos desde el directorio estático
//!
//! Ambos se registran con la misma operación [`crate::router::Router::register`].

pub mod api;
pub mod static_files;

pub use static_files::StaticFiles;
