//! # Raw HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado directamente sobre sockets TCP,
//! sin ninguna librería HTTP. Sirve archivos estáticos y un puñado de
//! endpoints dinámicos.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests, query strings y construcción de responses
//! - `router`: Despacho por prefijo API o hacia archivos estáticos
//! - `handlers`: Endpoints dinámicos y handler de estáticos
//! - `server`: Loop de accept y un thread por conexión
//! - `config`: Configuración por CLI y variables de entorno
//! - `logging`: Subscriber de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use raw_http_server::config::Config;
//! use raw_http_server::handlers::{api, StaticFiles};
//! use raw_http_server::router::{Router, STATIC_MOUNT};
//! use raw_http_server::server::Server;
//!
//! let config = Config::default();
//! let mut router = Router::from_config(&config);
//! api::register_routes(&mut router);
//! router.get(STATIC_MOUNT, StaticFiles::new(config.resolve_static_root()));
//!
//! let server = Server::new(config, router);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;

pub use error::{Result, ServerError};
