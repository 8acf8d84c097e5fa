//! # Módulo HTTP
//!
//! Este módulo implementa el protocolo HTTP/1.1 desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests leyendo directamente del socket
//! - Decodificación de query strings
//! - Construcción de responses con framing por `Content-Length`
//! - Detección de Content-Type para archivos
//!
//! ## Alcance
//!
//! Una request por conexión: no hay keep-alive, ni chunked encoding,
//! ni pipelining. Toda respuesta lleva `Connection: close`.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /app/hello?name=Ada HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! {"ok": true}
//! ```

pub mod mime; // Content-Type de archivos
pub mod query; // Decodificación de query strings
pub mod request; // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status; // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
