//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! de forma programática y serializarlas en un único lugar.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json\r\n
//! Access-Control-Allow-Origin: *\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! {"ok": true}
//! ```
//!
//! `Content-Length` y `Connection: close` los escribe siempre
//! [`Response::to_bytes`], así ninguna respuesta puede salir sin ellos.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use raw_http_server::http::{Response, StatusCode};
//!
//! let response = Response::json(r#"{"message": "Hello"}"#);
//! assert_eq!(response.status(), StatusCode::Ok);
//!
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::mime::DEFAULT_CONTENT_TYPE;
use super::StatusCode;
use std::io::Write;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en orden de inserción; un nombre repetido reemplaza al anterior
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe (sin importar mayúsculas), se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo de la respuesta desde un string (UTF-8)
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    // === Formas de respuesta ===

    /// Contenido de un archivo (200 OK)
    pub fn file(content: Vec<u8>, content_type: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", content_type)
            .with_body_bytes(content)
    }

    /// Respuesta JSON exitosa (200 OK) con CORS abierto
    ///
    /// # Ejemplo
    /// ```
    /// use raw_http_server::http::Response;
    ///
    /// let response = Response::json(r#"{"status": "ok"}"#);
    /// assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
    /// ```
    pub fn json(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "application/json")
            .with_header("Access-Control-Allow-Origin", "*")
            .with_body(body)
    }

    /// Texto plano (200 OK)
    pub fn text(body: &str) -> Self {
        Self::with_content_type(body, "text/plain; charset=utf-8")
    }

    /// Texto con un Content-Type elegido por el llamador (200 OK)
    pub fn with_content_type(body: &str, content_type: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", content_type)
            .with_body(body)
    }

    /// 400 - Request line inválida
    pub fn bad_request() -> Self {
        Self::html_error(
            StatusCode::BadRequest,
            "<h1>400 - Solicitud Incorrecta</h1>".to_string(),
        )
    }

    /// 404 - Incluye el path no resuelto en el HTML
    pub fn not_found(path: &str) -> Self {
        let body = format!(
            "<h1>404 - No encontrado</h1><p>Recurso no encontrado: {}</p><a href=\"/\">Volver al inicio</a>",
            escape_html(path)
        );
        Self::html_error(StatusCode::NotFound, body)
    }

    /// 405 - Método no permitido para la ruta
    pub fn method_not_allowed() -> Self {
        Self::html_error(
            StatusCode::MethodNotAllowed,
            "<h1>405 - Método no permitido</h1>".to_string(),
        )
    }

    fn html_error(status: StatusCode, body: String) -> Self {
        Self::new(status)
            .with_header("Content-Type", HTML_CONTENT_TYPE)
            .with_body_bytes(body.into_bytes())
    }

    // === Serialización ===

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers del builder (Content-Type por defecto si falta)
    /// - `Content-Length` calculado del body y `Connection: close`
    /// - Línea vacía y body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.body.len() + 256);

        // 1. Status line
        result.extend_from_slice(format!("HTTP/1.1 {}\r\n", self.status).as_bytes());

        // 2. Headers del builder; los de framing los ponemos nosotros
        if self.header("Content-Type").is_none() {
            result.extend_from_slice(
                format!("Content-Type: {DEFAULT_CONTENT_TYPE}\r\n").as_bytes(),
            );
        }
        for (name, value) in &self.headers {
            if name.eq_ignore_ascii_case("Content-Length")
                || name.eq_ignore_ascii_case("Connection")
            {
                continue;
            }
            result.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }
        result.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());
        result.extend_from_slice(b"Connection: close\r\n");

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Escribe la respuesta completa en el stream y hace flush
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Busca un header sin importar mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
