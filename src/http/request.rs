//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa el parser HTTP desde cero, leyendo línea por
//! línea directamente del socket.
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /app/hello?name=Ada HTTP/1.1\r\n
//! Host: localhost:35000\r\n
//! User-Agent: curl/8.0.1\r\n
//! \r\n
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD target PROTOCOL` (el protocolo se ignora)
//! 2. **Headers**: Pares `Name: Value` hasta la línea vacía
//! 3. **Body**: Queda en el socket; se lee bajo demanda con [`Request::read_body`]

use super::query::parse_query_string;
use std::collections::HashMap;
use std::io::{BufRead, Read};
use thiserror::Error;

/// Método HTTP del request
///
/// Los métodos desconocidos no son un error de parsing: se conservan en
/// [`Method::Other`] para que el router responda 405.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,
    /// Cualquier otro token, tal cual llegó
    Other(String),
}

impl Method {
    /// Parsea el token de método (sensible a mayúsculas, como HTTP)
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "PATCH" => Method::PATCH,
            "OPTIONS" => Method::OPTIONS,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::OPTIONS => "OPTIONS",
            Method::Other(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Error)]
pub enum ParseError {
    /// El cliente cerró o mandó una línea vacía antes de la request line
    #[error("Empty request")]
    EmptyRequest,

    /// Request line sin método o sin target
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// Fallo de lectura en el socket
    #[error("I/O error while reading request: {0}")]
    Io(#[from] std::io::Error),
}

/// Acceso al body que todavía está en el socket
///
/// Se consume una sola vez: después de la primera lectura la fuente se
/// descarta.
struct Body {
    source: Option<Box<dyn BufRead + Send>>,
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Body")
            .field("consumed", &self.source.is_none())
            .finish()
    }
}

/// Representa un request HTTP parseado
#[derive(Debug)]
pub struct Request {
    /// Método HTTP (GET, POST, ...)
    method: Method,

    /// Path sin query (ej: "/app/hello"); nunca contiene `?`
    path: String,

    /// Query parameters ya decodificados (ej: {"name": "Ada"})
    query_params: HashMap<String, String>,

    /// Headers con el nombre en minúsculas (ej: {"host": "localhost:35000"})
    headers: HashMap<String, String>,

    /// Resto del stream de la conexión
    body: Body,
}

impl Request {
    /// Lee y parsea un request desde un stream
    ///
    /// El reader queda dentro del request para poder leer el body después.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use raw_http_server::http::Request;
    /// use std::io::Cursor;
    ///
    /// let raw = Cursor::new(b"GET /app/sum?a=2&b=3 HTTP/1.1\r\nHost: x\r\n\r\n".to_vec());
    /// let request = Request::read_from(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/app/sum");
    /// assert_eq!(request.query_param("a"), Some("2"));
    /// assert_eq!(request.header("host"), Some("x"));
    /// ```
    pub fn read_from<R>(mut reader: R) -> Result<Self, ParseError>
    where
        R: BufRead + Send + 'static,
    {
        // 1. Request line
        let request_line = match read_line(&mut reader)? {
            Some(line) if !line.is_empty() => line,
            _ => return Err(ParseError::EmptyRequest),
        };

        let (method, target) = Self::parse_request_line(&request_line)?;
        let (path, query_string) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), query),
            None => (target.to_string(), ""),
        };

        // 2. Headers
        let headers = Self::parse_headers(&mut reader)?;

        Ok(Request {
            method,
            path,
            query_params: parse_query_string(query_string),
            headers,
            body: Body {
                source: Some(Box::new(reader)),
            },
        })
    }

    /// Parsea la request line: `METHOD target [PROTOCOL]`
    fn parse_request_line(line: &str) -> Result<(Method, &str), ParseError> {
        let mut parts: Vec<&str> = line.split(' ').collect();

        // Los tokens vacíos al final no cuentan (ej: "GET ")
        while parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }

        if parts.len() < 2 {
            return Err(ParseError::MalformedRequestLine(line.to_string()));
        }

        Ok((Method::parse(parts[0]), parts[1]))
    }

    /// Lee headers hasta la línea vacía o el fin del stream
    ///
    /// Las líneas sin `": "` se ignoran.
    fn parse_headers<R: BufRead>(reader: &mut R) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        while let Some(line) = read_line(reader)? {
            if line.is_empty() {
                break;
            }

            if let Some((name, value)) = line.split_once(": ") {
                headers.insert(name.to_ascii_lowercase(), value.to_string());
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene todos los query parameters
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Obtiene un query parameter específico
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    /// Obtiene todos los headers (claves en minúsculas)
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header sin importar mayúsculas/minúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Lee el body del request
    ///
    /// Usa `Content-Length` para saber cuántos bytes leer. Retorna `None`
    /// si no hay `Content-Length`, si ya se leyó antes o si la lectura falla.
    /// Un body más corto de lo anunciado se retorna tal cual llegó.
    pub fn read_body(&mut self) -> Option<Vec<u8>> {
        let source = self.body.source.take()?;
        let length: u64 = self.header("content-length")?.trim().parse().ok()?;

        let mut body = Vec::new();
        match source.take(length).read_to_end(&mut body) {
            Ok(_) => Some(body),
            Err(e) => {
                tracing::debug!(error = %e, "fallo leyendo body");
                None
            }
        }
    }

    /// Lee el body como String UTF-8
    pub fn read_body_string(&mut self) -> Option<String> {
        self.read_body()
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// Reemplaza el path (usado por el router para el documento por defecto)
    pub(crate) fn set_path(&mut self, path: &str) {
        self.path = path.to_string();
    }
}

/// Largo máximo de la request line y de cada header, en bytes
pub const MAX_LINE_LENGTH: u64 = 8192;

/// Lee una línea terminada en `\n` y le quita `\r\n`/`\n`
///
/// Retorna `None` en EOF. Bytes que no son UTF-8 se reemplazan. Una línea
/// que llega a [`MAX_LINE_LENGTH`] sin `\n` es un error `InvalidData`.
fn read_line<R: BufRead>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut raw = Vec::new();
    let read = Read::take(&mut *reader, MAX_LINE_LENGTH).read_until(b'\n', &mut raw)?;
    if read == 0 {
        return Ok(None);
    }

    if read as u64 == MAX_LINE_LENGTH && raw.last() != Some(&b'\n') {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("line exceeds {MAX_LINE_LENGTH} bytes"),
        ));
    }

    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}
