//! # Detección de Content-Type
//! src/http/mime.rs
//!
//! Primero se consulta la base de tipos de `new_mime_guess`; si no conoce
//! la extensión se usa una tabla fija con los tipos básicos de un sitio web.

use std::path::Path;

/// Tipo por defecto cuando nada coincide
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Determina el Content-Type de un archivo
///
/// # Ejemplo
/// ```
/// use raw_http_server::http::mime::content_type_for;
/// use std::path::Path;
///
/// assert_eq!(content_type_for(Path::new("static/index.html")), "text/html");
/// assert_eq!(content_type_for(Path::new("blob.unknownext")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> String {
    new_mime_guess::MimeGuess::from_path(path)
        .first()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| fallback_content_type(path).to_string())
}

/// Tabla fija por extensión
pub fn fallback_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_table() {
        assert_eq!(fallback_content_type(Path::new("a.html")), "text/html");
        assert_eq!(fallback_content_type(Path::new("a.css")), "text/css");
        assert_eq!(fallback_content_type(Path::new("a.js")), "application/javascript");
        assert_eq!(fallback_content_type(Path::new("a.png")), "image/png");
        assert_eq!(fallback_content_type(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(fallback_content_type(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(fallback_content_type(Path::new("a.bin")), DEFAULT_CONTENT_TYPE);
        assert_eq!(fallback_content_type(Path::new("Makefile")), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_probe_known_types() {
        assert_eq!(content_type_for(Path::new("index.html")), "text/html");
        assert_eq!(content_type_for(Path::new("logo.png")), "image/png");
        assert_eq!(content_type_for(Path::new("styles.css")), "text/css");
    }

    #[test]
    fn test_probe_unknown_falls_back() {
        assert_eq!(content_type_for(Path::new("data.zzqx")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("README")), DEFAULT_CONTENT_TYPE);
    }
}
