//! # Archivos Estáticos
//! src/handlers/static_files.rs
//!
//! Sirve archivos desde un directorio raíz. El path del request se concatena
//! a la raíz; si el resultado no existe, es un directorio o queda fuera de la
//! raíz (ej: `/../secreto`), se responde 404.

use crate::http::mime::content_type_for;
use crate::http::{Request, Response};
use crate::router::Handler;
use std::path::{Path, PathBuf};

/// Handler de archivos estáticos
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resuelve un path de request a un archivo existente dentro de la raíz
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = request_path.trim_start_matches('/');
        let candidate = self.root.join(relative);

        let root = self.root.canonicalize().ok()?;
        let file = candidate.canonicalize().ok()?;

        if !file.starts_with(&root) || !file.is_file() {
            return None;
        }

        Some(file)
    }

    /// Lee el archivo y arma la respuesta
    pub fn serve(&self, request_path: &str) -> Response {
        let Some(file) = self.resolve(request_path) else {
            tracing::debug!(path = request_path, "archivo no encontrado");
            return Response::not_found(request_path);
        };

        match std::fs::read(&file) {
            Ok(content) => {
                let content_type = content_type_for(&file);
                tracing::debug!(
                    path = request_path,
                    bytes = content.len(),
                    content_type = %content_type,
                    "sirviendo archivo"
                );
                Response::file(content, &content_type)
            }
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "no se pudo leer el archivo");
                Response::not_found(request_path)
            }
        }
    }
}

impl Handler for StaticFiles {
    fn handle(&self, request: &mut Request) -> Response {
        self.serve(request.path())
    }
}
