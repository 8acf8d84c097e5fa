//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte completo
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./raw_http_server --port 8080 --static-dir /static --log-level debug
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 STATIC_DIR=/var/www ./raw_http_server
//! ```

use crate::error::{Result, ServerError};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Puerto por defecto
pub const DEFAULT_PORT: u16 = 35000;

/// Directorio de salida del build, se prueba primero al resolver estáticos
pub const BUILD_OUTPUT_DIR: &str = "target";

/// Directorio de recursos dentro del código fuente
pub const SOURCE_RESOURCES_DIR: &str = "resources";

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "raw_http_server")]
#[command(about = "Servidor HTTP/1.1 minimo sobre sockets TCP")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio de archivos estáticos (ver `resolve_static_root`)
    #[arg(long = "static-dir", default_value = "/static", env = "STATIC_DIR")]
    pub static_dir: String,

    /// Documento que se sirve para "/"
    #[arg(long = "default-document", default_value = "index.html", env = "DEFAULT_DOCUMENT")]
    pub default_document: String,

    /// Prefijo de los endpoints dinámicos
    #[arg(long = "api-prefix", default_value = "/app/", env = "API_PREFIX")]
    pub api_prefix: String,

    /// Nivel de log: trace, debug, info, warn, error
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Configuración por defecto escuchando en otro puerto
    ///
    /// # Ejemplo
    /// ```rust
    /// use raw_http_server::config::Config;
    ///
    /// let config = Config::with_port(8080);
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::InvalidConfig("host must not be empty".to_string()));
        }

        if self.default_document.is_empty() || self.default_document.contains('/') {
            return Err(ServerError::InvalidConfig(format!(
                "default document must be a plain file name, got {:?}",
                self.default_document
            )));
        }

        if self.api_prefix.len() < 2
            || !self.api_prefix.starts_with('/')
            || !self.api_prefix.ends_with('/')
        {
            return Err(ServerError::InvalidConfig(format!(
                "api prefix must start and end with '/', got {:?}",
                self.api_prefix
            )));
        }

        crate::logging::parse_level(&self.log_level)?;

        Ok(())
    }

    /// Resuelve el directorio de estáticos
    ///
    /// 1. `target<static_dir>` si existe como directorio (salida del build)
    /// 2. `static_dir` tal cual si es absoluto y existe como directorio
    /// 3. `resources<static_dir>` en otro caso (así el `/static` por
    ///    defecto apunta a `resources/static`)
    pub fn resolve_static_root(&self) -> PathBuf {
        self.resolve_static_root_in(Path::new("."))
    }

    /// Igual que [`Config::resolve_static_root`] pero relativo a `base`
    pub fn resolve_static_root_in(&self, base: &Path) -> PathBuf {
        let relative = self.static_dir.trim_start_matches('/');

        let candidate = base.join(BUILD_OUTPUT_DIR).join(relative);
        if candidate.is_dir() {
            return candidate;
        }

        let path = Path::new(&self.static_dir);
        if path.is_absolute() && path.is_dir() {
            return path.to_path_buf();
        }

        base.join(SOURCE_RESOURCES_DIR).join(relative)
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: "0.0.0.0".to_string(),
            static_dir: "/static".to_string(),
            default_document: "index.html".to_string(),
            api_prefix: "/app/".to_string(),
            log_level: "info".to_string(),
        }
    }
}
