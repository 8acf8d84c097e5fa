//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea paths HTTP a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Hay dos clases de rutas, evaluadas en este orden:
//!
//! 1. **API**: el path empieza con el prefijo API (`/app/` por defecto,
//!    comparado sin importar mayúsculas). Se busca el path exacto; si no
//!    existe → 404, si el método no está permitido → 405.
//! 2. **Estáticos**: cualquier otro path. Solo se acepta GET (405 si no),
//!    `/` se reescribe al documento por defecto y el request pasa al
//!    handler montado en [`STATIC_MOUNT`].
//!
//! El router se construye una vez al arrancar y después solo se lee,
//! compartido entre threads con `Arc`.

use crate::config::Config;
use crate::http::{Method, Request, Response};
use std::collections::HashMap;

/// Path donde se monta el handler de archivos estáticos
pub const STATIC_MOUNT: &str = "/";

/// Capacidad de atender un request
///
/// Lo implementan los endpoints dinámicos y el handler de estáticos.
/// Cualquier closure `Fn(&mut Request) -> Response` también sirve.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &mut Request) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&mut Request) -> Response + Send + Sync,
{
    fn handle(&self, request: &mut Request) -> Response {
        self(request)
    }
}

/// Una entrada de la tabla de rutas
struct Route {
    methods: Vec<Method>,
    handler: Box<dyn Handler>,
}

/// Router que mapea paths exactos a handlers
pub struct Router {
    /// Mapa de path → ruta
    routes: HashMap<String, Route>,

    /// Prefijo de la clase API (ej: "/app/")
    api_prefix: String,

    /// Documento que se sirve para "/"
    default_document: String,
}

impl Router {
    /// Crea un router vacío con prefijo `/app/` e `index.html`
    pub fn new() -> Self {
        Self::with_settings("/app/", "index.html")
    }

    /// Crea un router vacío con prefijo API y documento por defecto propios
    pub fn with_settings(api_prefix: &str, default_document: &str) -> Self {
        Self {
            routes: HashMap::new(),
            api_prefix: api_prefix.to_string(),
            default_document: default_document.to_string(),
        }
    }

    /// Crea un router vacío a partir de la configuración
    pub fn from_config(config: &Config) -> Self {
        Self::with_settings(&config.api_prefix, &config.default_document)
    }

    /// Registra una ruta con los métodos que acepta
    ///
    /// Registrar el mismo path otra vez reemplaza la ruta anterior.
    ///
    /// # Ejemplo
    /// ```
    /// use raw_http_server::router::Router;
    /// use raw_http_server::http::{Method, Request, Response};
    ///
    /// fn hello_handler(_req: &mut Request) -> Response {
    ///     Response::json(r#"{"message": "Hello"}"#)
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register("/app/hello", &[Method::GET, Method::POST], hello_handler);
    /// assert!(router.contains("/app/hello"));
    /// ```
    pub fn register<H>(&mut self, path: &str, methods: &[Method], handler: H)
    where
        H: Handler + 'static,
    {
        self.routes.insert(
            path.to_string(),
            Route {
                methods: methods.to_vec(),
                handler: Box::new(handler),
            },
        );
    }

    /// Registra una ruta que solo acepta GET
    pub fn get<H>(&mut self, path: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.register(path, &[Method::GET], handler);
    }

    /// Prefijo de la clase API
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// Indica si hay una ruta registrada en ese path exacto
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    pub fn route(&self, request: &mut Request) -> Response {
        if self.is_api_path(request.path()) {
            self.route_api(request)
        } else {
            self.route_static(request)
        }
    }

    fn route_api(&self, request: &mut Request) -> Response {
        let Some(route) = self.routes.get(request.path()) else {
            return Response::not_found(request.path());
        };

        if !route.methods.contains(request.method()) {
            return Response::method_not_allowed();
        }

        route.handler.handle(request)
    }

    fn route_static(&self, request: &mut Request) -> Response {
        // El método se valida antes de tocar el filesystem
        if request.method() != &Method::GET {
            return Response::method_not_allowed();
        }

        if request.path() == "/" {
            let document = format!("/{}", self.default_document);
            request.set_path(&document);
        }

        match self.routes.get(STATIC_MOUNT) {
            Some(route) => route.handler.handle(request),
            None => Response::not_found(request.path()),
        }
    }

    fn is_api_path(&self, path: &str) -> bool {
        let prefix = self.api_prefix.as_bytes();
        path.as_bytes()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
