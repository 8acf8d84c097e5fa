//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio thread:
//! parsear → rutear → responder → cerrar.

use crate::config::Config;
use crate::error::Result;
use crate::http::{ParseError, Request, Response};
use crate::router::Router;
use std::io::{BufReader, BufWriter};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
}

impl Server {
    /// Crea el servidor con un router ya poblado
    pub fn new(config: Config, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Hace bind en `host:port` y atiende conexiones para siempre
    pub fn run(&self) -> Result<()> {
        let address = self.config.address();
        tracing::info!("Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address)?;
        self.serve(listener)
    }

    /// Loop de accept sobre un listener ya abierto
    ///
    /// Un error al aceptar o al crear el thread se loguea y el loop sigue.
    pub fn serve(&self, listener: TcpListener) -> Result<()> {
        let local = listener.local_addr()?;
        tracing::info!("Servidor escuchando en http://{}", local);
        tracing::info!("Modo concurrente: un thread por conexion");

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(e) => {
                    tracing::error!(error = %e, "Error al aceptar conexión");
                }
            }
        }

        Ok(())
    }

    fn spawn_connection(&self, stream: TcpStream) {
        let router = Arc::clone(&self.router);
        let peer = stream.peer_addr().ok();

        tracing::debug!(peer = ?peer, "Nueva conexión");

        let spawned = thread::Builder::new()
            .name(thread_name(peer))
            .spawn(move || {
                if let Err(e) = Self::handle_connection(stream, &router) {
                    tracing::error!(peer = ?peer, error = %e, "Error en conexión");
                }
            });

        if let Err(e) = spawned {
            tracing::error!(peer = ?peer, error = %e, "No se pudo crear el thread");
        }
    }

    /// Atiende una conexión completa
    ///
    /// El stream y su clon de lectura se liberan al salir de esta función,
    /// en cualquier camino, lo que cierra el socket.
    pub fn handle_connection(stream: TcpStream, router: &Router) -> std::io::Result<()> {
        let reader = BufReader::new(stream.try_clone()?);

        let response = match Request::read_from(reader) {
            Ok(mut request) => {
                let method = request.method().to_string();
                let path = request.path().to_string();
                let response = router.route(&mut request);
                if response.status().is_client_error() {
                    tracing::warn!("{} {} -> {}", method, path, response.status());
                } else {
                    tracing::info!("{} {} -> {}", method, path, response.status());
                }
                response
            }
            Err(ParseError::EmptyRequest) => {
                tracing::debug!("Conexión cerrada sin request");
                return Ok(());
            }
            Err(ParseError::MalformedRequestLine(line)) => {
                tracing::info!(line = %line, "Request line inválida -> 400");
                Response::bad_request()
            }
            Err(ParseError::Io(e)) => return Err(e),
        };

        let mut writer = BufWriter::new(&stream);
        response.write_to(&mut writer)
    }
}

fn thread_name(peer: Option<SocketAddr>) -> String {
    match peer {
        Some(addr) => format!("conn-{addr}"),
        None => "conn-unknown".to_string(),
    }
}

#[cfg(test)]
mod more_server_tests {
    use super::*;
    use crate::handlers::api;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn ephemeral_listener() -> TcpListener {
        TcpListener::bind("127.0.0.1:0").expect("bind")
    }

    /// Acepta una conexión, la atiende y retorna lo que recibió el cliente
    fn exchange(router: Router, raw: &[u8]) -> String {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();
        let router = Arc::new(router);

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            Server::handle_connection(stream, &router).unwrap();
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(raw).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        t.join().unwrap();

        String::from_utf8_lossy(&buf).into_owned()
    }

    fn demo_router() -> Router {
        let mut router = Router::new();
        api::register_routes(&mut router);
        router
    }

    #[test]
    fn test_handle_connection_hello_ok() {
        let text = exchange(demo_router(), b"GET /app/hello?name=Ada HTTP/1.1\r\nHost: x\r\n\r\n");

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.contains("¡Hola, Ada!"));
    }

    #[test]
    fn test_handle_connection_single_token_is_400() {
        // Sin línea vacía final: no se llegan a leer headers
        let text = exchange(demo_router(), b"GET\r\n");

        assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(text.contains("Connection: close\r\n"));
    }

    #[test]
    fn test_handle_connection_unknown_api_path() {
        let text = exchange(demo_router(), b"GET /app/unknown HTTP/1.1\r\n\r\n");

        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("/app/unknown"));
    }

    #[test]
    fn test_handle_connection_delete_is_405() {
        let text = exchange(demo_router(), b"DELETE /app/hello HTTP/1.1\r\n\r\n");
        assert!(text.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        // Cubre la rama EmptyRequest: no se escribe nada
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();
        let router = Arc::new(Router::new());

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            Server::handle_connection(stream, &router).unwrap();
        });

        drop(TcpStream::connect(addr).unwrap());

        t.join().unwrap();
    }

    #[test]
    fn test_thread_name() {
        let addr: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        assert_eq!(thread_name(Some(addr)), "conn-127.0.0.1:4000");
        assert_eq!(thread_name(None), "conn-unknown");
    }
}
