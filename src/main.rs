//! # Raw HTTP Server - Entry Point
//! src/main.rs
//!
//! Lee la configuración, registra las rutas y arranca el loop de accept.

use raw_http_server::config::Config;
use raw_http_server::handlers::{api, StaticFiles};
use raw_http_server::logging;
use raw_http_server::router::{Router, STATIC_MOUNT};
use raw_http_server::server::Server;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error fatal: {e}");
        std::process::exit(1);
    }
}

fn run() -> raw_http_server::Result<()> {
    let config = Config::new();
    config.validate()?;
    logging::init(&config.log_level)?;

    let static_root = config.resolve_static_root();
    tracing::info!("Archivos estáticos en: {}", static_root.display());

    let mut router = Router::from_config(&config);
    api::register_routes(&mut router);
    router.get(STATIC_MOUNT, StaticFiles::new(static_root));

    let server = Server::new(config, router);
    server.run()
}
