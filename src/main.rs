//! # Static Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: `static_server <PORT>`.

use static_server::config::Config;
use static_server::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "static_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Sin puerto, clap imprime el uso y termina con código distinto de cero
    let config = Config::new();

    let server = match Server::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "error fatal");
            std::process::exit(1);
        }
    };

    server.run();
}
