//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Loop de accept de un solo thread. Cada conexión aceptada se procesa en
//! su propio thread; los workers solo comparten la raíz de documentos
//! (de solo lectura) y el registro de conexiones.

use crate::config::Config;
use crate::error::ServerError;
use crate::files::DocumentRoot;
use crate::router::Router;
use crate::server::connection::handle_connection;
use crate::server::registry::ConnectionRegistry;
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Servidor HTTP/1.1 de archivos estáticos
pub struct Server {
    listener: TcpListener,
    router: Arc<Router<DocumentRoot>>,
    registry: ConnectionRegistry,
    io_timeout: Option<Duration>,
}

impl Server {
    /// Valida la configuración y hace bind de la dirección
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        config.validate().map_err(ServerError::Config)?;

        let address = config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

        tracing::info!(
            address = %listener.local_addr()?,
            doc_root = %config.doc_root,
            "servidor escuchando"
        );

        Ok(Self {
            listener,
            router: Arc::new(Router::new(DocumentRoot::new(&config.doc_root))),
            registry: ConnectionRegistry::new(),
            io_timeout: config.io_timeout,
        })
    }

    /// Dirección real en la que se escucha (útil con puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Loop de accept; solo termina si el listener deja de entregar conexiones
    ///
    /// Un accept fallido se registra y se ignora.
    pub fn run(&self) {
        self.accept_loop(self.listener.incoming());
    }

    fn accept_loop<I>(&self, incoming: I)
    where
        I: IntoIterator<Item = io::Result<TcpStream>>,
    {
        for stream in incoming {
            match stream {
                Ok(stream) => self.spawn_worker(stream),
                Err(e) => tracing::warn!(error = %e, "error al aceptar conexión"),
            }
        }
    }

    fn spawn_worker(&self, stream: TcpStream) {
        let peer = stream.peer_addr().ok();
        let guard = self.registry.register(peer);
        let router = Arc::clone(&self.router);
        let io_timeout = self.io_timeout;

        tracing::info!(
            connection_id = %guard.id(),
            peer = ?peer,
            active = self.registry.active_count(),
            "nueva conexión"
        );

        let spawned = thread::Builder::new()
            .name(guard.id().to_string())
            .spawn(move || {
                let span = tracing::info_span!("connection", id = %guard.id());
                let _enter = span.enter();

                if let Err(e) = stream
                    .set_read_timeout(io_timeout)
                    .and_then(|()| stream.set_write_timeout(io_timeout))
                {
                    tracing::warn!(error = %e, "no se pudo configurar el timeout");
                }

                match handle_connection(&stream, &router) {
                    Ok(status) => tracing::debug!(status = status.as_u16(), "conexión cerrada"),
                    Err(e) => tracing::warn!(error = %e, "conexión abortada"),
                }
                drop(guard);
            });

        if let Err(e) = spawned {
            tracing::warn!(error = %e, "no se pudo crear el thread del worker");
        }
    }
}
