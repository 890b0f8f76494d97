//! # Manejo de una Conexión
//! src/server/connection.rs
//!
//! Máquina de estados que procesa exactamente un request por conexión:
//!
//! ```text
//! AwaitingHeaders ──(terminador visto)──▶ HeadersComplete ──▶ Responding ──▶ Closed
//!        │                                                                    ▲
//!        └──────────────(EOF / error de lectura / headers muy grandes)───────┘
//! ```
//!
//! Es genérica sobre `Read + Write` para poder probarla con streams en
//! memoria que entregan los bytes en chunks arbitrarios.

use crate::error::ConnectionError;
use crate::files::FileProbe;
use crate::http::{Request, RequestBuffer, StatusCode};
use crate::router::Router;
use std::io::{ErrorKind, Read, Write};

/// Bytes pedidos al socket en cada lectura
pub const READ_CHUNK_SIZE: usize = 512;

/// Máximo de bytes aceptados antes de ver el terminador
pub const MAX_HEADER_BYTES: usize = 16 * 1024;

/// Estado de una conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Acumulando bytes hasta ver `\r\n\r\n`
    AwaitingHeaders,
    /// Headers completos, listos para parsear
    HeadersComplete,
    /// Escribiendo la respuesta
    Responding,
    /// Conexión terminada
    Closed,
}

/// Una conexión aceptada y su buffer de acumulación
pub struct Connection<S> {
    stream: S,
    buffer: RequestBuffer,
    state: ConnectionState,
}

impl<S: Read + Write> Connection<S> {
    /// Envuelve un stream recién aceptado, en estado `AwaitingHeaders`
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: RequestBuffer::new(),
            state: ConnectionState::AwaitingHeaders,
        }
    }

    /// Estado actual
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Stream subyacente
    pub fn stream(&self) -> &S {
        &self.stream
    }

    /// Procesa la conexión completa y termina siempre en `Closed`
    ///
    /// Retorna el status enviado, o el error que obligó a cerrar sin
    /// respuesta completa.
    pub fn serve<P: FileProbe>(&mut self, router: &Router<P>) -> Result<StatusCode, ConnectionError> {
        let result = self.read_headers().and_then(|()| self.respond(router));
        self.state = ConnectionState::Closed;
        result
    }

    /// Lee chunks hasta que el buffer acumulado contenga el terminador
    ///
    /// `AwaitingHeaders → HeadersComplete`, o `Closed` si el cliente cierra,
    /// falla la lectura o se supera [`MAX_HEADER_BYTES`].
    pub fn read_headers(&mut self) -> Result<(), ConnectionError> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        while self.state == ConnectionState::AwaitingHeaders {
            let n = match self.stream.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.state = ConnectionState::Closed;
                    return Err(ConnectionError::Io(e));
                }
            };

            if n == 0 {
                self.state = ConnectionState::Closed;
                if self.buffer.is_empty() {
                    tracing::debug!("el cliente cerró sin enviar datos");
                }
                return Err(ConnectionError::ClosedBeforeHeaders {
                    received: self.buffer.len(),
                });
            }

            self.buffer.extend(&chunk[..n]);
            tracing::trace!(bytes = n, total = self.buffer.len(), "chunk recibido");

            // Se revisa el buffer completo: el terminador puede venir partido
            if self.buffer.is_complete() {
                self.state = ConnectionState::HeadersComplete;
            } else if self.buffer.len() > MAX_HEADER_BYTES {
                self.state = ConnectionState::Closed;
                return Err(ConnectionError::HeadersTooLarge {
                    limit: MAX_HEADER_BYTES,
                });
            }
        }

        Ok(())
    }

    /// Parsea, resuelve y escribe la respuesta en una sola escritura
    ///
    /// `HeadersComplete → Responding → Closed`. Una escritura fallida no
    /// se reintenta.
    pub fn respond<P: FileProbe>(&mut self, router: &Router<P>) -> Result<StatusCode, ConnectionError> {
        debug_assert_eq!(self.state, ConnectionState::HeadersComplete);

        let request = Request::parse(&mut self.buffer);
        match request.target() {
            Ok(path) => tracing::info!(path, "GET"),
            Err(e) => tracing::info!(error = %e, "request no soportado"),
        }

        let response = router.route(&request);
        self.state = ConnectionState::Responding;
        tracing::debug!(head = %response.head().trim_end(), "respuesta");

        let written = self
            .stream
            .write_all(&response.to_bytes())
            .and_then(|()| self.stream.flush());
        self.state = ConnectionState::Closed;
        written?;

        tracing::info!(
            status = response.status().as_u16(),
            content_length = response.content_length(),
            "respuesta enviada"
        );
        Ok(response.status())
    }
}

/// Atiende una conexión completa con el router dado
pub fn handle_connection<S, P>(stream: S, router: &Router<P>) -> Result<StatusCode, ConnectionError>
where
    S: Read + Write,
    P: FileProbe,
{
    Connection::new(stream).serve(router)
}
