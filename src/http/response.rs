//! # Construcción de Respuestas HTTP
//!
//! Arma los bytes exactos de una respuesta HTTP/1.1. Este módulo no hace
//! I/O: recibe el body ya leído y solo da formato.
//!
//! ## Formato
//!
//! El orden de los headers es fijo:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use static_server::http::{ResolvedTarget, Response};
//!
//! let target = ResolvedTarget::File {
//!     content_type: "text/html",
//!     body: b"<h1>Hola</h1>".to_vec(),
//! };
//! let bytes = Response::new(target, false).to_bytes();
//!
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! assert!(bytes.ends_with(b"\r\n\r\n<h1>Hola</h1>"));
//! ```

use super::mime::ERROR_CONTENT_TYPE;
use super::StatusCode;

const HTTP_VERSION: &str = "HTTP/1.1";
const CRLF: &str = "\r\n";

/// Resultado de resolver un request contra la raíz de documentos
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// Archivo encontrado, con su contenido completo
    File {
        content_type: &'static str,
        body: Vec<u8>,
    },

    /// El archivo no existe
    NotFound,

    /// Request no soportado o path rechazado
    NotImplemented,
}

impl ResolvedTarget {
    /// Código de estado de este resultado
    pub fn status(&self) -> StatusCode {
        match self {
            ResolvedTarget::File { .. } => StatusCode::Ok,
            ResolvedTarget::NotFound => StatusCode::NotFound,
            ResolvedTarget::NotImplemented => StatusCode::NotImplemented,
        }
    }

    /// Content-Type que se anunciará
    pub fn content_type(&self) -> &'static str {
        match self {
            ResolvedTarget::File { content_type, .. } => *content_type,
            _ => ERROR_CONTENT_TYPE,
        }
    }

    /// Bytes del body que se enviarán
    pub fn body(&self) -> &[u8] {
        match self {
            ResolvedTarget::File { body, .. } => body.as_slice(),
            other => other
                .status()
                .error_body()
                .map(str::as_bytes)
                .unwrap_or_default(),
        }
    }
}

/// Valor del header `Connection` de la respuesta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionHeader {
    /// El cliente pidió `Connection: Keep-Alive`
    KeepAlive,
    /// Cualquier otro caso
    Close,
}

impl ConnectionHeader {
    /// Texto tal como se escribe en el header
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionHeader::KeepAlive => "Keep-Alive",
            ConnectionHeader::Close => "close",
        }
    }
}

/// Respuesta HTTP/1.1 lista para serializar
#[derive(Debug, Clone)]
pub struct Response {
    target: ResolvedTarget,
    connection: ConnectionHeader,
}

impl Response {
    /// Crea la respuesta para un target resuelto
    ///
    /// `keep_alive` indica si el request pidió `Connection: Keep-Alive`.
    pub fn new(target: ResolvedTarget, keep_alive: bool) -> Self {
        let connection = if keep_alive {
            ConnectionHeader::KeepAlive
        } else {
            ConnectionHeader::Close
        };

        Self { target, connection }
    }

    /// Respuesta 404 con el body fijo
    pub fn not_found(keep_alive: bool) -> Self {
        Self::new(ResolvedTarget::NotFound, keep_alive)
    }

    /// Respuesta 501 con el body fijo
    pub fn not_implemented(keep_alive: bool) -> Self {
        Self::new(ResolvedTarget::NotImplemented, keep_alive)
    }

    /// Headers en el orden en que se escriben
    pub fn headers(&self) -> [(&'static str, String); 3] {
        [
            ("Content-Type", self.target.content_type().to_string()),
            ("Content-Length", self.content_length().to_string()),
            ("Connection", self.connection.as_str().to_string()),
        ]
    }

    /// Serializa la respuesta completa en un solo buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = self.head();
        let body = self.body();

        let mut result = Vec::with_capacity(head.len() + body.len());
        result.extend_from_slice(head.as_bytes());
        result.extend_from_slice(body);
        result
    }

    /// Status line, headers y línea vacía, sin el body
    pub fn head(&self) -> String {
        let status = self.status();
        let mut head = format!("{} {} {}{}", HTTP_VERSION, status.as_u16(), status.reason_phrase(), CRLF);

        for (name, value) in self.headers() {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(&value);
            head.push_str(CRLF);
        }
        head.push_str(CRLF);
        head
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.target.status()
    }

    /// Bytes exactos del body
    pub fn body(&self) -> &[u8] {
        self.target.body()
    }

    /// Valor anunciado en `Content-Length`
    pub fn content_length(&self) -> usize {
        self.body().len()
    }

    /// Valor del header `Connection`
    pub fn connection(&self) -> ConnectionHeader {
        self.connection
    }
}
