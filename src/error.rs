//! # Errores del Servidor
//! src/error.rs
//!
//! Los errores de parsing viven en [`crate::http::request`]; aquí están los
//! que afectan a una conexión completa o al arranque del proceso.

use std::io;
use thiserror::Error;

/// Fallas que terminan una conexión sin respuesta
///
/// Nunca afectan a otras conexiones ni al loop de accept.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Error de lectura o escritura en el socket
    #[error("transport failure: {0}")]
    Io(#[from] io::Error),

    /// El cliente cerró antes de enviar el terminador de headers
    #[error("connection closed after {received} bytes without header terminator")]
    ClosedBeforeHeaders { received: usize },

    /// Se superó el tamaño máximo de headers sin ver el terminador
    #[error("header section exceeds {limit} bytes")]
    HeadersTooLarge { limit: usize },
}

/// Errores fatales al iniciar el servidor
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuración inválida
    #[error("invalid configuration: {0}")]
    Config(String),

    /// No se pudo hacer bind de la dirección
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Otro error de I/O durante el arranque
    #[error(transparent)]
    Io(#[from] io::Error),
}
