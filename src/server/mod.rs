//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes, un thread por conexión
//! 3. Acumula bytes hasta ver el fin de los headers
//! 4. Genera y envía la respuesta, y cierra la conexión

pub mod connection;
pub mod registry;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{handle_connection, Connection, ConnectionState};
pub use registry::{ConnectionGuard, ConnectionId, ConnectionRegistry};
pub use tcp::Server;
