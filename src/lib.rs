//! # Static Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 concurrente mínimo, implementado desde cero: acepta
//! conexiones TCP, parsea un único GET por conexión, lo mapea a un archivo
//! bajo una raíz de documentos fija y responde con status line, headers y
//! el contenido del archivo.
//!
//! ## Arquitectura
//!
//! - `http`: acumulación de bytes, parsing del request y armado de la respuesta (sin I/O)
//! - `files`: acceso a la raíz de documentos
//! - `router`: request parseado + archivos → resultado (200/404/501)
//! - `server`: loop de accept, un thread por conexión, registro de conexiones
//! - `config`: argumentos de línea de comandos
//! - `error`: errores de conexión y de arranque
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use static_server::config::Config;
//! use static_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(&config).expect("Error al iniciar servidor");
//! server.run();
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod router;
pub mod server;
