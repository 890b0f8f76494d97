//! # Módulo HTTP
//!
//! Implementación mínima de HTTP/1.1 desde cero, sin I/O:
//!
//! - Acumulación de bytes y detección del fin de headers
//! - Parsing de la request line y de los headers
//! - Construcción byte a byte de la respuesta
//! - Tabla fija de tipos MIME
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```

pub mod buffer;    // Acumulación de bytes recibidos
pub mod mime;      // Extensión -> Content-Type
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

pub use buffer::RequestBuffer;
pub use request::{HeaderMap, Request, RequestError};
pub use response::{ResolvedTarget, Response};
pub use status::StatusCode;
