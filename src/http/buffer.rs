//! # Buffer de Acumulación del Request
//! src/http/buffer.rs
//!
//! Los bytes de un request llegan en chunks de tamaño arbitrario. El
//! terminador `\r\n\r\n` puede quedar partido entre dos lecturas, así que
//! la detección siempre corre sobre el buffer completo acumulado.
//!
//! El buffer nunca se destruye mientras se separa en líneas: un cursor
//! avanza sobre las líneas completas y la última línea parcial queda
//! intacta para la siguiente lectura.

use memchr::memmem;

/// Secuencia que marca el fin de la sección de headers
pub const TERMINATOR: &[u8] = b"\r\n\r\n";

/// Separador de líneas HTTP
const CRLF: &[u8] = b"\r\n";

/// Verifica si el terminador aparece en cualquier parte del buffer
///
/// # Ejemplo
/// ```
/// use static_server::http::buffer::is_complete;
///
/// assert!(is_complete(b"GET / HTTP/1.1\r\n\r\n"));
/// assert!(!is_complete(b"GET / HTTP/1.1\r\n\r"));
/// ```
pub fn is_complete(buffer: &[u8]) -> bool {
    memmem::find(buffer, TERMINATOR).is_some()
}

/// Buffer append-only de los bytes recibidos por una conexión
#[derive(Debug, Default, Clone)]
pub struct RequestBuffer {
    /// Todos los bytes recibidos hasta ahora
    bytes: Vec<u8>,

    /// Inicio de la primera línea aún no consumida
    cursor: usize,
}

impl RequestBuffer {
    /// Crea un buffer vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea un buffer a partir de bytes ya recibidos
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            cursor: 0,
        }
    }

    /// Agrega un chunk recibido al final del buffer
    pub fn extend(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    /// Verifica si ya llegó la sección de headers completa
    pub fn is_complete(&self) -> bool {
        is_complete(&self.bytes)
    }

    /// Total de bytes acumulados
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Indica si todavía no se ha recibido nada
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Retorna la siguiente línea completa (sin `\r\n`) y avanza el cursor
    ///
    /// Si el resto del buffer no contiene un `\r\n`, retorna `None` y deja
    /// la línea parcial en su lugar.
    pub fn next_line(&mut self) -> Option<&[u8]> {
        let rest = &self.bytes[self.cursor..];
        let end = memmem::find(rest, CRLF)?;

        let start = self.cursor;
        self.cursor += end + CRLF.len();
        Some(&self.bytes[start..start + end])
    }

    /// Bytes pendientes que aún no forman una línea completa
    pub fn remaining(&self) -> &[u8] {
        &self.bytes[self.cursor..]
    }
}
