//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser sin I/O: transforma los bytes acumulados de una conexión en un
//! [`Request`] y nada más.
//!
//! ## Formato aceptado
//!
//! ```text
//! GET /path HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Connection: Keep-Alive\r\n
//! \r\n
//! ```
//!
//! ## Políticas
//!
//! - Solo se acepta `GET`; cualquier otro método termina en 501.
//! - Un path que contenga `..` se rechaza antes de tocar el disco.
//! - No se decodifican escapes `%xx`: `/a%20b.html` busca literalmente
//!   el archivo `a%20b.html`.
//! - Headers: la clave se guarda tal como llega, al valor se le quitan
//!   los espacios de los extremos, y una clave repetida sobrescribe a la
//!   anterior.
//! - Una línea de header sin `:` se ignora; no invalida el request.

use super::buffer::RequestBuffer;
use thiserror::Error;

/// Token de método con su espacio separador
const GET_TOKEN: &str = "GET ";

/// Prefijo obligatorio del token de versión
const VERSION_PREFIX: &str = "HTTP/";

/// Path que se reemplaza por el documento por defecto
const ROOT_PATH: &str = "/";

/// Documento por defecto de la raíz
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// Errores de la request line. Todos se responden con 501.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// No llegó ninguna request line
    #[error("Empty request")]
    EmptyRequest,

    /// La request line no es UTF-8 válido
    #[error("Request line is not valid UTF-8")]
    InvalidEncoding,

    /// La request line contiene terminadores de línea embebidos
    #[error("Invalid request line format")]
    InvalidRequestLine,

    /// El método no es GET
    #[error("Unsupported HTTP method in: {0}")]
    UnsupportedMethod(String),

    /// Falta el token de versión HTTP
    #[error("Missing HTTP version token")]
    MissingVersion,

    /// Path vacío o que no empieza con `/`
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    /// Intento de salir de la raíz de documentos
    #[error("Path traversal rejected: {0}")]
    PathTraversal(String),
}

/// Línea de header que no se pudo interpretar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid header line: {0:?}")]
pub struct HeaderLineError(pub String);

/// Mapa de headers del request
///
/// Las claves se guardan tal como llegaron; la búsqueda con [`HeaderMap::get`]
/// ignora mayúsculas y retorna el valor escrito más recientemente.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Crea un mapa vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta un header; si la clave exacta ya existe, se sobrescribe
    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries.retain(|(key, _)| key != name);
        self.entries.push((name.to_string(), value.to_string()));
    }

    /// Busca un header sin distinguir mayúsculas
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::request::HeaderMap;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("Connection", "Keep-Alive");
    /// assert_eq!(headers.get("connection"), Some("Keep-Alive"));
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Cantidad de headers almacenados
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Indica si no hay headers
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Itera los headers en orden de inserción
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parsea la request line y extrae el path solicitado
///
/// La línea no debe incluir el `\r\n` final.
///
/// # Ejemplo
/// ```
/// use static_server::http::request::parse_request_line;
///
/// assert_eq!(parse_request_line("GET /index.html HTTP/1.1").unwrap(), "/index.html");
/// assert!(parse_request_line("POST / HTTP/1.1").is_err());
/// assert!(parse_request_line("GET /../secret HTTP/1.1").is_err());
/// ```
pub fn parse_request_line(line: &str) -> Result<String, RequestError> {
    if line.is_empty() {
        return Err(RequestError::EmptyRequest);
    }

    if line.contains(['\r', '\n']) {
        return Err(RequestError::InvalidRequestLine);
    }

    let Some(rest) = line.strip_prefix(GET_TOKEN) else {
        return Err(RequestError::UnsupportedMethod(line.to_string()));
    };

    // El path puede contener espacios; la versión es el último token
    let (path, version) = rest
        .rsplit_once(' ')
        .ok_or(RequestError::MissingVersion)?;

    if !version.starts_with(VERSION_PREFIX) {
        return Err(RequestError::MissingVersion);
    }

    if !path.starts_with('/') {
        return Err(RequestError::InvalidPath(path.to_string()));
    }

    if path.contains("..") {
        return Err(RequestError::PathTraversal(path.to_string()));
    }

    Ok(path.to_string())
}

/// Parsea una línea de header y la guarda en el mapa
///
/// Separa en el primer `:`. Al valor se le quitan los espacios de los
/// extremos; la clave se guarda sin modificar.
pub fn parse_header_line(line: &str, headers: &mut HeaderMap) -> Result<(), HeaderLineError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| HeaderLineError(line.to_string()))?;

    if name.is_empty() {
        return Err(HeaderLineError(line.to_string()));
    }

    headers.insert(name, value.trim());
    Ok(())
}

/// Reemplaza el path raíz `/` por el documento por defecto
///
/// # Ejemplo
/// ```
/// use static_server::http::request::normalize_root_path;
///
/// assert_eq!(normalize_root_path("/"), "/index.html");
/// assert_eq!(normalize_root_path("/style.css"), "/style.css");
/// ```
pub fn normalize_root_path(path: &str) -> String {
    if path == ROOT_PATH {
        format!("{}{}", ROOT_PATH, DEFAULT_DOCUMENT)
    } else {
        path.to_string()
    }
}

/// Request HTTP parseado
///
/// Aunque la request line sea inválida, los headers se conservan: el
/// header `Connection` se refleja también en las respuestas 501.
#[derive(Debug, Clone)]
pub struct Request {
    /// Path normalizado, o el motivo por el que no hay path utilizable
    target: Result<String, RequestError>,

    /// Headers del request
    headers: HeaderMap,
}

impl Request {
    /// Parsea la sección de headers consumiendo líneas del buffer
    ///
    /// Se detiene en la línea vacía; lo que venga después se ignora.
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::buffer::RequestBuffer;
    /// use static_server::http::Request;
    ///
    /// let mut buffer = RequestBuffer::from_bytes(b"GET / HTTP/1.1\r\nHost: a\r\n\r\n");
    /// let request = Request::parse(&mut buffer);
    ///
    /// assert_eq!(request.path(), Some("/index.html"));
    /// assert_eq!(request.header("host"), Some("a"));
    /// ```
    pub fn parse(buffer: &mut RequestBuffer) -> Self {
        let target = match buffer.next_line() {
            Some(line) => match std::str::from_utf8(line) {
                Ok(line) => parse_request_line(line).map(|path| normalize_root_path(&path)),
                Err(_) => Err(RequestError::InvalidEncoding),
            },
            None => Err(RequestError::EmptyRequest),
        };

        let mut headers = HeaderMap::new();
        while let Some(line) = buffer.next_line() {
            if line.is_empty() {
                break;
            }

            let parsed = std::str::from_utf8(line)
                .map_err(|_| HeaderLineError(String::from_utf8_lossy(line).into_owned()))
                .and_then(|line| parse_header_line(line, &mut headers));

            if let Err(e) = parsed {
                tracing::debug!(error = %e, "header ignorado");
            }
        }

        Self { target, headers }
    }

    /// Parsea directamente desde bytes (útil en tests)
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::parse(&mut RequestBuffer::from_bytes(bytes))
    }

    /// Path solicitado, si la request line fue aceptada
    pub fn path(&self) -> Option<&str> {
        self.target.as_deref().ok()
    }

    /// Path solicitado o el error de la request line
    pub fn target(&self) -> Result<&str, &RequestError> {
        self.target.as_deref()
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Obtiene un header específico, sin distinguir mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Indica si el cliente pidió `Connection: Keep-Alive`
    pub fn keep_alive(&self) -> bool {
        self.header("Connection")
            .is_some_and(|value| value.eq_ignore_ascii_case("Keep-Alive"))
    }
}
