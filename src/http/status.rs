//! # Códigos de Estado HTTP
//!
//! Este servidor solo produce tres códigos:
//!
//! - **200 OK**: el archivo existe y se envía completo
//! - **404 Not Found**: el archivo no existe bajo la raíz de documentos
//! - **501 Not Implemented**: método distinto de GET, request line
//!   malformada o path rechazado

/// Body HTML fijo para respuestas 404
pub const NOT_FOUND_BODY: &str = "<html><head><title>404 Not Found</title></head><body><h1>404 Not Found</h1>The requested resource could not be found but may be available again in the future.<div style=\"color: #eeeeee; font-size: 8pt;\">Actually, it probably won't ever be available unless this is showing up because of a bug in your program. :(</div></html>";

/// Body HTML fijo para respuestas 501
pub const NOT_IMPLEMENTED_BODY: &str = "<html><head><title>501 Not Implemented</title></head><body><h1>501 Not Implemented</h1>The server either does not recognise the request method, or it lacks the ability to fulfill the request.</body></html>";

/// Códigos de estado que soporta el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - El archivo fue encontrado
    Ok = 200,

    /// 404 Not Found - El archivo no existe
    NotFound = 404,

    /// 501 Not Implemented - Request no soportado o path inválido
    NotImplemented = 501,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::StatusCode;
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el reason phrase asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    /// Body HTML fijo de los códigos de error; `None` para 200
    pub fn error_body(&self) -> Option<&'static str> {
        match self {
            StatusCode::Ok => None,
            StatusCode::NotFound => Some(NOT_FOUND_BODY),
            StatusCode::NotImplemented => Some(NOT_IMPLEMENTED_BODY),
        }
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
