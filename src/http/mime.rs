//! # Tipos MIME
//!
//! Tabla fija y pequeña de extensiones. Cualquier extensión desconocida,
//! o un archivo sin extensión, se sirve como `text/plain`.
//!
//! La extensión es el texto después del último `.` del nombre del archivo,
//! así que un archivo oculto como `.html` también es `text/html`.

use std::path::Path;

/// Content-Type por defecto para archivos existentes sin extensión conocida
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Content-Type de los bodies de error (404 y 501)
pub const ERROR_CONTENT_TYPE: &str = "text/html";

/// Obtiene el Content-Type a partir de la extensión del archivo
///
/// La comparación de la extensión ignora mayúsculas.
///
/// # Ejemplo
/// ```
/// use std::path::Path;
/// use static_server::http::mime::content_type_for;
///
/// assert_eq!(content_type_for(Path::new("web/index.html")), "text/html");
/// assert_eq!(content_type_for(Path::new("web/LICENSE")), "text/plain");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let Some((_, ext)) = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
    else {
        return DEFAULT_CONTENT_TYPE;
    };

    match ext.to_ascii_lowercase().as_str() {
        "html" => "text/html",
        "css" => "text/css",
        "jpg" => "image/jpeg",
        "png" => "image/png",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
