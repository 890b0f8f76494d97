//! # Resolución de Requests
//! src/router/mod.rs
//!
//! Mapea un request parseado a un archivo bajo la raíz de documentos.
//!
//! ```text
//! Request → Router → FileProbe → ResolvedTarget → Response
//! ```
//!
//! - request line inválida o path rechazado → 501, sin tocar el disco
//! - archivo inexistente → 404
//! - archivo existente → 200 con su contenido completo

use crate::files::FileProbe;
use crate::http::mime::content_type_for;
use crate::http::{Request, ResolvedTarget, Response};

/// Router de archivos estáticos
pub struct Router<P: FileProbe> {
    probe: P,
}

impl<P: FileProbe> Router<P> {
    /// Crea un router sobre un colaborador de archivos
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    /// Colaborador de archivos
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Decide qué se va a responder para un request
    pub fn resolve(&self, request: &Request) -> ResolvedTarget {
        let path = match request.target() {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!(error = %e, "request line rechazada");
                return ResolvedTarget::NotImplemented;
            }
        };

        let Some(info) = self.probe.resolve(path) else {
            return ResolvedTarget::NotFound;
        };

        match self.probe.read(&info) {
            Ok(body) => {
                if body.len() as u64 != info.size {
                    tracing::debug!(
                        path = %info.path.display(),
                        expected = info.size,
                        read = body.len(),
                        "el tamaño cambió durante la lectura"
                    );
                }
                ResolvedTarget::File {
                    content_type: content_type_for(&info.path),
                    body,
                }
            }
            Err(e) => {
                tracing::warn!(path = %info.path.display(), error = %e, "no se pudo leer el archivo");
                ResolvedTarget::NotFound
            }
        }
    }

    /// Resuelve el request y arma la respuesta completa
    pub fn route(&self, request: &Request) -> Response {
        Response::new(self.resolve(request), request.keep_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::FileInfo;
    use crate::http::StatusCode;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;

    /// Sistema de archivos en memoria que registra cada path consultado
    #[derive(Default)]
    struct MemoryProbe {
        files: HashMap<String, Vec<u8>>,
        unreadable: Vec<String>,
        lookups: RefCell<Vec<String>>,
    }

    impl MemoryProbe {
        fn with_file(mut self, path: &str, body: &[u8]) -> Self {
            self.files.insert(path.to_string(), body.to_vec());
            self
        }
    }

    impl FileProbe for MemoryProbe {
        fn resolve(&self, path: &str) -> Option<FileInfo> {
            self.lookups.borrow_mut().push(path.to_string());
            self.files.get(path).map(|body| FileInfo {
                path: PathBuf::from(format!("web{}", path)),
                size: body.len() as u64,
            })
        }

        fn read(&self, info: &FileInfo) -> io::Result<Vec<u8>> {
            let key = info.path.to_string_lossy().trim_start_matches("web").to_string();
            if self.unreadable.contains(&key) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.files
                .get(&key)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }

    #[test]
    fn test_existing_file() {
        let router = Router::new(MemoryProbe::default().with_file("/index.html", b"Hello, world!"));
        let response = router.route(&Request::from_bytes(b"GET /index.html HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_length(), 13);
        assert_eq!(response.body(), b"Hello, world!");
    }

    #[test]
    fn test_root_serves_index() {
        let router = Router::new(MemoryProbe::default().with_file("/index.html", b"home"));
        let target = router.resolve(&Request::from_bytes(b"GET / HTTP/1.1\r\n\r\n"));

        assert_eq!(
            target,
            ResolvedTarget::File {
                content_type: "text/html",
                body: b"home".to_vec()
            }
        );
        assert_eq!(*router.probe().lookups.borrow(), vec!["/index.html".to_string()]);
    }

    #[test]
    fn test_missing_file() {
        let router = Router::new(MemoryProbe::default());
        let response = router.route(&Request::from_bytes(b"GET /missing.html HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_unsupported_method() {
        let router = Router::new(MemoryProbe::default().with_file("/index.html", b"x"));
        let response = router.route(&Request::from_bytes(b"POST / HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::NotImplemented);
        assert!(router.probe().lookups.borrow().is_empty());
    }

    #[test]
    fn test_traversal_never_touches_probe() {
        let router = Router::new(MemoryProbe::default().with_file("/../server.c", b"secret"));
        let response = router.route(&Request::from_bytes(b"GET /../server.c HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::NotImplemented);
        assert!(router.probe().lookups.borrow().is_empty());
    }

    #[test]
    fn test_unreadable_file_is_not_found() {
        let mut probe = MemoryProbe::default().with_file("/locked.html", b"x");
        probe.unreadable.push("/locked.html".to_string());
        let router = Router::new(probe);

        let response = router.route(&Request::from_bytes(b"GET /locked.html HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_content_types() {
        let router = Router::new(
            MemoryProbe::default()
                .with_file("/site.css", b"a{}")
                .with_file("/logo.png", b"\x89PNG")
                .with_file("/notes", b"n"),
        );

        let css = router.resolve(&Request::from_bytes(b"GET /site.css HTTP/1.1\r\n\r\n"));
        let png = router.resolve(&Request::from_bytes(b"GET /logo.png HTTP/1.1\r\n\r\n"));
        let plain = router.resolve(&Request::from_bytes(b"GET /notes HTTP/1.1\r\n\r\n"));

        assert_eq!(css.content_type(), "text/css");
        assert_eq!(png.content_type(), "image/png");
        assert_eq!(plain.content_type(), "text/plain");
    }

    #[test]
    fn test_keep_alive_propagated() {
        let router = Router::new(MemoryProbe::default());
        let response = router.route(&Request::from_bytes(
            b"GET /x HTTP/1.1\r\nConnection: keep-alive\r\n\r\n",
        ));

        assert_eq!(response.connection().as_str(), "Keep-Alive");
    }
}
