//! # Raíz de Documentos
//! src/files.rs
//!
//! Acceso al sistema de archivos para servir documentos estáticos. El
//! resto del servidor solo decide *qué* path pedir; este módulo responde
//! si existe, cuánto mide y cuál es su contenido.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Metadata de un archivo resuelto
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Path completo en disco (raíz + path del request)
    pub path: PathBuf,

    /// Tamaño reportado por el sistema de archivos
    pub size: u64,
}

/// Colaborador que resuelve y lee archivos bajo una raíz fija
///
/// Se implementa para [`DocumentRoot`]; los tests pueden usar un
/// implementador en memoria.
pub trait FileProbe {
    /// Resuelve un path de request (`/a/b.html`); `None` si no existe
    fn resolve(&self, path: &str) -> Option<FileInfo>;

    /// Lee el contenido completo de un archivo ya resuelto
    fn read(&self, info: &FileInfo) -> io::Result<Vec<u8>>;
}

/// Directorio base desde el que se sirven los archivos
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
}

impl DocumentRoot {
    /// Crea una raíz de documentos
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::files::DocumentRoot;
    ///
    /// let root = DocumentRoot::new("web");
    /// assert_eq!(root.path().to_str(), Some("web"));
    /// ```
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directorio raíz
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Une el path del request a la raíz
    ///
    /// Las `/` iniciales se descartan para que el resultado siempre sea
    /// relativo a la raíz.
    pub fn join(&self, request_path: &str) -> PathBuf {
        self.root.join(request_path.trim_start_matches('/'))
    }
}

impl FileProbe for DocumentRoot {
    fn resolve(&self, path: &str) -> Option<FileInfo> {
        let full_path = self.join(path);

        // Solo archivos regulares; un directorio cuenta como inexistente
        match fs::metadata(&full_path) {
            Ok(meta) if meta.is_file() => Some(FileInfo {
                path: full_path,
                size: meta.len(),
            }),
            _ => None,
        }
    }

    fn read(&self, info: &FileInfo) -> io::Result<Vec<u8>> {
        fs::read(&info.path)
    }
}
