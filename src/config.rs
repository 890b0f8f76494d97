//! # Configuración del Servidor
//! src/config.rs
//!
//! El único argumento de línea de comandos es el puerto. La raíz de
//! documentos y el resto de valores son fijos.
//!
//! ## Ejemplo de uso
//!
//! ```bash
//! ./static_server 8080
//! ```

use clap::Parser;
use std::time::Duration;

/// Raíz de documentos fija
pub const DEFAULT_DOC_ROOT: &str = "web";

/// Host en el que se escucha (todas las interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Deadline por defecto de lectura/escritura de cada conexión
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "static_server")]
#[command(about = "Servidor HTTP/1.1 concurrente de archivos estáticos")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(value_name = "PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(skip = String::from(DEFAULT_HOST))]
    pub host: String,

    /// Directorio desde el que se sirven los archivos
    #[arg(skip = String::from(DEFAULT_DOC_ROOT))]
    pub doc_root: String,

    /// Deadline de lectura/escritura por conexión (`None` = sin límite)
    #[arg(skip = Some(DEFAULT_IO_TIMEOUT))]
    pub io_timeout: Option<Duration>,
}

impl Config {
    /// Crea la configuración parseando los argumentos del proceso
    ///
    /// Si falta el puerto, clap imprime el uso y termina el proceso con
    /// código distinto de cero.
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use static_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), String> {
        if self.doc_root.is_empty() {
            return Err("Document root must not be empty".to_string());
        }

        if self.io_timeout.is_some_and(|t| t.is_zero()) {
            return Err("IO timeout must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: DEFAULT_HOST.to_string(),
            doc_root: DEFAULT_DOC_ROOT.to_string(),
            io_timeout: Some(DEFAULT_IO_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.doc_root, "web");
        assert_eq!(config.io_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_parse_port_positional() {
        let config = Config::try_parse_from(["static_server", "3000"]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.doc_root, "web");
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_missing_port_is_error() {
        assert!(Config::try_parse_from(["static_server"]).is_err());
    }

    #[test]
    fn test_invalid_port_is_error() {
        assert!(Config::try_parse_from(["static_server", "http"]).is_err());
        assert!(Config::try_parse_from(["static_server", "70000"]).is_err());
    }

    #[test]
    fn test_no_flags_accepted() {
        assert!(Config::try_parse_from(["static_server", "8080", "--root", "/tmp"]).is_err());
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.io_timeout = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_root() {
        let mut config = Config::default();
        config.doc_root = String::new();
        let result = config.validate();
        assert!(result.unwrap_err().contains("Document root"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.io_timeout = Some(Duration::ZERO);
        let result = config.validate();
        assert!(result.unwrap_err().contains("IO timeout"));
    }
}
