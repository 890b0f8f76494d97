//! # Registro de Conexiones Activas
//! src/server/registry.rs
//!
//! Lleva la cuenta de las conexiones vivas para diagnóstico. Cada worker
//! se registra al empezar y recibe un [`ConnectionGuard`]; al soltarlo
//! (fin normal, error o panic) la conexión sale del registro.
//!
//! El parsing y la construcción de respuestas no dependen de este módulo.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Identificador único de una conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Valor numérico del id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Datos de una conexión viva
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub id: ConnectionId,
    pub peer: Option<SocketAddr>,
    pub started: Instant,
}

impl ConnectionInfo {
    /// Tiempo que lleva abierta la conexión
    pub fn age(&self) -> Duration {
        self.started.elapsed()
    }
}

#[derive(Default)]
struct RegistryData {
    active: HashMap<ConnectionId, ConnectionInfo>,
    total: u64,
}

/// Registro thread-safe de conexiones activas
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<Mutex<RegistryData>>,
    next_id: Arc<AtomicU64>,
}

impl ConnectionRegistry {
    /// Crea un registro vacío
    pub fn new() -> Self {
        Self::default()
    }

    // Un worker que hizo panic no debe dejar el registro inutilizable
    fn lock(&self) -> MutexGuard<'_, RegistryData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registra una conexión nueva
    pub fn register(&self, peer: Option<SocketAddr>) -> ConnectionGuard {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let info = ConnectionInfo {
            id,
            peer,
            started: Instant::now(),
        };

        let mut data = self.lock();
        data.active.insert(id, info);
        data.total += 1;

        ConnectionGuard {
            registry: self.clone(),
            id,
        }
    }

    fn deregister(&self, id: ConnectionId) -> Option<ConnectionInfo> {
        self.lock().active.remove(&id)
    }

    /// Número de conexiones abiertas en este momento
    pub fn active_count(&self) -> usize {
        self.lock().active.len()
    }

    /// Total de conexiones registradas desde el arranque
    pub fn total_count(&self) -> u64 {
        self.lock().total
    }
}

/// Guard de una conexión registrada; la elimina del registro al soltarse
pub struct ConnectionGuard {
    registry: ConnectionRegistry,
    id: ConnectionId,
}

impl ConnectionGuard {
    /// Id asignado al registrarse
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let Some(info) = self.registry.deregister(self.id) else {
            return;
        };
        tracing::debug!(
            connection_id = %info.id,
            peer = ?info.peer,
            age = ?info.age(),
            active = self.registry.active_count(),
            total = self.registry.total_count(),
            "conexión eliminada del registro"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_register_and_drop() {
        let registry = ConnectionRegistry::new();
        assert_eq!(registry.active_count(), 0);

        let first = registry.register(None);
        let second = registry.register(Some("127.0.0.1:9000".parse().unwrap()));
        assert_eq!(registry.active_count(), 2);
        assert_ne!(first.id(), second.id());

        drop(first);
        assert_eq!(registry.active_count(), 1);

        drop(second);
        assert_eq!(registry.active_count(), 0);
        assert_eq!(registry.total_count(), 2);
    }

    #[test]
    fn test_deregister_returns_info() {
        let registry = ConnectionRegistry::new();
        let peer: SocketAddr = "127.0.0.1:9001".parse().unwrap();
        let guard = registry.register(Some(peer));

        thread::sleep(Duration::from_millis(20));
        let info = registry.deregister(guard.id()).unwrap();
        assert_eq!(info.id, guard.id());
        assert_eq!(info.peer, Some(peer));
        assert!(info.age() >= Duration::from_millis(20));
        assert_eq!(registry.active_count(), 0);

        // El guard ya no encuentra su entrada y no falla al soltarse
        drop(guard);
        assert!(registry.deregister(ConnectionId(1)).is_none());
        assert_eq!(registry.total_count(), 1);
    }

    #[test]
    fn test_concurrent_workers() {
        let registry = ConnectionRegistry::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let _guard = registry.register(None);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.active_count(), 0);
        assert_eq!(registry.total_count(), 400);
    }

    #[test]
    fn test_guard_released_on_panic() {
        let registry = ConnectionRegistry::new();

        let worker = {
            let registry = registry.clone();
            thread::spawn(move || {
                let _guard = registry.register(None);
                panic!("worker falló");
            })
        };

        assert!(worker.join().is_err());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_id_display() {
        let registry = ConnectionRegistry::new();
        let guard = registry.register(None);
        assert_eq!(guard.id().to_string(), format!("conn-{}", guard.id().as_u64()));
    }
}
