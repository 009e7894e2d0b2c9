//! # Módulo de Red
//! src/net/mod.rs
//!
//! Capa de sockets del cliente:
//! 1. Abre una conexión TCP por intercambio
//! 2. Escribe el request completo bajo un timeout por escritura
//! 3. Ejecuta los receivers paso a paso con un deadline por paso
//! 4. Cierra la conexión al terminar, con éxito o con error

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{DeadlineStream, TcpClient};
