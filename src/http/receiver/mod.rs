//! # Receivers Incrementales
//! src/http/receiver/mod.rs
//!
//! Un receiver consume un stream con buffer de a una unidad lógica por
//! paso (una línea, o hasta N bytes) y reporta si necesita más datos,
//! si terminó, o si encontró un error de parsing.
//!
//! ## Arquitectura
//!
//! ```text
//! TcpClient::read ──► loop { re-armar deadline; receiver.receive(reader) }
//!                              │
//!                              ├── Ok(Step::Continue) → otro paso
//!                              ├── Ok(Step::Complete) → fin
//!                              └── Err(e)             → se propaga
//! ```
//!
//! Variantes, en el orden en que se usan:
//! - `StatusReceiver`: la status line (un solo paso)
//! - `HeadersReceiver`: una línea de header por paso, hasta la línea vacía
//! - `BodyReceiver::Fixed`: body de largo fijo (`Content-Length`)
//! - `BodyReceiver::Chunked`: body `Transfer-Encoding: chunked`

pub mod body;
pub mod chunked;
pub mod headers;
pub mod status;

pub use body::{BodyReceiver, FixedBodyReceiver};
pub use chunked::ChunkedBodyReceiver;
pub use headers::HeadersReceiver;
pub use status::{StatusLine, StatusReceiver};

use crate::error::{Error, Result};
use std::io::{self, BufRead, Read};

/// Largo máximo de una línea (status, header o tamaño de chunk)
pub const MAX_LINE_LEN: usize = 8 * 1024;

/// Resultado de un paso de parsing que no falló
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Faltan datos: llamar de nuevo con un deadline nuevo
    Continue,

    /// La unidad terminó de parsearse
    Complete,
}

/// Capacidad común: consumir un paso de un stream con buffer
pub trait Receiver {
    fn receive<R: BufRead>(&mut self, reader: &mut R) -> Result<Step>;
}

/// Lee una línea terminada en `\n` (o `\r\n`) sin el terminador
///
/// Un EOF antes del terminador es un error de lectura: el servidor cerró
/// la conexión en medio de la respuesta.
pub(crate) fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = Vec::new();
    let limit = MAX_LINE_LEN as u64 + 2;
    let read = reader
        .by_ref()
        .take(limit)
        .read_until(b'\n', &mut line)
        .map_err(Error::Read)?;

    if line.last() != Some(&b'\n') {
        if read as u64 == limit {
            return Err(Error::Protocol(format!(
                "line exceeds {} bytes",
                MAX_LINE_LEN
            )));
        }
        return Err(Error::Read(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed before end of line",
        )));
    }

    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }

    String::from_utf8(line).map_err(|_| Error::Protocol("line is not valid UTF-8".to_string()))
}
