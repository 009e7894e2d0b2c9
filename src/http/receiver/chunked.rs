//! # Receiver de Body Chunked
//! src/http/receiver/chunked.rs
//!
//! Decodifica `Transfer-Encoding: chunked` como una máquina de estados
//! explícita. Los bytes de cada chunk se acumulan en un
//! `FixedBodyReceiver` que se agranda chunk a chunk.
//!
//! ```text
//!              tamaño > 0                  restante == 0
//! AwaitingSize ──────────► ReadingBody ──────────────► AwaitingTrailer
//!     ▲   │                                                  │
//!     │   │ tamaño == 0                                      │
//!     │   └──────────► Done                                  │
//!     └──────────────────────────────────────────────────────┘
//!                          línea vacía
//! ```
//!
//! Los trailers que siguen al chunk de tamaño 0 no se leen.

use super::{read_line, FixedBodyReceiver, Receiver, Step};
use crate::error::{Error, Result};
use std::io::BufRead;

/// Estado del decodificador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    /// Esperando la línea con el tamaño en hexadecimal
    AwaitingSize,

    /// Leyendo el payload del chunk actual
    ReadingBody { remaining: usize },

    /// Esperando el `\r\n` que cierra el payload
    AwaitingTrailer,

    /// Se recibió el chunk de tamaño 0
    Done,
}

/// Receiver de un body chunked
#[derive(Debug)]
pub struct ChunkedBodyReceiver {
    state: ChunkState,
    body: FixedBodyReceiver,
    total_size: usize,
}

impl Default for ChunkedBodyReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkedBodyReceiver {
    pub fn new() -> Self {
        Self {
            state: ChunkState::AwaitingSize,
            body: FixedBodyReceiver::new(0),
            total_size: 0,
        }
    }

    pub fn state(&self) -> ChunkState {
        self.state
    }

    /// Suma de los tamaños de todos los chunks vistos
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body.into_body()
    }
}

/// Parsea una línea de tamaño de chunk
///
/// Acepta extensiones (`1a;name=value`), que se ignoran. La parte
/// hexadecimal no puede estar vacía.
pub fn parse_chunk_size(line: &str) -> Result<usize> {
    let size = match line.split_once(';') {
        Some((size, _extensions)) => size,
        None => line,
    }
    .trim();

    if size.is_empty() {
        return Err(Error::Protocol("empty chunk size line".to_string()));
    }

    // from_str_radix acepta un signo '+' inicial
    if !size.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::Protocol(format!("invalid chunk size {:?}", size)));
    }

    usize::from_str_radix(size, 16)
        .map_err(|e| Error::Protocol(format!("invalid chunk size {:?}: {}", size, e)))
}

impl Receiver for ChunkedBodyReceiver {
    fn receive<R: BufRead>(&mut self, reader: &mut R) -> Result<Step> {
        match self.state {
            ChunkState::AwaitingSize => {
                let size = parse_chunk_size(&read_line(reader)?)?;

                if size == 0 {
                    self.state = ChunkState::Done;
                    return Ok(Step::Complete);
                }

                self.total_size = self
                    .total_size
                    .checked_add(size)
                    .ok_or_else(|| Error::Protocol("chunked body size overflow".to_string()))?;
                self.body.extend(size)?;
                self.state = ChunkState::ReadingBody { remaining: size };
            }

            ChunkState::ReadingBody { remaining } => {
                let received = self.body.read_step(reader)?;
                let remaining = remaining - received;

                self.state = if remaining == 0 {
                    ChunkState::AwaitingTrailer
                } else {
                    ChunkState::ReadingBody { remaining }
                };
            }

            ChunkState::AwaitingTrailer => {
                let line = read_line(reader)?;
                if !line.is_empty() {
                    return Err(Error::Protocol(format!(
                        "expected line break after chunk data, got {:?}",
                        line
                    )));
                }
                self.state = ChunkState::AwaitingSize;
            }

            ChunkState::Done => return Ok(Step::Complete),
        }

        Ok(Step::Continue)
    }
}
