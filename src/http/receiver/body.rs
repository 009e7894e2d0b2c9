//! # Receivers de Body
//! src/http/receiver/body.rs
//!
//! - `FixedBodyReceiver`: body de largo conocido (`Content-Length: N`).
//!   Nunca lee más de N bytes aunque el stream ofrezca más.
//! - `BodyReceiver`: la estrategia elegida a partir de los headers.

use super::{ChunkedBodyReceiver, Receiver, Step};
use crate::error::{Error, Result};
use crate::http::Headers;
use std::io::{self, BufRead};

/// Capacidad inicial máxima del buffer del body
///
/// El largo declarado por el servidor no se usa para reservar memoria:
/// el buffer crece a medida que llegan bytes.
pub const INITIAL_BODY_CAPACITY: usize = 64 * 1024;

/// Acumulador de un body de largo fijo
///
/// Invariante: `body.len() <= expected`; nunca se consume más de lo
/// declarado.
#[derive(Debug, Default)]
pub struct FixedBodyReceiver {
    body: Vec<u8>,
    expected: usize,
}

impl FixedBodyReceiver {
    pub fn new(length: usize) -> Self {
        Self {
            body: Vec::with_capacity(length.min(INITIAL_BODY_CAPACITY)),
            expected: length,
        }
    }

    /// Bytes que faltan por leer
    pub fn remaining(&self) -> usize {
        self.expected - self.body.len()
    }

    /// Bytes leídos hasta ahora
    pub fn read_so_far(&self) -> usize {
        self.body.len()
    }

    /// Agranda el largo esperado en `additional` bytes
    pub(crate) fn extend(&mut self, additional: usize) -> Result<()> {
        self.expected = self
            .expected
            .checked_add(additional)
            .ok_or_else(|| Error::Protocol("body length overflow".to_string()))?;
        Ok(())
    }

    /// Una lectura del stream hacia el buffer, acotada a lo pendiente
    ///
    /// Retorna cuántos bytes se copiaron. Un EOF con bytes pendientes es
    /// un error de lectura.
    pub(crate) fn read_step<R: BufRead>(&mut self, reader: &mut R) -> Result<usize> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Ok(0);
        }

        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(0),
            Err(e) => return Err(Error::Read(e)),
        };

        if available.is_empty() {
            return Err(Error::Read(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("connection closed with {} body bytes pending", remaining),
            )));
        }

        let received = available.len().min(remaining);
        self.body
            .try_reserve(received)
            .map_err(|e| Error::Read(io::Error::new(io::ErrorKind::OutOfMemory, e)))?;
        self.body.extend_from_slice(&available[..received]);
        reader.consume(received);

        Ok(received)
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

impl Receiver for FixedBodyReceiver {
    fn receive<R: BufRead>(&mut self, reader: &mut R) -> Result<Step> {
        self.read_step(reader)?;

        if self.remaining() == 0 {
            Ok(Step::Complete)
        } else {
            Ok(Step::Continue)
        }
    }
}

/// Estrategia de lectura del body
#[derive(Debug)]
pub enum BodyReceiver {
    Fixed(FixedBodyReceiver),
    Chunked(ChunkedBodyReceiver),
}

impl BodyReceiver {
    /// Elige la estrategia a partir de los headers de la respuesta
    ///
    /// 1. `Transfer-Encoding` presente: debe ser exactamente `chunked`
    /// 2. Si no, `Content-Length` debe existir y ser un entero no negativo
    ///
    /// # Ejemplo
    /// ```
    /// use mycurl::http::Headers;
    /// use mycurl::http::receiver::BodyReceiver;
    ///
    /// let mut headers = Headers::new();
    /// headers.insert("Transfer-Encoding", "chunked");
    ///
    /// let receiver = BodyReceiver::from_headers(&headers).unwrap();
    /// assert!(matches!(receiver, BodyReceiver::Chunked(_)));
    /// ```
    pub fn from_headers(headers: &Headers) -> Result<Self> {
        if let Some(encoding) = headers.get("Transfer-Encoding") {
            if encoding != "chunked" {
                return Err(Error::UnsupportedEncoding(encoding.to_string()));
            }
            return Ok(BodyReceiver::Chunked(ChunkedBodyReceiver::new()));
        }

        let length = headers
            .get("Content-Length")
            .ok_or_else(|| Error::MissingLength("no Content-Length header".to_string()))?;

        // parse::<usize> acepta un signo '+' inicial
        if length.is_empty() || !length.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MissingLength(format!(
                "invalid Content-Length {:?}",
                length
            )));
        }

        let length = length.parse::<usize>().map_err(|e| {
            Error::MissingLength(format!("invalid Content-Length {:?}: {}", length, e))
        })?;

        Ok(BodyReceiver::Fixed(FixedBodyReceiver::new(length)))
    }

    pub fn into_body(self) -> Vec<u8> {
        match self {
            BodyReceiver::Fixed(receiver) => receiver.into_body(),
            BodyReceiver::Chunked(receiver) => receiver.into_body(),
        }
    }
}

impl Receiver for BodyReceiver {
    fn receive<R: BufRead>(&mut self, reader: &mut R) -> Result<Step> {
        match self {
            BodyReceiver::Fixed(receiver) => receiver.receive(reader),
            BodyReceiver::Chunked(receiver) => receiver.receive(reader),
        }
    }
}
