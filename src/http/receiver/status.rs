//! # Receiver de Status Line
//! src/http/receiver/status.rs
//!
//! Formato: `<version> <code> <reason...>`, por ejemplo `HTTP/1.1 200 OK`.
//! Una status line se parsea en exactamente un paso.

use super::{read_line, Receiver, Step};
use crate::error::{Error, Result};
use crate::http::StatusCode;
use std::io::BufRead;

/// Versiones HTTP aceptadas en la respuesta
const SUPPORTED_VERSIONS: [&str; 2] = ["HTTP/1.0", "HTTP/1.1"];

/// Status line ya parseada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub version: String,
    pub code: StatusCode,
    pub reason: String,
}

impl StatusLine {
    /// Parsea una status line sin el terminador
    ///
    /// # Errores
    ///
    /// - Menos de 3 partes separadas por espacio
    /// - Versión fuera de `HTTP/1.0`, `HTTP/1.1`
    /// - Código que no es un entero en base 10
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.splitn(3, ' ');
        let (version, code, reason) = match (parts.next(), parts.next(), parts.next()) {
            (Some(version), Some(code), Some(reason)) => (version, code, reason),
            _ => return Err(Error::Protocol(format!("malformed status line {:?}", line))),
        };

        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(Error::Protocol(format!(
                "unsupported HTTP version {:?}",
                version
            )));
        }

        let code = code
            .parse::<u16>()
            .map_err(|e| Error::Protocol(format!("invalid status code {:?}: {}", code, e)))?;

        Ok(StatusLine {
            version: version.to_string(),
            code: StatusCode::new(code),
            reason: reason.to_string(),
        })
    }
}

/// Receiver de la primera línea de la respuesta
#[derive(Debug, Default)]
pub struct StatusReceiver {
    line: Option<StatusLine>,
}

impl StatusReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Código parseado, `None` antes de completar
    pub fn code(&self) -> Option<StatusCode> {
        self.line.as_ref().map(|line| line.code)
    }

    pub fn into_status_line(self) -> Option<StatusLine> {
        self.line
    }
}

impl Receiver for StatusReceiver {
    fn receive<R: BufRead>(&mut self, reader: &mut R) -> Result<Step> {
        let line = read_line(reader)?;
        self.line = Some(StatusLine::parse(&line)?);
        Ok(Step::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{drive, trickle};
    use super::*;

    #[test]
    fn test_parse_ok() {
        let line = StatusLine::parse("HTTP/1.1 200 OK").unwrap();

        assert_eq!(line.version, "HTTP/1.1");
        assert_eq!(line.code.as_u16(), 200);
        assert_eq!(line.reason, "OK");
    }

    #[test]
    fn test_parse_http10_multiword_reason() {
        let line = StatusLine::parse("HTTP/1.0 404 Not Found").unwrap();

        assert_eq!(line.code.as_u16(), 404);
        assert_eq!(line.reason, "Not Found");
    }

    #[test]
    fn test_unsupported_version() {
        let result = StatusLine::parse("HTTP/2.0 200 OK");
        assert!(matches!(result, Err(Error::Protocol(msg)) if msg.contains("HTTP/2.0")));
    }

    #[test]
    fn test_too_few_parts() {
        assert!(matches!(StatusLine::parse("HTTP/1.1 200"), Err(Error::Protocol(_))));
        assert!(matches!(StatusLine::parse(""), Err(Error::Protocol(_))));
    }

    #[test]
    fn test_non_numeric_code() {
        assert!(matches!(
            StatusLine::parse("HTTP/1.1 abc OK"),
            Err(Error::Protocol(_))
        ));
        assert!(matches!(
            StatusLine::parse("HTTP/1.1 -1 OK"),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn test_receiver_completes_in_one_step() {
        let mut receiver = StatusReceiver::new();
        assert_eq!(receiver.code(), None);

        let mut reader: &[u8] = b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\n";
        assert_eq!(receiver.receive(&mut reader).unwrap(), Step::Complete);
        assert_eq!(receiver.code(), Some(StatusCode::new(201)));

        // Solo consume la status line
        assert_eq!(reader, b"Content-Length: 0\r\n");
    }

    #[test]
    fn test_receiver_split_reads() {
        let mut receiver = StatusReceiver::new();
        let mut reader = trickle(b"HTTP/1.1 503 Service Unavailable\r\n", 2);

        assert_eq!(drive(&mut receiver, &mut reader).unwrap(), 1);
        let line = receiver.into_status_line().unwrap();
        assert_eq!(line.code.as_u16(), 503);
        assert_eq!(line.reason, "Service Unavailable");
    }
}
