//! # Receiver de Headers
//! src/http/receiver/headers.rs
//!
//! Un header por paso con formato `Name: Value`. La línea vacía marca el
//! fin del bloque. Los nombres duplicados se sobrescriben.

use super::{read_line, Receiver, Step};
use crate::error::{Error, Result};
use crate::http::Headers;
use std::io::BufRead;

/// Receiver del bloque de headers de la respuesta
#[derive(Debug, Default)]
pub struct HeadersReceiver {
    headers: Headers,
}

impl HeadersReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn into_headers(self) -> Headers {
        self.headers
    }
}

/// Separa una línea `Name: Value` en sus dos partes
///
/// El separador es exactamente `": "` (primera aparición). El nombre no
/// puede estar vacío ni contener espacios o `:`.
pub fn parse_header_line(line: &str) -> Result<(&str, &str)> {
    let (name, value) = line
        .split_once(": ")
        .ok_or_else(|| Error::Protocol(format!("malformed header line {:?}", line)))?;

    if name.is_empty() || name.contains(|c: char| c == ':' || c.is_whitespace()) {
        return Err(Error::Protocol(format!("invalid header name {:?}", name)));
    }

    Ok((name, value))
}

impl Receiver for HeadersReceiver {
    fn receive<R: BufRead>(&mut self, reader: &mut R) -> Result<Step> {
        let line = read_line(reader)?;

        if line.is_empty() {
            return Ok(Step::Complete);
        }

        let (name, value) = parse_header_line(&line)?;
        self.headers.insert(name, value);
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{drive, trickle};
    use super::*;

    #[test]
    fn test_parse_header_line() {
        assert_eq!(
            parse_header_line("Content-Type: text/html").unwrap(),
            ("Content-Type", "text/html")
        );
        assert_eq!(
            parse_header_line("Date: Mon, 01 Jan 2024 10:00:00 GMT").unwrap(),
            ("Date", "Mon, 01 Jan 2024 10:00:00 GMT")
        );
        assert_eq!(parse_header_line("X-Empty: ").unwrap(), ("X-Empty", ""));
    }

    #[test]
    fn test_malformed_header_lines() {
        for line in ["NoSeparator", "Name:value", ": value", "Bad Name: value"] {
            assert!(
                matches!(parse_header_line(line), Err(Error::Protocol(_))),
                "line {:?} should be rejected",
                line
            );
        }
    }

    #[test]
    fn test_one_header_per_step() {
        let mut receiver = HeadersReceiver::new();
        let mut reader: &[u8] = b"Content-Length: 5\r\nServer: test\r\n\r\nhello";

        assert_eq!(receiver.receive(&mut reader).unwrap(), Step::Continue);
        assert_eq!(receiver.receive(&mut reader).unwrap(), Step::Continue);
        assert_eq!(receiver.receive(&mut reader).unwrap(), Step::Complete);

        // El body queda sin consumir
        assert_eq!(reader, b"hello");

        let headers = receiver.into_headers();
        assert_eq!(headers.get("Content-Length"), Some("5"));
        assert_eq!(headers.get("Server"), Some("test"));
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let mut receiver = HeadersReceiver::new();
        let mut reader = trickle(b"X-Id: 1\r\nX-Id: 2\r\n\r\n", 3);

        assert_eq!(drive(&mut receiver, &mut reader).unwrap(), 3);
        assert_eq!(receiver.headers().get("X-Id"), Some("2"));
        assert_eq!(receiver.headers().len(), 1);
    }

    #[test]
    fn test_malformed_line_stops_parsing() {
        let mut receiver = HeadersReceiver::new();
        let mut reader: &[u8] = b"Good: yes\r\nbroken\r\n\r\n";

        let err = drive(&mut receiver, &mut reader).unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
        assert_eq!(receiver.headers().get("Good"), Some("yes"));
    }

    #[test]
    fn test_eof_before_blank_line() {
        let mut receiver = HeadersReceiver::new();
        let mut reader: &[u8] = b"Content-Length: 5\r\n";

        let err = drive(&mut receiver, &mut reader).unwrap_err();
        assert!(matches!(err, Error::Read(_)));
    }
}
