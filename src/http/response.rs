//! # Respuestas HTTP
//! src/http/response.rs
//!
//! Una `Response` se construye solo después de parsear completo un
//! intercambio (status line, headers y body) y es inmutable desde ahí.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use mycurl::http::{Headers, Response, StatusCode};
//!
//! let mut headers = Headers::new();
//! headers.insert("Content-Length", "5");
//!
//! let response = Response::new(StatusCode::new(200), "OK", headers, b"hello".to_vec());
//! assert_eq!(response.status().as_u16(), 200);
//! assert_eq!(response.body_string().as_deref(), Some("hello"));
//! ```

use super::{Headers, StatusCode};
use serde::{Serialize, Serializer};

/// Respuesta HTTP recibida del servidor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Código de estado (200, 404, etc.)
    status: StatusCode,

    /// Texto de razón tal como vino en la status line
    reason: String,

    headers: Headers,

    /// Body crudo; en JSON se muestra como texto UTF-8 con pérdida
    #[serde(serialize_with = "serialize_body")]
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, reason: &str, headers: Headers, body: Vec<u8>) -> Self {
        Self {
            status,
            reason: reason.to_string(),
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Obtiene un header específico (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Obtiene el body como String, si es UTF-8 válido
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Consume la respuesta y devuelve el body
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

fn serialize_body<S: Serializer>(body: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Response {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/plain");
        headers.insert("Content-Length", "5");
        Response::new(StatusCode::new(200), "OK", headers, b"hello".to_vec())
    }

    #[test]
    fn test_accessors() {
        let response = sample();

        assert_eq!(response.status(), StatusCode::new(200));
        assert_eq!(response.reason(), "OK");
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.body(), b"hello");
    }

    #[test]
    fn test_body_string_invalid_utf8() {
        let response = Response::new(StatusCode::new(200), "OK", Headers::new(), vec![0xFF, 0xFE]);
        assert_eq!(response.body_string(), None);
    }

    #[test]
    fn test_serialize_json() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["status"], 200);
        assert_eq!(json["reason"], "OK");
        assert_eq!(json["headers"]["Content-Length"], "5");
        assert_eq!(json["body"], "hello");
    }

    #[test]
    fn test_into_body() {
        assert_eq!(sample().into_body(), b"hello".to_vec());
    }
}
