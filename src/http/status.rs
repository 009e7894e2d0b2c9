//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! El cliente acepta cualquier código numérico que mande el servidor,
//! así que el código se modela como un newtype sobre `u16` en lugar de
//! un enum cerrado. Las categorías siguen el RFC 9110:
//!
//! - **1xx**: Informacional
//! - **2xx**: Éxito
//! - **3xx**: Redirección (el cliente no las sigue)
//! - **4xx**: Error del cliente
//! - **5xx**: Error del servidor

use serde::Serialize;

/// Código de estado recibido en la status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StatusCode(u16);

impl StatusCode {
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use mycurl::http::StatusCode;
    /// assert_eq!(StatusCode::new(200).as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Texto de razón estándar para los códigos más comunes
    ///
    /// El servidor puede mandar otro texto en la status line; ese se
    /// guarda aparte en `Response::reason`.
    pub fn canonical_reason(&self) -> Option<&'static str> {
        let reason = match self.0 {
            100 => "Continue",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            409 => "Conflict",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => return None,
        };
        Some(reason)
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// Verifica si el código indica error del cliente (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// Verifica si el código indica error del servidor (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK", o solo "299" si no hay texto conocido
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.canonical_reason() {
            Some(reason) => write!(f, "{} {}", self.0, reason),
            None => write!(f, "{}", self.0),
        }
    }
}
