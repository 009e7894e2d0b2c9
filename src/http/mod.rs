//! # Módulo HTTP
//!
//! Este módulo implementa el lado cliente de HTTP/1.1 desde cero, sin
//! usar librerías de alto nivel. Incluye:
//!
//! - Construcción y serialización de requests
//! - Receivers incrementales para status line, headers y body
//! - Body de largo fijo (`Content-Length`) y `Transfer-Encoding: chunked`
//! - Modelo inmutable de la respuesta
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Host: example.test\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response (chunked)
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Transfer-Encoding: chunked\r\n
//! \r\n
//! 5\r\n
//! hello\r\n
//! 0\r\n
//! \r\n
//! ```

pub mod headers;   // Mapa de headers
pub mod receiver;  // Parsing incremental de la respuesta
pub mod request;   // Construcción de HTTP requests
pub mod response;  // Respuesta recibida
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use headers::Headers;
pub use request::{Method, Request};
pub use response::Response;
pub use status::StatusCode;
