//! # mycurl
//! src/lib.rs
//!
//! Cliente HTTP/1.1 mínimo implementado directamente sobre sockets TCP,
//! sin librerías HTTP de alto nivel: serializa el request a mano, abre
//! un socket, escribe el request bajo un timeout y parsea la respuesta
//! de forma incremental.
//!
//! ## Arquitectura
//!
//! El cliente está dividido en módulos especializados:
//! - `net`: conexión TCP con timeout por operación
//! - `http`: request, response y receivers incrementales
//! - `client`: orquestación de un intercambio completo
//! - `config`: argumentos CLI y variables de entorno
//! - `error`: taxonomía de errores con la etapa en que ocurrieron
//!
//! Un intercambio por conexión: no hay pooling, TLS, redirects ni
//! reintentos.
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use mycurl::{HttpClient, Method, Request};
//! use std::time::Duration;
//!
//! let mut request = Request::new(Method::GET, "http://example.test/", "", "").unwrap();
//! request.set_header("User-Agent", "mycurl/0.1.0");
//!
//! let client = HttpClient::new(Duration::from_secs(5));
//! let response = client.send(&request).expect("request failed");
//! println!("{}", String::from_utf8_lossy(response.body()));
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod net;

pub use client::HttpClient;
pub use error::{Error, Stage};
pub use http::{Headers, Method, Request, Response, StatusCode};
