//! # Construcción de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo valida y serializa un request HTTP/1.1 desde cero.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! POST /path?param=value HTTP/1.1\r\n
//! Host: example.test\r\n
//! Content-Length: 5\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.1`
//! 2. **Host**: siempre presente, primero
//! 3. **Headers**: Pares `Name: Value` (orden alfabético)
//! 4. **Empty Line**: `\r\n` que separa headers del body
//! 5. **Body**: bytes crudos (opcional)

use super::Headers;
use crate::error::{Error, Result};
use std::net::Ipv6Addr;
use url::{Host, Url};

/// Puerto usado cuando la URL no especifica uno
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Content-Type usado cuando hay body pero no se indicó tipo
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

impl std::str::FromStr for Method {
    type Err = Error;

    /// Parsea un método HTTP (distingue mayúsculas: "get" no es válido)
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            _ => Err(Error::UnsupportedMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request HTTP/1.1 validado, listo para enviarse
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,

    /// URL absoluta con esquema `http`
    url: Url,

    headers: Headers,

    body: Vec<u8>,
}

impl Request {
    /// Valida método y URL y calcula los headers del body
    ///
    /// Si el body no está vacío se agregan `Content-Type` (el indicado, o
    /// `application/octet-stream` si viene vacío) y `Content-Length` con
    /// el largo exacto en bytes.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use mycurl::http::{Method, Request};
    ///
    /// let request = Request::new(Method::POST, "http://example.test/echo", "text/plain", "hello").unwrap();
    ///
    /// assert_eq!(request.header("Content-Length"), Some("5"));
    /// assert_eq!(request.target(), "/echo");
    /// ```
    pub fn new(
        method: Method,
        url: &str,
        content_type: &str,
        body: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;

        if url.scheme() != "http" {
            return Err(Error::UnsupportedScheme(url.scheme().to_string()));
        }

        if url.host().is_none() {
            return Err(Error::InvalidUrl(format!("{}: missing host", url)));
        }

        let body = body.into();
        let mut headers = Headers::new();

        if !body.is_empty() {
            let content_type = if content_type.is_empty() {
                DEFAULT_CONTENT_TYPE
            } else {
                content_type
            };
            headers.insert("Content-Type", content_type);
            headers.insert("Content-Length", &body.len().to_string());
        }

        Ok(Request {
            method,
            url,
            headers,
            body,
        })
    }

    /// Agrega o reemplaza un header antes de enviar el request
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name, value);
    }

    /// Host al que hay que conectarse (IPv6 sin corchetes)
    pub fn host(&self) -> String {
        match self.url.host() {
            Some(Host::Domain(domain)) => domain.to_string(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            // Request::new rechaza URLs sin host
            None => String::new(),
        }
    }

    /// Puerto destino, 80 si la URL no lo especifica
    pub fn port(&self) -> u16 {
        self.url.port().unwrap_or(DEFAULT_HTTP_PORT)
    }

    /// Valor del header `Host`: host de la URL más `:port` si es explícito
    pub fn host_header(&self) -> String {
        let host = match self.url.host() {
            Some(Host::Ipv6(addr)) => bracketed(addr),
            _ => self.host(),
        };

        match self.url.port() {
            Some(port) if port != DEFAULT_HTTP_PORT => format!("{}:{}", host, port),
            _ => host,
        }
    }

    /// Request target: path (`/` si está vacío) más `?query` si existe
    pub fn target(&self) -> String {
        let path = match self.url.path() {
            "" => "/",
            path => path,
        };

        match self.url.query() {
            Some(query) => format!("{}?{}", path, query),
            None => path.to_string(),
        }
    }

    /// Serializa el request al formato de la red
    ///
    /// - Request line: `GET /path HTTP/1.1\r\n`
    /// - `Host: example.test\r\n`
    /// - Resto de headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body crudo
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(128 + self.body.len());

        // 1. Request line
        let request_line = format!("{} {} HTTP/1.1\r\n", self.method, self.target());
        result.extend_from_slice(request_line.as_bytes());

        // 2. Host
        let host_line = format!("Host: {}\r\n", self.host_header());
        result.extend_from_slice(host_line.as_bytes());

        // 3. Headers
        for (name, value) in self.headers.iter() {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 4. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 5. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

fn bracketed(addr: Ipv6Addr) -> String {
    format!("[{}]", addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_text(request: &Request) -> String {
        String::from_utf8(request.to_bytes()).unwrap()
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::GET);
        assert_eq!("POST".parse::<Method>().unwrap(), Method::POST);
    }

    #[test]
    fn test_unsupported_methods() {
        for method in ["PUT", "DELETE", "HEAD", "get", ""] {
            let result = method.parse::<Method>();
            assert!(
                matches!(result, Err(Error::UnsupportedMethod(ref m)) if m == method),
                "method {:?} should be rejected",
                method
            );
        }
    }

    #[test]
    fn test_simple_get() {
        let request = Request::new(Method::GET, "http://example.test/", "text/plain", "").unwrap();

        assert_eq!(request.host(), "example.test");
        assert_eq!(request.port(), 80);
        assert!(request.headers().is_empty());
        assert_eq!(to_text(&request), "GET / HTTP/1.1\r\nHost: example.test\r\n\r\n");
    }

    #[test]
    fn test_empty_path_defaults_to_root() {
        let request = Request::new(Method::GET, "http://example.test", "", "").unwrap();
        assert_eq!(request.target(), "/");
    }

    #[test]
    fn test_query_is_kept_and_fragment_dropped() {
        let request =
            Request::new(Method::GET, "http://example.test/search?q=rust&page=2#top", "", "").unwrap();
        assert_eq!(request.target(), "/search?q=rust&page=2");
    }

    #[test]
    fn test_post_body_headers() {
        let request =
            Request::new(Method::POST, "http://example.test/echo", "application/json", r#"{"a":1}"#)
                .unwrap();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Content-Length"), Some("7"));
        assert_eq!(
            to_text(&request),
            "POST /echo HTTP/1.1\r\nHost: example.test\r\nContent-Length: 7\r\nContent-Type: application/json\r\n\r\n{\"a\":1}"
        );
    }

    #[test]
    fn test_content_length_counts_bytes_not_chars() {
        let request = Request::new(Method::POST, "http://example.test/", "text/plain", "ñandú").unwrap();
        assert_eq!(request.header("Content-Length"), Some("7"));
    }

    #[test]
    fn test_default_content_type() {
        let request = Request::new(Method::POST, "http://example.test/", "", vec![0u8, 1, 2]).unwrap();
        assert_eq!(request.header("Content-Type"), Some(DEFAULT_CONTENT_TYPE));
        assert_eq!(request.header("Content-Length"), Some("3"));
    }

    #[test]
    fn test_explicit_port() {
        let request = Request::new(Method::GET, "http://127.0.0.1:8080/status", "", "").unwrap();

        assert_eq!(request.host(), "127.0.0.1");
        assert_eq!(request.port(), 8080);
        assert_eq!(request.host_header(), "127.0.0.1:8080");
    }

    #[test]
    fn test_ipv6_host() {
        let request = Request::new(Method::GET, "http://[::1]:8080/", "", "").unwrap();

        assert_eq!(request.host(), "::1");
        assert_eq!(request.host_header(), "[::1]:8080");
    }

    #[test]
    fn test_set_header_overwrites() {
        let mut request = Request::new(Method::GET, "http://example.test/", "", "").unwrap();
        request.set_header("User-Agent", "first");
        request.set_header("User-Agent", "mycurl/0.1.0");

        assert_eq!(request.header("User-Agent"), Some("mycurl/0.1.0"));
        assert!(to_text(&request).contains("User-Agent: mycurl/0.1.0\r\n"));
    }

    #[test]
    fn test_unsupported_scheme() {
        let result = Request::new(Method::GET, "https://example.test/", "", "");
        assert!(matches!(result, Err(Error::UnsupportedScheme(s)) if s == "https"));

        let result = Request::new(Method::GET, "ftp://example.test/file", "", "");
        assert!(matches!(result, Err(Error::UnsupportedScheme(_))));
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            Request::new(Method::GET, "not a url", "", ""),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Request::new(Method::GET, "/relative/path", "", ""),
            Err(Error::InvalidUrl(_))
        ));
    }
}
