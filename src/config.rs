//! # Configuración del Cliente
//! src/config.rs
//!
//! Este módulo define la configuración de `mycurl` con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./mycurl -v http://127.0.0.1:8080/status
//! ./mycurl -m POST -c application/json http://127.0.0.1:8080/echo '{"a": 1}'
//! ./mycurl -H "Accept: text/plain" --timeout-ms 2000 http://example.test/
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! MYCURL_TIMEOUT_MS=1000 MYCURL_USER_AGENT=probe/1.0 ./mycurl http://example.test/
//! ```

use crate::error::Result;
use crate::http::receiver::headers::parse_header_line;
use crate::http::{Method, Request};
use clap::Parser;
use std::time::Duration;

/// User-Agent enviado por defecto
pub const DEFAULT_USER_AGENT: &str = concat!("mycurl/", env!("CARGO_PKG_VERSION"));

/// Configuración del cliente HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "mycurl")]
#[command(about = "Cliente HTTP/1.1 mínimo sobre sockets TCP")]
#[command(version)]
pub struct Config {
    /// Imprime resumen del request y de la respuesta, y logs de debug
    #[arg(short, long)]
    pub verbose: bool,

    /// Método HTTP (GET o POST)
    #[arg(short, long, default_value = "GET", env = "MYCURL_METHOD")]
    pub method: String,

    /// Content-Type usado cuando se envía un body
    #[arg(short = 'c', long, default_value = "text/plain", env = "MYCURL_CONTENT_TYPE")]
    pub content_type: String,

    /// Timeout por operación de socket en milisegundos
    #[arg(short = 't', long = "timeout-ms", default_value = "5000", env = "MYCURL_TIMEOUT_MS")]
    pub timeout_ms: u64,

    /// Valor del header User-Agent
    #[arg(short = 'A', long, default_value = DEFAULT_USER_AGENT, env = "MYCURL_USER_AGENT")]
    pub user_agent: String,

    /// Header extra con formato "Name: Value" (se puede repetir)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Termina con código 22 si el status es 4xx o 5xx
    #[arg(short, long)]
    pub fail: bool,

    /// Imprime la respuesta como JSON en lugar del body crudo
    #[arg(long)]
    pub json: bool,

    /// URL absoluta con esquema http
    pub url: String,

    /// Body crudo del request
    pub body: Option<String>,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Timeout por operación
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.url.is_empty() {
            return Err("URL is empty".to_string());
        }

        if let Err(e) = self.method.parse::<Method>() {
            return Err(e.to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be > 0".to_string());
        }

        for header in &self.headers {
            if parse_header_line(header).is_err() {
                return Err(format!("Invalid header {:?}, expected \"Name: Value\"", header));
            }
        }

        Ok(())
    }

    /// Construye el request a partir de la configuración
    ///
    /// Agrega `User-Agent` y luego los headers extra, que pueden
    /// sobrescribirlo.
    ///
    /// # Ejemplo
    /// ```
    /// use mycurl::config::Config;
    ///
    /// let mut config = Config::default();
    /// config.url = "http://example.test/".to_string();
    ///
    /// let request = config.build_request().unwrap();
    /// assert!(request.header("User-Agent").unwrap().starts_with("mycurl/"));
    /// ```
    pub fn build_request(&self) -> Result<Request> {
        let method = self.method.parse::<Method>()?;
        let mut request = Request::new(
            method,
            &self.url,
            &self.content_type,
            self.body.as_deref().unwrap_or_default().as_bytes(),
        )?;

        request.set_header("User-Agent", &self.user_agent);

        for header in &self.headers {
            let (name, value) = parse_header_line(header)?;
            request.set_header(name, value);
        }

        Ok(request)
    }

    /// Imprime un resumen del request (modo verbose)
    pub fn print_summary(&self) {
        println!("REQUEST");
        println!("Method: {}", self.method);
        println!("URL: {}", self.url);
        println!("Content type: {}", self.content_type);
        println!("Timeout: {} ms", self.timeout_ms);
        for header in &self.headers {
            println!("Header: {}", header);
        }
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            verbose: false,
            method: "GET".to_string(),
            content_type: "text/plain".to_string(),
            timeout_ms: 5_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: Vec::new(),
            fail: false,
            json: false,
            url: String::new(),
            body: None,
        }
    }
}
