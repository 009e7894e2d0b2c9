//! # Cliente HTTP
//! src/client.rs
//!
//! Orquesta un intercambio completo sobre una conexión nueva:
//!
//! ```text
//! Request → connect → write → status → headers → body → close → Response
//! ```
//!
//! La conexión se cierra siempre, tanto si el intercambio termina bien
//! como si falla en cualquier etapa posterior a la conexión.

use crate::error::{Error, Result, Stage};
use crate::http::receiver::{BodyReceiver, HeadersReceiver, StatusReceiver};
use crate::http::{Request, Response};
use crate::net::TcpClient;
use std::time::Duration;
use tracing::debug;

/// Timeout por operación usado por defecto
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Cliente HTTP/1.1 sin estado compartido entre llamadas
///
/// Cada `send` abre su propia conexión, así que varios threads pueden
/// usar cada uno su propio cliente sin coordinación.
#[derive(Debug, Clone)]
pub struct HttpClient {
    timeout: Duration,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Ejecuta un intercambio request/response completo
    ///
    /// # Ejemplo
    ///
    /// ```no_run
    /// use mycurl::{HttpClient, Method, Request};
    /// use std::time::Duration;
    ///
    /// let request = Request::new(Method::GET, "http://example.test/", "", "").unwrap();
    /// let response = HttpClient::new(Duration::from_secs(5)).send(&request).unwrap();
    /// println!("{}", response.status());
    /// ```
    pub fn send(&self, request: &Request) -> Result<Response> {
        let host = request.host();
        let port = request.port();

        let mut connection = TcpClient::connect(&host, port, self.timeout)
            .map_err(|e| e.in_stage(Stage::Connect))?;

        let result = self.exchange(&mut connection, request);
        connection.close();

        if let Err(e) = &result {
            debug!(error = %e, "exchange failed");
        }
        result
    }

    fn exchange(&self, connection: &mut TcpClient, request: &Request) -> Result<Response> {
        connection
            .write_all(&request.to_bytes())
            .map_err(|e| e.in_stage(Stage::Write))?;

        let mut status = StatusReceiver::new();
        connection
            .read(&mut status)
            .map_err(|e| e.in_stage(Stage::ReadStatus))?;
        let status_line = status.into_status_line().ok_or_else(|| {
            Error::Protocol("missing status line".to_string()).in_stage(Stage::ReadStatus)
        })?;

        let mut headers = HeadersReceiver::new();
        connection
            .read(&mut headers)
            .map_err(|e| e.in_stage(Stage::ReadHeaders))?;
        let headers = headers.into_headers();

        let mut body =
            BodyReceiver::from_headers(&headers).map_err(|e| e.in_stage(Stage::ReadBody))?;
        connection
            .read(&mut body)
            .map_err(|e| e.in_stage(Stage::ReadBody))?;

        debug!(
            status = status_line.code.as_u16(),
            headers = headers.len(),
            "response received"
        );

        Ok(Response::new(
            status_line.code,
            &status_line.reason,
            headers,
            body.into_body(),
        ))
    }
}
