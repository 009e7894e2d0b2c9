//! # Errores del Cliente HTTP
//! src/error.rs
//!
//! Taxonomía de errores de un intercambio request/response.
//!
//! Cada fallo interno se envuelve con la etapa en la que ocurrió
//! (`Stage`) y se propaga al llamador. No hay reintentos: el cliente
//! nunca reconecta ni repite el request.
//!
//! ```text
//! read headers error: protocol error: malformed header line "X-Broken"
//! └── etapa ──┘       └────────────── causa ──────────────────┘
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Etapa del intercambio en la que ocurrió un error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Resolución DNS + conexión TCP
    Connect,

    /// Envío del request serializado
    Write,

    /// Lectura de la status line
    ReadStatus,

    /// Lectura del bloque de headers
    ReadHeaders,

    /// Selección de la estrategia de body y lectura del body
    ReadBody,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Connect => "connect",
            Stage::Write => "write request",
            Stage::ReadStatus => "read status",
            Stage::ReadHeaders => "read headers",
            Stage::ReadBody => "read body",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores del cliente HTTP
#[derive(Debug, Error)]
pub enum Error {
    /// Método fuera del conjunto soportado (GET, POST)
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// La URL no se pudo parsear o no tiene host
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Esquema distinto de `http`
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// Fallo de DNS o de conexión
    #[error("connection error: {0}")]
    Connection(#[source] io::Error),

    /// Fallo de escritura o timeout durante el envío
    #[error("write error: {0}")]
    Write(#[source] io::Error),

    /// Status line, header o chunk malformado; versión HTTP no soportada
    #[error("protocol error: {0}")]
    Protocol(String),

    /// `Transfer-Encoding` presente pero distinto de `chunked`
    #[error("unsupported transfer encoding: {0}")]
    UnsupportedEncoding(String),

    /// Ni `Content-Length` válido ni `Transfer-Encoding: chunked`
    #[error("missing body length: {0}")]
    MissingLength(String),

    /// Timeout o fallo de I/O durante un paso de lectura
    #[error("read error: {0}")]
    Read(#[source] io::Error),

    /// Error envuelto con la etapa en la que ocurrió
    #[error("{stage} error: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Envuelve el error con la etapa del intercambio
    pub fn in_stage(self, stage: Stage) -> Self {
        Error::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Etapa más externa, si el error fue envuelto
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Error original, sin las capas de etapa
    ///
    /// # Ejemplo
    /// ```
    /// use mycurl::error::{Error, Stage};
    ///
    /// let err = Error::Protocol("bad line".to_string()).in_stage(Stage::ReadStatus);
    /// assert!(matches!(err.root(), Error::Protocol(_)));
    /// assert_eq!(err.to_string(), "read status error: protocol error: bad line");
    /// ```
    pub fn root(&self) -> &Error {
        let mut current = self;
        while let Error::Stage { source, .. } = current {
            current = source;
        }
        current
    }

    /// Indica si la causa raíz es un timeout de socket
    ///
    /// En Unix un timeout de lectura llega como `WouldBlock`, en Windows
    /// como `TimedOut`.
    pub fn is_timeout(&self) -> bool {
        match self.root() {
            Error::Read(e) | Error::Write(e) | Error::Connection(e) => matches!(
                e.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}

/// Alias de resultado usado en todo el crate
pub type Result<T> = std::result::Result<T, Error>;
