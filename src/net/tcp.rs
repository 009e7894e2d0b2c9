//! # Cliente TCP con Timeouts por Operación
//! src/net/tcp.rs
//!
//! Dueño de una única conexión TCP. Expone:
//! - `write_all`: escribe todo el buffer, re-armando el timeout antes de
//!   cada intento de escritura
//! - `read`: ejecuta pasos de un `Receiver` hasta que termine; cada paso
//!   recibe un deadline nuevo `ahora + timeout`
//!
//! El timeout es de inactividad por paso, no de la respuesta completa:
//! una respuesta que llega lento pero constante nunca expira, mientras
//! que un paso trabado sí.

use crate::error::{Error, Result};
use crate::http::receiver::{Receiver, Step};
use std::io::{self, BufReader, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Stream cuyas lecturas fallan al pasar un deadline absoluto
///
/// Antes de cada `read` subyacente se ajusta el timeout del socket al
/// tiempo que queda hasta el deadline.
#[derive(Debug)]
pub struct DeadlineStream {
    stream: TcpStream,
    deadline: Option<Instant>,
}

impl DeadlineStream {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            deadline: None,
        }
    }

    /// Fija el deadline en `ahora + timeout`
    pub fn arm(&mut self, timeout: Duration) {
        self.deadline = Some(Instant::now() + timeout);
    }

    /// Tiempo restante hasta el deadline; error si ya pasó
    fn remaining(&self) -> io::Result<Option<Duration>> {
        let Some(deadline) = self.deadline else {
            return Ok(None);
        };

        match deadline.checked_duration_since(Instant::now()) {
            Some(left) if !left.is_zero() => Ok(Some(left)),
            _ => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "read deadline exceeded",
            )),
        }
    }
}

impl Read for DeadlineStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let timeout = self.remaining()?;
        self.stream.set_read_timeout(timeout)?;
        self.stream.read(buf)
    }
}

/// Cliente TCP de un solo intercambio
#[derive(Debug)]
pub struct TcpClient {
    stream: TcpStream,
    timeout: Duration,

    /// Reader con buffer, creado en la primera lectura
    reader: Option<BufReader<DeadlineStream>>,
}

impl TcpClient {
    /// Abre la conexión a `host:port`
    ///
    /// El timeout se guarda y se aplica después, en cada operación.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        debug!(host, port, ?timeout, "connecting");

        let stream = TcpStream::connect((host, port)).map_err(Error::Connection)?;

        debug!(peer = ?stream.peer_addr().ok(), "connected");

        Ok(Self {
            stream,
            timeout,
            reader: None,
        })
    }

    /// Escribe `data` completo, tolerando escrituras parciales
    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let mut written = 0;

        while written < data.len() {
            self.stream
                .set_write_timeout(Some(self.timeout))
                .map_err(Error::Write)?;

            match self.stream.write(&data[written..]) {
                Ok(0) => {
                    return Err(Error::Write(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "connection accepted no more bytes",
                    )))
                }
                Ok(n) => {
                    written += n;
                    trace!(written, total = data.len(), "wrote bytes");
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Write(e)),
            }
        }

        debug!(bytes = data.len(), "request written");
        Ok(())
    }

    /// Ejecuta pasos del receiver hasta `Step::Complete` o un error
    ///
    /// Cada paso corre con un deadline nuevo de `timeout`.
    pub fn read<T: Receiver>(&mut self, receiver: &mut T) -> Result<()> {
        let timeout = self.timeout;
        let reader = self.reader()?;
        let mut steps = 0usize;

        loop {
            reader.get_mut().arm(timeout);
            steps += 1;

            if receiver.receive(reader)? == Step::Complete {
                trace!(steps, "receiver complete");
                return Ok(());
            }
        }
    }

    /// Reader con buffer; a lo sumo uno por conexión
    fn reader(&mut self) -> Result<&mut BufReader<DeadlineStream>> {
        let reader = match self.reader.take() {
            Some(reader) => reader,
            None => {
                let stream = self.stream.try_clone().map_err(Error::Read)?;
                BufReader::new(DeadlineStream::new(stream))
            }
        };

        Ok(self.reader.insert(reader))
    }

    /// Cierra la conexión en ambos sentidos y libera el socket
    pub fn close(self) {
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            // El peer pudo haber cerrado primero
            debug!(error = %e, "shutdown failed");
        }
        debug!("connection closed");
    }
}
