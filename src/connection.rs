//! Connection handle over one accepted TCP stream
//!
//! Wraps the raw stream with line-oriented send/receive and a diagnostic
//! peer address. The handle splits into a reader and a writer so the
//! per-connection read and write tasks can run concurrently.

use bytes::Bytes;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// One accepted client connection
///
/// Holds the stream and a stable, human-readable remote address used only
/// for logging. There is no uniqueness guarantee beyond what TCP provides.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    addr: String,
}

impl Connection {
    /// Wrap an accepted stream, capturing the peer address for diagnostics
    pub fn new(stream: TcpStream) -> Self {
        let addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        Self { stream, addr }
    }

    /// Remote address of the peer, for diagnostics only
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Split into independently owned read and write halves
    pub fn split(self) -> (LineReader, LineWriter) {
        let (read_half, write_half) = self.stream.into_split();
        (
            LineReader {
                inner: BufReader::new(read_half),
            },
            LineWriter { inner: write_half },
        )
    }
}

/// Reading half of a connection, yielding newline-terminated lines
#[derive(Debug)]
pub struct LineReader {
    inner: BufReader<OwnedReadHalf>,
}

impl LineReader {
    /// Receive the next line from the peer
    ///
    /// Blocks until a full `\n`-terminated line arrives, then returns it
    /// with the delimiter included. Returns `Ok(None)` when the stream
    /// ends; a trailing partial line without its delimiter is dropped, the
    /// same as a plain EOF. No maximum line length is enforced.
    pub async fn recv_line(&mut self) -> std::io::Result<Option<Bytes>> {
        let mut buf = Vec::new();
        let n = self.inner.read_until(b'\n', &mut buf).await?;
        if n == 0 || buf.last() != Some(&b'\n') {
            return Ok(None);
        }
        Ok(Some(Bytes::from(buf)))
    }
}

/// Writing half of a connection
#[derive(Debug)]
pub struct LineWriter {
    inner: OwnedWriteHalf,
}

impl LineWriter {
    /// Write a line verbatim, delimiter included
    ///
    /// A failure here never removes the connection from the registry; that
    /// is the caller's responsibility.
    pub async fn send(&mut self, line: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(line).await
    }

    /// Shut down the write side; safe to call after a failed send
    pub async fn close(&mut self) {
        let _ = self.inner.shutdown().await;
    }
}
