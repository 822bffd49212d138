//! Transport layer for the MCP server.
//!
//! - [`LineTransport`]: newline-delimited JSON (NDJSON) over any async reader/writer pair,
//!   with [`StdioTransport`] as the stdin/stdout instance used by `consilium serve`
//! - [`ChannelTransport`]: in-process tokio mpsc channels

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::mpsc;

use crate::error::McpError;

/// Reads and writes JSON-RPC messages over some transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Read the next message.
    ///
    /// Returns `Ok(None)` on EOF (the remote side closed the connection).
    /// A frame that cannot be decoded is `Err(McpError::ParseError)`; the
    /// transport stays usable and the next call reads the following frame.
    async fn read_message(&mut self) -> Result<Option<String>, McpError>;

    /// Write a message, including framing, and flush it.
    async fn write_message(&mut self, message: &str) -> Result<(), McpError>;

    /// Flush buffered output and release resources.
    async fn close(&mut self) -> Result<(), McpError>;
}

// ---------------------------------------------------------------------------
// LineTransport
// ---------------------------------------------------------------------------

/// NDJSON transport: one JSON-RPC message per line.
pub struct LineTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

/// The transport used when the server is launched as a child process.
pub type StdioTransport = LineTransport<Stdin, Stdout>;

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send + Sync,
    W: AsyncWrite + Unpin + Send + Sync,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }
}

impl StdioTransport {
    /// Transport over the process stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

#[async_trait]
impl<R, W> Transport for LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send + Sync,
    W: AsyncWrite + Unpin + Send + Sync,
{
    async fn read_message(&mut self) -> Result<Option<String>, McpError> {
        let mut buf = Vec::new();
        let bytes_read = self.reader.read_until(b'\n', &mut buf).await?;
        if bytes_read == 0 {
            return Ok(None);
        }
        let line = String::from_utf8(buf).map_err(|e| McpError::ParseError {
            message: format!("Message is not valid UTF-8: {e}"),
        })?;
        // Strip the trailing newline (and possible \r\n on Windows).
        Ok(Some(line.trim_end().to_string()))
    }

    async fn write_message(&mut self, message: &str) -> Result<(), McpError> {
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), McpError> {
        self.writer.flush().await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ChannelTransport
// ---------------------------------------------------------------------------

/// In-process transport backed by tokio mpsc channels.
///
/// Exercises the full message pipeline without touching stdio.
pub struct ChannelTransport {
    receiver: mpsc::Receiver<String>,
    sender: mpsc::Sender<String>,
}

impl ChannelTransport {
    pub fn new(receiver: mpsc::Receiver<String>, sender: mpsc::Sender<String>) -> Self {
        Self { receiver, sender }
    }

    /// Create a linked pair: messages written by one side are read by the other.
    pub fn pair(buffer: usize) -> (Self, Self) {
        let (tx_a, rx_a) = mpsc::channel(buffer);
        let (tx_b, rx_b) = mpsc::channel(buffer);
        (
            ChannelTransport::new(rx_a, tx_b),
            ChannelTransport::new(rx_b, tx_a),
        )
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn read_message(&mut self) -> Result<Option<String>, McpError> {
        // All senders dropped means EOF.
        Ok(self.receiver.recv().await)
    }

    async fn write_message(&mut self, message: &str) -> Result<(), McpError> {
        self.sender
            .send(message.to_string())
            .await
            .map_err(|e| McpError::TransportError {
                message: format!("channel send failed: {e}"),
            })
    }

    async fn close(&mut self) -> Result<(), McpError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_channel_transport_roundtrip() {
        let (mut client, mut server) = ChannelTransport::pair(16);

        client
            .write_message(r#"{"jsonrpc":"2.0","method":"ping","id":1}"#)
            .await
            .unwrap();
        assert_eq!(
            server.read_message().await.unwrap(),
            Some(r#"{"jsonrpc":"2.0","method":"ping","id":1}"#.to_string())
        );

        server
            .write_message(r#"{"jsonrpc":"2.0","result":{},"id":1}"#)
            .await
            .unwrap();
        assert_eq!(
            client.read_message().await.unwrap(),
            Some(r#"{"jsonrpc":"2.0","result":{},"id":1}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_channel_transport_eof() {
        let (mut client, server) = ChannelTransport::pair(4);
        drop(server);
        assert_eq!(client.read_message().await.unwrap(), None);
        assert!(client.write_message("x").await.is_err());
    }

    #[tokio::test]
    async fn test_line_transport_reads_lines() {
        let input: &[u8] = b"{\"a\":1}\r\n{\"b\":2}\n";
        let mut transport = LineTransport::new(input, Vec::new());
        assert_eq!(
            transport.read_message().await.unwrap(),
            Some(r#"{"a":1}"#.to_string())
        );
        assert_eq!(
            transport.read_message().await.unwrap(),
            Some(r#"{"b":2}"#.to_string())
        );
        assert_eq!(transport.read_message().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_line_transport_skips_past_invalid_utf8() {
        let input: &[u8] = b"{\"a\":1}\n\xff\xfe garbage\n{\"b\":2}\n";
        let mut transport = LineTransport::new(input, Vec::new());
        assert_eq!(
            transport.read_message().await.unwrap(),
            Some(r#"{"a":1}"#.to_string())
        );
        let err = transport.read_message().await.unwrap_err();
        assert_eq!(err.error_code(), -32700);
        assert_eq!(
            transport.read_message().await.unwrap(),
            Some(r#"{"b":2}"#.to_string())
        );
        assert_eq!(transport.read_message().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_line_transport_frames_writes() {
        let (writer, mut peer) = tokio::io::duplex(256);
        let mut transport = LineTransport::new(tokio::io::empty(), writer);
        transport.write_message(r#"{"id":1}"#).await.unwrap();
        transport.write_message(r#"{"id":2}"#).await.unwrap();
        drop(transport);

        let mut written = String::new();
        peer.read_to_string(&mut written).await.unwrap();
        assert_eq!(written, "{\"id\":1}\n{\"id\":2}\n");
    }
}
