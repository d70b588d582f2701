//! ## Example
//!
//! ```no_run
//! use wspwn::connection::{Connection, WebSocket};
//! use wspwn::util::{Payload, P48};
//!
//! # async fn poc() -> wspwn::error::Result<()> {
//! let mut conn = WebSocket::connect("ws://localhost:9002").await?;
//! let mut payload = Payload::default();
//! payload.ljust(32, b'A');
//! payload += P48(0x7ffff7850d70);
//! conn.send(&payload).await?;
//! let reply = conn.recv().await?;
//! println!("{:?}", reply);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::{Error, Result};
use crate::util::{Payload, P48, P64};

pub trait ToVec {
    fn to_vec(&self) -> Vec<u8>;
}

impl ToVec for P64 {
    fn to_vec(&self) -> Vec<u8> {
        self.0.to_le_bytes().to_vec()
    }
}

impl ToVec for P48 {
    fn to_vec(&self) -> Vec<u8> {
        self.to_le_bytes().to_vec()
    }
}

impl ToVec for Payload {
    fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl ToVec for Vec<u8> {
    fn to_vec(&self) -> Vec<u8> {
        self.clone()
    }
}

impl<const N: usize> ToVec for [u8; N] {
    fn to_vec(&self) -> Vec<u8> {
        self[..].to_vec()
    }
}

impl ToVec for [u8] {
    fn to_vec(&self) -> Vec<u8> {
        self.to_vec()
    }
}

/// A message-oriented link to the target: one `send` is one outbound
/// message, one `recv` is the next inbound data message.
#[async_trait]
pub trait Connection {
    async fn send<D: ?Sized + ToVec + Sync>(&mut self, data: &D) -> Result<()>;
    async fn recv(&mut self) -> Result<Vec<u8>>;
    async fn close(self) -> Result<()>;
}

pub struct WebSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocket {
    /// Performs the handshake against a `ws://` URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _response) = connect_async(url).await?;
        Ok(Self { stream })
    }
}

#[async_trait]
impl Connection for WebSocket {
    async fn send<D: ?Sized + ToVec + Sync>(&mut self, data: &D) -> Result<()> {
        self.stream.send(Message::Binary(data.to_vec())).await?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<Vec<u8>> {
        while let Some(message) = self.stream.next().await {
            match message? {
                Message::Binary(data) => return Ok(data),
                Message::Text(text) => return Ok(text.into_bytes()),
                Message::Close(_) => break,
                // Ping/Pong are answered by the library on the next read.
                _ => continue,
            }
        }
        Err(Error::ConnectionClosed)
    }

    async fn close(mut self) -> Result<()> {
        match self.stream.close(None).await {
            Ok(()) | Err(tungstenite::Error::ConnectionClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    async fn bind() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        (listener, url)
    }

    // Accepts one client and echoes every data message back verbatim.
    async fn echo_once(listener: TcpListener) {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        while let Some(Ok(message)) = ws.next().await {
            if message.is_binary() || message.is_text() {
                ws.send(message).await.unwrap();
            }
        }
    }

    #[tokio::test]
    async fn send_then_recv_round_trips() {
        let (listener, url) = bind().await;
        let server = tokio::spawn(echo_once(listener));

        let mut conn = WebSocket::connect(&url).await.unwrap();
        let mut payload = Payload::default();
        payload.ljust(16, b'A');
        payload += P48(0x7ffff7850d70);
        conn.send(&payload).await.unwrap();

        let reply = conn.recv().await.unwrap();
        assert_eq!(reply, payload.as_bytes());

        conn.close().await.unwrap();
        server.abort();
    }

    #[tokio::test]
    async fn recv_errors_when_peer_closes_first() {
        let (listener, url) = bind().await;
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.close(None).await.unwrap();
        });

        let mut conn = WebSocket::connect(&url).await.unwrap();
        match conn.recv().await {
            Err(Error::ConnectionClosed) => {}
            other => panic!("expected ConnectionClosed, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn connect_to_dead_port_fails() {
        let (listener, url) = bind().await;
        drop(listener);

        assert!(WebSocket::connect(&url).await.is_err());
    }
}
