use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("WebSocket transport error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("connection closed before a reply arrived")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, Error>;
