//! TCP chat relay - companion client
//!
//! Connects to the relay, prints every server line to stdout, and forwards
//! each stdin line to the server verbatim.

use std::env;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Default server address
const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get server address from command line or use default
    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    info!("Connecting to {} ...", addr);
    let stream = TcpStream::connect(&addr).await?;
    info!("Connected");

    let (read_half, mut write_half) = stream.into_split();

    // Print every server line to stdout
    tokio::spawn(async move {
        let mut reader = BufReader::new(read_half);
        let mut stdout = tokio::io::stdout();
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line).await {
                Ok(0) => {
                    info!("Server closed the connection");
                    break;
                }
                Ok(_) => {
                    if stdout.write_all(&line).await.is_err() {
                        break;
                    }
                    let _ = stdout.flush().await;
                }
                Err(e) => {
                    error!("Read error: {}", e);
                    break;
                }
            }
        }
    });

    // Forward stdin lines to the server, delimiter included
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut input = Vec::new();
    loop {
        input.clear();
        let n = stdin.read_until(b'\n', &mut input).await?;
        if n == 0 {
            break;
        }
        write_half.write_all(&input).await?;
    }

    Ok(())
}
