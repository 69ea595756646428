//! End-to-end relay tests over real TCP sockets

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;

use chat_relay::{handle_connection, Registry};

/// Bind an ephemeral port, start the registry and accept loop
async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    tokio::spawn(Registry::new(cmd_rx).run());

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let cmd_tx = cmd_tx.clone();
            tokio::spawn(handle_connection(stream, cmd_tx));
        }
    });

    addr
}

struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
        }
    }

    async fn send(&mut self, line: &[u8]) {
        self.writer.write_all(line).await.unwrap();
    }

    async fn recv(&mut self) -> Vec<u8> {
        let mut buf = Vec::new();
        let n = timeout(Duration::from_secs(2), self.reader.read_until(b'\n', &mut buf))
            .await
            .expect("timed out waiting for line")
            .expect("read failed");
        assert!(n > 0, "connection closed unexpectedly");
        buf
    }
}

#[tokio::test]
async fn round_trip_preserves_line_verbatim() {
    let addr = start_server().await;

    let mut a = TestClient::connect(addr).await;
    assert_eq!(a.recv().await, b"Welcome. There are 0 others currently here.\n");

    let mut b = TestClient::connect(addr).await;
    assert_eq!(b.recv().await, b"Welcome. There are 1 others currently here.\n");
    assert_eq!(
        a.recv().await,
        b"A user has connected to the server. There are now 1 others here.\n"
    );

    a.send(b"hello\n").await;
    assert_eq!(b.recv().await, b"hello\n");

    // A never sees its own line: B's reply is the next line A receives
    b.send(b"reply\n").await;
    assert_eq!(a.recv().await, b"reply\n");
}

#[tokio::test]
async fn disconnect_is_announced_and_delivery_continues() {
    let addr = start_server().await;

    let mut a = TestClient::connect(addr).await;
    a.recv().await;
    let mut b = TestClient::connect(addr).await;
    b.recv().await;
    a.recv().await;
    let c = TestClient::connect(addr).await;
    a.recv().await;
    b.recv().await;

    drop(c);
    assert_eq!(
        a.recv().await,
        b"A user has disconnected from the server. There are now 1 others here.\n"
    );
    assert_eq!(
        b.recv().await,
        b"A user has disconnected from the server. There are now 1 others here.\n"
    );

    a.send(b"bye\n").await;
    assert_eq!(b.recv().await, b"bye\n");
}

#[tokio::test]
async fn non_utf8_lines_pass_through_unchanged() {
    let addr = start_server().await;

    let mut a = TestClient::connect(addr).await;
    a.recv().await;
    let mut b = TestClient::connect(addr).await;
    b.recv().await;
    a.recv().await;

    let line = [0xff, 0xfe, 0x00, b'\n'];
    a.send(&line).await;
    assert_eq!(b.recv().await, line);
}
