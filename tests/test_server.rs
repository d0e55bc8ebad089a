//! Listener tests over real loopback sockets

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use forge::config::Config;
use forge::server;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn start(dir: &Path, max_connections: Option<usize>) -> std::net::SocketAddr {
    let mut cfg = Config::load();
    cfg.server.listen_addr = "127.0.0.1:0".to_string();
    cfg.server.max_connections = max_connections;
    cfg.files.directory = Some(dir.to_string_lossy().into_owned());
    cfg.files.normalize();

    let listener = TcpListener::bind(&cfg.server.listen_addr).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(listener, Arc::new(cfg)));
    addr
}

async fn send(addr: std::net::SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

fn split_body(raw: &[u8]) -> (&[u8], &[u8]) {
    let pos = raw.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
    (&raw[..pos + 4], &raw[pos + 4..])
}

#[tokio::test]
async fn test_serves_root_over_tcp() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(dir.path(), None).await;

    let response = send(addr, b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n").await;
    assert_eq!(response, b"HTTP/1.1 200 OK\r\n\r\n");
}

#[tokio::test]
async fn test_one_request_per_connection() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(dir.path(), None).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET /echo/one HTTP/1.1\r\n\r\n").await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    let (head, body) = split_body(&response);
    assert!(head.starts_with(b"HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, b"one");
}

#[tokio::test]
async fn test_post_then_get_over_tcp() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(dir.path(), None).await;

    let created = send(
        addr,
        b"POST /files/x.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
    )
    .await;
    assert_eq!(created, b"HTTP/1.1 201 Created\r\n\r\n");

    let response = send(addr, b"GET /files/x.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(
        response,
        b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 5\r\n\r\nhello"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_large_file_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let data: Vec<u8> = (0..(2 * 1024 * 1024u32)).map(|i| (i.wrapping_mul(31) >> 3) as u8).collect();
    std::fs::write(dir.path().join("big.bin"), &data).unwrap();

    let addr = start(dir.path(), None).await;

    let downloads: Vec<_> = (0..4)
        .map(|_| tokio::spawn(send(addr, b"GET /files/big.bin HTTP/1.1\r\n\r\n")))
        .collect();

    for download in downloads {
        let response = download.await.unwrap();
        let (head, body) = split_body(&response);

        let head = String::from_utf8_lossy(head);
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains(&format!("Content-Length: {}\r\n", data.len())));
        assert_eq!(body.len(), data.len());
        assert!(body == &data[..]);
    }
}

#[tokio::test]
async fn test_bounded_connections_still_serve_sequential_clients() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(dir.path(), Some(1)).await;

    for word in ["a", "b", "c"] {
        let response = send(addr, format!("GET /echo/{} HTTP/1.1\r\n\r\n", word).as_bytes()).await;
        let (_, body) = split_body(&response);
        assert_eq!(body, word.as_bytes());
    }
}

#[tokio::test]
async fn test_bounded_connections_hold_back_second_client() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(dir.path(), Some(1)).await;

    // First client takes the only slot and never finishes its headers
    let mut first = TcpStream::connect(addr).await.unwrap();
    first.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut second = TcpStream::connect(addr).await.unwrap();
    second.write_all(b"GET /echo/late HTTP/1.1\r\n\r\n").await.unwrap();

    let mut byte = [0u8; 1];
    let early = tokio::time::timeout(Duration::from_millis(300), second.read(&mut byte)).await;
    assert!(early.is_err(), "second client was answered while the slot was taken");

    // End of input finishes the first request and frees the slot
    first.shutdown().await.unwrap();
    let mut first_response = Vec::new();
    first.read_to_end(&mut first_response).await.unwrap();
    assert_eq!(first_response, b"HTTP/1.1 200 OK\r\n\r\n");

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), second.read_to_end(&mut response))
        .await
        .unwrap()
        .unwrap();
    let (_, body) = split_body(&response);
    assert_eq!(body, b"late");
}
