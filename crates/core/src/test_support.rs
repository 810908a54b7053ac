//! Helpers shared by unit tests

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn head(status: &str, headers: &[(&str, &str)], content_length: usize) -> Vec<u8> {
    let mut response = format!("HTTP/1.1 {status}\r\n");
    for (name, value) in headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str(&format!(
        "Content-Length: {content_length}\r\nConnection: close\r\n\r\n"
    ));
    response.into_bytes()
}

/// Serve a single canned HTTP response and return the base URL
pub async fn serve_once(status: &str, headers: &[(&str, &str)], body: &[u8]) -> String {
    let mut response = head(status, headers, body.len());
    response.extend_from_slice(body);
    serve_chunks(vec![response], Duration::ZERO).await
}

/// Announce `content_length` bytes but send only `body`, then hang up
pub async fn serve_truncated(content_length: usize, body: &[u8]) -> String {
    let mut response = head("200 OK", &[], content_length);
    response.extend_from_slice(body);
    serve_chunks(vec![response], Duration::ZERO).await
}

/// Send the body in `chunks`, pausing `interval` before each one
pub async fn serve_trickle(chunks: Vec<Vec<u8>>, interval: Duration) -> String {
    let total = chunks.iter().map(Vec::len).sum();
    let mut parts = vec![head("200 OK", &[], total)];
    parts.extend(chunks);
    serve_chunks(parts, interval).await
}

async fn serve_chunks(parts: Vec<Vec<u8>>, interval: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        for (i, part) in parts.iter().enumerate() {
            if i > 0 && !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
            if socket.write_all(part).await.is_err() {
                return;
            }
            let _ = socket.flush().await;
        }
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}")
}
