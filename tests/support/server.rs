//! Raw HTTP/1.1 test servers on 127.0.0.1.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// How a canned server answers each request.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Write the bytes and keep the connection open for the next request.
    KeepAlive(&'static [u8]),
    /// Write the bytes, then close the connection.
    Close(&'static [u8]),
    /// Answer the first request on a connection, then hang up on the next
    /// one without replying.
    Once(&'static [u8]),
    /// Pick the reply by request path, keeping the connection open.
    /// Unknown paths get a 404.
    Routes(&'static [(&'static str, &'static [u8])]),
}

const NOT_FOUND: &[u8] = b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n";

pub struct TestServer {
    pub addr: SocketAddr,
    /// Raw request heads, in arrival order.
    pub requests: mpsc::UnboundedReceiver<String>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Accept connections forever, answering every request with `reply`.
pub async fn spawn_server(reply: Reply) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(serve_connection(socket, reply, tx.clone()));
        }
    });

    TestServer {
        addr,
        requests: rx,
    }
}

async fn serve_connection(mut socket: TcpStream, reply: Reply, tx: mpsc::UnboundedSender<String>) {
    let mut pending = Vec::new();
    let mut buf = [0u8; 4096];
    let mut answered = 0usize;

    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        pending.extend_from_slice(&buf[..n]);

        while let Some(end) = find_head_end(&pending) {
            let head: Vec<u8> = pending.drain(..end).collect();
            let head = String::from_utf8_lossy(&head).into_owned();
            let path = request_path(&head).to_string();
            let _ = tx.send(head);

            match reply {
                Reply::KeepAlive(bytes) => {
                    if socket.write_all(bytes).await.is_err() {
                        return;
                    }
                }
                Reply::Close(bytes) => {
                    let _ = socket.write_all(bytes).await;
                    let _ = socket.shutdown().await;
                    return;
                }
                Reply::Once(bytes) => {
                    if answered > 0 || socket.write_all(bytes).await.is_err() {
                        return;
                    }
                }
                Reply::Routes(routes) => {
                    let bytes = routes
                        .iter()
                        .find(|(route, _)| *route == path)
                        .map_or(NOT_FOUND, |(_, bytes)| *bytes);
                    if socket.write_all(bytes).await.is_err() {
                        return;
                    }
                }
            }
            answered += 1;
        }
    }
}

fn request_path(head: &str) -> &str {
    head.split_whitespace().nth(1).unwrap_or("")
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4)
}

/// An address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}
