//! Minimal HTTP/1.1 server for exercising providers against canned responses.
//!
//! Responses are written as raw bytes, which allows sending malformed replies
//! (e.g. a `Content-Length` that does not match the body).

use std::net::SocketAddr;

use reqwest::Client;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve `response` verbatim to every incoming connection
    pub async fn start(response: impl Into<Vec<u8>>) -> anyhow::Result<TestServer> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let response = response.into();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let response = response.clone();
                tokio::spawn(async move {
                    // a failed connection just fails the request on the client side
                    let _ = serve(stream, &response).await;
                });
            }
        });
        Ok(TestServer { addr, handle })
    }

    /// Respond with the given status and a plain text body
    pub async fn with_body(status: &str, body: &str) -> anyhow::Result<TestServer> {
        TestServer::start(format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ))
        .await
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(mut stream: TcpStream, response: &[u8]) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    // requests are bodyless GETs, the headers are all we need to consume
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
    }
    stream.write_all(response).await?;
    stream.shutdown().await
}

/// A local address on which nothing is listening
pub async fn refused_addr() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

pub async fn refused_url() -> anyhow::Result<String> {
    Ok(format!("http://{}", refused_addr().await?))
}

/// Client that talks to the test server directly, regardless of proxy settings in the environment
pub fn test_client() -> anyhow::Result<Client> {
    Ok(Client::builder().no_proxy().build()?)
}
