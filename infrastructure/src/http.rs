//! Shared plumbing for the JSON-over-HTTP adapters.

use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Transport-level failure of one JSON request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HttpFailure {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for HttpFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpFailure::Timeout
        } else if e.is_decode() {
            HttpFailure::Decode(e.to_string())
        } else {
            HttpFailure::Connection(e.to_string())
        }
    }
}

/// Build a client with a whole-request timeout
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, HttpFailure> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("vault-rag/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| HttpFailure::Connection(e.to_string()))
}

/// Send a prepared request and decode a JSON body from a 2xx response.
pub async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, HttpFailure> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(HttpFailure::Status {
            status: status.as_u16(),
            body: vault_domain::util::truncate_str(&body, 200).to_string(),
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| HttpFailure::Decode(e.to_string()))
}

/// Join a base URL and an absolute path without doubling slashes
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
pub(crate) mod test_server {
    //! One-shot HTTP server for adapter tests.

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one request with `status` and a JSON `body`.
    ///
    /// Returns the base URL and a handle yielding the raw request text.
    pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{}", addr), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length")
                            .then(|| v.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }
}
