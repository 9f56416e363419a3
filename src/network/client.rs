use crate::core::{BoardSnapshot, Move};
use crate::network::error::{ClientError, ClientResult};
use crate::network::protocol::{AiMoveRequest, AiMoveResponse, MoveResponse, ResetResponse};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// The rules/AI backend as seen by the client.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn reset(&self) -> ClientResult<BoardSnapshot>;
    async fn submit_move(&self, mv: Move) -> ClientResult<MoveResponse>;
    async fn request_ai_move(&self, model: &str) -> ClientResult<AiMoveResponse>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<B, R>(&self, path: &str, body: Option<&B>) -> ClientResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");

        let mut request = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn reset(&self) -> ClientResult<BoardSnapshot> {
        let resp: ResetResponse = self.post::<(), _>("/reset", None).await?;
        resp.into_snapshot()
    }

    async fn submit_move(&self, mv: Move) -> ClientResult<MoveResponse> {
        self.post("/move", Some(&mv)).await
    }

    async fn request_ai_move(&self, model: &str) -> ClientResult<AiMoveResponse> {
        self.post("/ai_move", Some(&AiMoveRequest::new(model))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Side, Square};
    use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// One-shot HTTP responder. Sends back `(path, body)` of the request it saw.
    async fn serve_once(
        status: &'static str,
        reply: &'static str,
    ) -> (String, mpsc::UnboundedReceiver<(String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let (path, body) = {
                let mut reader = BufReader::new(&mut socket);

                let mut request_line = String::new();
                reader.read_line(&mut request_line).await.unwrap();
                let path = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();

                let mut content_length = 0;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).await.unwrap();
                    if line == "\r\n" || line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap();
                        }
                    }
                }
                let mut body = vec![0u8; content_length];
                reader.read_exact(&mut body).await.unwrap();
                (path, String::from_utf8(body).unwrap())
            };
            let _ = tx.send((path, body));

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reply.len(),
                reply
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (format!("http://{}", addr), rx)
    }

    #[tokio::test]
    async fn test_submit_move_roundtrip() {
        let (url, mut seen) = serve_once(
            "200 OK",
            r#"{"success": true, "message": "ok", "capture": false, "current_turn": "B", "game_over": false, "winner": null}"#,
        )
        .await;
        let backend = HttpBackend::new(&url, Duration::from_secs(5)).unwrap();

        let resp = backend
            .submit_move(Move::new(Square::new(6, 2), Square::new(5, 2)))
            .await
            .unwrap();
        assert!(resp.success);
        assert_eq!(resp.current_turn, Some(Side::Black));

        let (path, body) = seen.recv().await.unwrap();
        assert_eq!(path, "/move");
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, serde_json::json!({ "from": [6, 2], "to": [5, 2] }));
    }

    #[tokio::test]
    async fn test_ai_move_request_body() {
        let (url, mut seen) = serve_once(
            "200 OK",
            r#"{"success": false, "message": "resign"}"#,
        )
        .await;
        let backend = HttpBackend::new(&url, Duration::from_secs(5)).unwrap();

        let resp = backend.request_ai_move("Kimi").await.unwrap();
        assert!(!resp.success);
        assert_eq!(resp.reason(), "resign");

        let (path, body) = seen.recv().await.unwrap();
        assert_eq!(path, "/ai_move");
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["model"], "Kimi");
        assert_eq!(body["board_str"], "backend_gen");
    }

    #[tokio::test]
    async fn test_reset_rejects_bad_board() {
        let (url, _seen) = serve_once("200 OK", r#"{"status": "success", "board": [["RK"]]}"#).await;
        let backend = HttpBackend::new(&url, Duration::from_secs(5)).unwrap();

        let err = backend.reset().await.unwrap_err();
        assert!(matches!(err, ClientError::Protocol { .. }));
    }

    #[tokio::test]
    async fn test_error_status() {
        let (url, _seen) = serve_once("500 Internal Server Error", "boom").await;
        let backend = HttpBackend::new(&url, Duration::from_secs(5)).unwrap();

        let err = backend
            .submit_move(Move::new(Square::new(0, 0), Square::new(1, 0)))
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let (url, _seen) = serve_once("200 OK", "not json").await;
        let backend = HttpBackend::new(&url, Duration::from_secs(5)).unwrap();

        let err = backend.request_ai_move("Qwen").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
