//! Gemini `generateContent` adapter for the generation client port.

use super::types::{GenerateRequest, GenerateResponse};
use async_trait::async_trait;
use interview_application::ports::generation_client::{GenerationClient, GenerationError};
use interview_domain::{ContextEntry, SamplingConfig};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for [`GeminiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    /// Base URL of the models collection (no trailing `/model`)
    pub api_url: String,
    pub model: String,
    pub api_key: String,
    /// Upper bound for one request including the body read
    pub timeout: Duration,
}

/// Generation client backed by the Gemini REST API.
///
/// One call issues one HTTP request; retries are the caller's concern.
pub struct GeminiClient {
    http: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.settings.api_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    async fn send(&self, request: &GenerateRequest) -> Result<String, GenerationError> {
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.settings.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "Generation request failed ({}): {}",
                status,
                interview_domain::util::preview(&body, 200)
            );
            return Err(GenerationError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        parsed
            .first_text()
            .map_err(GenerationError::MalformedResponse)
    }
}

fn map_transport_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Timeout
    } else if err.is_decode() {
        GenerationError::MalformedResponse(err.to_string())
    } else {
        GenerationError::Connection(err.to_string())
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(
        &self,
        entries: &[ContextEntry],
        sampling: &SamplingConfig,
    ) -> Result<String, GenerationError> {
        let request = GenerateRequest::new(entries, sampling);
        debug!(
            "Sending {} context entries to {} (temperature {})",
            entries.len(),
            self.settings.model,
            sampling.temperature
        );

        match tokio::time::timeout(self.settings.timeout, self.send(&request)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP exchange and hand back the raw request.
    async fn one_shot_server(
        status_line: &'static str,
        body: &'static str,
        delay: Duration,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            tokio::time::sleep(delay).await;

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{addr}/v1beta/models"), handle)
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
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn client(api_url: String, timeout: Duration) -> GeminiClient {
        GeminiClient::new(GeminiSettings {
            api_url,
            model: "test-model".to_string(),
            api_key: "test-key".to_string(),
            timeout,
        })
    }

    fn entries() -> Vec<ContextEntry> {
        vec![
            ContextEntry::user("You are a friendly interviewer."),
            ContextEntry::model("Hi! What did you buy recently?"),
            ContextEntry::user("A kettle"),
        ]
    }

    #[tokio::test]
    async fn test_generate_success_and_request_shape() {
        let (url, server) = one_shot_server(
            "HTTP/1.1 200 OK",
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Why a kettle?"}]}}]}"#,
            Duration::ZERO,
        )
        .await;

        let text = client(url, Duration::from_secs(5))
            .generate(&entries(), &SamplingConfig::MAIN)
            .await
            .unwrap();
        assert_eq!(text, "Why a kettle?");

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("POST /v1beta/models/test-model:generateContent?key=test-key"));

        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["contents"].as_array().unwrap().len(), 3);
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 200);
        assert_eq!(json["generationConfig"]["topK"], 40);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let (url, _server) = one_shot_server(
            "HTTP/1.1 503 Service Unavailable",
            r#"{"error":{"message":"overloaded"}}"#,
            Duration::ZERO,
        )
        .await;

        let err = client(url, Duration::from_secs(5))
            .generate(&entries(), &SamplingConfig::MAIN)
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::RequestFailed { status: 503 });
    }

    #[tokio::test]
    async fn test_missing_text_is_malformed() {
        let (url, _server) = one_shot_server(
            "HTTP/1.1 200 OK",
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
            Duration::ZERO,
        )
        .await;

        let err = client(url, Duration::from_secs(5))
            .generate(&entries(), &SamplingConfig::CLARIFICATION)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let (url, _server) =
            one_shot_server("HTTP/1.1 200 OK", "not json at all", Duration::ZERO).await;

        let err = client(url, Duration::from_secs(5))
            .generate(&entries(), &SamplingConfig::MAIN)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "malformed_response");
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let (url, _server) = one_shot_server(
            "HTTP/1.1 200 OK",
            r#"{"candidates":[]}"#,
            Duration::from_secs(5),
        )
        .await;

        let err = client(url, Duration::from_millis(100))
            .generate(&entries(), &SamplingConfig::MAIN)
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::Timeout);
    }

    #[tokio::test]
    async fn test_refused_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}/models"), Duration::from_secs(5))
            .generate(&entries(), &SamplingConfig::MAIN)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Connection(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = client("http://localhost/models/".to_string(), Duration::from_secs(1));
        assert_eq!(
            client.endpoint(),
            "http://localhost/models/test-model:generateContent"
        );
    }
}
