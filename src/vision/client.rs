use futures_util::{stream, Stream, StreamExt};
use serde_json::{json, Value};

use crate::model::ImageSubmission;

use super::sse::SseDecoder;
use super::types::{ChatCompletionChunk, UpstreamErrorBody};

const DEFAULT_API_BASE: &str = "https://router.huggingface.co/v1";
const DEFAULT_MODEL: &str = "meta-llama/Llama-3.2-11B-Vision-Instruct";
const DEFAULT_MAX_TOKENS: u32 = 500;

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("{0}")]
    Upstream(String),
    #[error("Failed to reach the model API: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the hosted vision-language model API.
///
/// Constructed once at startup and shared read-only across request handlers.
/// It holds no per-request resources, so no teardown is needed.
pub struct VisionClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_tokens: u32,
}

impl VisionClient {
    /// Reads configuration from the environment (`.env` supported via
    /// dotenvy). A missing API key is tolerated here and shows up later as
    /// an upstream authentication failure.
    pub fn from_env() -> Self {
        let api_key = dotenvy::var("HUGGINGFACE_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("HUGGINGFACE_API_KEY is not set; model calls will fail authentication");
        }
        let api_base =
            dotenvy::var("VISION_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = dotenvy::var("VISION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let max_tokens = dotenvy::var("VISION_MAX_TOKENS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        Self::new(api_key, api_base, model, max_tokens)
    }

    pub fn new(api_key: String, api_base: String, model: String, max_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base,
            model,
            max_tokens,
        }
    }

    /// One complete (non-streaming) description request. The completion is
    /// returned as-is; callers treat it as opaque.
    pub async fn describe(&self, submission: &ImageSubmission) -> Result<Value, VisionError> {
        let response = self.send(submission, false).await?;
        Ok(response.json().await?)
    }

    /// Streaming description request. The returned stream yields text
    /// fragments in arrival order; chunks without textual content are
    /// skipped. A transport failure mid-stream surfaces as an `Err` item.
    pub async fn describe_stream(
        &self,
        submission: &ImageSubmission,
    ) -> Result<impl Stream<Item = Result<String, VisionError>> + Send + 'static, VisionError>
    {
        let response = self.send(submission, true).await?;

        let mut decoder = SseDecoder::new();
        let mut done = false;
        let fragments = response
            .bytes_stream()
            .map(move |chunk| match chunk {
                Ok(bytes) if !done => {
                    let mut out = Vec::new();
                    for payload in decoder.feed(&bytes) {
                        if payload == "[DONE]" {
                            done = true;
                            break;
                        }
                        if let Some(text) = fragment_text(&payload) {
                            out.push(Ok(text));
                        }
                    }
                    out
                }
                Ok(_) => Vec::new(),
                Err(err) => vec![Err(VisionError::from(err))],
            })
            .flat_map(stream::iter);

        Ok(fragments)
    }

    async fn send(
        &self,
        submission: &ImageSubmission,
        stream: bool,
    ) -> Result<reqwest::Response, VisionError> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        tracing::debug!(model = %self.model, stream, "sending chat completion request");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(submission, stream))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UpstreamErrorBody>(&body)
                .map(UpstreamErrorBody::into_message)
                .unwrap_or_else(|_| format!("Model API returned {status}"));
            return Err(VisionError::Upstream(message));
        }

        Ok(response)
    }

    /// Single user turn: the image as a data URI followed by the instruction.
    fn request_body(&self, submission: &ImageSubmission, stream: bool) -> Value {
        json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "image_url", "image_url": { "url": submission.data_uri() } },
                    { "type": "text", "text": submission.instruction() }
                ]
            }],
            "max_tokens": self.max_tokens,
            "stream": stream
        })
    }
}

/// Extract the delta text from one streamed chunk payload, if any.
fn fragment_text(payload: &str) -> Option<String> {
    let chunk: ChatCompletionChunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(err) => {
            tracing::debug!("skipping undecodable stream chunk: {err}");
            return None;
        }
    };

    chunk
        .choices
        .into_iter()
        .next()?
        .delta
        .content
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn fragment_text_extracts_content() {
        let payload = r#"{"choices":[{"delta":{"content":"hello"}}]}"#;
        assert_eq!(fragment_text(payload).as_deref(), Some("hello"));
    }

    #[test]
    fn fragment_text_skips_empty_and_control_chunks() {
        assert!(fragment_text(r#"{"choices":[{"delta":{"content":""}}]}"#).is_none());
        assert!(fragment_text(r#"{"choices":[{"delta":{}}]}"#).is_none());
        assert!(fragment_text(r#"{"choices":[]}"#).is_none());
        assert!(fragment_text("not json").is_none());
    }

    #[test]
    fn request_body_carries_image_then_instruction() {
        let client = VisionClient::new(
            "key".into(),
            "http://localhost/v1".into(),
            "test-model".into(),
            64,
        );
        let submission = ImageSubmission {
            bytes: Bytes::from_static(b"img"),
            media_type: Some("image/png".into()),
            prompt: Some("What is this?".into()),
        };

        let body = client.request_body(&submission, true);
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 64);
        assert_eq!(body["stream"], true);

        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "image_url");
        assert!(content[0]["image_url"]["url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
        assert_eq!(content[1]["text"], "What is this?");
    }
}
