use serde::Deserialize;

/// One incremental chunk of an OpenAI-style streaming chat completion.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error body returned by the upstream API on non-success statuses. Some
/// deployments return `{"error": "..."}`, others the OpenAI shape
/// `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: UpstreamErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UpstreamErrorDetail {
    Message(String),
    Object { message: String },
}

impl UpstreamErrorBody {
    pub fn into_message(self) -> String {
        match self.error {
            UpstreamErrorDetail::Message(message) => message,
            UpstreamErrorDetail::Object { message } => message,
        }
    }
}
