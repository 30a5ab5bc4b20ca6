use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;

use crate::prompts::DEFAULT_PROMPT;

/// One uploaded image plus its optional instruction. Lives for a single
/// request; nothing is kept once the response finishes.
#[derive(Debug, Clone)]
pub struct ImageSubmission {
    pub bytes: Bytes,
    pub media_type: Option<String>,
    pub prompt: Option<String>,
}

impl ImageSubmission {
    /// Base64 data URI embedded in the model request.
    pub fn data_uri(&self) -> String {
        let media_type = self.media_type.as_deref().unwrap_or("image/png");
        format!("data:{};base64,{}", media_type, STANDARD.encode(&self.bytes))
    }

    /// The supplied prompt when non-empty, the built-in instruction otherwise.
    pub fn instruction(&self) -> &str {
        match self.prompt.as_deref() {
            Some(prompt) if !prompt.trim().is_empty() => prompt,
            _ => DEFAULT_PROMPT,
        }
    }
}
