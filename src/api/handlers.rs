use axum::body::{Body, Bytes};
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::StreamExt;
use serde_json::json;

use crate::error::ApiError;
use crate::model::ImageSubmission;
use crate::AppState;

/// Non-streaming variant: waits for the full completion and returns it in
/// one JSON envelope.
pub async fn generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let submission = read_submission(multipart).await?;
    let completion = state.vision.describe(&submission).await?;
    Ok(Json(json!({ "result": completion })))
}

/// Streaming variant: relays upstream text fragments to the response body
/// as they arrive, in order, with no framing.
///
/// Once the body has started, an upstream failure can no longer become a
/// JSON error; erroring the body stream aborts the connection, and the
/// client keeps whatever text was already delivered.
pub async fn generate_stream(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let submission = read_submission(multipart).await?;
    let fragments = state.vision.describe_stream(&submission).await?;

    let body = Body::from_stream(fragments.map(|fragment| match fragment {
        Ok(text) => Ok(Bytes::from(text)),
        Err(err) => {
            tracing::error!("model stream failed mid-response: {err}");
            Err(err)
        }
    }));

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Pulls the `image` and `prompt` fields out of the form. The image must be
/// present and non-empty; nothing else is validated (a non-image file is
/// forwarded unchanged, matching the client-side picker being the only
/// content-type filter).
async fn read_submission(mut multipart: Multipart) -> Result<ImageSubmission, ApiError> {
    let mut image: Option<(Bytes, Option<String>)> = None;
    let mut prompt: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidForm(e.to_string()))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("image") => {
                let media_type = field.content_type().map(|m| m.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidForm(e.to_string()))?;
                if !bytes.is_empty() {
                    image = Some((bytes, media_type));
                }
            }
            Some("prompt") => {
                prompt = field.text().await.ok();
            }
            _ => {}
        }
    }

    let (bytes, media_type) = image.ok_or(ApiError::MissingImage)?;
    Ok(ImageSubmission {
        bytes,
        media_type,
        prompt,
    })
}
