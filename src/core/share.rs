//! Stateless codec between a prompt's shareable fields and a URL-fragment
//! safe token.
//!
//! A token is the JSON object `{title, prompt, imageUrl, category}` encoded
//! with the URL-safe base64 alphabet and no padding, so it only ever contains
//! `A-Z a-z 0-9 - _` and can sit as the last segment of `#/share/<token>`.

use super::storage::{Category, SharedData};
use crate::api::ShareError;
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::json;

/// Decoded token body. Every field is optional here so that a missing
/// required field is reported as such instead of as a parse failure.
/// Unknown keys are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharePayload {
    title: Option<String>,
    prompt: Option<String>,
    image_url: Option<String>,
    category: Option<Category>,
}

/// Encode shareable fields into a token. Never fails.
pub fn encode(fields: &SharedData) -> String {
    let body = json!({
        "title": fields.title,
        "prompt": fields.prompt,
        "imageUrl": fields.image_url,
        "category": fields.category.as_str(),
    });
    general_purpose::URL_SAFE_NO_PAD.encode(body.to_string())
}

/// Decode a token produced by [`encode`].
///
/// Tokens in the standard alphabet, padded or not, are accepted as well,
/// which covers links produced by older builds of the web gallery.
pub fn decode(token: &str) -> Result<SharedData, ShareError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ShareError::InvalidToken("empty token".to_string()));
    }

    let unpadded = token.trim_end_matches('=');
    let engine = if unpadded.contains(['+', '/']) {
        &general_purpose::STANDARD_NO_PAD
    } else {
        &general_purpose::URL_SAFE_NO_PAD
    };
    let bytes = engine
        .decode(unpadded)
        .map_err(|e| ShareError::InvalidToken(e.to_string()))?;

    let text = std::str::from_utf8(&bytes)
        .map_err(|_| ShareError::InvalidToken("payload is not UTF-8".to_string()))?;
    let payload: SharePayload =
        serde_json::from_str(text).map_err(|e| ShareError::InvalidToken(e.to_string()))?;

    Ok(SharedData {
        title: payload.title.ok_or(ShareError::MissingField("title"))?,
        prompt: payload.prompt.ok_or(ShareError::MissingField("prompt"))?,
        image_url: payload.image_url.unwrap_or_default(),
        category: payload.category.unwrap_or_default(),
    })
}
