//! Pull a JSON object out of free-form model output.
//!
//! Models wrap JSON in prose or code fences often enough that parsing the raw
//! text directly is unreliable. The outermost brace-delimited span is taken
//! and parsed strictly.

use serde::de::DeserializeOwned;

use crate::error::ContentError;

/// Return the span from the first `{` to the last `}`, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Extract and deserialize a JSON object from model output.
pub fn parse_json_object<T: DeserializeOwned>(text: &str) -> Result<T, ContentError> {
    let json = extract_json_object(text)
        .ok_or_else(|| ContentError::Invalid("response contains no JSON object".to_string()))?;

    serde_json::from_str(json).map_err(|e| ContentError::Invalid(e.to_string()))
}
