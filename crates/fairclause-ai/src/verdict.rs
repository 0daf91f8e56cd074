//! Best-effort extraction of a JSON object from free-form model output.
//!
//! Models wrap JSON in markdown fences or surround it with prose. The policy is
//! fixed: drop every ```` ```json ```` and ```` ``` ```` marker, then parse the
//! span from the first `{` to the last `}`.

use serde::de::DeserializeOwned;

use crate::error::VerdictError;

pub(crate) fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

pub(crate) fn parse_json_object<T: DeserializeOwned>(text: &str) -> Result<T, VerdictError> {
    let cleaned = strip_code_fences(text);
    let span = object_span(&cleaned).ok_or(VerdictError::NoObject)?;
    Ok(serde_json::from_str(span)?)
}
