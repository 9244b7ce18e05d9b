//! Response envelopes returned by the generate endpoint.

use serde::Deserialize;

/// Error body returned with a non-success status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorResponse {
    Structured { error: ErrorDetail },
    Helicone { helicone_error: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    /// Error code as sent, either a string or a number.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorDetail {
    /// The code as text. Strings are unquoted and `null` counts as absent.
    pub fn code_text(&self) -> Option<String> {
        match self.code.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(code) => Some(code.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Chat-completion shaped success body. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl SuccessResponse {
    /// `choices[0].message.content`, if present and non-empty.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .as_ref()?
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
            .filter(|content| !content.is_empty())
    }
}

/// Turn a successful body into the reply text.
///
/// Returns the chat content when the body has one, otherwise the body
/// pretty-printed as JSON.
pub fn extract_reply(body: &serde_json::Value) -> Result<String, serde_json::Error> {
    let content = SuccessResponse::deserialize(body)
        .ok()
        .and_then(|parsed| parsed.content().map(str::to_string));

    match content {
        Some(content) => Ok(content),
        None => serde_json::to_string_pretty(body),
    }
}
