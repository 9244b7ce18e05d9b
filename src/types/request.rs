//! Wire body construction.

use super::params::{PromptVersion, RequestParams};
use crate::Error;
use serde::Serialize;
use std::collections::BTreeMap;

/// Input variable that receives the rendered chat transcript.
pub const CHAT_HISTORY_INPUT: &str = "chat_history";

/// JSON payload sent to the generate endpoint.
///
/// Tracking fields (`userId`, `sessionId`, `cache`) travel as headers and
/// never appear here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub prompt_id: String,
    pub version: PromptVersion,
    pub inputs: BTreeMap<String, String>,
}

impl RequestBody {
    /// Build the wire body. `version` defaults to production and a non-empty
    /// chat is folded into the `chat_history` input. Version `0` is a
    /// configuration error.
    pub fn from_params(params: &RequestParams) -> Result<Self, Error> {
        let version = params
            .version
            .unwrap_or_default()
            .validate()
            .map_err(Error::Config)?;
        let mut inputs = params.inputs.clone().unwrap_or_default();

        if let Some(chat) = params.chat.as_deref().filter(|chat| !chat.is_empty()) {
            inputs.insert(CHAT_HISTORY_INPUT.to_string(), render_chat_transcript(chat));
        }

        Ok(Self {
            prompt_id: params.prompt_id.clone(),
            version,
            inputs,
        })
    }
}

/// Render a chat as `User: ..` / `Assistant: ..` blocks separated by a blank line.
///
/// Roles come from position alone: even indices are the user, odd indices the
/// assistant. A conversation that opens with an assistant turn is mislabeled.
pub fn render_chat_transcript<S: AsRef<str>>(chat: &[S]) -> String {
    chat.iter()
        .enumerate()
        .map(|(i, message)| {
            let role = if i % 2 == 0 { "User" } else { "Assistant" };
            format!("{role}: {}", message.as_ref())
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_params_use_defaults() {
        let body = RequestBody::from_params(&RequestParams::new("new-prompt-19")).unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "promptId": "new-prompt-19",
                "version": "production",
                "inputs": {}
            })
        );
    }

    #[test]
    fn test_inputs_copied_exactly() {
        let params = RequestParams::new("p").with_input("x", "1");
        let body = RequestBody::from_params(&params).unwrap();
        assert_eq!(body.inputs.len(), 1);
        assert_eq!(body.inputs.get("x").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_tracking_fields_stay_out_of_body() {
        let params = RequestParams::new("p")
            .with_version(2)
            .with_user_id("user-123")
            .with_session_id("session-456")
            .with_cache(true);
        let value = serde_json::to_value(RequestBody::from_params(&params).unwrap()).unwrap();
        assert_eq!(value["version"], json!(2));
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(!object.contains_key("userId"));
        assert!(!object.contains_key("properties"));
    }

    #[test]
    fn test_zero_version_is_rejected() {
        let params = RequestParams::new("p").with_version(0);
        let err = RequestBody::from_params(&params).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_chat_transcript_alternates_roles() {
        assert_eq!(
            render_chat_transcript(&["hi", "hello", "bye"]),
            "User: hi\n\nAssistant: hello\n\nUser: bye"
        );
        assert_eq!(render_chat_transcript::<&str>(&[]), "");
    }

    #[test]
    fn test_chat_folded_into_inputs() {
        let params = RequestParams::new("p")
            .with_input("number", "2")
            .with_chat(["Hello", "Hi there"]);
        let body = RequestBody::from_params(&params).unwrap();
        assert_eq!(body.inputs.get("number").map(String::as_str), Some("2"));
        assert_eq!(
            body.inputs.get(CHAT_HISTORY_INPUT).map(String::as_str),
            Some("User: Hello\n\nAssistant: Hi there")
        );

        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("chat").is_none());
    }

    #[test]
    fn test_empty_chat_adds_nothing() {
        let params = RequestParams::new("p").with_chat(Vec::<String>::new());
        assert!(RequestBody::from_params(&params).unwrap().inputs.is_empty());
    }
}
