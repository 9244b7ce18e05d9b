//! Caller-facing parameters and input normalization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const PRODUCTION: &str = "production";
const ZERO_VERSION: &str = "prompt version must be positive";

/// Which version of a stored prompt to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawVersion", into = "RawVersion")]
pub enum PromptVersion {
    /// A specific, positive version number.
    Number(u32),
    /// Whatever version is currently deployed to production.
    #[default]
    Production,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Number(u32),
    Label(String),
}

impl TryFrom<RawVersion> for PromptVersion {
    type Error = String;

    fn try_from(raw: RawVersion) -> Result<Self, Self::Error> {
        match raw {
            RawVersion::Number(n) => PromptVersion::Number(n).validate(),
            RawVersion::Label(label) if label == PRODUCTION => Ok(PromptVersion::Production),
            RawVersion::Label(label) => Err(format!(
                "unknown prompt version '{label}', expected a number or \"{PRODUCTION}\""
            )),
        }
    }
}

impl From<PromptVersion> for RawVersion {
    fn from(version: PromptVersion) -> Self {
        match version {
            PromptVersion::Number(n) => RawVersion::Number(n),
            PromptVersion::Production => RawVersion::Label(PRODUCTION.to_string()),
        }
    }
}

impl PromptVersion {
    /// Reject version `0`; numbered versions start at 1.
    pub fn validate(self) -> Result<Self, String> {
        match self {
            PromptVersion::Number(0) => Err(ZERO_VERSION.to_string()),
            version => Ok(version),
        }
    }
}

impl From<u32> for PromptVersion {
    fn from(n: u32) -> Self {
        PromptVersion::Number(n)
    }
}

impl fmt::Display for PromptVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptVersion::Number(n) => write!(f, "{n}"),
            PromptVersion::Production => f.write_str(PRODUCTION),
        }
    }
}

/// Parameters for a single generate call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    pub prompt_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<PromptVersion>,
    /// Values substituted into the prompt's variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<BTreeMap<String, String>>,
    /// Conversation so far, alternating user and assistant turns starting with the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<bool>,
}

impl RequestParams {
    pub fn new(prompt_id: impl Into<String>) -> Self {
        Self {
            prompt_id: prompt_id.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<PromptVersion>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add a single prompt variable.
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_inputs<K, V>(mut self, inputs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = self.inputs.get_or_insert_with(BTreeMap::new);
        map.extend(inputs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_chat<S: Into<String>>(mut self, chat: impl IntoIterator<Item = S>) -> Self {
        self.chat = Some(chat.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = Some(cache);
        self
    }
}

/// Anything `generate` accepts: a bare prompt id or full parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateInput {
    PromptId(String),
    Params(RequestParams),
}

impl GenerateInput {
    /// Normalize into canonical parameters. The prompt id is not validated.
    pub fn into_params(self) -> RequestParams {
        match self {
            GenerateInput::PromptId(prompt_id) => RequestParams::new(prompt_id),
            GenerateInput::Params(params) => params,
        }
    }
}

impl From<&str> for GenerateInput {
    fn from(s: &str) -> Self {
        GenerateInput::PromptId(s.to_string())
    }
}

impl From<String> for GenerateInput {
    fn from(s: String) -> Self {
        GenerateInput::PromptId(s)
    }
}

impl From<&String> for GenerateInput {
    fn from(s: &String) -> Self {
        GenerateInput::PromptId(s.clone())
    }
}

impl From<RequestParams> for GenerateInput {
    fn from(params: RequestParams) -> Self {
        GenerateInput::Params(params)
    }
}
