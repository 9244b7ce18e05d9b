//! Client configuration and the environment snapshot credentials are read from.

use std::collections::HashMap;
use std::env;

/// Default generate endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generate.helicone.ai/v1/generate";

/// Variable holding the Helicone API key.
pub const HELICONE_API_KEY: &str = "HELICONE_API_KEY";

/// Provider names whose credentials are forwarded when present.
pub const DEFAULT_PROVIDERS: &[&str] = &[
    "OPENAI",
    "ANTHROPIC",
    "AZURE",
    "AWS",
    "BEDROCK",
    "GOOGLE",
    "GEMINI",
    "VERTEX",
    "MISTRAL",
    "COHERE",
    "GROQ",
    "DEEPSEEK",
    "TOGETHER",
    "FIREWORKS",
    "PERPLEXITY",
    "OPENROUTER",
    "XAI",
    "NOVITA",
];

/// Suffixes looked up for every provider, in header order.
pub const PROVIDER_SUFFIXES: &[&str] = &["_API_KEY", "_REGION", "_PROJECT", "_LOCATION"];

/// Immutable snapshot of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Look up a variable. Empty values count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Configuration for a [`GenerateClient`](crate::GenerateClient).
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub base_url: String,
    pub providers: Vec<String>,
    /// Fail before sending when no provider API key is present.
    pub require_provider_key: bool,
    pub environment: Environment,
}

impl GenerateConfig {
    /// Create configuration over an explicit environment snapshot.
    pub fn new(environment: Environment) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            providers: DEFAULT_PROVIDERS.iter().map(|p| p.to_string()).collect(),
            require_provider_key: true,
            environment,
        }
    }

    /// Create configuration from the process environment.
    pub fn from_env() -> Self {
        Self::new(Environment::from_process())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the provider list.
    pub fn with_providers<S: Into<String>>(mut self, providers: impl IntoIterator<Item = S>) -> Self {
        self.providers = providers.into_iter().map(Into::into).collect();
        self
    }

    pub fn require_provider_key(mut self, require: bool) -> Self {
        self.require_provider_key = require;
        self
    }

    /// All `<PROVIDER>_API_KEY` names that satisfy the provider requirement.
    pub fn provider_key_names(&self) -> Vec<String> {
        self.providers
            .iter()
            .map(|provider| format!("{provider}_API_KEY"))
            .collect()
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self::new(Environment::new())
    }
}
