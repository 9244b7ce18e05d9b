//! Outbound header assembly from the environment snapshot.

use crate::config::{GenerateConfig, HELICONE_API_KEY, PROVIDER_SUFFIXES};
use crate::types::RequestParams;
use crate::Error;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const HELICONE_AUTH: &str = "Helicone-Auth";
pub const HELICONE_USER_ID: &str = "Helicone-User-Id";
pub const HELICONE_SESSION_ID: &str = "Helicone-Session-Id";
pub const HELICONE_CACHE: &str = "Helicone-Cache";

/// Ordered list of header name/value pairs.
pub type Headers = Vec<(String, String)>;

/// Build the headers for one call.
///
/// Fails without side effects when the Helicone key is missing, or when no
/// provider key is present and the config requires one.
pub fn assemble_headers(config: &GenerateConfig, params: &RequestParams) -> Result<Headers, Error> {
    let env = &config.environment;
    let api_key = env
        .get(HELICONE_API_KEY)
        .ok_or_else(|| Error::config(format!("{HELICONE_API_KEY} environment variable is required")))?;

    let mut headers: Headers = vec![
        (CONTENT_TYPE.to_string(), "application/json".to_string()),
        (HELICONE_AUTH.to_string(), format!("Bearer {api_key}")),
    ];

    if let Some(user_id) = &params.user_id {
        headers.push((HELICONE_USER_ID.to_string(), user_id.clone()));
    }
    if let Some(session_id) = &params.session_id {
        headers.push((HELICONE_SESSION_ID.to_string(), session_id.clone()));
    }
    if let Some(cache) = params.cache {
        headers.push((HELICONE_CACHE.to_string(), cache.to_string()));
    }

    let mut has_provider_key = false;
    for provider in &config.providers {
        for suffix in PROVIDER_SUFFIXES {
            let name = format!("{provider}{suffix}");
            if let Some(value) = env.get(&name) {
                has_provider_key |= *suffix == "_API_KEY";
                headers.push((name, value.to_string()));
            }
        }
    }

    if config.require_provider_key && !has_provider_key {
        return Err(Error::config(format!(
            "at least one provider API key is required, set one of: {}",
            config.provider_key_names().join(", ")
        )));
    }

    Ok(headers)
}
