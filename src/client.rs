//! Dispatcher for the generate endpoint.

use crate::config::GenerateConfig;
use crate::headers::assemble_headers;
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::types::{extract_reply, ErrorResponse, GenerateInput, RequestBody};
use crate::Error;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Client for the generate endpoint.
///
/// Holds only immutable configuration and a shared transport, so it can be
/// cloned and used from concurrent tasks.
#[derive(Clone)]
pub struct GenerateClient {
    config: Arc<GenerateConfig>,
    transport: Arc<dyn Transport>,
}

impl GenerateClient {
    /// Create a client using the default reqwest transport.
    pub fn new(config: GenerateConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    pub fn with_transport(config: GenerateConfig, transport: impl Transport) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    /// Create a client over a snapshot of the process environment.
    pub fn from_env() -> Self {
        Self::new(GenerateConfig::from_env())
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Assemble the request for `input` without sending it.
    pub fn prepare(&self, input: impl Into<GenerateInput>) -> Result<HttpRequest, Error> {
        let params = input.into().into_params();
        let headers = assemble_headers(&self.config, &params)?;
        let body = serde_json::to_string(&RequestBody::from_params(&params)?)?;

        Ok(HttpRequest {
            url: self.config.base_url.clone(),
            headers,
            body,
        })
    }

    /// Run a stored prompt and return the reply text.
    ///
    /// Performs exactly one POST. A chat-completion body yields its message
    /// content; any other body is returned pretty-printed.
    pub async fn generate(&self, input: impl Into<GenerateInput>) -> Result<String, Error> {
        let request = self.prepare(input)?;
        debug!(
            url = %request.url,
            headers = ?request.headers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
            "sending generate request"
        );

        let response = self.transport.send(request).await.map_err(|e| {
            error!(error = %e, "generate request failed");
            e
        })?;

        if !response.is_success() {
            let err = remote_error(&response);
            warn!(status = response.status, error = %err, "generate endpoint returned an error");
            return Err(err);
        }

        let body: serde_json::Value = serde_json::from_str(&response.body)?;
        Ok(extract_reply(&body)?)
    }
}

/// Map a non-success response to an error, preferring the structured body.
fn remote_error(response: &HttpResponse) -> Error {
    let status = response.status;
    match serde_json::from_str::<ErrorResponse>(&response.body).ok() {
        Some(ErrorResponse::Structured { error }) => {
            let code = error.code_text();
            let message = match &code {
                Some(code) => format!("{} (code: {code})", error.message),
                None => error.message,
            };
            Error::Remote {
                status,
                message,
                code,
                details: error.details,
            }
        }
        Some(ErrorResponse::Helicone { helicone_error }) => Error::remote(status, helicone_error),
        None => Error::remote(status, format!("Request failed with status {status}")),
    }
}

/// Run a stored prompt using credentials from the process environment.
pub async fn generate(input: impl Into<GenerateInput>) -> Result<String, Error> {
    GenerateClient::from_env().generate(input).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::types::RequestParams;
    use tracing_test::traced_test;

    struct StaticTransport(HttpResponse);

    #[async_trait::async_trait]
    impl Transport for StaticTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, Error> {
            Ok(self.0.clone())
        }
    }

    fn client() -> GenerateClient {
        let env = Environment::new()
            .with_var("HELICONE_API_KEY", "sk-helicone")
            .with_var("OPENAI_API_KEY", "sk-openai");
        GenerateClient::new(GenerateConfig::new(env).with_base_url("http://localhost/v1/generate"))
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_prepare_bare_id() {
        let request = client().prepare("new-prompt-19").unwrap();
        assert_eq!(request.url, "http://localhost/v1/generate");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&request.body).unwrap(),
            serde_json::json!({"promptId": "new-prompt-19", "version": "production", "inputs": {}})
        );
    }

    #[test]
    fn test_prepare_is_deterministic() {
        let client = client();
        let params = RequestParams::new("p").with_input("x", "1").with_cache(true);
        assert_eq!(
            client.prepare(params.clone()).unwrap(),
            client.prepare(params).unwrap()
        );
    }

    #[test]
    fn test_prepare_rejects_zero_version() {
        let err = client()
            .prepare(RequestParams::new("p").with_version(0))
            .unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_dispatch_logs_header_names_not_values() {
        let env = Environment::new()
            .with_var("HELICONE_API_KEY", "sk-helicone-secret")
            .with_var("OPENAI_API_KEY", "sk-openai-secret");
        let client = GenerateClient::with_transport(
            GenerateConfig::new(env),
            StaticTransport(response(200, r#"{"choices":[{"message":{"content":"ok"}}]}"#)),
        );

        assert_eq!(client.generate("p").await.unwrap(), "ok");
        assert!(logs_contain("sending generate request"));
        assert!(logs_contain("Helicone-Auth"));
        assert!(logs_contain("OPENAI_API_KEY"));
        assert!(!logs_contain("sk-helicone-secret"));
        assert!(!logs_contain("sk-openai-secret"));
    }

    #[test]
    fn test_numeric_error_code_keeps_message() {
        let err = remote_error(&response(
            400,
            r#"{"error":{"message":"Prompt version 999 not found","code":400}}"#,
        ));
        match err {
            Error::Remote { message, code, .. } => {
                assert_eq!(message, "Prompt version 999 not found (code: 400)");
                assert_eq!(code.as_deref(), Some("400"));
            }
            other => panic!("Expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_structured_error_includes_code() {
        let err = remote_error(&response(
            400,
            r#"{"error":{"message":"Prompt version 999 not found","code":"VERSION_NOT_FOUND","details":{"version":999}}}"#,
        ));
        match err {
            Error::Remote { status, message, code, details } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Prompt version 999 not found (code: VERSION_NOT_FOUND)");
                assert_eq!(code.as_deref(), Some("VERSION_NOT_FOUND"));
                assert_eq!(details, Some(serde_json::json!({"version": 999})));
            }
            other => panic!("Expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_helicone_error() {
        let err = remote_error(&response(404, r#"{"helicone_error":"Prompt not found"}"#));
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Prompt not found"));
    }

    #[test]
    fn test_opaque_error_body() {
        let err = remote_error(&response(502, "<html>Bad Gateway</html>"));
        assert!(err.to_string().contains("Request failed with status 502"));

        let err = remote_error(&response(500, ""));
        assert!(err.to_string().contains("Request failed with status 500"));
    }
}
