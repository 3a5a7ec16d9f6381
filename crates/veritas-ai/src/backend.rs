//! Classifier capability: the one seam between the pipeline and whatever
//! model serves it.
//!
//! The orchestrator depends only on [`ClassifierBackend::invoke`]; the
//! concrete backend (hosted LLM, zero-shot endpoint, test double) is wiring,
//! not policy. The bundled HTTP implementation lives behind the `http`
//! feature.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("model reply carried no text")]
    EmptyReply,

    #[error("classifier call timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Other(String),
}

/// A text-in, text-out call against an external classifier.
///
/// Implementations must respect `timeout` as an upper bound on the whole
/// call so the pipeline keeps a predictable worst-case latency.
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    async fn invoke(&self, prompt: &str, timeout: Duration) -> Result<String, BackendError>;
}

/// Inference-API style HTTP backend: POSTs `{"inputs": prompt}` and reads
/// the generated text back out of the handful of JSON shapes such services
/// return.
#[cfg(feature = "http")]
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

#[cfg(feature = "http")]
impl HttpClassifier {
    /// `endpoint` is the full model URL (no trailing slash needed).
    pub fn new(endpoint: String, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Hosted models disagree on reply shape: an array of generations, a
    /// bare object with `generated_text`, or an `output` field.
    fn extract_text(value: &serde_json::Value) -> Option<String> {
        let text = value
            .get(0)
            .and_then(|first| first.get("generated_text"))
            .or_else(|| value.get("generated_text"))
            .or_else(|| value.get("output"))
            .and_then(|t| t.as_str())?;
        Some(text.to_string())
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl ClassifierBackend for HttpClassifier {
    async fn invoke(&self, prompt: &str, timeout: Duration) -> Result<String, BackendError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .timeout(timeout)
            .json(&serde_json::json!({ "inputs": prompt }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = resp.json().await?;
        Self::extract_text(&value).ok_or(BackendError::EmptyReply)
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;

    #[test]
    fn extracts_array_of_generations() {
        let value = serde_json::json!([{ "generated_text": "Health" }]);
        assert_eq!(HttpClassifier::extract_text(&value).as_deref(), Some("Health"));
    }

    #[test]
    fn extracts_bare_object() {
        let value = serde_json::json!({ "generated_text": "Education" });
        assert_eq!(
            HttpClassifier::extract_text(&value).as_deref(),
            Some("Education")
        );
    }

    #[test]
    fn extracts_output_field() {
        let value = serde_json::json!({ "output": "Economy" });
        assert_eq!(HttpClassifier::extract_text(&value).as_deref(), Some("Economy"));
    }

    #[test]
    fn unknown_shape_is_none() {
        let value = serde_json::json!({ "label": "Economy" });
        assert_eq!(HttpClassifier::extract_text(&value), None);
    }

    #[test]
    fn trims_trailing_slash() {
        let backend = HttpClassifier::new("http://localhost:8080/model/".into(), None);
        assert_eq!(backend.endpoint, "http://localhost:8080/model");
    }
}
