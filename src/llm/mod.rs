pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

pub use gemini::GeminiClient;

pub const UNAVAILABLE_REPLY: &str = "LLM Service Unavailable (API Key Missing)";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0}")]
    Http(reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response contained no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        // request urls may carry credentials
        LlmError::Http(err.without_url())
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmOutcome {
    Ok,
    Unavailable,
    Failed,
}

impl LlmOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmOutcome::Ok => "ok",
            LlmOutcome::Unavailable => "unavailable",
            LlmOutcome::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmReply {
    pub text: String,
    pub outcome: LlmOutcome,
}

#[derive(Clone)]
pub enum LlmAdapter {
    Unavailable,
    Ready(Arc<dyn TextGenerator>),
}

impl LlmAdapter {
    pub fn new(generator: impl TextGenerator + 'static) -> Self {
        LlmAdapter::Ready(Arc::new(generator))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LlmAdapter::Ready(_))
    }

    /// Single attempt, no retry.
    pub async fn generate(&self, prompt: &str) -> LlmReply {
        let generator = match self {
            LlmAdapter::Unavailable => {
                return LlmReply {
                    text: UNAVAILABLE_REPLY.to_string(),
                    outcome: LlmOutcome::Unavailable,
                };
            }
            LlmAdapter::Ready(generator) => generator,
        };

        match generator.generate_content(prompt).await {
            Ok(text) => LlmReply {
                text,
                outcome: LlmOutcome::Ok,
            },
            Err(err) => {
                warn!(error = %err, "llm call failed");
                LlmReply {
                    text: format!("LLM Error: {err}"),
                    outcome: LlmOutcome::Failed,
                }
            }
        }
    }
}

impl std::fmt::Debug for LlmAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmAdapter::Unavailable => f.write_str("LlmAdapter::Unavailable"),
            LlmAdapter::Ready(_) => f.write_str("LlmAdapter::Ready"),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        async fn generate_content(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 429,
                body: "quota exceeded".to_string(),
            })
        }
    }

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    #[tokio::test]
    async fn unavailable_adapter_returns_sentinel() {
        let reply = LlmAdapter::Unavailable.generate("anything").await;

        assert_eq!(reply.text, "LLM Service Unavailable (API Key Missing)");
        assert_eq!(reply.outcome, LlmOutcome::Unavailable);
    }

    #[tokio::test]
    async fn call_failure_becomes_error_text() {
        let reply = LlmAdapter::new(Failing).generate("anything").await;

        assert_eq!(reply.text, "LLM Error: API returned 429: quota exceeded");
        assert_eq!(reply.outcome, LlmOutcome::Failed);
    }

    #[tokio::test]
    async fn successful_call_passes_text_through() {
        let reply = LlmAdapter::new(Echo).generate("hold position").await;

        assert_eq!(reply.text, "echo: hold position");
        assert_eq!(reply.outcome, LlmOutcome::Ok);
    }
}
