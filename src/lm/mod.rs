pub mod chat;
pub mod config;
pub mod usage;

pub use chat::*;
pub use config::*;
pub use usage::*;

use secrecy::SecretString;
use std::sync::Arc;

use crate::core::LmError;
use crate::providers::{CompletionProvider, OpenAIProvider};

/// A single completion returned by [`LM::call`].
///
/// Captures the assistant reply (`output`), the provider token accounting
/// (`usage`), and the final chat transcript (`chat`) so callers can inspect
/// the full exchange.
#[derive(Clone, Debug)]
pub struct LMResponse {
    /// Assistant message chosen by the provider.
    pub output: Message,
    /// Token usage reported by the provider for this call.
    pub usage: LmUsage,
    /// Chat history including the freshly appended assistant response.
    pub chat: Chat,
}

fn base_url_for_provider(provider: &str) -> &'static str {
    match provider {
        "openai" => "https://api.openai.com/v1",
        "anthropic" => "https://api.anthropic.com/v1",
        "google" => "https://generativelanguage.googleapis.com/v1beta/openai",
        "groq" => "https://api.groq.com/openai/v1",
        "openrouter" => "https://openrouter.ai/api/v1",
        "together" => "https://api.together.xyz/v1",
        "xai" => "https://api.x.ai/v1",
        _ => "https://openrouter.ai/api/v1",
    }
}

/// Language model client used by the grading strategies.
///
/// `LM` pairs a [`CompletionProvider`] with request configuration. Clones are
/// cheap; they share the same provider via `Arc`, so one scripted provider can
/// be handed to many graders in tests.
#[derive(Clone)]
pub struct LM {
    provider: Arc<dyn CompletionProvider>,
    pub config: LMConfig,
}

impl LM {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: LMConfig) -> Self {
        Self { provider, config }
    }

    /// Builds an `LM` over an OpenAI-compatible HTTP provider.
    ///
    /// A `provider/model` identifier (e.g. `openrouter/qwen-2.5`) selects the
    /// base URL by prefix and strips it from the model name.
    pub fn openai(api_key: SecretString, mut config: LMConfig) -> Self {
        let model_str = config.model.clone();
        let base_url = if let Some((provider, model_id)) = model_str.split_once('/') {
            config.model = model_id.to_string();
            base_url_for_provider(provider).to_string()
        } else {
            base_url_for_provider("openai").to_string()
        };

        let provider = Arc::new(OpenAIProvider::new(api_key, base_url));
        Self::new(provider, config)
    }

    /// Builds an OpenAI-backed `LM` with the key from `OPENAI_API_KEY`.
    pub fn openai_from_env(config: LMConfig) -> Result<Self, LmError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| LmError::Provider {
            provider: "openai".to_string(),
            message: "OPENAI_API_KEY is not set".to_string(),
        })?;
        Ok(Self::openai(api_key.into(), config))
    }

    /// Executes a chat completion against the configured provider.
    ///
    /// The call returns an [`LMResponse`] containing the assistant output,
    /// token usage, and chat history including the new response.
    pub async fn call(&self, mut chat: Chat) -> Result<LMResponse, LmError> {
        let completion = self.provider.complete(&chat, &self.config).await?;
        chat.push(completion.message.clone());
        Ok(LMResponse {
            output: completion.message,
            usage: completion.usage,
            chat,
        })
    }
}
