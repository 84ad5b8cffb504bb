use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::LmError;
use crate::lm::{Chat, LMConfig, LmUsage, Message};
use crate::providers::{Completion, CompletionProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenAI-compatible chat-completion provider over plain HTTP.
pub struct OpenAIProvider {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: SecretString, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    seed: i64,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: WireResponseMessage,
}

#[derive(Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl From<WireUsage> for LmUsage {
    fn from(usage: WireUsage) -> Self {
        LmUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn complete(&self, chat: &Chat, config: &LMConfig) -> Result<Completion, LmError> {
        let endpoint = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &config.model,
            messages: chat
                .messages
                .iter()
                .map(|message| WireMessage {
                    role: message.role.as_str(),
                    content: &message.content,
                })
                .collect(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
            seed: config.seed,
        };

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|source| {
                if source.is_timeout() {
                    LmError::Timeout {
                        after: REQUEST_TIMEOUT,
                    }
                } else {
                    LmError::Network {
                        endpoint: endpoint.clone(),
                        source,
                    }
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(LmError::RateLimit {
                retry_after: retry_after(&response),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LmError::InvalidResponse {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse =
            response.json().await.map_err(|source| LmError::Network {
                endpoint: endpoint.clone(),
                source,
            })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LmError::InvalidResponse {
                status: status.as_u16(),
                body: "response contained no choices".to_string(),
            })?;
        let content = choice.message.content.unwrap_or_default();

        Ok(Completion {
            message: Message::assistant(content),
            usage: parsed.usage.map(LmUsage::from).unwrap_or_default(),
        })
    }
}
