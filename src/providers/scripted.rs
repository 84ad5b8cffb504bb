use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::core::LmError;
use crate::lm::{Chat, LMConfig, LmUsage, Message};
use crate::providers::{Completion, CompletionProvider};

type Responder = Box<dyn Fn(&Chat) -> String + Send + Sync>;

enum Script {
    Canned(Mutex<VecDeque<String>>),
    Respond(Responder),
    Fail(String),
}

/// Deterministic provider for tests: serves canned responses, computes a
/// response from the prompt, or always fails. Records every chat it sees so
/// tests can assert on the rendered prompts.
pub struct ScriptedProvider {
    script: Script,
    history: Mutex<Vec<Chat>>,
}

impl ScriptedProvider {
    /// Serves the given responses in order; errors once they run out.
    pub fn canned<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = responses.into_iter().map(Into::into).collect();
        Self {
            script: Script::Canned(Mutex::new(queue)),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Computes each response from the incoming chat.
    pub fn respond_with(responder: impl Fn(&Chat) -> String + Send + Sync + 'static) -> Self {
        Self {
            script: Script::Respond(Box::new(responder)),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with a provider error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(message.into()),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Chats seen so far, in call order.
    pub fn history(&self) -> Vec<Chat> {
        self.history.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.history.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, chat: &Chat, _config: &LMConfig) -> Result<Completion, LmError> {
        self.history.lock().unwrap().push(chat.clone());

        let content = match &self.script {
            Script::Canned(queue) => {
                queue
                    .lock()
                    .unwrap()
                    .pop_front()
                    .ok_or_else(|| LmError::Provider {
                        provider: "scripted".to_string(),
                        message: "script exhausted".to_string(),
                    })?
            }
            Script::Respond(responder) => responder(chat),
            Script::Fail(message) => {
                return Err(LmError::Provider {
                    provider: "scripted".to_string(),
                    message: message.clone(),
                });
            }
        };

        Ok(Completion {
            message: Message::assistant(content),
            usage: LmUsage {
                prompt_tokens: 1,
                completion_tokens: 1,
                total_tokens: 2,
            },
        })
    }
}
