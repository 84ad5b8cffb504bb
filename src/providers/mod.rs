pub mod openai;
pub mod scripted;

pub use openai::*;
pub use scripted::*;

use async_trait::async_trait;

use crate::core::LmError;
use crate::lm::{Chat, LMConfig, LmUsage, Message};

/// One completed provider call.
#[derive(Clone, Debug)]
pub struct Completion {
    pub message: Message,
    pub usage: LmUsage,
}

/// Transport seam between [`LM`](crate::LM) and a concrete model backend.
///
/// [`OpenAIProvider`] is the real HTTP implementation; [`ScriptedProvider`]
/// serves canned or computed responses for hermetic tests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, chat: &Chat, config: &LMConfig) -> Result<Completion, LmError>;
}
