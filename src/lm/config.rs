use bon::Builder;

/// Tunable inference parameters applied to each [`LM::call`](crate::LM::call).
#[derive(Clone, Debug, Builder)]
pub struct LMConfig {
    /// Default model identifier. Accepts `provider/model` to infer base URL.
    #[builder(default = "gpt-4o-mini".to_string(), into)]
    pub model: String,
    /// Sampling temperature. Graders want deterministic output, so zero by default.
    #[builder(default = 0.0)]
    pub temperature: f32,
    /// Nucleus sampling parameter (`top_p`).
    #[builder(default = 1.0)]
    pub top_p: f32,
    /// Maximum tokens requested for the completion. Chain-of-thought graders
    /// need room for reasoning before the verdict line.
    #[builder(default = 1024)]
    pub max_tokens: u32,
    /// Optional deterministic seed when the provider supports it.
    #[builder(default = 42)]
    pub seed: i64,
}

impl Default for LMConfig {
    fn default() -> Self {
        LMConfig::builder().build()
    }
}
