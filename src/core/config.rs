use std::time::Duration;

/// Hugging Face serves an OpenAI compatible chat completion route for
/// each hosted model.
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models/mistralai/Mistral-Nemo-Instruct-2407/v1/chat/completions";

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub completions: u32,
    pub request_timeout: Duration,
    // Number of trailing conversation turns sent as context
    pub max_turns: usize,
    pub host_poll_interval: Duration,
    pub preview_chars: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_tokens: 500,
            temperature: 0.7,
            top_p: 0.95,
            completions: 1,
            request_timeout: Duration::from_secs(60),
            max_turns: 10,
            host_poll_interval: Duration::from_secs(1),
            preview_chars: 50,
        }
    }
}

impl GeneratorConfig {
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn host_poll_interval(mut self, interval: Duration) -> Self {
        self.host_poll_interval = interval;
        self
    }

    pub fn max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }
}
