use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::parse::parse_candidates;
use super::prompt::{SYSTEM_INSTRUCTION, render_reply_options, templates};
use crate::core::{GeneratorConfig, SuggestError};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Asks an OpenAI compatible chat completion endpoint for candidate
/// replies to a transcript.
///
/// Each call to `generate` is exactly one HTTP request. Nothing is
/// queued, retried or cancelled here; the only time limit is the
/// transport timeout from `GeneratorConfig`.
pub struct InferenceClient {
    http: reqwest::Client,
    config: GeneratorConfig,
    templates: Handlebars<'static>,
}

impl InferenceClient {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            templates: templates(),
        }
    }

    /// The system and user messages sent for `transcript`.
    pub fn messages(&self, transcript: &str) -> Result<Vec<Message>, SuggestError> {
        let user_prompt = render_reply_options(&self.templates, transcript)?;
        Ok(vec![
            Message::new(Role::System, SYSTEM_INSTRUCTION),
            Message::new(Role::User, &user_prompt),
        ])
    }

    pub fn payload(&self, transcript: &str) -> Result<Value, SuggestError> {
        Ok(json!({
            "messages": self.messages(transcript)?,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "top_p": self.config.top_p,
            "n": self.config.completions,
        }))
    }

    /// Candidate replies for `transcript`, numbering markers included,
    /// in the order the model listed them.
    pub async fn generate(
        &self,
        transcript: &str,
        credential: &str,
    ) -> Result<Vec<String>, SuggestError> {
        let payload = self.payload(transcript)?;
        tracing::debug!("Requesting reply options from {}", self.config.endpoint);

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(credential)
            .header("Content-Type", "application/json")
            .timeout(self.config.request_timeout)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Inference request failed with status {}", status);
            return Err(SuggestError::Transport {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let content = completion_content(&body)?;
        let candidates = parse_candidates(&content);
        tracing::debug!("Parsed {} candidate replies", candidates.len());
        Ok(candidates)
    }
}

/// The text of the first choice of a chat completion response body.
pub fn completion_content(body: &str) -> Result<String, SuggestError> {
    let resp: Value = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Response is not JSON: {}", e);
        SuggestError::Format(format!("invalid JSON: {}", e))
    })?;
    resp["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            tracing::error!("Response missing choices[0].message.content: {}", resp);
            SuggestError::Format("missing choices[0].message.content".to_string())
        })
}
