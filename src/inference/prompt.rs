//! Prompts for reply generation using Handlebars for templating. The
//! transcript is untrusted text from the host page so templates only
//! get the variables registered here.

use std::fmt;

use handlebars::Handlebars;
use serde_json::json;

#[derive(Debug)]
pub enum Prompt {
    ReplyOptions,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant designed to enhance conversations within a chat application. Your role is to analyze the provided chat history and generate exactly 3 distinct response options that are contextually relevant and could steer the conversation in different directions. Aim for a friendly, helpful, and engaging tone. Reply only with a numbered list in the form:
1. <first response>
2. <second response>
3. <third response>";

const REPLY_OPTIONS_PROMPT: &str = r"Chat history:
{{transcript}}

Generate 3 response options:";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Plain text goes to the model, not a browser
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::ReplyOptions.to_string(), REPLY_OPTIONS_PROMPT)
        .expect("Failed to register template");
    registry
}

pub fn render_reply_options(
    registry: &Handlebars<'_>,
    transcript: &str,
) -> Result<String, handlebars::RenderError> {
    registry.render(
        &Prompt::ReplyOptions.to_string(),
        &json!({ "transcript": transcript }),
    )
}
