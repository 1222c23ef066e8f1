//! Reply suggestions for a host chat page: read the recent turns of
//! the conversation, ask an OpenAI compatible chat completion endpoint
//! for three candidate replies and show them as clickable options
//! that fill the chat input.
pub mod controller;
pub mod core;
pub mod host;
pub mod inference;
pub mod settings;
pub mod suggestions;
