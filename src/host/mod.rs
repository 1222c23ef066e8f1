//! The boundary to the chat application the suggestions are injected
//! into. Everything the pipeline reads from or writes to the page goes
//! through `HostPage`.
pub mod context;
pub mod models;
pub use context::*;
pub use models::*;

/// The page hosting the chat. Implementations adapt a concrete UI
/// (a browser DOM, a terminal chat, a test double) to the few reads
/// and writes the suggestion pipeline needs.
pub trait HostPage: Send + Sync {
    /// Message elements in page order.
    fn message_elements(&self) -> Vec<HostElement>;

    /// Whether the chat input can be found yet. Pages that load
    /// asynchronously answer `false` until it shows up.
    fn has_chat_input(&self) -> bool;

    /// Overwrite the chat input text.
    fn set_chat_input(&self, text: &str);

    /// Place the toggle, generate and settings controls next to the
    /// chat input.
    fn attach_controls(&self, enabled: bool);

    fn update_toggle(&self, enabled: bool);

    /// Show a blocking notification to the user.
    fn notify(&self, message: &str);

    /// Ask the user for their API key, prefilled with the current one.
    fn open_settings(&self, current_credential: Option<&str>);
}
