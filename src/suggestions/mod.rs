//! Candidate replies shown as selectable options above the chat input.
pub mod presenter;
pub use presenter::*;

/// One option in the panel. `preview` is what the button shows, `text`
/// is what lands in the chat input when it's picked.
#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    pub preview: String,
    pub text: String,
}

/// Draws and removes the suggestion panel. Styling and layout are up
/// to the implementation; the presenter decides what is shown and
/// when.
pub trait SuggestionDisplay: Send + Sync {
    fn render_panel(&self, suggestions: &[Suggestion]);
    fn remove_panel(&self);
}
