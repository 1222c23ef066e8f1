use super::{HostPage, Transcript, Turn};

/// Sent in place of a transcript when the page has no messages yet.
pub const EMPTY_CONTEXT_GREETING: &str =
    "Hello, I'm ready to assist you. What would you like to discuss?";

/// Read the trailing `max_turns` turns from the page in page order.
///
/// Elements that aren't marked as a user or assistant message are
/// skipped rather than treated as an error, the host markup is not ours
/// and a partial transcript is still useful context.
pub fn extract_transcript(page: &dyn HostPage, max_turns: usize) -> Transcript {
    let turns: Vec<Turn> = page
        .message_elements()
        .into_iter()
        .filter_map(|el| {
            let speaker = el.speaker()?;
            Some(Turn {
                speaker,
                text: el.text.trim().to_string(),
            })
        })
        .collect();
    let start = turns.len().saturating_sub(max_turns);
    Transcript::new_with_turns(turns[start..].to_vec())
}

/// The transcript serialized for the model, one `Speaker: text` line
/// per turn.
pub fn extract_context(page: &dyn HostPage, max_turns: usize) -> String {
    let transcript = extract_transcript(page, max_turns);
    if transcript.is_empty() {
        tracing::debug!("No chat messages found, using greeting as context");
        return EMPTY_CONTEXT_GREETING.to_string();
    }
    let context = transcript.to_string();
    tracing::debug!("Current chat context:\n{}", context);
    context
}
