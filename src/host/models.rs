use std::fmt;

/// Attribute value prefixes that mark chat turns on the host page.
pub const USER_MESSAGE_PREFIX: &str = "user-message";
pub const ASSISTANT_MESSAGE_PREFIX: &str = "ai-response";

/// A message element as read from the page: the value of its
/// `data-element-id` attribute, if any, and its text content.
#[derive(Clone, Debug, PartialEq)]
pub struct HostElement {
    pub element_id: Option<String>,
    pub text: String,
}

impl HostElement {
    pub fn new(element_id: &str, text: &str) -> Self {
        Self {
            element_id: Some(element_id.to_string()),
            text: text.to_string(),
        }
    }

    pub fn unlabeled(text: &str) -> Self {
        Self {
            element_id: None,
            text: text.to_string(),
        }
    }

    /// The speaker this element belongs to, or `None` when the markup
    /// doesn't say.
    pub fn speaker(&self) -> Option<Speaker> {
        let id = self.element_id.as_deref()?;
        if id.starts_with(USER_MESSAGE_PREFIX) {
            Some(Speaker::User)
        } else if id.starts_with(ASSISTANT_MESSAGE_PREFIX) {
            Some(Speaker::Assistant)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Speaker {
    User,
    Assistant,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "User"),
            Speaker::Assistant => write!(f, "Assistant"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.speaker, self.text)
    }
}

/// Recent turns of the conversation, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn new_with_turns(turns: Vec<Turn>) -> Self {
        Self(turns)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.0.iter()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(Turn::to_string).collect();
        write!(f, "{}", lines.join("\n"))
    }
}
