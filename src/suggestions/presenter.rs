use std::sync::Mutex;

use super::{Suggestion, SuggestionDisplay};
use crate::inference::strip_numbering;

pub type OnSelect = Box<dyn Fn(&str) + Send + Sync + 'static>;

struct Panel {
    suggestions: Vec<Suggestion>,
    on_select: OnSelect,
}

/// Keeps at most one suggestion panel on screen and routes a selection
/// back to the caller.
pub struct SuggestionPresenter<D: SuggestionDisplay> {
    display: D,
    preview_chars: usize,
    panel: Mutex<Option<Panel>>,
}

impl<D: SuggestionDisplay> SuggestionPresenter<D> {
    pub fn new(display: D, preview_chars: usize) -> Self {
        Self {
            display,
            preview_chars,
            panel: Mutex::new(None),
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Replace whatever panel is showing with one option per candidate.
    pub fn show<F>(&self, candidates: &[String], on_select: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let suggestions: Vec<Suggestion> = candidates
            .iter()
            .map(|c| {
                let text = strip_numbering(c);
                Suggestion {
                    preview: preview(&text, self.preview_chars),
                    text,
                }
            })
            .collect();

        let mut panel = self.panel.lock().unwrap_or_else(|e| e.into_inner());
        if panel.take().is_some() {
            self.display.remove_panel();
        }
        self.display.render_panel(&suggestions);
        tracing::debug!("Showing {} suggestions", suggestions.len());
        *panel = Some(Panel {
            suggestions,
            on_select: Box::new(on_select),
        });
    }

    /// Pick the option at `index`: hands its full text to the selection
    /// callback and closes the panel. `None` if nothing is showing or
    /// the index is out of range.
    pub fn select(&self, index: usize) -> Option<String> {
        let panel = {
            let mut guard = self.panel.lock().unwrap_or_else(|e| e.into_inner());
            guard.as_ref()?.suggestions.get(index)?;
            guard.take()?
        };
        self.display.remove_panel();
        let text = panel.suggestions[index].text.clone();
        (panel.on_select)(&text);
        Some(text)
    }

    pub fn dismiss(&self) {
        let mut panel = self.panel.lock().unwrap_or_else(|e| e.into_inner());
        if panel.take().is_some() {
            self.display.remove_panel();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.panel
            .lock()
            .map(|p| p.is_some())
            .unwrap_or_else(|e| e.into_inner().is_some())
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.panel
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|p| p.suggestions.clone())
            .unwrap_or_default()
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when
/// something was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct RecordingDisplay {
        panels: Mutex<Vec<Vec<Suggestion>>>,
    }

    impl SuggestionDisplay for RecordingDisplay {
        fn render_panel(&self, suggestions: &[Suggestion]) {
            self.panels.lock().unwrap().push(suggestions.to_vec());
        }

        fn remove_panel(&self) {
            self.panels.lock().unwrap().pop();
        }
    }

    fn candidates(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strips_numbering_for_selection() {
        let presenter = SuggestionPresenter::new(RecordingDisplay::default(), 50);
        let selected = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&selected);
        presenter.show(&candidates(&["2. Sure, tell me more"]), move |text| {
            *sink.lock().unwrap() = Some(text.to_string());
        });

        assert_eq!(presenter.suggestions()[0].preview, "Sure, tell me more");
        assert_eq!(presenter.select(0).as_deref(), Some("Sure, tell me more"));
        assert_eq!(selected.lock().unwrap().as_deref(), Some("Sure, tell me more"));
        assert!(!presenter.is_visible());
        assert!(presenter.display().panels.lock().unwrap().is_empty());
    }

    #[test]
    fn test_show_twice_leaves_one_panel() {
        let presenter = SuggestionPresenter::new(RecordingDisplay::default(), 50);
        presenter.show(&candidates(&["1. a", "2. b"]), |_| {});
        presenter.show(&candidates(&["1. c"]), |_| {});

        let panels = presenter.display().panels.lock().unwrap();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0][0].text, "c");
    }

    #[test]
    fn test_preview_truncates_but_selection_is_full() {
        let long = format!("1. {}", "word ".repeat(20).trim_end());
        let presenter = SuggestionPresenter::new(RecordingDisplay::default(), 50);
        presenter.show(&[long.clone()], |_| {});

        let shown = &presenter.suggestions()[0];
        assert_eq!(shown.preview.chars().count(), 53);
        assert!(shown.preview.ends_with("..."));
        assert_eq!(presenter.select(0).unwrap(), long.trim_start_matches("1. "));
    }

    #[test]
    fn test_preview_is_char_safe() {
        assert_eq!(preview("héllo wörld", 4), "héll...");
        assert_eq!(preview("short", 50), "short");
    }

    #[test]
    fn test_select_out_of_range_keeps_panel() {
        let presenter = SuggestionPresenter::new(RecordingDisplay::default(), 50);
        presenter.show(&candidates(&["1. only"]), |_| panic!("should not be selected"));
        assert_eq!(presenter.select(3), None);
        assert!(presenter.is_visible());
    }

    #[test]
    fn test_select_without_panel() {
        let presenter = SuggestionPresenter::new(RecordingDisplay::default(), 50);
        assert_eq!(presenter.select(0), None);
    }

    #[test]
    fn test_dismiss() {
        let presenter = SuggestionPresenter::new(RecordingDisplay::default(), 50);
        presenter.show(&candidates(&["1. a"]), |_| {});
        presenter.dismiss();
        presenter.dismiss();
        assert!(!presenter.is_visible());
        assert!(presenter.display().panels.lock().unwrap().is_empty());
    }
}
