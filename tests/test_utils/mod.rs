//! Test doubles for the host page and suggestion display
#![allow(dead_code)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use serde_json::json;

use smart_reply::controller::ExtensionController;
use smart_reply::core::GeneratorConfig;
use smart_reply::core::logging::init_tracing;
use smart_reply::host::{HostElement, HostPage};
use smart_reply::settings::{KeyValue, MemorySettingsStore, SettingsStore};
use smart_reply::suggestions::{Suggestion, SuggestionDisplay};

/// A chat page kept in memory. The chat input shows up after
/// `polls_before_ready` failed lookups.
#[derive(Default)]
pub struct FakePage {
    pub messages: Mutex<Vec<HostElement>>,
    pub polls_before_ready: usize,
    pub polls: AtomicUsize,
    pub chat_input: Mutex<String>,
    pub notifications: Mutex<Vec<String>>,
    pub settings_prompts: Mutex<Vec<Option<String>>>,
    pub controls: Mutex<Option<bool>>,
    pub toggle: Mutex<Option<bool>>,
}

impl FakePage {
    pub fn ready_after(polls_before_ready: usize) -> Self {
        Self {
            polls_before_ready,
            ..Default::default()
        }
    }

    pub fn with_messages(messages: Vec<HostElement>) -> Self {
        Self {
            messages: Mutex::new(messages),
            ..Default::default()
        }
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }
}

impl HostPage for FakePage {
    fn message_elements(&self) -> Vec<HostElement> {
        self.messages.lock().unwrap().clone()
    }

    fn has_chat_input(&self) -> bool {
        self.polls.fetch_add(1, Ordering::SeqCst) >= self.polls_before_ready
    }

    fn set_chat_input(&self, text: &str) {
        *self.chat_input.lock().unwrap() = text.to_string();
    }

    fn attach_controls(&self, enabled: bool) {
        *self.controls.lock().unwrap() = Some(enabled);
        *self.toggle.lock().unwrap() = Some(enabled);
    }

    fn update_toggle(&self, enabled: bool) {
        *self.toggle.lock().unwrap() = Some(enabled);
    }

    fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }

    fn open_settings(&self, current_credential: Option<&str>) {
        self.settings_prompts
            .lock()
            .unwrap()
            .push(current_credential.map(str::to_string));
    }
}

/// Records every panel currently on screen.
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    pub panels: Arc<Mutex<Vec<Vec<Suggestion>>>>,
}

impl RecordingDisplay {
    pub fn panel_count(&self) -> usize {
        self.panels.lock().unwrap().len()
    }

    pub fn texts(&self) -> Vec<String> {
        self.panels
            .lock()
            .unwrap()
            .last()
            .map(|p| p.iter().map(|s| s.text.clone()).collect())
            .unwrap_or_default()
    }
}

impl SuggestionDisplay for RecordingDisplay {
    fn render_panel(&self, suggestions: &[Suggestion]) {
        self.panels.lock().unwrap().push(suggestions.to_vec());
    }

    fn remove_panel(&self) {
        self.panels.lock().unwrap().pop();
    }
}

/// In-memory settings whose first `failing_reads` reads fail.
#[derive(Default)]
pub struct FlakySettings {
    pub inner: MemorySettingsStore,
    pub failing_reads: AtomicUsize,
}

impl FlakySettings {
    pub fn failing(failing_reads: usize) -> Self {
        Self {
            failing_reads: AtomicUsize::new(failing_reads),
            ..Default::default()
        }
    }
}

impl KeyValue for FlakySettings {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let remaining = self.failing_reads.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_reads.store(remaining - 1, Ordering::SeqCst);
            return Err(anyhow!("disk busy"));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.inner.remove(key)
    }
}

pub struct Harness {
    pub page: Arc<FakePage>,
    pub settings: Arc<MemorySettingsStore>,
    pub display: RecordingDisplay,
    pub controller: ExtensionController<RecordingDisplay>,
}

/// A controller talking to `endpoint` with fast polling, in-memory
/// settings and the given page.
pub fn harness(endpoint: &str, page: FakePage) -> Harness {
    init_tracing();
    let page = Arc::new(page);
    let settings = Arc::new(MemorySettingsStore::new());
    let display = RecordingDisplay::default();
    let config = GeneratorConfig::default()
        .endpoint(endpoint)
        .host_poll_interval(Duration::from_millis(10));
    let controller = ExtensionController::new(
        config,
        settings.clone(),
        page.clone(),
        display.clone(),
    );
    Harness {
        page,
        settings,
        display,
        controller,
    }
}

/// Enable suggestions and store a key.
pub fn configure(settings: &MemorySettingsStore, credential: &str) {
    settings.set_enabled(true).unwrap();
    settings.set_credential(credential).unwrap();
}

pub fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "mistralai/Mistral-Nemo-Instruct-2407",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

pub fn conversation() -> Vec<HostElement> {
    vec![
        HostElement::new("user-message-1", "Can you recommend a book?"),
        HostElement::new("ai-response-1", "Sure, what genre do you like?"),
        HostElement::new("user-message-2", "Science fiction."),
    ]
}
