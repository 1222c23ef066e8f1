//! Wires the pieces together: waits for the host chat input, attaches
//! the controls, and runs extract → generate → show when the user asks
//! for suggestions.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::{GeneratorConfig, SuggestError};
use crate::host::{HostPage, extract_context};
use crate::inference::InferenceClient;
use crate::settings::{SettingsStore, usable_credential};
use crate::suggestions::{SuggestionDisplay, SuggestionPresenter};

pub const MISSING_CREDENTIAL_MESSAGE: &str = "Please set your API key in the settings first.";
pub const NOTHING_GENERATED_MESSAGE: &str = "No suggestions were generated. Try again.";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControllerState {
    Uninitialized,
    WaitingForHostReady,
    Idle,
    GenerationInFlight,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a generate request ended up doing when it didn't fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Suggestions are turned off, nothing was requested
    Disabled,
    /// A panel with this many suggestions is showing
    Shown(usize),
    /// The model answered without any numbered options
    Empty,
    /// A newer request already showed its result or failed while this
    /// one was in flight so its response was dropped
    Stale,
}

struct Status {
    state: ControllerState,
    // Generate requests that haven't finished or been dropped yet
    in_flight: usize,
}

pub struct ExtensionController<D: SuggestionDisplay> {
    config: GeneratorConfig,
    settings: Arc<dyn SettingsStore>,
    page: Arc<dyn HostPage>,
    client: InferenceClient,
    presenter: SuggestionPresenter<D>,
    status: Mutex<Status>,
    latest_request: AtomicU64,
    // Newest request id that showed its result or failed
    latest_settled: Mutex<u64>,
}

/// Counts a generate request as outstanding for as long as it lives,
/// including when the request future is dropped part way.
struct InFlight<'a, D: SuggestionDisplay>(&'a ExtensionController<D>);

impl<'a, D: SuggestionDisplay> InFlight<'a, D> {
    fn begin(controller: &'a ExtensionController<D>) -> Self {
        controller.update_status(|status| {
            status.in_flight += 1;
            status.state = ControllerState::GenerationInFlight;
        });
        Self(controller)
    }
}

impl<D: SuggestionDisplay> Drop for InFlight<'_, D> {
    fn drop(&mut self) {
        self.0.update_status(|status| {
            status.in_flight -= 1;
            if status.in_flight == 0 {
                status.state = ControllerState::Idle;
            }
        });
    }
}

/// Puts the controller back to `Uninitialized` if attaching doesn't
/// finish, so a later `attach` starts over.
struct Attaching<'a, D: SuggestionDisplay> {
    controller: &'a ExtensionController<D>,
    done: bool,
}

impl<D: SuggestionDisplay> Drop for Attaching<'_, D> {
    fn drop(&mut self) {
        if !self.done {
            self.controller.set_state(ControllerState::Uninitialized);
        }
    }
}

impl<D: SuggestionDisplay> ExtensionController<D> {
    pub fn new(
        config: GeneratorConfig,
        settings: Arc<dyn SettingsStore>,
        page: Arc<dyn HostPage>,
        display: D,
    ) -> Self {
        let presenter = SuggestionPresenter::new(display, config.preview_chars);
        Self {
            client: InferenceClient::new(config.clone()),
            config,
            settings,
            page,
            presenter,
            status: Mutex::new(Status {
                state: ControllerState::Uninitialized,
                in_flight: 0,
            }),
            latest_request: AtomicU64::new(0),
            latest_settled: Mutex::new(0),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.status.lock().unwrap_or_else(|e| e.into_inner()).state
    }

    fn update_status(&self, f: impl FnOnce(&mut Status)) {
        let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
        let before = status.state;
        f(&mut status);
        if status.state != before {
            tracing::debug!("Controller state {} -> {}", before, status.state);
        }
    }

    fn set_state(&self, next: ControllerState) {
        self.update_status(|status| status.state = next);
    }

    fn is_attached(&self) -> bool {
        matches!(
            self.state(),
            ControllerState::Idle | ControllerState::GenerationInFlight
        )
    }

    pub fn presenter(&self) -> &SuggestionPresenter<D> {
        &self.presenter
    }

    /// Wait for the host chat input and attach the controls next to it.
    ///
    /// The host page may still be loading so the input is polled every
    /// `host_poll_interval` with no limit on attempts. Returns the
    /// number of polls it took. Only the first call does anything.
    pub async fn attach(&self) -> Result<usize, SuggestError> {
        {
            let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
            if status.state != ControllerState::Uninitialized {
                return Ok(0);
            }
            status.state = ControllerState::WaitingForHostReady;
        }
        let mut attaching = Attaching {
            controller: self,
            done: false,
        };
        tracing::info!("Waiting for the chat input to attach suggestion controls");

        let mut attempts = 0;
        loop {
            attempts += 1;
            if self.page.has_chat_input() {
                break;
            }
            tracing::warn!(
                "Chat input element not found. Retrying in {:?}...",
                self.config.host_poll_interval
            );
            tokio::time::sleep(self.config.host_poll_interval).await;
        }

        let enabled = self.settings.is_enabled()?;
        self.page.attach_controls(enabled);
        self.set_state(ControllerState::Idle);
        attaching.done = true;
        tracing::info!("Suggestion controls attached after {} attempt(s)", attempts);

        Ok(attempts)
    }

    /// Flip the enablement flag. A request already in flight carries on.
    pub fn set_enabled(&self, enabled: bool) -> Result<(), SuggestError> {
        if !self.is_attached() {
            return Err(SuggestError::HostNotReady);
        }
        self.settings.set_enabled(enabled)?;
        self.page.update_toggle(enabled);
        tracing::info!("Suggestions {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    pub fn open_settings(&self) -> Result<(), SuggestError> {
        let current = self.settings.credential()?;
        self.page.open_settings(current.as_deref());
        Ok(())
    }

    pub fn save_credential(&self, credential: &str) -> Result<(), SuggestError> {
        self.settings.set_credential(credential)?;
        tracing::info!("API key saved");
        Ok(())
    }

    /// Generate suggestions for the conversation currently on the page.
    ///
    /// Failures are reported to the user through the page and returned.
    /// A response that arrives after a newer request has already shown
    /// its result (or failed) is dropped without touching the panel or
    /// notifying anyone.
    pub async fn generate(&self) -> Result<Outcome, SuggestError> {
        if !self.is_attached() {
            return Err(SuggestError::HostNotReady);
        }
        if !self.settings.is_enabled()? {
            tracing::debug!("Generate requested while disabled, ignoring");
            return Ok(Outcome::Disabled);
        }
        let Some(credential) = usable_credential(self.settings.as_ref())? else {
            tracing::warn!("Generate requested without an API key");
            self.page.notify(MISSING_CREDENTIAL_MESSAGE);
            self.open_settings()?;
            return Err(SuggestError::Configuration);
        };

        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = InFlight::begin(self);

        let context = extract_context(self.page.as_ref(), self.config.max_turns);
        let result = self.client.generate(&context, &credential).await;

        // Held while the result is shown so an older response can't
        // land between the check and the panel update
        let mut settled = self.latest_settled.lock().unwrap_or_else(|e| e.into_inner());
        if *settled > request_id {
            tracing::warn!("Discarding response for superseded request {}", request_id);
            return Ok(Outcome::Stale);
        }
        *settled = request_id;

        match result {
            Err(e) => {
                tracing::error!("Error generating response: {}", e);
                self.page.notify(&format!("Error generating response: {}", e));
                Err(e)
            }
            Ok(candidates) if candidates.is_empty() => {
                self.page.notify(NOTHING_GENERATED_MESSAGE);
                Ok(Outcome::Empty)
            }
            Ok(candidates) => {
                let page = Arc::clone(&self.page);
                self.presenter.show(&candidates, move |text| page.set_chat_input(text));
                Ok(Outcome::Shown(candidates.len()))
            }
        }
    }

    /// Put the chosen suggestion in the chat input and close the panel.
    pub fn select_suggestion(&self, index: usize) -> Option<String> {
        self.presenter.select(index)
    }

    pub fn dismiss_suggestions(&self) {
        self.presenter.dismiss()
    }
}
