use super::{LoadingIndicator, ResultsContainer, SubmitControl};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A change applied to the page, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Results(String),
    Loading(bool),
    SubmitEnabled(bool),
}

#[derive(Debug)]
struct PageState {
    results_html: String,
    loading_visible: bool,
    submit_enabled: bool,
    events: Vec<UiEvent>,
}

/// In-memory page backing all three UI handles
///
/// Used by the CLI, which has no browser, and by tests, which inspect the
/// recorded [`UiEvent`]s.
#[derive(Debug)]
pub struct MemoryPage {
    state: Mutex<PageState>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Idle page: empty results, indicator hidden, submit enabled.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PageState {
                results_html: String::new(),
                loading_visible: false,
                submit_enabled: true,
                events: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn results_html(&self) -> String {
        self.state().results_html.clone()
    }

    pub fn loading_visible(&self) -> bool {
        self.state().loading_visible
    }

    pub fn submit_enabled(&self) -> bool {
        self.state().submit_enabled
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.state().events.clone()
    }

    pub fn is_idle(&self) -> bool {
        let state = self.state();
        !state.loading_visible && state.submit_enabled
    }
}

impl ResultsContainer for MemoryPage {
    fn replace_content(&self, html: &str) {
        let mut state = self.state();
        state.results_html = html.to_string();
        state.events.push(UiEvent::Results(html.to_string()));
    }
}

impl LoadingIndicator for MemoryPage {
    fn set_visible(&self, visible: bool) {
        let mut state = self.state();
        state.loading_visible = visible;
        state.events.push(UiEvent::Loading(visible));
    }
}

impl SubmitControl for MemoryPage {
    fn set_enabled(&self, enabled: bool) {
        let mut state = self.state();
        state.submit_enabled = enabled;
        state.events.push(UiEvent::SubmitEnabled(enabled));
    }
}
