//! UI surface driven by the submit handler.
//!
//! The handler never looks elements up itself: the three handles are bound
//! once into a [`UiContext`] and passed in.

pub mod memory;
pub mod render;

pub use memory::{MemoryPage, UiEvent};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Element whose inner HTML holds the rendered results
pub trait ResultsContainer: Send + Sync {
    fn replace_content(&self, html: &str);
}

/// Loading indicator toggled around a request
pub trait LoadingIndicator: Send + Sync {
    fn set_visible(&self, visible: bool);
}

/// Submit button disabled while a request is in flight
pub trait SubmitControl: Send + Sync {
    fn set_enabled(&self, enabled: bool);
}

/// Handles of one search form instance
#[derive(Clone)]
pub struct UiContext {
    results: Arc<dyn ResultsContainer>,
    indicator: Arc<dyn LoadingIndicator>,
    submit: Arc<dyn SubmitControl>,
    sequence: Arc<AtomicU64>,
}

impl UiContext {
    pub fn new(
        results: Arc<dyn ResultsContainer>,
        indicator: Arc<dyn LoadingIndicator>,
        submit: Arc<dyn SubmitControl>,
    ) -> Self {
        Self {
            results,
            indicator,
            submit,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Bind all three handles to one in-memory page.
    pub fn bind(page: Arc<MemoryPage>) -> Self {
        Self::new(page.clone(), page.clone(), page)
    }

    pub fn replace_results(&self, html: &str) {
        self.results.replace_content(html);
    }

    /// Enter the busy state for a new submission.
    pub fn begin(&self) -> BusyGuard<'_> {
        BusyGuard::acquire(self)
    }
}

/// Busy state of one submission: indicator shown, submit disabled.
///
/// Released on drop, whatever path the submission leaves by. A guard that has
/// been superseded by a newer submission leaves the busy state alone, since it
/// now belongs to the newer one.
pub struct BusyGuard<'a> {
    ui: &'a UiContext,
    ticket: u64,
}

impl<'a> BusyGuard<'a> {
    fn acquire(ui: &'a UiContext) -> Self {
        let ticket = ui.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        ui.indicator.set_visible(true);
        ui.submit.set_enabled(false);
        debug!(ticket, "Submission started");
        Self { ui, ticket }
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Whether no newer submission has started since this one.
    pub fn is_current(&self) -> bool {
        self.ui.sequence.load(Ordering::SeqCst) == self.ticket
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.is_current() {
            self.ui.indicator.set_visible(false);
            self.ui.submit.set_enabled(true);
            debug!(ticket = self.ticket, "Submission finished");
        } else {
            debug!(ticket = self.ticket, "Superseded submission finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_releases_busy_state_on_drop() {
        let page = Arc::new(MemoryPage::new());
        let ui = UiContext::bind(page.clone());

        {
            let guard = ui.begin();
            assert!(guard.is_current());
            assert!(page.loading_visible());
            assert!(!page.submit_enabled());
        }

        assert!(!page.loading_visible());
        assert!(page.submit_enabled());
    }

    #[test]
    fn superseded_guard_leaves_newer_submission_busy() {
        let page = Arc::new(MemoryPage::new());
        let ui = UiContext::bind(page.clone());

        let first = ui.begin();
        let second = ui.begin();
        assert!(!first.is_current());
        assert_eq!(second.ticket(), first.ticket() + 1);

        drop(first);
        assert!(page.loading_visible());
        assert!(!page.submit_enabled());

        drop(second);
        assert!(!page.loading_visible());
        assert!(page.submit_enabled());
    }
}
