use crate::client::AnalyzeClient;
use crate::form::FormSnapshot;
use crate::ui::render::{render_error, render_result, STARTING_HTML};
use crate::ui::UiContext;
use tracing::{debug, error, info};

/// What a submission ended up showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Heading and/or result list rendered
    Rendered { results: usize },
    /// Neither message nor results; the generic no-results text was shown
    NoResults,
    /// An error message was shown
    Failed { message: String },
    /// A newer submission started first; nothing was rendered
    Superseded,
}

/// Submit handler of one search form
pub struct SearchSubmission {
    client: AnalyzeClient,
    ui: UiContext,
}

impl SearchSubmission {
    pub fn new(client: AnalyzeClient, ui: UiContext) -> Self {
        Self { client, ui }
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Run one submission: placeholder, busy state, one request, render.
    ///
    /// The busy state is released on every path out of this function.
    pub async fn handle_submit(&self, form: &FormSnapshot) -> SubmitOutcome {
        self.ui.replace_results(STARTING_HTML);
        let guard = self.ui.begin();

        let params = form.to_search_params();
        info!(ticket = guard.ticket(), "Submitting analysis request to {}", self.client.endpoint());

        let response = self.client.analyze(&params).await;

        if !guard.is_current() {
            debug!(ticket = guard.ticket(), "Discarding stale analysis response");
            return SubmitOutcome::Superseded;
        }

        match response {
            Ok(result) => {
                let html = render_result(&result);
                self.ui.replace_results(&html);

                let results = result.properties().len();
                if result.heading().is_none() && results == 0 {
                    info!("Analysis returned no message and no results");
                    SubmitOutcome::NoResults
                } else {
                    info!("Analysis returned {} properties", results);
                    SubmitOutcome::Rendered { results }
                }
            }
            Err(err) => {
                error!("Error during analysis: {}", err);
                let message = err.to_string();
                self.ui.replace_results(&render_error(&message));
                SubmitOutcome::Failed { message }
            }
        }
    }
}
