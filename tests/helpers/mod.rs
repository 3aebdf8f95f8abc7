//! Shared setup for integration tests: ephemeral-port servers and a
//! submission wired to an in-memory page.

#![allow(dead_code)]

use axum::Router;
use housing_analyzer::ui::UiEvent;
use housing_analyzer::{AnalyzeClient, MemoryPage, SearchSubmission, UiContext};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve `router` on 127.0.0.1 and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub struct Harness {
    pub page: Arc<MemoryPage>,
    pub submission: Arc<SearchSubmission>,
}

impl Harness {
    pub fn new(base_url: &str) -> Self {
        let page = Arc::new(MemoryPage::new());
        let client = AnalyzeClient::new(base_url, None).unwrap();
        let submission = Arc::new(SearchSubmission::new(client, UiContext::bind(page.clone())));
        Self { page, submission }
    }

    /// Recorded loading and submit toggles, without result writes.
    pub fn busy_events(&self) -> Vec<UiEvent> {
        self.page
            .events()
            .into_iter()
            .filter(|event| !matches!(event, UiEvent::Results(_)))
            .collect()
    }
}
