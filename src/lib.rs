//! Property search front end for the `/api/analyze` endpoint, plus a
//! reference implementation of that endpoint.

pub mod analysis;
pub mod client;
pub mod config;
pub mod form;
pub mod handler;
pub mod models;
pub mod scrapers;
pub mod server;
pub mod ui;

pub use client::{AnalyzeClient, AnalyzeError};
pub use form::FormSnapshot;
pub use handler::{SearchSubmission, SubmitOutcome};
pub use ui::{MemoryPage, UiContext};
