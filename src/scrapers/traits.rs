use crate::models::{Property, SearchParams};
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all listing sources behind the analyze endpoint
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Find listings matching the search parameters
    async fn search(&self, params: &SearchParams) -> Result<Vec<Property>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
