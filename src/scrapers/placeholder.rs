use crate::models::{Property, SearchParams};
use crate::scrapers::traits::ListingSource;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Returns fixed placeholder listings, for running the endpoint without
/// touching a real listing site
#[derive(Debug, Default, Clone)]
pub struct PlaceholderSource;

impl PlaceholderSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ListingSource for PlaceholderSource {
    async fn search(&self, params: &SearchParams) -> Result<Vec<Property>> {
        info!("📋 Generating placeholder listings");

        let location = SearchParams::non_empty(&params.location).unwrap_or("Any");
        let property_type = SearchParams::non_empty(&params.property_type).unwrap_or("Any");

        Ok(vec![
            Property {
                title: "Placeholder: Charming Fixer-Upper".to_string(),
                url: "#placeholder1".to_string(),
                price: "€120,000".to_string(),
                description: format!("Needs work, great potential. Location: {}", location),
                ..Default::default()
            },
            Property {
                title: "Placeholder: Modern Apartment".to_string(),
                url: "#placeholder2".to_string(),
                price: "€280,000".to_string(),
                description: format!("2 Bed, City Centre. Type: {}", property_type),
                ..Default::default()
            },
        ])
    }

    fn source_name(&self) -> &'static str {
        "Placeholder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fills_in_search_fields() {
        let params = SearchParams {
            location: Some("Galway".to_string()),
            property_type: Some(String::new()),
            ..Default::default()
        };

        let listings = PlaceholderSource::new().search(&params).await.unwrap();
        assert_eq!(listings.len(), 2);
        assert!(listings[0].description.ends_with("Location: Galway"));
        assert!(listings[1].description.ends_with("Type: Any"));
    }
}
