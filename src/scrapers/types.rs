use crate::models::Property;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything scraped from one listing detail page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDetails {
    pub url: String,
    pub title: String,
    pub price: String,
    pub description: String,
    /// Building Energy Rating, e.g. "B2"
    pub ber: Option<String>,
    pub property_type: Option<String>,
    pub features: Vec<String>,
    pub scraped_at: DateTime<Utc>,
}

impl From<ListingDetails> for Property {
    fn from(details: ListingDetails) -> Self {
        Property {
            title: details.title,
            url: details.url,
            price: details.price,
            description: details.description,
            ber: details.ber,
            property_type: details.property_type,
            features: details.features,
            analysis_tags: Vec::new(),
        }
    }
}
