use crate::models::SearchParams;
use std::collections::BTreeMap;

/// Form field names, matching the `name` attributes of the search form.
pub const FIELD_NAMES: [&str; 8] = [
    "email",
    "location",
    "propertyType",
    "minPrice",
    "maxPrice",
    "minBeds",
    "maxBeds",
    "keywords",
];

/// Snapshot of the search form's field values at submit time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    fields: BTreeMap<String, String>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { fields }
    }

    /// Sets a field. Later values for the same name replace earlier ones.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Reads the known fields into request parameters.
    ///
    /// Unknown fields are ignored; values are not validated or trimmed.
    pub fn to_search_params(&self) -> SearchParams {
        let field = |name: &str| self.get(name).map(str::to_string);
        SearchParams {
            email: field("email"),
            location: field("location"),
            property_type: field("propertyType"),
            min_price: field("minPrice"),
            max_price: field("maxPrice"),
            min_beds: field("minBeds"),
            max_beds: field("maxBeds"),
            keywords: field("keywords"),
        }
    }
}
