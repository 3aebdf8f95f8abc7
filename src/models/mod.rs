use serde::{Deserialize, Serialize};

/// Search form fields as sent to `POST /api/analyze`
///
/// Every field is optional and passed through untouched: a field missing from
/// the form is `null` on the wire, an empty field stays an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub min_price: Option<String>,
    #[serde(default)]
    pub max_price: Option<String>,
    #[serde(default)]
    pub min_beds: Option<String>,
    #[serde(default)]
    pub max_beds: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

impl SearchParams {
    /// Returns the trimmed value of a field, treating empty strings as absent.
    pub fn non_empty(field: &Option<String>) -> Option<&str> {
        field
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// One listing in an analysis response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    /// Building Energy Rating, when the source lists one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    /// Tags added by the backend keyword analysis
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analysis_tags: Vec<String>,
}

/// Successful response body of `POST /api/analyze`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<Property>>,
}

impl AnalysisResult {
    pub fn new(message: impl Into<String>, results: Vec<Property>) -> Self {
        Self {
            message: Some(message.into()),
            results: Some(results),
        }
    }

    /// The message, if the server sent a non-empty one.
    pub fn heading(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }

    pub fn properties(&self) -> &[Property] {
        self.results.as_deref().unwrap_or_default()
    }
}

/// Error response body; `message` may be missing entirely
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_params_use_camel_case_keys_and_keep_nulls() {
        let params = SearchParams {
            location: Some("Cork".to_string()),
            property_type: Some(String::new()),
            ..Default::default()
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["location"], "Cork");
        assert_eq!(value["propertyType"], "");
        assert!(value["minPrice"].is_null());
        assert_eq!(value.as_object().unwrap().len(), 8);
    }

    #[test]
    fn analysis_result_tolerates_missing_fields() {
        let result: AnalysisResult = serde_json::from_value(json!({})).unwrap();
        assert!(result.heading().is_none());
        assert!(result.properties().is_empty());

        let result: AnalysisResult =
            serde_json::from_value(json!({ "message": "", "results": null })).unwrap();
        assert!(result.heading().is_none());
        assert!(result.properties().is_empty());
    }

    #[test]
    fn empty_listing_details_are_not_serialized() {
        let value = serde_json::to_value(Property::default()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["description", "price", "title", "url"]);
    }

    #[test]
    fn scraped_details_are_serialized() {
        let property = Property {
            ber: Some("C1".to_string()),
            property_type: Some("Detached".to_string()),
            features: vec!["Garden".to_string()],
            ..Default::default()
        };

        let value = serde_json::to_value(&property).unwrap();
        assert_eq!(value["ber"], "C1");
        assert_eq!(value["property_type"], "Detached");
        assert_eq!(value["features"], json!(["Garden"]));
        assert_eq!(serde_json::from_value::<Property>(value).unwrap(), property);
    }

    #[test]
    fn non_empty_treats_blank_as_absent() {
        assert_eq!(SearchParams::non_empty(&Some("  ".to_string())), None);
        assert_eq!(SearchParams::non_empty(&None), None);
        assert_eq!(
            SearchParams::non_empty(&Some(" Wexford ".to_string())),
            Some("Wexford")
        );
    }
}
