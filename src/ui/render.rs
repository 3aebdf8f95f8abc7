use crate::models::{AnalysisResult, Property};
use std::fmt::Write;

/// Shown while the request is in flight.
pub const STARTING_HTML: &str = "<p>Starting analysis...</p>";

/// Shown when the server returned neither a message nor any results.
pub const NO_RESULTS_HTML: &str =
    "<p>No properties found matching your criteria, or an error occurred.</p>";

/// Render a successful analysis response.
///
/// A non-empty message becomes the heading, followed by a list when there are
/// results. With no message and no results the generic no-results text is
/// shown instead.
pub fn render_result(result: &AnalysisResult) -> String {
    let properties = result.properties();
    let heading = result.heading();

    if heading.is_none() && properties.is_empty() {
        return NO_RESULTS_HTML.to_string();
    }

    let mut html = String::new();
    if let Some(heading) = heading {
        let _ = write!(html, "<h3>{}</h3>", escape_html(heading));
    }
    if !properties.is_empty() {
        html.push_str("<ul>");
        for property in properties {
            html.push_str(&render_property(property));
        }
        html.push_str("</ul>");
    }
    html
}

fn render_property(property: &Property) -> String {
    format!(
        r#"<li><strong><a href="{}" target="_blank">{}</a></strong> - {}<br>{}</li>"#,
        escape_html(&property.url),
        escape_html(&property.title),
        escape_html(&property.price),
        escape_html(&property.description),
    )
}

/// Render a failure in place of results.
pub fn render_error(message: &str) -> String {
    format!(
        "<p>An error occurred: {}. Please try again.</p>",
        escape_html(message)
    )
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
