use crate::models::ErrorBody;
use reqwest::StatusCode;

/// Failure of one analysis request
///
/// `Display` is the text shown to the user in place of results.
#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// The success body was not a valid analysis result.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The request never completed.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl AnalyzeError {
    /// Builds the HTTP error from a status and the raw error body,
    /// preferring a non-empty server-supplied `message`.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|error| error.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

        Self::Http {
            status: status.as_u16(),
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_server_message() {
        let error = AnalyzeError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"message":"server exploded"}"#,
        );
        assert_eq!(error.to_string(), "server exploded");
        assert_eq!(error.status(), Some(500));
    }

    #[test]
    fn falls_back_to_status_code() {
        for body in [&b"<html>oops</html>"[..], b"", br#"{"message":""}"#, br#"{"detail":"x"}"#] {
            let error = AnalyzeError::from_status(StatusCode::BAD_GATEWAY, body);
            assert_eq!(error.to_string(), "HTTP error! status: 502");
        }
    }
}
