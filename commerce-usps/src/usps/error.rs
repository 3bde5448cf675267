//! USPS client error types.

/// Errors from the USPS carrier boundary.
///
/// These propagate to callers unchanged; nothing in this crate retries.
#[derive(Debug, thiserror::Error)]
pub enum UspsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error(
        "JSON parse error: {message}{}",
        .body.as_deref().map(|b| format!(" (body: {b})")).unwrap_or_default()
    )]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// USPS rejected the whole request (bad user id, malformed request)
    #[error("USPS error {number}: {description}")]
    Carrier { number: String, description: String },

    /// Credentials rejected at the HTTP layer
    #[error("unauthorized (check the USPS user id)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by USPS API")]
    RateLimited,

    /// Client could not be set up
    #[error("not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = UspsError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized (check the USPS user id)");

        let err = UspsError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = UspsError::Carrier {
            number: "80040B1A".into(),
            description: "Authorization failure.".into(),
        };
        assert_eq!(err.to_string(), "USPS error 80040B1A: Authorization failure.");

        let err = UspsError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(
            err.to_string(),
            "JSON parse error: expected value (body: <html>)"
        );

        let err = UspsError::Json {
            message: "expected value".into(),
            body: None,
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");
    }
}
