/// Errors from the control API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The simulation host returned a non-2xx status code.
    #[error("Control API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body did not match the requested typed view.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A poll was requested with a zero interval.
    #[error("Poll interval must be greater than zero")]
    InvalidInterval,

    /// An environment variable held an unusable value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The configured base URL could not be parsed.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = ClientError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "Control API error (502): bad gateway");
    }

    #[test]
    fn request_error_display() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = ClientError::from(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
