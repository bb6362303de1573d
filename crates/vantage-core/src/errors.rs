/// Typed error hierarchy for chat-completion requests.
/// The harness never retries; classification exists for logging.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("rate limited")]
    RateLimited,
    #[error("server error {status}: {body}")]
    ServerError { status: u16, body: String },
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::InvalidRequest(_) => "invalid_request",
            Self::RateLimited => "rate_limited",
            Self::ServerError { .. } => "server_error",
            Self::NetworkError(_) => "network_error",
        }
    }

    /// Classify an HTTP status code into the appropriate error variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(body),
            400 => Self::InvalidRequest(body),
            429 => Self::RateLimited,
            500..=599 => Self::ServerError { status, body },
            _ => Self::InvalidRequest(format!("unexpected status {status}: {body}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_mapping() {
        assert!(matches!(
            ProviderError::from_status(401, "unauthorized".into()),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ProviderError::from_status(403, "forbidden".into()),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ProviderError::from_status(400, "bad request".into()),
            ProviderError::InvalidRequest(_)
        ));
        assert!(matches!(
            ProviderError::from_status(429, "slow down".into()),
            ProviderError::RateLimited
        ));
        assert!(matches!(
            ProviderError::from_status(502, "bad gateway".into()),
            ProviderError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn unexpected_status_is_invalid_request() {
        let err = ProviderError::from_status(302, "redirect".into());
        assert_eq!(err.error_kind(), "invalid_request");
        assert!(err.to_string().contains("302"));
    }

    #[test]
    fn error_kind_strings() {
        assert_eq!(
            ProviderError::NetworkError("tcp reset".into()).error_kind(),
            "network_error"
        );
        assert_eq!(ProviderError::RateLimited.error_kind(), "rate_limited");
        assert_eq!(
            ProviderError::ServerError {
                status: 500,
                body: "err".into()
            }
            .error_kind(),
            "server_error"
        );
    }
}
