use thiserror::Error;

/// Failure taxonomy for the hosted endpoint calls. Every variant carries a
/// human-readable message; `category` is the label surfaced to the client
/// alongside it.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("credential error: {0}")]
    Credential(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("upstream error: {0}")]
    Upstream(String),
}

impl TranslateError {
    pub fn category(&self) -> &'static str {
        match self {
            TranslateError::Credential(_) => "credential",
            TranslateError::Network(_) => "network",
            TranslateError::Upstream(_) => "upstream",
        }
    }

    /// Transport failures (connect, DNS, timeout) are network errors; anything
    /// the endpoint itself answered with (bad status, bad body) is upstream.
    pub fn from_http(err: reqwest::Error) -> Self {
        if err.is_status() || err.is_decode() {
            TranslateError::Upstream(err.to_string())
        } else {
            TranslateError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels() {
        assert_eq!(TranslateError::Credential("missing".into()).category(), "credential");
        assert_eq!(TranslateError::Network("reset".into()).category(), "network");
        assert_eq!(TranslateError::Upstream("429".into()).category(), "upstream");
    }
}
