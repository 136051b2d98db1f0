use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_name} API key is not configured")]
    MissingApiKey { source_name: &'static str },

    #[error("{source_name} search failed: {status} - {body}")]
    Status {
        source_name: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{source_name} request failed: {error}")]
    Http {
        source_name: &'static str,
        #[source]
        error: reqwest::Error,
    },

    #[error("{source_name} returned an unexpected response: {error}")]
    Decode {
        source_name: &'static str,
        #[source]
        error: serde_json::Error,
    },
}
