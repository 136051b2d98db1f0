use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::SourceError;

const USER_AGENT: &str = concat!("iamwatching/", env!("CARGO_PKG_VERSION"));

pub fn create_catalog_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Joins a configured base URL and an endpoint path without doubling slashes.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Sends `request` and decodes a successful JSON body into `T`.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    source_name: &'static str,
    request: RequestBuilder,
) -> Result<T, SourceError> {
    let response = request
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|error| http_error(source_name, error))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status { source_name, status, body });
    }

    let body = response
        .text()
        .await
        .map_err(|error| http_error(source_name, error))?;
    debug!(source = source_name, bytes = body.len(), "Catalog response received");

    serde_json::from_str(&body).map_err(|error| SourceError::Decode { source_name, error })
}

/// Drops the request URL, which carries the API key.
fn http_error(source_name: &'static str, error: reqwest::Error) -> SourceError {
    SourceError::Http { source_name, error: error.without_url() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            endpoint("https://api.themoviedb.org/3/", "/search/movie"),
            "https://api.themoviedb.org/3/search/movie"
        );
        assert_eq!(endpoint("http://localhost:1", "games"), "http://localhost:1/games");
    }
}
