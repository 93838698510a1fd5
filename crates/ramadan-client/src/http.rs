//! Shared construction for the service clients.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ClientError;

/// Builds the `reqwest` client every service client wraps.
///
/// # Errors
///
/// Returns [`ClientError::Http`] if the client cannot be constructed.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Parses `base_url`, ensuring it ends with exactly one slash so that
/// [`Url::join`] appends path segments instead of replacing the last one.
///
/// # Errors
///
/// Returns [`ClientError::InvalidBaseUrl`] if the string is not a URL.
pub(crate) fn normalise_base_url(base_url: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Joins a relative `path` onto a normalised base and appends query pairs.
///
/// # Errors
///
/// Returns [`ClientError::InvalidBaseUrl`] if the joined URL is invalid.
pub(crate) fn endpoint(base: &Url, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
    let mut url = base.join(path).map_err(|e| ClientError::InvalidBaseUrl {
        url: format!("{base}{path}"),
        reason: e.to_string(),
    })?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in query {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

/// Decodes a response body, naming the request in the error.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    body: &str,
    context: &str,
) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|source| ClientError::Deserialize {
        context: context.to_string(),
        source,
    })
}
