//! Country and city listings for the manual location picker.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::http::{build_client, decode, endpoint, normalise_base_url};

const DEFAULT_BASE_URL: &str = "https://countriesnow.space/api/v0.1/countries";
const DEFAULT_USER_AGENT: &str = "ramadan-hub/0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default, alias = "Iso2")]
    pub iso2: String,
    #[serde(default, alias = "Iso3")]
    pub iso3: String,
}

#[derive(Debug, Deserialize)]
struct DirectoryResponse<T> {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    msg: String,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

impl<T> DirectoryResponse<T> {
    fn into_data(self, context: &str) -> Result<Vec<T>, ClientError> {
        if self.error {
            return Err(ClientError::ApiError(format!("{context}: {}", self.msg)));
        }
        Ok(self.data)
    }
}

pub struct DirectoryClient {
    client: Client,
    base_url: Url,
}

impl DirectoryClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the client cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ClientError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the client cannot be constructed, or
    /// [`ClientError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: normalise_base_url(base_url)?,
        })
    }

    /// All countries, sorted by name.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or a non-2xx status.
    /// - [`ClientError::ApiError`] if the envelope reports an error.
    /// - [`ClientError::Deserialize`] on an unexpected body.
    pub async fn countries(&self) -> Result<Vec<Country>, ClientError> {
        let url = endpoint(&self.base_url, "iso", &[])?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let parsed: DirectoryResponse<Country> = decode(&body, "countries")?;
        let mut countries = parsed.into_data("countries")?;
        countries.sort_by_key(|c| c.name.to_lowercase());
        Ok(countries)
    }

    /// Cities of `country`, sorted.
    ///
    /// # Errors
    ///
    /// See [`DirectoryClient::countries`].
    pub async fn cities(&self, country: &str) -> Result<Vec<String>, ClientError> {
        let url = endpoint(&self.base_url, "cities", &[])?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "country": country }))
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let context = format!("cities(country={country})");
        let parsed: DirectoryResponse<String> = decode(&body, &context)?;
        let mut cities = parsed.into_data(&context)?;
        cities.sort_by_key(|c| c.to_lowercase());
        cities.dedup();
        Ok(cities)
    }
}
