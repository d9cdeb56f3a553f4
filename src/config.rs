use anyhow::{Context, Result};

use crate::countries::CountryCode;
use crate::graphql::DEFAULT_ENDPOINT;

#[derive(Debug, Clone)]
pub struct Config {
    // GraphQL endpoint
    pub api_url: String,

    // Country shown before the first re-selection
    pub initial_country_code: CountryCode,

    // Display
    pub color: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("COUNTRIES_API_URL")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        reqwest::Url::parse(&api_url)
            .with_context(|| format!("COUNTRIES_API_URL is not a valid URL: {}", api_url))?;

        Ok(Self {
            api_url,

            initial_country_code: std::env::var("INITIAL_COUNTRY_CODE")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(CountryCode::from)
                .unwrap_or_default(),

            // https://no-color.org: any value disables styling
            color: std::env::var_os("NO_COLOR").is_none(),
        })
    }
}
