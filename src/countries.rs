use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::graphql::{GraphQLClient, GraphQLError};

pub const ALL_COUNTRY_CODES_QUERY: &str = r#"
{
  countries {
    code
  }
}
"#;

pub const COUNTRY_INFO_QUERY: &str = r#"
query GetCountryInfo($code: ID!) {
  country(code: $code) {
    name
    native
    emoji
    languages {
      name
    }
  }
}
"#;

/// Lookup key issued by the countries API, e.g. `GB`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self::new("GB")
    }
}

impl From<String> for CountryCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for CountryCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub native: String,
    pub emoji: String,
    pub languages: Vec<Language>,
}

#[derive(Debug, Error)]
pub enum CountryError {
    #[error(transparent)]
    GraphQL(#[from] GraphQLError),

    #[error("No country found for code {0}")]
    NotFound(CountryCode),

    #[error("The countries API returned no country codes")]
    NoCodes,
}

#[derive(Debug, Deserialize)]
struct CodeEntry {
    code: CountryCode,
}

#[derive(Debug, Deserialize)]
struct CountriesData {
    countries: Vec<CodeEntry>,
}

#[derive(Debug, Deserialize)]
struct CountryData {
    country: Option<Country>,
}

#[derive(Debug, Serialize)]
struct CountryVariables<'a> {
    code: &'a CountryCode,
}

/// Fetch every country code known to the API, in response order
pub async fn get_all_country_codes(client: &GraphQLClient) -> Result<Vec<CountryCode>, CountryError> {
    let data: CountriesData = client
        .send_query::<_, ()>(ALL_COUNTRY_CODES_QUERY, None)
        .await?;

    let codes: Vec<CountryCode> = data.countries.into_iter().map(|c| c.code).collect();
    info!("Fetched {} country codes", codes.len());

    Ok(codes)
}

/// Fetch name, native name, flag and languages for one country
pub async fn get_country_info(client: &GraphQLClient, code: &CountryCode) -> Result<Country, CountryError> {
    let variables = CountryVariables { code };
    let data: CountryData = client
        .send_query(COUNTRY_INFO_QUERY, Some(&variables))
        .await?;

    data.country.ok_or_else(|| CountryError::NotFound(code.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, method},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Query Document Tests ====================

    #[test]
    fn test_code_list_query_has_no_parameters() {
        assert!(ALL_COUNTRY_CODES_QUERY.contains("countries"));
        assert!(ALL_COUNTRY_CODES_QUERY.contains("code"));
        assert!(!ALL_COUNTRY_CODES_QUERY.contains('$'));
    }

    #[test]
    fn test_country_info_query_selects_display_fields() {
        for field in ["$code: ID!", "country(code: $code)", "name", "native", "emoji", "languages"] {
            assert!(COUNTRY_INFO_QUERY.contains(field), "missing {}", field);
        }
    }

    // ==================== Type Tests ====================

    #[test]
    fn test_country_code_default_is_gb() {
        assert_eq!(CountryCode::default().as_str(), "GB");
    }

    #[test]
    fn test_country_code_serializes_as_plain_string() {
        let vars = CountryVariables { code: &CountryCode::from("FR") };
        let json = serde_json::to_value(&vars).expect("Should serialize");
        assert_eq!(json, json!({ "code": "FR" }));
    }

    #[test]
    fn test_country_deserialization() {
        let json = r#"{
            "name": "Belgium",
            "native": "België",
            "emoji": "🇧🇪",
            "languages": [{"name": "Dutch"}, {"name": "French"}, {"name": "German"}]
        }"#;

        let country: Country = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(country.native, "België");
        let names: Vec<_> = country.languages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Dutch", "French", "German"]);
    }

    // ==================== Fetch Tests ====================

    #[tokio::test]
    async fn test_get_all_country_codes_preserves_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "countries": [{"code": "AD"}, {"code": "AE"}, {"code": "AF"}] }
            })))
            .mount(&mock_server)
            .await;

        let client = GraphQLClient::new(mock_server.uri());
        let codes = get_all_country_codes(&client).await.expect("should fetch");

        let codes: Vec<_> = codes.iter().map(CountryCode::as_str).collect();
        assert_eq!(codes, vec!["AD", "AE", "AF"]);
    }

    #[tokio::test]
    async fn test_get_all_country_codes_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "countries": [] }
            })))
            .mount(&mock_server)
            .await;

        let client = GraphQLClient::new(mock_server.uri());
        let codes = get_all_country_codes(&client).await.expect("should fetch");
        assert!(codes.is_empty());
    }

    #[tokio::test]
    async fn test_get_country_info_sends_code_variable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "variables": { "code": "JP" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "country": {
                    "name": "Japan",
                    "native": "日本",
                    "emoji": "🇯🇵",
                    "languages": [{"name": "Japanese"}]
                }}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GraphQLClient::new(mock_server.uri());
        let country = get_country_info(&client, &CountryCode::from("JP"))
            .await
            .expect("should fetch");

        assert_eq!(country.name, "Japan");
        assert_eq!(country.emoji, "🇯🇵");
    }

    #[tokio::test]
    async fn test_get_country_info_unknown_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "country": null }
            })))
            .mount(&mock_server)
            .await;

        let client = GraphQLClient::new(mock_server.uri());
        let err = get_country_info(&client, &CountryCode::from("XX"))
            .await
            .unwrap_err();

        assert!(matches!(err, CountryError::NotFound(ref code) if code.as_str() == "XX"));
        assert_eq!(err.to_string(), "No country found for code XX");
    }

    #[tokio::test]
    async fn test_get_country_info_propagates_transport_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
            .mount(&mock_server)
            .await;

        let client = GraphQLClient::new(mock_server.uri());
        let err = get_country_info(&client, &CountryCode::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CountryError::GraphQL(GraphQLError::Status { .. })));
    }
}
