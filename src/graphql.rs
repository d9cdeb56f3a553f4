use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Public countries API
pub const DEFAULT_ENDPOINT: &str = "https://countries.trevorblades.com";

#[derive(Debug, Error)]
pub enum GraphQLError {
    #[error("Failed to send request to GraphQL endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GraphQL endpoint error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("GraphQL query returned errors: {}", join_messages(.0))]
    Query(Vec<GraphQLErrorMessage>),

    #[error("GraphQL response contained no data")]
    MissingData,
}

fn join_messages(errors: &[GraphQLErrorMessage]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Serialize)]
struct GraphQLRequest<'a, V: Serialize> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<&'a V>,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLErrorMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQLErrorMessage {
    pub message: String,
}

/// Thin client for a single GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphQLClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphQLClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Send a query with optional variables and return the `data` member
    ///
    /// The data is handed back as deserialized, with no timeout or retry.
    /// A response carrying an `errors` array fails even if partial data came with it.
    pub async fn send_query<T, V>(&self, query: &str, variables: Option<&V>) -> Result<T, GraphQLError>
    where
        T: DeserializeOwned,
        V: Serialize,
    {
        let request = GraphQLRequest { query, variables };

        debug!("POST {}", self.endpoint);
        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphQLError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let parsed: GraphQLResponse<T> = serde_json::from_slice(&bytes)?;

        if !parsed.errors.is_empty() {
            return Err(GraphQLError::Query(parsed.errors));
        }

        parsed.data.ok_or(GraphQLError::MissingData)
    }
}
