use anirec_config::AnnictConfig;
use anirec_models::{AnimeInfo, UserAnimeStatus};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, trace, warn};
use crate::annict::api::{self, AnnictUser, AnnictWork, WorkSearch};
use crate::error::SourceError;
use crate::http::create_http_client;
use crate::traits::AnimeTracker;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Annict GraphQL API client
pub struct AnnictClient {
    http: Client,
    token: String,
    endpoint: String,
}

impl AnnictClient {
    pub fn new(token: String, endpoint: String) -> Self {
        Self {
            http: create_http_client(),
            token,
            endpoint,
        }
    }

    pub fn from_config(config: &AnnictConfig) -> Self {
        Self::new(config.token.clone(), config.endpoint.clone())
    }

    /// POST a query and return its `data` object. GraphQL errors are fatal.
    async fn graphql_request(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<Value, SourceError> {
        debug!(operation, "Annict GraphQL request");
        trace!(operation, query, "Annict GraphQL query");

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(operation, status = status_code, "Annict API error");
            return Err(SourceError::Api { status: status_code, message });
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Schema(format!("{}: {}", operation, e)))?;
        trace!(operation, data = ?body.data, "Annict response body");

        if !body.errors.is_empty() {
            let messages = body
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SourceError::GraphQl(format!("{}: {}", operation, messages)));
        }

        body.data
            .ok_or_else(|| SourceError::Schema(format!("{}: response has no data", operation)))
    }

    /// Raw watch lists for `users`, one aliased sub-query each, in request order
    pub async fn fetch_watches(&self, users: &[String]) -> Result<Vec<AnnictUser>, SourceError> {
        if users.is_empty() {
            return Ok(Vec::new());
        }

        let (query, variables) = api::build_watches_query(users);
        let data = self.graphql_request("UserWorks", &query, variables).await?;
        let parsed = api::parse_watches_data(users, data)?;
        info!(user_count = parsed.len(), "Fetched Annict watch lists");
        Ok(parsed)
    }
}

#[async_trait]
impl WorkSearch for AnnictClient {
    async fn search_works(&self, ids: &[u64]) -> Result<Vec<AnnictWork>, SourceError> {
        let data = self
            .graphql_request("SearchWorks", api::WORKS_QUERY, api::works_variables(ids))
            .await?;
        api::parse_works_data(data)
    }
}

#[async_trait]
impl AnimeTracker for AnnictClient {
    fn source_name(&self) -> &str {
        "annict"
    }

    async fn fetch_watch_lists(&self, users: &[String]) -> Result<Vec<UserAnimeStatus>, SourceError> {
        self.fetch_watches(users)
            .await?
            .into_iter()
            .map(AnnictUser::into_user_status)
            .collect()
    }

    async fn fetch_works(&self, ids: &[u64]) -> Result<Vec<AnimeInfo>, SourceError> {
        let infos = api::fetch_annict_animes(self, ids).await?;
        info!(requested = ids.len(), resolved = infos.len(), "Resolved Annict works");
        Ok(infos)
    }
}
