use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::epgstation::rule::AddRuleOption;
use crate::error::SourceError;
use crate::http::create_http_client;
use crate::traits::RecordingScheduler;

const RULES_PATH: &str = "/api/rules";

/// What the scheduler reported for a created rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReceipt {
    pub status: u16,
    pub rule_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddRuleResponse {
    rule_id: u64,
}

/// EPGStation REST API client
pub struct EpgStationClient {
    http: Client,
    base_url: Url,
}

impl EpgStationClient {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url).map_err(|e| SourceError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            http: create_http_client(),
            base_url,
        })
    }

    pub fn rules_url(&self) -> Result<Url, SourceError> {
        self.base_url.join(RULES_PATH).map_err(|e| SourceError::InvalidUrl {
            url: format!("{}{}", self.base_url, RULES_PATH),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RecordingScheduler for EpgStationClient {
    fn scheduler_name(&self) -> &str {
        "epgstation"
    }

    async fn add_rule(&self, rule: &AddRuleOption) -> Result<RuleReceipt, SourceError> {
        let url = self.rules_url()?;
        debug!(keyword = rule.keyword(), url = %url, "Adding EPGStation rule");

        let response = self
            .http
            .post(url)
            .header("Accept", "application/json, text/plain, */*")
            .json(rule)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(keyword = rule.keyword(), status = status.as_u16(), "EPGStation rejected rule");
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(keyword = rule.keyword(), body = %body, "EPGStation response");
        let rule_id = serde_json::from_str::<AddRuleResponse>(&body)
            .ok()
            .map(|r| r.rule_id);
        info!(keyword = rule.keyword(), rule_id = ?rule_id, "Recording rule added");

        Ok(RuleReceipt {
            status: status.as_u16(),
            rule_id,
        })
    }
}
