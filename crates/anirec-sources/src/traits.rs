use anirec_models::{AnimeInfo, UserAnimeStatus};
use async_trait::async_trait;
use crate::epgstation::{AddRuleOption, RuleReceipt};
use crate::error::SourceError;

/// A watch-status catalog the pipeline reads from
#[async_trait]
pub trait AnimeTracker: Send + Sync {
    fn source_name(&self) -> &str;

    /// One entry per requested user, in request order. An empty slice issues no request.
    async fn fetch_watch_lists(&self, users: &[String]) -> Result<Vec<UserAnimeStatus>, SourceError>;

    /// Resolve source-service numeric ids to metadata. The result may be shorter than
    /// the input when the catalog no longer knows a work.
    async fn fetch_works(&self, ids: &[u64]) -> Result<Vec<AnimeInfo>, SourceError>;
}

/// A recorder that accepts keyword recording rules
#[async_trait]
pub trait RecordingScheduler: Send + Sync {
    fn scheduler_name(&self) -> &str;

    async fn add_rule(&self, rule: &AddRuleOption) -> Result<RuleReceipt, SourceError>;
}
