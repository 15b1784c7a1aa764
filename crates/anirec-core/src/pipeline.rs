use anyhow::{bail, Context, Result};
use anirec_config::{Config, ReserveOptions};
use anirec_models::{AnimeType, ServiceId, UserAnimeStatus, WatchStatus};
use anirec_sources::{AddRuleOption, AnimeTracker, RecordingScheduler, RuleReceipt};
use serde::Serialize;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use crate::filter::filter_by_media_type;

/// Watch lists → metadata → media filter → recording rules
pub struct ReserveOrchestrator {
    tracker: Box<dyn AnimeTracker>,
    scheduler: Box<dyn RecordingScheduler>,
    users: Vec<String>,
    options: ReserveOptions,
    parent_directory: String,
    recorded_format: String,
    dry_run: bool,
}

/// A rule the run created, or would have created in a dry run
#[derive(Debug, Clone, Serialize)]
pub struct PlannedRule {
    pub anime_id: ServiceId,
    pub title: String,
    pub anime_type: Option<AnimeType>,
    pub rule: AddRuleOption,
    /// `None` in a dry run
    pub receipt: Option<RuleReceipt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReserveResult {
    pub users: usize,
    pub collected_ids: usize,
    pub works_resolved: usize,
    pub works_filtered_out: usize,
    pub skipped_untitled: usize,
    pub rules: Vec<PlannedRule>,
    pub dry_run: bool,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl ReserveResult {
    pub fn rules_created(&self) -> usize {
        self.rules.iter().filter(|r| r.receipt.is_some()).count()
    }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u128(duration.as_millis())
}

/// Numeric source ids of every work whose status is in `statuses`, walking users in
/// order and statuses in the given order. Duplicates keep their first position.
pub fn collect_work_ids(lists: &[UserAnimeStatus], statuses: &[WatchStatus]) -> Result<Vec<u64>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for list in lists {
        for status in statuses {
            for work in list.works_with_status(*status) {
                let Some(id) = work.source_service_id.numeric_id() else {
                    bail!("work id '{}' of user {} is not numeric", work.source_service_id, list.id);
                };
                if seen.insert(id) {
                    ids.push(id);
                }
            }
        }
    }

    Ok(ids)
}

impl ReserveOrchestrator {
    pub fn new(
        tracker: Box<dyn AnimeTracker>,
        scheduler: Box<dyn RecordingScheduler>,
        config: &Config,
    ) -> Self {
        Self {
            tracker,
            scheduler,
            users: config.annict.users.clone(),
            options: config.reserve.clone(),
            parent_directory: config.epgstation.parent_directory.clone(),
            recorded_format: config.epgstation.recorded_format.clone(),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn build_rule(&self, title: &str) -> AddRuleOption {
        AddRuleOption::keyword_rule(title, &self.parent_directory, &self.recorded_format)
    }

    #[instrument(skip(self), fields(tracker = self.tracker.source_name(), scheduler = self.scheduler.scheduler_name()))]
    pub async fn reserve(&self) -> Result<ReserveResult> {
        let start = Instant::now();
        info!(
            operation = "reserve_start",
            user_count = self.users.len(),
            dry_run = self.dry_run,
            "Starting reserve run"
        );

        let lists = self
            .tracker
            .fetch_watch_lists(&self.users)
            .await
            .with_context(|| format!("Failed to fetch watch lists from {}", self.tracker.source_name()))?;

        let ids = collect_work_ids(&lists, &self.options.statuses)?;
        info!(operation = "collect", ids = ids.len(), "Collected work ids");

        let works = self
            .tracker
            .fetch_works(&ids)
            .await
            .with_context(|| format!("Failed to resolve {} works", ids.len()))?;
        let works_resolved = works.len();
        if works_resolved < ids.len() {
            debug!(
                requested = ids.len(),
                resolved = works_resolved,
                "Some works were not returned by the tracker"
            );
        }

        let works = filter_by_media_type(works, &self.options.media_types);
        let works_filtered_out = works_resolved - works.len();
        info!(
            operation = "filter",
            kept = works.len(),
            dropped = works_filtered_out,
            media_types = ?self.options.media_types,
            "Filtered works by media type"
        );

        let mut rules = Vec::new();
        let mut skipped_untitled = 0;
        for work in works {
            let title = match work.title.as_deref() {
                Some(title) if !title.trim().is_empty() => title.to_string(),
                _ => {
                    warn!(anime_id = %work.id, "Skipping work without a title");
                    skipped_untitled += 1;
                    continue;
                }
            };

            let rule = self.build_rule(&title);
            let receipt = if self.dry_run {
                debug!(keyword = %title, "Dry run, not adding rule");
                None
            } else {
                let receipt = self
                    .scheduler
                    .add_rule(&rule)
                    .await
                    .with_context(|| format!("Failed to add recording rule for '{}'", title))?;
                Some(receipt)
            };

            rules.push(PlannedRule {
                anime_id: work.id,
                title,
                anime_type: work.anime_type,
                rule,
                receipt,
            });
        }

        let result = ReserveResult {
            users: lists.len(),
            collected_ids: ids.len(),
            works_resolved,
            works_filtered_out,
            skipped_untitled,
            rules,
            dry_run: self.dry_run,
            duration: start.elapsed(),
        };
        info!(
            operation = "reserve_complete",
            rules = result.rules.len(),
            created = result.rules_created(),
            duration_ms = result.duration.as_millis() as u64,
            "Reserve run finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests;
