use anyhow::{bail, Context, Result};
use anirec_models::{AnimeInfo, AnimeStatus, ServiceId, UserAnimeStatus};
use anirec_sources::AnimeTracker;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use crate::scoring::calc_status_score_at;

#[derive(Debug, Clone, Serialize)]
pub struct RankedWork {
    pub info: AnimeInfo,
    pub score: i32,
    /// Every user's status for this work, in user order
    pub statuses: Vec<AnimeStatus>,
}

/// Statuses grouped by work, keyed by MyAnimeList id when known so that the same
/// work matches its resolved metadata.
struct StatusGroups {
    order: Vec<ServiceId>,
    by_work: HashMap<ServiceId, Vec<AnimeStatus>>,
    source_ids: Vec<u64>,
}

fn group_statuses(lists: &[UserAnimeStatus]) -> Result<StatusGroups> {
    let mut groups = StatusGroups {
        order: Vec::new(),
        by_work: HashMap::new(),
        source_ids: Vec::new(),
    };

    for list in lists {
        for status in &list.works {
            let key = status.mal_id_if_possible();
            if !groups.by_work.contains_key(&key) {
                let Some(id) = status.source_service_id.numeric_id() else {
                    bail!("work id '{}' of user {} is not numeric", status.source_service_id, list.id);
                };
                groups.order.push(key.clone());
                groups.source_ids.push(id);
            }
            groups.by_work.entry(key).or_default().push(status.clone());
        }
    }

    Ok(groups)
}

/// Score every resolved work against the statuses it was listed with, highest first.
/// Ties keep the order in which works were first listed.
pub fn rank_works_at(lists: &[UserAnimeStatus], works: Vec<AnimeInfo>, now: NaiveDateTime) -> Result<Vec<RankedWork>> {
    let mut groups = group_statuses(lists)?;
    let mut by_id: HashMap<ServiceId, AnimeInfo> = works.into_iter().map(|w| (w.id.clone(), w)).collect();

    let mut ranked = Vec::with_capacity(groups.order.len());
    for key in &groups.order {
        let Some(info) = by_id.remove(key) else {
            debug!(anime_id = %key, "No metadata for listed work");
            continue;
        };
        let statuses = groups.by_work.remove(key).unwrap_or_default();
        let score = calc_status_score_at(&statuses, info.season.as_ref(), now);
        ranked.push(RankedWork { info, score, statuses });
    }

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(ranked)
}

/// Fetch every user's full list, resolve the listed works, and rank them
#[instrument(skip(tracker), fields(tracker = tracker.source_name()))]
pub async fn build_ranking(tracker: &dyn AnimeTracker, users: &[String]) -> Result<Vec<RankedWork>> {
    let lists = tracker
        .fetch_watch_lists(users)
        .await
        .with_context(|| format!("Failed to fetch watch lists from {}", tracker.source_name()))?;

    let groups = group_statuses(&lists)?;
    let works = tracker
        .fetch_works(&groups.source_ids)
        .await
        .with_context(|| format!("Failed to resolve {} works", groups.source_ids.len()))?;

    let ranked = rank_works_at(&lists, works, Local::now().naive_local())?;
    info!(operation = "ranking", user_count = lists.len(), works = ranked.len(), "Ranked works");
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anirec_models::{AnimeType, Season, SeasonInfo, Service, WatchStatus};
    use anirec_sources::SourceError;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 5, 10).unwrap().and_hms_opt(9, 0, 0).unwrap()
    }

    fn entry(id: u64, mal: Option<u64>, status: WatchStatus) -> AnimeStatus {
        AnimeStatus {
            source_service_id: ServiceId::annict(id),
            my_anime_list_id: mal,
            status,
        }
    }

    fn user(name: &str, works: Vec<AnimeStatus>) -> UserAnimeStatus {
        UserAnimeStatus {
            id: ServiceId::new(Service::Annict, name).unwrap(),
            avatar_url: None,
            works,
        }
    }

    fn info(id: u64, mal: Option<u64>, title: &str, season: Option<SeasonInfo>) -> AnimeInfo {
        AnimeInfo {
            id: mal.map(ServiceId::mal).unwrap_or_else(|| ServiceId::annict(id)),
            id_mal: mal,
            id_annict: Some(id),
            id_anilist: None,
            title: Some(title.to_string()),
            horizontal_cover_url: None,
            vertical_cover_url: None,
            anime_type: Some(AnimeType::Tv),
            season,
        }
    }

    fn lists() -> Vec<UserAnimeStatus> {
        vec![
            user(
                "alice",
                vec![
                    entry(1, Some(101), WatchStatus::Watching),
                    entry(2, None, WatchStatus::Want),
                    entry(3, None, WatchStatus::Dropped),
                ],
            ),
            user(
                "bob",
                vec![entry(1, Some(101), WatchStatus::Watched), entry(2, None, WatchStatus::Paused)],
            ),
        ]
    }

    fn works() -> Vec<AnimeInfo> {
        vec![
            info(1, Some(101), "Airing Now", Some(SeasonInfo::new(2022, Some(Season::Spring)))),
            info(2, None, "Backlog", Some(SeasonInfo::new(2015, Some(Season::Autumn)))),
            info(3, None, "Gave Up", None),
        ]
    }

    #[test]
    fn test_rank_works_groups_and_sorts() {
        let ranked = rank_works_at(&lists(), works(), now()).unwrap();
        let summary: Vec<_> = ranked
            .iter()
            .map(|r| (r.info.title.clone().unwrap(), r.score, r.statuses.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Airing Now".to_string(), 20, 2),
                ("Backlog".to_string(), 3, 2),
                ("Gave Up".to_string(), -1, 1),
            ]
        );
    }

    #[test]
    fn test_rank_works_skips_works_without_metadata() {
        let works = works().into_iter().filter(|w| w.id_annict != Some(2)).collect();
        let ranked = rank_works_at(&lists(), works, now()).unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.info.id_annict != Some(2)));
    }

    struct FakeTracker;

    #[async_trait]
    impl AnimeTracker for FakeTracker {
        fn source_name(&self) -> &str {
            "fake"
        }

        async fn fetch_watch_lists(&self, _users: &[String]) -> Result<Vec<UserAnimeStatus>, SourceError> {
            Ok(lists())
        }

        async fn fetch_works(&self, ids: &[u64]) -> Result<Vec<AnimeInfo>, SourceError> {
            assert_eq!(ids, &[1, 2, 3]);
            Ok(works())
        }
    }

    #[tokio::test]
    async fn test_build_ranking_requests_each_work_once() {
        let users = vec!["alice".to_string(), "bob".to_string()];
        let ranked = build_ranking(&FakeTracker, &users).await.unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked.last().unwrap().score, -1);
    }
}
