use super::*;
use anirec_config::{AnnictConfig, EpgStationConfig, LoggingConfig};
use anirec_models::{AnimeInfo, AnimeStatus, SeasonInfo, Season};
use anirec_sources::SourceError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

struct FakeTracker {
    lists: Vec<UserAnimeStatus>,
    works: Vec<AnimeInfo>,
    requested: Arc<Mutex<Vec<u64>>>,
}

#[async_trait]
impl AnimeTracker for FakeTracker {
    fn source_name(&self) -> &str {
        "fake-tracker"
    }

    async fn fetch_watch_lists(&self, users: &[String]) -> Result<Vec<UserAnimeStatus>, SourceError> {
        Ok(users
            .iter()
            .filter_map(|user| self.lists.iter().find(|l| l.id.id() == user.as_str()).cloned())
            .collect())
    }

    async fn fetch_works(&self, ids: &[u64]) -> Result<Vec<AnimeInfo>, SourceError> {
        self.requested.lock().unwrap().extend_from_slice(ids);
        Ok(ids
            .iter()
            .filter_map(|id| self.works.iter().find(|w| w.id_annict == Some(*id)).cloned())
            .collect())
    }
}

#[derive(Default)]
struct FakeScheduler {
    added: Arc<Mutex<Vec<AddRuleOption>>>,
    reject_keyword: Option<String>,
}

#[async_trait]
impl RecordingScheduler for FakeScheduler {
    fn scheduler_name(&self) -> &str {
        "fake-scheduler"
    }

    async fn add_rule(&self, rule: &AddRuleOption) -> Result<RuleReceipt, SourceError> {
        if self.reject_keyword.as_deref() == Some(rule.keyword()) {
            return Err(SourceError::Api {
                status: 500,
                message: "rule rejected".to_string(),
            });
        }
        let mut added = self.added.lock().unwrap();
        added.push(rule.clone());
        Ok(RuleReceipt {
            status: 201,
            rule_id: Some(added.len() as u64),
        })
    }
}

fn config(users: &[&str]) -> Config {
    Config {
        annict: AnnictConfig {
            token: "token".to_string(),
            users: users.iter().map(|u| u.to_string()).collect(),
            endpoint: "https://example.invalid/graphql".to_string(),
        },
        epgstation: EpgStationConfig {
            url: "http://epgstation.local:8888".to_string(),
            parent_directory: "recorded".to_string(),
            recorded_format: "TS".to_string(),
        },
        reserve: ReserveOptions::default(),
        logging: LoggingConfig::default(),
    }
}

fn entry(id: u64, status: WatchStatus) -> AnimeStatus {
    AnimeStatus {
        source_service_id: ServiceId::annict(id),
        my_anime_list_id: None,
        status,
    }
}

fn user(name: &str, works: Vec<AnimeStatus>) -> UserAnimeStatus {
    UserAnimeStatus {
        id: ServiceId::new(anirec_models::Service::Annict, name).unwrap(),
        avatar_url: None,
        works,
    }
}

fn work(id: u64, title: Option<&str>, anime_type: AnimeType) -> AnimeInfo {
    AnimeInfo {
        id: ServiceId::annict(id),
        id_mal: None,
        id_annict: Some(id),
        id_anilist: None,
        title: title.map(str::to_string),
        horizontal_cover_url: None,
        vertical_cover_url: None,
        anime_type: Some(anime_type),
        season: Some(SeasonInfo::new(2022, Some(Season::Spring))),
    }
}

#[test]
fn test_collect_work_ids_orders_by_status_then_dedupes() {
    let lists = vec![
        user("alice", vec![entry(2, WatchStatus::Watching), entry(1, WatchStatus::Want), entry(9, WatchStatus::Watched)]),
        user("bob", vec![entry(1, WatchStatus::Watching), entry(3, WatchStatus::Want)]),
    ];
    let ids = collect_work_ids(&lists, &[WatchStatus::Want, WatchStatus::Watching]).unwrap();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_collect_work_ids_rejects_non_numeric_ids() {
    let odd = AnimeStatus {
        source_service_id: ServiceId::new(anirec_models::Service::Annict, "abc").unwrap(),
        my_anime_list_id: None,
        status: WatchStatus::Want,
    };
    let lists = vec![user("alice", vec![odd])];
    assert!(collect_work_ids(&lists, &[WatchStatus::Want]).is_err());
}

#[tokio::test]
async fn test_reserve_end_to_end_keeps_only_tv_and_movie() {
    let requested = Arc::new(Mutex::new(Vec::new()));
    let tracker = FakeTracker {
        lists: vec![user("alice", vec![entry(1, WatchStatus::Want), entry(2, WatchStatus::Watching)])],
        works: vec![
            work(1, Some("Show A"), AnimeType::Tv),
            work(2, Some("Show B"), AnimeType::Ova),
        ],
        requested: requested.clone(),
    };
    let scheduler = FakeScheduler::default();
    let added = scheduler.added.clone();

    let orchestrator = ReserveOrchestrator::new(Box::new(tracker), Box::new(scheduler), &config(&["alice"]));
    let result = orchestrator.reserve().await.unwrap();

    assert_eq!(*requested.lock().unwrap(), vec![1, 2]);
    assert_eq!(result.users, 1);
    assert_eq!(result.collected_ids, 2);
    assert_eq!(result.works_resolved, 2);
    assert_eq!(result.works_filtered_out, 1);
    assert_eq!(result.rules_created(), 1);

    let added = added.lock().unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].search_option.keyword, "Show A");
    assert_eq!(added[0].save_option.directory, "Show A");
    assert_eq!(added[0].save_option.parent_directory_name, "recorded");
    assert_eq!(added[0].save_option.recorded_format, "TS");
    assert_eq!(result.rules[0].anime_id, ServiceId::annict(1));
}

#[tokio::test]
async fn test_dry_run_plans_without_adding() {
    let tracker = FakeTracker {
        lists: vec![user("alice", vec![entry(1, WatchStatus::Want), entry(4, WatchStatus::Watching)])],
        works: vec![
            work(1, Some("Show A"), AnimeType::Tv),
            work(4, Some("Film C"), AnimeType::Movie),
        ],
        requested: Arc::default(),
    };
    let scheduler = FakeScheduler::default();
    let added = scheduler.added.clone();

    let result = ReserveOrchestrator::new(Box::new(tracker), Box::new(scheduler), &config(&["alice"]))
        .with_dry_run(true)
        .reserve()
        .await
        .unwrap();

    assert!(result.dry_run);
    assert!(added.lock().unwrap().is_empty());
    let titles: Vec<_> = result.rules.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Show A", "Film C"]);
    assert!(result.rules.iter().all(|r| r.receipt.is_none()));
    assert_eq!(result.rules_created(), 0);
}

#[tokio::test]
async fn test_untitled_works_are_skipped() {
    let tracker = FakeTracker {
        lists: vec![user("alice", vec![entry(1, WatchStatus::Want), entry(2, WatchStatus::Want)])],
        works: vec![work(1, None, AnimeType::Tv), work(2, Some("  "), AnimeType::Tv)],
        requested: Arc::default(),
    };
    let scheduler = FakeScheduler::default();
    let added = scheduler.added.clone();

    let result = ReserveOrchestrator::new(Box::new(tracker), Box::new(scheduler), &config(&["alice"]))
        .reserve()
        .await
        .unwrap();

    assert_eq!(result.skipped_untitled, 2);
    assert!(result.rules.is_empty());
    assert!(added.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_works_across_users_get_one_rule() {
    let tracker = FakeTracker {
        lists: vec![
            user("alice", vec![entry(1, WatchStatus::Want)]),
            user("bob", vec![entry(1, WatchStatus::Watching)]),
        ],
        works: vec![work(1, Some("Show A"), AnimeType::Tv)],
        requested: Arc::default(),
    };
    let scheduler = FakeScheduler::default();
    let added = scheduler.added.clone();

    let result = ReserveOrchestrator::new(Box::new(tracker), Box::new(scheduler), &config(&["alice", "bob"]))
        .reserve()
        .await
        .unwrap();

    assert_eq!(result.users, 2);
    assert_eq!(result.collected_ids, 1);
    assert_eq!(added.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_scheduler_failure_aborts_and_keeps_earlier_rules() {
    let tracker = FakeTracker {
        lists: vec![user(
            "alice",
            vec![entry(1, WatchStatus::Want), entry(2, WatchStatus::Want), entry(3, WatchStatus::Want)],
        )],
        works: vec![
            work(1, Some("Show A"), AnimeType::Tv),
            work(2, Some("Show B"), AnimeType::Tv),
            work(3, Some("Show C"), AnimeType::Tv),
        ],
        requested: Arc::default(),
    };
    let scheduler = FakeScheduler {
        reject_keyword: Some("Show B".to_string()),
        ..Default::default()
    };
    let added = scheduler.added.clone();

    let err = ReserveOrchestrator::new(Box::new(tracker), Box::new(scheduler), &config(&["alice"]))
        .reserve()
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Show B"));
    let added = added.lock().unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].keyword(), "Show A");
}

#[tokio::test]
async fn test_no_users_yields_empty_result() {
    let tracker = FakeTracker {
        lists: Vec::new(),
        works: Vec::new(),
        requested: Arc::default(),
    };
    let result = ReserveOrchestrator::new(Box::new(tracker), Box::new(FakeScheduler::default()), &config(&[]))
        .reserve()
        .await
        .unwrap();

    assert_eq!(result.users, 0);
    assert_eq!(result.collected_ids, 0);
    assert!(result.rules.is_empty());
}
