use anirec_models::{
    AnimeInfo, AnimeStatus, AnimeType, Season, SeasonInfo, ServiceId, UserAnimeStatus, WatchStatus,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::debug;
use crate::error::SourceError;

/// Maximum number of ids `searchWorks` accepts per request
pub const SEARCH_CHUNK_SIZE: usize = 50;

pub(crate) const WORKS_QUERY: &str = r#"
query ($ids: [Int!]) {
    works: searchWorks(annictIds: $ids) {
        nodes {
            annictId
            title
            malAnimeId
            seasonName
            seasonYear
            image { facebookOgImageUrl }
            media
        }
    }
}
"#;

/// Annict's own watch states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnictWatchState {
    WannaWatch,
    Watching,
    Watched,
    OnHold,
    StopWatching,
}

impl AnnictWatchState {
    /// Order in which states are queried and flattened into a user's work list
    pub const ALL: [AnnictWatchState; 5] = [
        AnnictWatchState::WannaWatch,
        AnnictWatchState::Watching,
        AnnictWatchState::Watched,
        AnnictWatchState::OnHold,
        AnnictWatchState::StopWatching,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnictWatchState::WannaWatch => "WANNA_WATCH",
            AnnictWatchState::Watching => "WATCHING",
            AnnictWatchState::Watched => "WATCHED",
            AnnictWatchState::OnHold => "ON_HOLD",
            AnnictWatchState::StopWatching => "STOP_WATCHING",
        }
    }

    /// Annict has no rewatch state, so `Repeating` is never produced
    pub fn to_watch_status(self) -> WatchStatus {
        match self {
            AnnictWatchState::WannaWatch => WatchStatus::Want,
            AnnictWatchState::Watching => WatchStatus::Watching,
            AnnictWatchState::Watched => WatchStatus::Watched,
            AnnictWatchState::OnHold => WatchStatus::Paused,
            AnnictWatchState::StopWatching => WatchStatus::Dropped,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkIds {
    pub annict_id: u64,
    pub mal_anime_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkNodes {
    pub nodes: Vec<WorkIds>,
}

/// One aliased `user` sub-query result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnictUser {
    pub username: String,
    pub avatar_url: Option<String>,
    #[serde(rename = "WANNA_WATCH")]
    pub wanna_watch: WorkNodes,
    #[serde(rename = "WATCHING")]
    pub watching: WorkNodes,
    #[serde(rename = "WATCHED")]
    pub watched: WorkNodes,
    #[serde(rename = "ON_HOLD")]
    pub on_hold: WorkNodes,
    #[serde(rename = "STOP_WATCHING")]
    pub stop_watching: WorkNodes,
}

impl AnnictUser {
    pub fn works(&self, state: AnnictWatchState) -> &[WorkIds] {
        match state {
            AnnictWatchState::WannaWatch => &self.wanna_watch.nodes,
            AnnictWatchState::Watching => &self.watching.nodes,
            AnnictWatchState::Watched => &self.watched.nodes,
            AnnictWatchState::OnHold => &self.on_hold.nodes,
            AnnictWatchState::StopWatching => &self.stop_watching.nodes,
        }
    }

    /// Flatten into the shared model, state by state in [`AnnictWatchState::ALL`] order
    pub fn into_user_status(self) -> Result<UserAnimeStatus, SourceError> {
        let mut works = Vec::new();
        for state in AnnictWatchState::ALL {
            for work in self.works(state) {
                works.push(AnimeStatus {
                    source_service_id: ServiceId::annict(work.annict_id),
                    my_anime_list_id: parse_mal_id(work.mal_anime_id.as_deref())?,
                    status: state.to_watch_status(),
                });
            }
        }

        Ok(UserAnimeStatus {
            id: ServiceId::new(anirec_models::Service::Annict, self.username)?,
            avatar_url: self.avatar_url,
            works,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnictMedia {
    Tv,
    Ova,
    Movie,
    Web,
    Other,
}

impl AnnictMedia {
    pub fn to_anime_type(self) -> AnimeType {
        match self {
            AnnictMedia::Tv => AnimeType::Tv,
            AnnictMedia::Ova => AnimeType::Ova,
            AnnictMedia::Movie => AnimeType::Movie,
            AnnictMedia::Web => AnimeType::Ona,
            AnnictMedia::Other => AnimeType::Others,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkImage {
    pub facebook_og_image_url: Option<String>,
}

/// A `searchWorks` node
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnictWork {
    pub annict_id: u64,
    pub title: String,
    pub mal_anime_id: Option<String>,
    pub season_name: Option<Season>,
    pub season_year: Option<i32>,
    pub image: Option<WorkImage>,
    pub media: Option<AnnictMedia>,
}

#[derive(Debug, Deserialize)]
struct WorksData {
    works: WorkNodesOf,
}

#[derive(Debug, Deserialize)]
struct WorkNodesOf {
    nodes: Vec<AnnictWork>,
}

/// Annict reports MyAnimeList ids as strings; blank means unknown
fn parse_mal_id(raw: Option<&str>) -> Result<Option<u64>, SourceError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => id
            .parse()
            .map(Some)
            .map_err(|_| SourceError::Schema(format!("malAnimeId '{}' is not numeric", id))),
    }
}

/// Normalize a `searchWorks` node
pub fn work_to_info(work: AnnictWork) -> Result<AnimeInfo, SourceError> {
    let season = SeasonInfo::from_parts(work.season_year, work.season_name)?;
    let id_mal = parse_mal_id(work.mal_anime_id.as_deref())?;

    Ok(AnimeInfo {
        id: match id_mal {
            Some(id) => ServiceId::mal(id),
            None => ServiceId::annict(work.annict_id),
        },
        id_mal,
        id_annict: Some(work.annict_id),
        id_anilist: None,
        title: Some(work.title),
        horizontal_cover_url: work.image.and_then(|image| image.facebook_og_image_url),
        vertical_cover_url: None,
        anime_type: work.media.map(AnnictMedia::to_anime_type),
        season,
    })
}

/// Build the batched watch-list query: one `u<i>` alias per user sharing two fragments
pub fn build_watches_query(users: &[String]) -> (String, Value) {
    let params = (0..users.len())
        .map(|i| format!("$u{}: String!", i))
        .collect::<Vec<_>>()
        .join(", ");

    let mut query = format!("query ({}) {{\n", params);
    for i in 0..users.len() {
        query.push_str(&format!("u{i}: user(username: $u{i}) {{ ...userObj }}\n"));
    }
    query.push_str("}\n");
    query.push_str("fragment userObj on User {\nusername\navatarUrl\n");
    for state in AnnictWatchState::ALL {
        let state = state.as_str();
        query.push_str(&format!("{state}: works(state: {state}) {{ nodes {{ ...workIds }} }}\n"));
    }
    query.push_str("}\n");
    query.push_str("fragment workIds on Work {\nannictId\nmalAnimeId\n}");

    let variables: Map<String, Value> = users
        .iter()
        .enumerate()
        .map(|(i, user)| (format!("u{}", i), Value::String(user.clone())))
        .collect();

    (query, Value::Object(variables))
}

/// Validate the watch-list `data` object and return users in request order
pub fn parse_watches_data(users: &[String], data: Value) -> Result<Vec<AnnictUser>, SourceError> {
    let mut by_alias: HashMap<String, AnnictUser> = serde_json::from_value(data)
        .map_err(|e| SourceError::Schema(format!("watch list: {}", e)))?;

    (0..users.len())
        .map(|i| {
            by_alias.remove(&format!("u{}", i)).ok_or_else(|| {
                SourceError::Schema(format!("watch list: no result for user '{}'", users[i]))
            })
        })
        .collect()
}

/// Validate a `searchWorks` `data` object
pub fn parse_works_data(data: Value) -> Result<Vec<AnnictWork>, SourceError> {
    let data: WorksData = serde_json::from_value(data)
        .map_err(|e| SourceError::Schema(format!("searchWorks: {}", e)))?;
    Ok(data.works.nodes)
}

pub(crate) fn works_variables(ids: &[u64]) -> Value {
    json!({ "ids": ids })
}

/// A single `searchWorks` round trip, at most [`SEARCH_CHUNK_SIZE`] ids
#[async_trait]
pub trait WorkSearch: Send + Sync {
    async fn search_works(&self, ids: &[u64]) -> Result<Vec<AnnictWork>, SourceError>;
}

/// Resolve any number of Annict ids, one request per chunk of at most
/// [`SEARCH_CHUNK_SIZE`], sequentially. Output is chunk order, then response order.
pub async fn fetch_annict_animes<S>(search: &S, ids: &[u64]) -> Result<Vec<AnimeInfo>, SourceError>
where
    S: WorkSearch + ?Sized,
{
    let mut infos = Vec::with_capacity(ids.len());
    for (index, chunk) in ids.chunks(SEARCH_CHUNK_SIZE).enumerate() {
        debug!(chunk = index, size = chunk.len(), "Searching Annict works");
        let works = search.search_works(chunk).await?;
        if works.len() < chunk.len() {
            debug!(
                chunk = index,
                requested = chunk.len(),
                returned = works.len(),
                "Annict returned fewer works than requested"
            );
        }
        for work in works {
            infos.push(work_to_info(work)?);
        }
    }
    Ok(infos)
}
