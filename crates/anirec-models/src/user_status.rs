use serde::{Deserialize, Serialize};
use crate::service_id::ServiceId;
use crate::status::WatchStatus;

/// One user's status for one anime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeStatus {
    pub source_service_id: ServiceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_anime_list_id: Option<u64>,
    pub status: WatchStatus,
}

impl AnimeStatus {
    /// `mal:<id>` if the MyAnimeList id is known, otherwise the source id
    pub fn mal_id_if_possible(&self) -> ServiceId {
        match self.my_anime_list_id {
            Some(id) => ServiceId::mal(id),
            None => self.source_service_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAnimeStatus {
    pub id: ServiceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub works: Vec<AnimeStatus>,
}

impl UserAnimeStatus {
    pub fn works_with_status(&self, status: WatchStatus) -> impl Iterator<Item = &AnimeStatus> {
        self.works.iter().filter(move |work| work.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(id: u64, mal: Option<u64>, status: WatchStatus) -> AnimeStatus {
        AnimeStatus {
            source_service_id: ServiceId::annict(id),
            my_anime_list_id: mal,
            status,
        }
    }

    #[test]
    fn test_mal_id_if_possible() {
        assert_eq!(status(1, Some(40), WatchStatus::Want).mal_id_if_possible(), ServiceId::mal(40));
        assert_eq!(status(1, None, WatchStatus::Want).mal_id_if_possible(), ServiceId::annict(1));
    }

    #[test]
    fn test_works_with_status_keeps_order() {
        let user = UserAnimeStatus {
            id: "annict:someone".parse().unwrap(),
            avatar_url: None,
            works: vec![
                status(3, None, WatchStatus::Want),
                status(1, None, WatchStatus::Watching),
                status(2, None, WatchStatus::Want),
            ],
        };
        let wanted: Vec<_> = user
            .works_with_status(WatchStatus::Want)
            .map(|w| w.source_service_id.to_string())
            .collect();
        assert_eq!(wanted, vec!["annict:3", "annict:2"]);
    }
}
