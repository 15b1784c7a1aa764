use anirec_models::{AnimeInfo, AnimeType};

/// Keep works whose media type is one of `allowed`. Works of unknown type are dropped.
pub fn filter_by_media_type(works: Vec<AnimeInfo>, allowed: &[AnimeType]) -> Vec<AnimeInfo> {
    works
        .into_iter()
        .filter(|work| work.anime_type.is_some_and(|t| allowed.contains(&t)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anirec_models::ServiceId;

    fn work(id: u64, anime_type: Option<AnimeType>) -> AnimeInfo {
        AnimeInfo {
            id: ServiceId::annict(id),
            id_mal: None,
            id_annict: Some(id),
            id_anilist: None,
            title: Some(format!("Work {}", id)),
            horizontal_cover_url: None,
            vertical_cover_url: None,
            anime_type,
            season: None,
        }
    }

    #[test]
    fn test_filter_by_media_type() {
        let works = vec![
            work(1, Some(AnimeType::Tv)),
            work(2, Some(AnimeType::Ova)),
            work(3, None),
            work(4, Some(AnimeType::Movie)),
            work(5, Some(AnimeType::Ona)),
        ];
        let kept: Vec<_> = filter_by_media_type(works, &[AnimeType::Tv, AnimeType::Movie])
            .into_iter()
            .filter_map(|w| w.id_annict)
            .collect();
        assert_eq!(kept, vec![1, 4]);
    }

    #[test]
    fn test_filter_empty_allowed_drops_everything() {
        let works = vec![work(1, Some(AnimeType::Tv))];
        assert!(filter_by_media_type(works, &[]).is_empty());
    }
}
