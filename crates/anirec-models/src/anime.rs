use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::ModelError;
use crate::season::SeasonInfo;
use crate::service_id::ServiceId;

/// Media classification shared across catalog services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimeType {
    Tv,
    Movie,
    Ova,
    Ona,
    Others,
}

impl AnimeType {
    pub const ALL: [AnimeType; 5] = [
        AnimeType::Tv,
        AnimeType::Movie,
        AnimeType::Ova,
        AnimeType::Ona,
        AnimeType::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimeType::Tv => "TV",
            AnimeType::Movie => "MOVIE",
            AnimeType::Ova => "OVA",
            AnimeType::Ona => "ONA",
            AnimeType::Others => "OTHERS",
        }
    }
}

impl fmt::Display for AnimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimeType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|anime_type| anime_type.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownAnimeType(s.to_string()))
    }
}

/// Normalized metadata for one anime, built once from a catalog response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeInfo {
    /// `mal:<id>` when a MyAnimeList cross-reference is known, else the source service id
    pub id: ServiceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_mal: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_annict: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_anilist: Option<u64>,
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_cover_url: Option<String>,
    pub anime_type: Option<AnimeType>,
    pub season: Option<SeasonInfo>,
}

impl AnimeInfo {
    /// Title for display, falling back to the primary id
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| self.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anime_type_parse() {
        assert_eq!("tv".parse::<AnimeType>().unwrap(), AnimeType::Tv);
        assert_eq!("MOVIE".parse::<AnimeType>().unwrap(), AnimeType::Movie);
        assert!("WEB".parse::<AnimeType>().is_err());
    }

    #[test]
    fn test_display_title_falls_back_to_id() {
        let info = AnimeInfo {
            id: ServiceId::annict(9),
            id_mal: None,
            id_annict: Some(9),
            id_anilist: None,
            title: None,
            horizontal_cover_url: None,
            vertical_cover_url: None,
            anime_type: None,
            season: None,
        };
        assert_eq!(info.display_title(), "annict:9");
    }
}
