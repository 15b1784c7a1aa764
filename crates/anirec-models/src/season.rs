use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::ModelError;

/// Quarter-year broadcast cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "WINTER",
            Season::Spring => "SPRING",
            Season::Summer => "SUMMER",
            Season::Autumn => "AUTUMN",
        }
    }

    /// Short Japanese label as used in broadcast listings
    pub fn readable(&self) -> &'static str {
        match self {
            Season::Winter => "冬",
            Season::Spring => "春",
            Season::Summer => "夏",
            Season::Autumn => "秋",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| ModelError::UnknownSeason(s.to_string()))
    }
}

/// Broadcast season of a work. A missing name means the work is treated as
/// airing across the whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonInfo {
    pub year: i32,
    pub name: Option<Season>,
}

impl SeasonInfo {
    pub fn new(year: i32, name: Option<Season>) -> Self {
        Self { year, name }
    }

    /// Build from the optional parts reported by a catalog service.
    ///
    /// No year means no season at all; a name without a year is rejected.
    pub fn from_parts(year: Option<i32>, name: Option<Season>) -> Result<Option<Self>, ModelError> {
        match (year, name) {
            (Some(year), name) => Ok(Some(Self { year, name })),
            (None, None) => Ok(None),
            (None, Some(name)) => Err(ModelError::SeasonWithoutYear(name.to_string())),
        }
    }

    /// Display label such as `2022年春`, or `2022年` for a whole-year season
    pub fn label(&self) -> String {
        match self.name {
            Some(name) => format!("{}年{}", self.year, name.readable()),
            None => format!("{}年", self.year),
        }
    }
}
