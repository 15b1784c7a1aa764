use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::ModelError;

/// Services an anime (or a user) can be identified on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Mal,
    Annict,
    AniList,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Mal, Service::Annict, Service::AniList];

    /// Tag used in the `<service>:<id>` form
    pub fn tag(&self) -> &'static str {
        match self {
            Service::Mal => "mal",
            Service::Annict => "annict",
            Service::AniList => "anilist",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, ModelError> {
        Self::ALL
            .into_iter()
            .find(|service| service.tag() == tag)
            .ok_or_else(|| ModelError::UnknownService(tag.to_string()))
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Identifier of the form `<service>:<id>`, used to cross-reference the same
/// anime (or user) across catalog services.
///
/// The id part is kept as a string because user identifiers are names, while
/// works use numeric ids. Use [`ServiceId::numeric_id`] when a number is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceId {
    service: Service,
    id: String,
}

impl ServiceId {
    pub fn new(service: Service, id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        if id.is_empty() || id.contains(':') {
            return Err(ModelError::MalformedId(format!("{}:{}", service.tag(), id)));
        }
        Ok(Self { service, id })
    }

    pub fn mal(id: u64) -> Self {
        Self { service: Service::Mal, id: id.to_string() }
    }

    pub fn annict(id: u64) -> Self {
        Self { service: Service::Annict, id: id.to_string() }
    }

    pub fn anilist(id: u64) -> Self {
        Self { service: Service::AniList, id: id.to_string() }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn numeric_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }

    /// Public page of this entry on its service
    pub fn url(&self) -> String {
        match self.service {
            Service::Mal => format!("https://myanimelist.net/anime/{}", self.id),
            Service::Annict => format!("https://annict.com/works/{}", self.id),
            Service::AniList => format!("https://anilist.co/anime/{}", self.id),
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.service.tag(), self.id)
    }
}

impl FromStr for ServiceId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, id) = s
            .split_once(':')
            .ok_or_else(|| ModelError::MalformedId(s.to_string()))?;
        Self::new(Service::from_tag(tag)?, id)
    }
}

impl TryFrom<String> for ServiceId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ServiceId> for String {
    fn from(value: ServiceId) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_services() {
        let id: ServiceId = "mal:5114".parse().unwrap();
        assert_eq!(id.service(), Service::Mal);
        assert_eq!(id.id(), "5114");
        assert_eq!(id.numeric_id(), Some(5114));

        let id: ServiceId = "anilist:21".parse().unwrap();
        assert_eq!(id.service(), Service::AniList);

        let id: ServiceId = "annict:someone".parse().unwrap();
        assert_eq!(id.service(), Service::Annict);
        assert_eq!(id.numeric_id(), None);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "kitsu:1".parse::<ServiceId>().unwrap_err();
        assert_eq!(err, ModelError::UnknownService("kitsu".to_string()));
    }

    #[test]
    fn test_malformed_ids_are_rejected() {
        assert!(matches!("5114".parse::<ServiceId>(), Err(ModelError::MalformedId(_))));
        assert!(matches!("mal:".parse::<ServiceId>(), Err(ModelError::MalformedId(_))));
        assert!(matches!("mal:1:2".parse::<ServiceId>(), Err(ModelError::MalformedId(_))));
    }

    #[test]
    fn test_display_matches_parse_input() {
        assert_eq!(ServiceId::annict(1234).to_string(), "annict:1234");
        assert_eq!(ServiceId::mal(1).to_string(), "mal:1");
    }

    #[test]
    fn test_url_per_service() {
        assert_eq!(ServiceId::mal(5114).url(), "https://myanimelist.net/anime/5114");
        assert_eq!(ServiceId::annict(42).url(), "https://annict.com/works/42");
        assert_eq!(ServiceId::anilist(7).url(), "https://anilist.co/anime/7");
    }

    #[test]
    fn test_serde_uses_tagged_string() {
        let json = serde_json::to_string(&ServiceId::mal(3)).unwrap();
        assert_eq!(json, "\"mal:3\"");
        assert!(serde_json::from_str::<ServiceId>("\"tvdb:3\"").is_err());
    }
}
