use thiserror::Error;

/// Errors raised while constructing model values from raw input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown service tag '{0}' (expected mal, annict or anilist)")]
    UnknownService(String),

    #[error("malformed service id '{0}' (expected <service>:<id>)")]
    MalformedId(String),

    #[error("unknown watch status '{0}'")]
    UnknownStatus(String),

    #[error("unknown season name '{0}'")]
    UnknownSeason(String),

    #[error("unknown anime type '{0}'")]
    UnknownAnimeType(String),

    #[error("season name {0} was given without a season year")]
    SeasonWithoutYear(String),
}
