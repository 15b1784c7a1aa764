pub mod annict;
pub mod epgstation;
pub mod error;
pub mod http;
pub mod traits;

pub use annict::AnnictClient;
pub use epgstation::{AddRuleOption, EpgStationClient, RuleReceipt};
pub use error::SourceError;
pub use http::create_http_client;
pub use traits::{AnimeTracker, RecordingScheduler};
