pub mod anime;
pub mod error;
pub mod season;
pub mod service_id;
pub mod status;
pub mod user_status;

pub use anime::{AnimeInfo, AnimeType};
pub use error::ModelError;
pub use season::{Season, SeasonInfo};
pub use service_id::{Service, ServiceId};
pub use status::WatchStatus;
pub use user_status::{AnimeStatus, UserAnimeStatus};
