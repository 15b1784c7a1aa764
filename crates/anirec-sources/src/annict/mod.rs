pub mod api;
pub mod client;

pub use api::{AnnictMedia, AnnictUser, AnnictWatchState, AnnictWork, WorkSearch, SEARCH_CHUNK_SIZE};
pub use client::AnnictClient;
