use reqwest::Client;

/// Shared HTTP client for every service this crate talks to
pub fn create_http_client() -> Client {
    Client::builder()
        .user_agent(concat!("anirec/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}
