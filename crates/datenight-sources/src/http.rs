use reqwest::Client;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Shared reqwest client for provider calls. Timeouts are applied per request.
pub fn create_http_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}
