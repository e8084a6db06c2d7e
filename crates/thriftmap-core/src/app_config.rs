#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the content API the repository client queries.
    pub content_url: String,
    pub log_level: String,
    /// City scope for the discovery session.
    pub city_slug: String,
    pub content_timeout_secs: u64,
    pub content_user_agent: String,
}
