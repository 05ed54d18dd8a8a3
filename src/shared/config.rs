use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Surfdesk backend, without a trailing slash.
    pub base_url: String,
    /// Value sent as the `x-api-key` header on every request.
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// How many spots are revealed initially and per reveal-more step.
    pub spots_per_page: usize,
    /// Maximum number of comments fetched per destination.
    pub comments_page_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3001".to_string(),
                api_key: String::new(),
            },
            pagination: PaginationConfig::default(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            spots_per_page: 15,
            comments_page_limit: 15,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SURFDESK_API_URL") {
            let trimmed = v.trim().trim_end_matches('/').to_string();
            if !trimmed.is_empty() {
                cfg.api.base_url = trimmed;
            }
        }
        if let Ok(v) = std::env::var("SURFDESK_API_KEY") {
            cfg.api.api_key = v.trim().to_string();
        }
        if let Ok(v) = std::env::var("SURFDESK_SPOTS_PER_PAGE") {
            if let Some(value) = parse_usize(&v) {
                cfg.pagination.spots_per_page = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("SURFDESK_COMMENTS_PAGE_LIMIT") {
            if let Some(value) = parse_u32(&v) {
                cfg.pagination.comments_page_limit = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.is_empty() {
            return Err("API base_url must not be empty".to_string());
        }
        if url::Url::parse(&self.api.base_url).is_err() {
            return Err(format!("API base_url is not a valid URL: {}", self.api.base_url));
        }
        if self.pagination.spots_per_page == 0 {
            return Err("spots_per_page must be greater than 0".to_string());
        }
        if self.pagination.comments_page_limit == 0 {
            return Err("comments_page_limit must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}
