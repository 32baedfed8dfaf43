//! API Client Configuration
//!
//! Constructed explicitly and handed to each client; there is no
//! process-wide client state.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_BASE_URL: &str =
    "https://cs2031-2025-2-hackathon-2-backend-production.up.railway.app/v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiConfig {
    /// Collection API root, including the `/v1` prefix
    pub base_url: String,
    /// Bearer token attached to every request
    pub token: Option<String>,
    /// Page size of the projects page
    pub project_page_size: u32,
    /// Page size of the tasks page
    pub task_page_size: u32,
    /// How many projects/tasks the dashboard pulls for its statistics
    pub dashboard_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            project_page_size: 5,
            task_page_size: 50,
            dashboard_limit: 100,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.trim().is_empty() { None } else { Some(token) };
        self
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> ApiResult<Self> {
        let mut config: ApiConfig = serde_json::from_str(raw)?;
        config.token = config.token.filter(|token| !token.trim().is_empty());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ApiResult<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ApiError::config("base URL is empty"));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ApiError::config(format!(
                "base URL must be http(s): {}",
                base
            )));
        }
        if self.project_page_size == 0 || self.task_page_size == 0 || self.dashboard_limit == 0 {
            return Err(ApiError::config("page sizes must be positive"));
        }
        Ok(())
    }

    /// Base URL without trailing slashes
    pub fn root(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}
