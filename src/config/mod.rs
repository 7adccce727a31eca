use std::env;

use crate::models::query::{DEFAULT_PER_PAGE, PER_PAGE_CHOICES};

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub default_per_page: u32,
    pub login_path: String,
    pub fallback_path: String,
    pub admin_host_prefix: String,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        let default_per_page = env::var("DEFAULT_PER_PAGE")
            .unwrap_or_else(|_| DEFAULT_PER_PAGE.to_string())
            .parse()
            .unwrap_or(DEFAULT_PER_PAGE);

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")?,
            api_timeout_secs: env::var("API_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            default_per_page: if PER_PAGE_CHOICES.contains(&default_per_page) {
                default_per_page
            } else {
                DEFAULT_PER_PAGE
            },
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            fallback_path: env::var("FALLBACK_PATH").unwrap_or_else(|_| "/".to_string()),
            admin_host_prefix: env::var("ADMIN_HOST_PREFIX")
                .unwrap_or_else(|_| "admin.".to_string()),
        })
    }
}
