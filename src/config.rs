//! Service configuration. Credentials and saved-item identifiers are
//! injected from the environment (or a local .env file); nothing is
//! hardcoded in client code.

use std::env;
use std::fmt;

use crate::error::{PipelineError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.gumloop.com";

#[derive(Clone)]
pub struct PipelineConfig {
    pub base_url: String,
    pub api_key: String,
    pub user_id: String,
    /// Saved item id of the itinerary pipeline.
    pub itinerary_pipeline_id: String,
    /// Saved item id of the auth pipeline. Auth flows are unavailable
    /// when unset.
    pub auth_pipeline_id: Option<String>,
}

impl PipelineConfig {
    pub fn new(base_url: &str, api_key: &str, user_id: &str, itinerary_pipeline_id: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            user_id: user_id.to_string(),
            itinerary_pipeline_id: itinerary_pipeline_id.to_string(),
            auth_pipeline_id: None,
        }
    }

    /// Load from environment variables, reading a .env file first if one
    /// exists. `PIPELINE_API_URL` falls back to the hosted service.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let base_url =
            env::var("PIPELINE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url,
            api_key: required("PIPELINE_API_KEY")?,
            user_id: required("PIPELINE_USER_ID")?,
            itinerary_pipeline_id: required("PIPELINE_ITINERARY_ID")?,
            auth_pipeline_id: env::var("PIPELINE_AUTH_ID")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }

    pub fn with_auth_pipeline(mut self, saved_item_id: &str) -> Self {
        self.auth_pipeline_id = Some(saved_item_id.to_string());
        self
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| PipelineError::Config(format!("{name} not set")))
}

// The api key must never leak through debug logging.
impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("itinerary_pipeline_id", &self.itinerary_pipeline_id)
            .field("auth_pipeline_id", &self.auth_pipeline_id)
            .finish()
    }
}
