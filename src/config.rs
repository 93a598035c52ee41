use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::youtube::SearchOrder;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Get the .env file path (~/.yt-views/.env)
pub fn env_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".yt-views").join(".env"))
}

/// Load environment variables from ~/.yt-views/.env, falling back to ./.env
pub fn load_env() {
    match env_file_path() {
        Some(path) if path.exists() => {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "could not load env file");
            }
        }
        _ => {
            // Try current directory as fallback
            let _ = dotenvy::dotenv();
        }
    }
}

/// Get the API key from the named environment variable
pub fn api_key(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

/// Get the API base URL, overridable with YOUTUBE_API_BASE_URL
pub fn api_base_url() -> String {
    std::env::var("YOUTUBE_API_BASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Everything the report needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInputs {
    pub api_key: String,
    pub channel_id: String,
    pub published_before: Option<String>,
    pub published_after: Option<String>,
    pub order: SearchOrder,
    pub sort_by_views: bool,
}

impl ProgramInputs {
    /// Validate the parsed flags together with the API key.
    ///
    /// The key is checked first so a bad environment fails before anything
    /// else is looked at. Timestamps are passed through as given.
    pub fn resolve(cli: Cli, api_key: Option<String>) -> Result<Self> {
        let api_key = non_empty(api_key).ok_or(Error::ApiKeyMissing { var: cli.key_env })?;
        let channel_id = non_empty(cli.channel).ok_or(Error::ChannelMissing)?;

        Ok(Self {
            api_key,
            channel_id,
            published_before: non_empty(cli.before),
            published_after: non_empty(cli.after),
            order: cli.order,
            sort_by_views: cli.sort_by_views,
        })
    }
}

/// Blank values count as absent; anything else is forwarded untouched.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
