use anyhow::{Result, bail};
use clap::Parser;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::error::StatusPolicy;
use crate::yt::DEFAULT_BASE_URL;

/// Plain-text fallback for the API key, read from the working directory.
pub const KEY_FILE: &str = "YT_API_private";

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Relay for YouTube channel and video statistics", long_about = None)]
pub struct Config {
    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Server host
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Data API root, override to point at a mock
    #[arg(long, env = "YOUTUBE_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub upstream_base_url: String,

    /// Report not-found as 404 and upstream faults as 502 instead of 200
    #[arg(long, env = "STRICT_STATUS", default_value = "false")]
    pub strict_status: bool,

    /// Origin allowed to call the API from a browser
    #[arg(long, env = "CORS_ORIGIN", default_value = "http://localhost:3000")]
    pub cors_origin: String,

    /// Log filter
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub rust_log: String,

    /// Use JSON formatting for tracing
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn status_policy(&self) -> StatusPolicy {
        if self.strict_status {
            StatusPolicy::Strict
        } else {
            StatusPolicy::AlwaysOk
        }
    }

    pub fn resolve_api_key(&self) -> Result<String> {
        resolve_api_key(self.api_key.as_deref())
    }
}

/// Flag or environment first, then the settings file, then [`KEY_FILE`].
pub fn resolve_api_key(flag: Option<&str>) -> Result<String> {
    let settings = load_settings();
    let key_file = fs::read_to_string(KEY_FILE).ok();
    match pick_api_key(flag, &settings, key_file.as_deref()) {
        Some(key) => Ok(key),
        None => bail!(
            "No YouTube Data API key. Pass --api-key, set YOUTUBE_API_KEY, add api_key to {} or create {KEY_FILE}.",
            settings_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "settings.json".to_owned())
        ),
    }
}

/// Optional on-disk settings.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
}

pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        return Settings::default();
    };
    match fs::read(&path) {
        Ok(bytes) => serde_json::from_slice::<Settings>(&bytes).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable settings file");
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

fn settings_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "ytanalytics", "YTAnalytics")?;
    Some(proj.config_dir().join("settings.json"))
}

fn pick_api_key(flag: Option<&str>, settings: &Settings, key_file: Option<&str>) -> Option<String> {
    [flag, Some(settings.api_key.as_str()), key_file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_owned)
}
