use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const CONFIG_FILE_NAME: &str = "config.json";

/// On-disk configuration: tracker coordinates only. The access token is never
/// written to disk; it lives in the in-memory session for the process lifetime.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StoredConfig {
    pub api_url: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid config file: {err}"))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let dir = config_directory()?;
        fs::create_dir_all(&dir)?;
        let contents = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("could not encode config: {err}")))?;
        fs::write(dir.join(CONFIG_FILE_NAME), contents)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("helpdesk"))
        .ok_or_else(|| {
            AppError::Configuration("could not determine the user config directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

/// Fully resolved configuration the rest of the program runs on.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub owner: String,
    pub repo: String,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::resolve(
            stored,
            env::var("HELPDESK_API_URL").ok(),
            env::var("HELPDESK_REPO").ok(),
        )
    }

    fn resolve(
        stored: StoredConfig,
        api_override: Option<String>,
        repo_override: Option<String>,
    ) -> AppResult<Self> {
        let api_url = api_override
            .or(stored.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let (owner, repo) = match repo_override {
            Some(slug) => split_repo_slug(&slug)?,
            None => (stored.owner, stored.repo),
        };

        let owner = owner.ok_or_else(missing_repo)?;
        let repo = repo.ok_or_else(missing_repo)?;

        Ok(Self {
            api_url,
            owner,
            repo,
        })
    }

    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

fn split_repo_slug(slug: &str) -> AppResult<(Option<String>, Option<String>)> {
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((Some(owner.to_string()), Some(repo.to_string())))
        }
        _ => Err(AppError::Configuration(format!(
            "HELPDESK_REPO must be of the form owner/name, got '{slug}'"
        ))),
    }
}

fn missing_repo() -> AppError {
    AppError::Configuration(
        "ticket repository not configured; run 'helpdesk config init' or set HELPDESK_REPO=owner/name"
            .to_string(),
    )
}
