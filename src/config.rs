//! Configuration loaded from `config.toml` in the platform config directory

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::services::month_bucketer::BucketZone;
use crate::services::paginator::DEFAULT_PAGE_SIZE;
use crate::types::{DishhubError, Result};

/// Production DishHub API root
pub const DEFAULT_BASE_URL: &str = "https://dishhub-2ea9d6ca8e11.herokuapp.com/api/";

/// HTTP request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Endpoint paths, relative to `base_url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub overview: String,
    pub categories: String,
    pub users: String,
    pub registered: String,
    pub login: String,
    pub register: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            overview: "overview".into(),
            categories: "categories/1/food-items/".into(),
            users: "numberUsers".into(),
            registered: "users/register/".into(),
            login: "login/".into(),
            register: "users/register/".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub page_size: usize,
    pub timeout_secs: u64,
    /// Calendar used to bucket sign-up months
    pub timezone: BucketZone,
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            timezone: BucketZone::default(),
            endpoints: Endpoints::default(),
        }
    }
}

/// Platform directories for dishhub-admin
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "dishhub-admin")
}

impl Config {
    /// `~/.config/dishhub-admin/config.toml` (platform dependent)
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|d| d.config_dir().join("config.toml"))
    }

    /// Load from an explicit path (must exist) or the default path (optional)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.validated()
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DishhubError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
            .map_err(|e| DishhubError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DishhubError::Config(e.to_string()))
    }

    /// Apply command-line overrides; `None` keeps the configured value
    pub fn with_overrides(mut self, base_url: Option<String>, page_size: Option<usize>) -> Result<Self> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(size) = page_size {
            self.page_size = size;
        }
        self.validated()
    }

    /// Check invariants and normalise the base URL to end with `/`
    pub fn validated(mut self) -> Result<Self> {
        if self.page_size == 0 {
            return Err(DishhubError::Config("page_size must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(DishhubError::Config("timeout_secs must be at least 1".into()));
        }
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| DishhubError::Config(format!("invalid base_url {:?}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DishhubError::Config(format!(
                "base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        Ok(self)
    }

    /// Resolve an endpoint path against `base_url`
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| DishhubError::Config(format!("invalid base_url: {}", e)))?;
        base.join(path.trim_start_matches('/'))
            .map_err(|e| DishhubError::Config(format!("invalid endpoint {:?}: {}", path, e)))
    }
}
