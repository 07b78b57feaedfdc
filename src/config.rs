use crate::{log_debug, log_warn};

use anyhow::{Context, Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration structure for flashdeck
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Study-card server connection
    #[serde(default)]
    pub server: ServerConfig,
    /// Review screen settings
    #[serde(default)]
    pub review: ReviewConfig,
    /// Flag indicating if this config is from a project file
    #[serde(skip)]
    pub is_project_config: bool,
}

/// Server connection settings
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL that `/api/...` paths are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Anti-forgery token sent as `X-CSRFToken`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    /// Username remembered between logins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            csrf_token: None,
            username: None,
        }
    }
}

/// Which optional review elements are shown
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReviewConfig {
    /// Show the prev/flip/next buttons
    #[serde(default = "default_true")]
    pub show_controls: bool,
    /// Show the answer line for typed guesses
    #[serde(default = "default_true")]
    pub answer_line: bool,
    /// Show the position counter
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            show_controls: true,
            answer_line: true,
            show_progress: true,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_true() -> bool {
    true
}

/// Project configuration filename
pub const PROJECT_CONFIG_FILENAME: &str = ".flashdeck.toml";

/// Overrides read from a project file.
///
/// Every key is optional so that only what the file sets replaces personal
/// settings. There is no token field; a token in a project file is ignored.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub server: ProjectServer,
    #[serde(default)]
    pub review: ProjectReview,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectServer {
    pub base_url: Option<String>,
    pub username: Option<String>,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectReview {
    pub show_controls: Option<bool>,
    pub answer_line: Option<bool>,
    pub show_progress: Option<bool>,
}

impl ProjectConfig {
    /// Read a project file; `None` when there is no such file
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let parsed = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
            .and_then(|content| {
                toml::from_str(&content)
                    .with_context(|| format!("Invalid configuration file format: {}", path.display()))
            });

        parsed.map(Some).map_err(|e| {
            anyhow!(
                "{:#}. Please check your {} file for syntax errors.",
                e,
                PROJECT_CONFIG_FILENAME
            )
        })
    }
}

impl Config {
    /// Load the configuration from the file
    pub fn load() -> Result<Self> {
        // First load personal config
        let config_path = Self::get_config_path()?;
        let mut config = Self::load_from(&config_path)?;

        // Then merge the project config; a broken one is reported and skipped
        match Self::load_project_config() {
            Ok(Some(project_config)) => config.merge_with_project_config(&project_config),
            Ok(None) => {}
            Err(e) => log_warn!("Ignoring project configuration: {:#}", e),
        }

        log_debug!("Configuration loaded: {:?}", config.redacted());
        Ok(config)
    }

    /// Load a config file, or defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid configuration file format: {}", path.display()))
    }

    /// Load the project configuration in the working directory, if any
    pub fn load_project_config() -> Result<Option<ProjectConfig>> {
        ProjectConfig::load_from(&Self::get_project_config_path()?)
    }

    /// Get the path to the project configuration file
    pub fn get_project_config_path() -> Result<PathBuf> {
        let dir = std::env::current_dir().context("Unable to determine working directory")?;
        Ok(dir.join(PROJECT_CONFIG_FILENAME))
    }

    /// Overlay the keys a project file sets on this personal config
    pub fn merge_with_project_config(&mut self, project_config: &ProjectConfig) {
        log_debug!("Merging with project configuration");

        let ProjectConfig { server, review } = project_config;
        if let Some(url) = &server.base_url {
            self.server.base_url.clone_from(url);
        }
        if let Some(name) = &server.username {
            self.server.username = Some(name.clone());
        }
        if let Some(value) = review.show_controls {
            self.review.show_controls = value;
        }
        if let Some(value) = review.answer_line {
            self.review.answer_line = value;
        }
        if let Some(value) = review.show_progress {
            self.review.show_progress = value;
        }
    }

    /// Save the configuration to the file
    pub fn save(&self) -> Result<()> {
        // Don't save project configs to personal config file
        if self.is_project_config {
            return Ok(());
        }

        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)?;
        log_debug!("Configuration saved: {:?}", self.redacted());
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_content = toml::to_string_pretty(self)?;
        fs::write(path, config_content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Save the configuration as a project-specific configuration
    pub fn save_as_project_config(&self) -> Result<()> {
        let config_path = Self::get_project_config_path()?;
        self.project_copy().save_to(&config_path)
    }

    /// Copy suitable for sharing in a project directory; drops the token
    pub fn project_copy(&self) -> Self {
        let mut project_config = self.clone();
        project_config.server.csrf_token = None;
        project_config.is_project_config = true;
        project_config
    }

    /// Get the path to the configuration file
    fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("flashdeck");
        std::fs::create_dir_all(&path)?;
        path.push("config.toml");
        Ok(path)
    }

    /// Apply updates from the command line
    pub fn update(
        &mut self,
        base_url: Option<String>,
        csrf_token: Option<String>,
        username: Option<String>,
        show_controls: Option<bool>,
        answer_line: Option<bool>,
    ) {
        if let Some(url) = base_url {
            self.server.base_url = url;
        }
        if let Some(token) = csrf_token {
            self.server.csrf_token = Some(token);
        }
        if let Some(name) = username {
            self.server.username = Some(name);
        }
        if let Some(value) = show_controls {
            self.review.show_controls = value;
        }
        if let Some(value) = answer_line {
            self.review.answer_line = value;
        }
        log_debug!("Configuration updated: {:?}", self.redacted());
    }

    /// Copy safe to print or log
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.server.csrf_token.is_some() {
            config.server.csrf_token = Some("****".to_string());
        }
        config
    }
}
