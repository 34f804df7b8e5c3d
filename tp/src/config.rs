//! Trip planner configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Conversation behaviour profile and overrides
    pub planner: PlannerConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Validate configuration before starting a chat
    ///
    /// Checks that the API key environment variable is set so the session
    /// fails fast instead of on the first message.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripplanner.yml
        let local_config = PathBuf::from(".tripplanner.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripplanner/tripplanner.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tripplanner").join("tripplanner.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "openai" supported)
    pub provider: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key_env: "AI_PLANNER_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout_ms: 60_000,
        }
    }
}

impl LlmConfig {
    /// Normalize and check the provider settings
    pub fn resolve(&self) -> Result<ResolvedLlmConfig> {
        debug!(provider = %self.provider, "LlmConfig::resolve: called");
        let provider = self.provider.trim().to_lowercase();
        if provider.is_empty() {
            return Err(eyre::eyre!("llm.provider must not be empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(eyre::eyre!("llm.base-url must be an http(s) URL, got '{}'", self.base_url));
        }
        Ok(ResolvedLlmConfig {
            provider,
            api_key_env: self.api_key_env.clone(),
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout_ms: self.timeout_ms,
        })
    }
}

/// Provider settings after normalization
///
/// Holds the *name* of the key variable, never the key itself, so it is
/// safe to log with `{:?}`.
#[derive(Debug, Clone)]
pub struct ResolvedLlmConfig {
    pub provider: String,
    pub api_key_env: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl ResolvedLlmConfig {
    /// Read the API key from the environment
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .map_err(|_| eyre::eyre!("LLM API key not found. Set the {} environment variable.", self.api_key_env))
    }
}

/// Conversation behaviour profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Short replies, plain itinerary bullets, no keyword nudges
    Classic,
    /// Longer replies, transport and bad-weather alternatives, keyword nudges
    #[default]
    Detailed,
}

impl Variant {
    /// Built-in settings for this variant
    pub fn profile(&self) -> PlannerProfile {
        match self {
            Variant::Classic => PlannerProfile {
                variant: *self,
                model: "gpt-3.5-turbo-0125".to_string(),
                temperature: 0.7,
                reply_max_tokens: 250,
                itinerary_max_tokens: 300,
                reply_window: 10,
                itinerary_window: 10,
                nudges: false,
            },
            Variant::Detailed => PlannerProfile {
                variant: *self,
                model: "gpt-4o-mini".to_string(),
                temperature: 0.7,
                reply_max_tokens: 400,
                itinerary_max_tokens: 1000,
                reply_window: 10,
                itinerary_window: 15,
                nudges: true,
            },
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" | "v1" => Ok(Self::Classic),
            "detailed" | "v2" => Ok(Self::Detailed),
            _ => Err(format!("Unknown variant: {}. Use: classic or detailed", s)),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Detailed => write!(f, "detailed"),
        }
    }
}

/// Planner section of the config file
///
/// Every field except `variant` is an optional override on top of the
/// variant's built-in profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub variant: Variant,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(rename = "reply-max-tokens", skip_serializing_if = "Option::is_none")]
    pub reply_max_tokens: Option<u32>,

    #[serde(rename = "itinerary-max-tokens", skip_serializing_if = "Option::is_none")]
    pub itinerary_max_tokens: Option<u32>,

    #[serde(rename = "reply-window", skip_serializing_if = "Option::is_none")]
    pub reply_window: Option<usize>,

    #[serde(rename = "itinerary-window", skip_serializing_if = "Option::is_none")]
    pub itinerary_window: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nudges: Option<bool>,
}

impl PlannerConfig {
    /// Merge overrides onto the variant profile
    ///
    /// `variant_override` (from the command line) wins over the configured
    /// variant; field overrides apply to whichever variant is chosen.
    pub fn resolve(&self, variant_override: Option<Variant>) -> Result<PlannerProfile> {
        let variant = variant_override.unwrap_or(self.variant);
        debug!(%variant, "PlannerConfig::resolve: called");
        let mut profile = variant.profile();

        if let Some(model) = &self.model {
            profile.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            profile.temperature = temperature;
        }
        if let Some(n) = self.reply_max_tokens {
            profile.reply_max_tokens = n;
        }
        if let Some(n) = self.itinerary_max_tokens {
            profile.itinerary_max_tokens = n;
        }
        if let Some(n) = self.reply_window {
            profile.reply_window = n;
        }
        if let Some(n) = self.itinerary_window {
            profile.itinerary_window = n;
        }
        if let Some(nudges) = self.nudges {
            profile.nudges = nudges;
        }

        profile.validate()?;
        Ok(profile)
    }
}

/// Fully resolved behaviour settings for one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerProfile {
    pub variant: Variant,
    pub model: String,
    pub temperature: f32,
    pub reply_max_tokens: u32,
    pub itinerary_max_tokens: u32,
    pub reply_window: usize,
    pub itinerary_window: usize,
    pub nudges: bool,
}

impl PlannerProfile {
    fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(eyre::eyre!("planner.model must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(eyre::eyre!("planner.temperature must be within 0.0..=2.0, got {}", self.temperature));
        }
        if self.reply_window == 0 || self.itinerary_window == 0 {
            return Err(eyre::eyre!("planner windows must be at least 1 turn"));
        }
        if self.reply_max_tokens == 0 || self.itinerary_max_tokens == 0 {
            return Err(eyre::eyre!("planner token budgets must be positive"));
        }
        Ok(())
    }
}
