use crate::router::KnownSite;
use crate::services::ListenWindow;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "./configs/base_config.json";

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct ListenConfig {
    pub timeout_secs: u64,
    pub phrase_limit_secs: u64,
}

impl ListenConfig {
    pub const WAKE_DEFAULT: ListenConfig = ListenConfig {
        timeout_secs: 10,
        phrase_limit_secs: 2,
    };
    pub const COMMAND_DEFAULT: ListenConfig = ListenConfig {
        timeout_secs: 6,
        phrase_limit_secs: 6,
    };

    pub fn window(&self) -> ListenWindow {
        ListenWindow::from_secs(self.timeout_secs, self.phrase_limit_secs)
    }
}

/// A listen window as written in the config file; absent fields keep the
/// phase's default.
#[derive(Deserialize)]
struct PartialListen {
    timeout_secs: Option<u64>,
    phrase_limit_secs: Option<u64>,
}

impl PartialListen {
    fn over(self, base: ListenConfig) -> ListenConfig {
        ListenConfig {
            timeout_secs: self.timeout_secs.unwrap_or(base.timeout_secs),
            phrase_limit_secs: self.phrase_limit_secs.unwrap_or(base.phrase_limit_secs),
        }
    }
}

fn wake_listen<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ListenConfig, D::Error> {
    Ok(PartialListen::deserialize(deserializer)?.over(ListenConfig::WAKE_DEFAULT))
}

fn command_listen<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ListenConfig, D::Error> {
    Ok(PartialListen::deserialize(deserializer)?.over(ListenConfig::COMMAND_DEFAULT))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Text-to-speech program; the text is passed as its last argument.
    /// `None` only logs what would be said.
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: Some("espeak".to_string()),
            args: vec!["-s".to_string(), "175".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub request_timeout_secs: u64,
    pub completion_model: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            completion_model: "gemini-pro".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub wake_word: String,
    #[serde(deserialize_with = "wake_listen")]
    pub wake_listen: ListenConfig,
    #[serde(deserialize_with = "command_listen")]
    pub command_listen: ListenConfig,
    /// URL overrides for the sites that have their own intent, keyed by
    /// [`KnownSite::key`].
    pub sites: HashMap<String, String>,
    /// Spoken names accepted by "open <site>", mapped to URLs.
    pub site_aliases: HashMap<String, String>,
    pub music_catalog: Option<PathBuf>,
    pub speech: SpeechConfig,
    pub services: ServicesConfig,
    pub whisper_model: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wake_word: "jarvis".to_string(),
            wake_listen: ListenConfig::WAKE_DEFAULT,
            command_listen: ListenConfig::COMMAND_DEFAULT,
            sites: HashMap::new(),
            site_aliases: default_site_aliases(),
            music_catalog: None,
            speech: SpeechConfig::default(),
            services: ServicesConfig::default(),
            whisper_model: PathBuf::from("./models/ggml-small.en.bin"),
        }
    }
}

fn default_site_aliases() -> HashMap<String, String> {
    [
        ("youtube", "https://www.youtube.com"),
        ("twitter", "https://twitter.com"),
        ("twitter x", "https://twitter.com"),
        ("x", "https://twitter.com"),
        ("github", "https://github.com"),
        ("stack overflow", "https://stackoverflow.com"),
    ]
    .into_iter()
    .map(|(alias, url)| (alias.to_string(), url.to_string()))
    .collect()
}

impl Config {
    /// URL for a dedicated-intent site, honouring overrides.
    pub fn site_url(&self, site: KnownSite) -> &str {
        self.sites
            .get(site.key())
            .map(String::as_str)
            .unwrap_or_else(|| site.default_url())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&data)?;
    if config.wake_word.trim().is_empty() {
        return Err("wake_word must not be empty".into());
    }
    Ok(config)
}

/// Loads `path`, or the built-in defaults when the default config file is
/// simply absent.
pub fn load_or_default(path: &str) -> Result<Config, Box<dyn Error>> {
    if path == DEFAULT_CONFIG_PATH && !Path::new(path).exists() {
        log::warn!("{} not found, using built-in defaults", path);
        return Ok(Config::default());
    }
    load_config(path)
}

#[derive(Debug, thiserror::Error)]
#[error("missing {0} in environment")]
pub struct MissingCredential(pub &'static str);

/// API keys for the hosted services.
#[derive(Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub news_api_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, MissingCredential> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MissingCredential> {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(MissingCredential(name))
        };
        Ok(Self {
            gemini_api_key: read("GEMINI_API_KEY")?,
            news_api_key: read("NEWS_API_KEY")?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}
