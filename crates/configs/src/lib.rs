use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_ms: default_timeout_ms() }
    }
}

/// Credentials to start with. Issuing them is the backend's business.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SessionConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub identity: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_ms() -> u64 { DEFAULT_TIMEOUT_MS }

/// Load from `CONFIG_PATH` (default `console.toml`); a missing file means defaults.
pub fn load_default() -> Result<ConsoleConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "console.toml".to_string());
    if std::fs::metadata(&path).is_err() {
        return Ok(ConsoleConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<ConsoleConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<ConsoleConfig> {
    let cfg: ConsoleConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl ConsoleConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment wins over the file. `lookup` is injected so tests need not touch the process env.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("API_BASE_URL") {
            self.backend.base_url = url;
        }
        if let Some(raw) = lookup("API_TIMEOUT_MS") {
            self.backend.timeout_ms = raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("API_TIMEOUT_MS must be a whole number of milliseconds, got {raw:?}"))?;
        }
        if let Some(token) = lookup("CONSOLE_TOKEN") {
            self.session.token = Some(token);
        }
        if let Some(identity) = lookup("CONSOLE_IDENTITY") {
            self.session.identity = Some(identity);
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = match format.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                other => return Err(anyhow!("LOG_FORMAT must be compact or json, got {other:?}")),
            };
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.backend.normalize();
        self.backend.validate()?;
        self.session.normalize();
        self.session.validate()?;
        Ok(())
    }
}

impl BackendConfig {
    fn normalize(&mut self) {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() { default_base_url() } else { trimmed.to_string() };
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("backend.base_url must start with http:// or https://, got {:?}", self.base_url));
        }
        if self.timeout_ms == 0 {
            return Err(anyhow!("backend.timeout_ms must be a positive number of milliseconds"));
        }
        Ok(())
    }
}

impl SessionConfig {
    fn normalize(&mut self) {
        self.token = self.token.take().filter(|t| !t.trim().is_empty());
        self.identity = self.identity.take().filter(|i| !i.trim().is_empty());
    }

    /// Identity and token come as a pair.
    pub fn validate(&self) -> Result<()> {
        match (&self.token, &self.identity) {
            (Some(_), None) => Err(anyhow!("session.token is set but session.identity is missing")),
            (None, Some(_)) => Err(anyhow!("session.identity is set but session.token is missing")),
            _ => Ok(()),
        }
    }
}
