use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upstream generative-language API settings.
///
/// The API key is resolved once here at startup and injected into the
/// request pipeline; handlers never read the process environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or the default config.toml lookup
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load_from(path: Option<&str>) -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let mut config = if let Some(config_path) = path.map(str::to_string).or_else(Self::find_config_file) {
            Self::from_toml(&config_path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        // 2. Override with environment variables
        config.apply_env_overrides();

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_GEMINI_API_KEY / GEMINI_API_KEY: Gemini API key
    /// - APP_GEMINI_MODEL: Model identifier (e.g., "gemini-1.5-flash-latest")
    /// - APP_GEMINI_API_BASE: API base URL override (proxies, test servers)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,prompt_studio=debug")
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        // GEMINI_API_KEY is the name the hosting platform historically used,
        // so accept it alongside the APP_-prefixed form.
        if let Ok(key) =
            std::env::var("APP_GEMINI_API_KEY").or_else(|_| std::env::var("GEMINI_API_KEY"))
        {
            self.gemini.api_key = key;
            tracing::info!("Override gemini.api_key from env");
        }

        if let Ok(model) = std::env::var("APP_GEMINI_MODEL") {
            self.gemini.model = model;
            tracing::info!("Override gemini.model from env: {}", self.gemini.model);
        }

        if let Ok(base) = std::env::var("APP_GEMINI_API_BASE") {
            self.gemini.api_base = base;
            tracing::info!("Override gemini.api_base from env");
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.gemini.model.is_empty() {
            anyhow::bail!("gemini.model cannot be empty");
        }

        if self.gemini.timeout_seconds == 0 {
            anyhow::bail!("gemini.timeout_seconds must be > 0");
        }

        // A missing API key is not fatal at startup: the server boots and
        // reports a configuration error on each generation request instead.
        if self.gemini.api_key.is_empty() {
            tracing::warn!("⚠️  No Gemini API key configured!");
            tracing::warn!("⚠️  Set APP_GEMINI_API_KEY or gemini.api_key in config.toml");
            tracing::warn!("⚠️  Generation requests will fail until a key is provided");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash-latest".to_string(),
            temperature: None,
            timeout_seconds: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,prompt_studio=debug".to_string(),
            file: Some("logs/prompt-studio.log".to_string()),
        }
    }
}
