use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// HS256 secret used to verify session cookies and sign identity tokens
    pub secret: String,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_id_token_ttl")]
    pub id_token_ttl_secs: u64,
}

fn default_cookie_name() -> String { "session".to_string() }
fn default_login_path() -> String { "/auth/login".to_string() }
fn default_id_token_ttl() -> u64 { 300 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamSettings {
    /// Base URL for the demo API endpoints. When unset, endpoint URLs are
    /// resolved against the inbound request's own host.
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with GATEFOLD_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with GATEFOLD_)
            // e.g., GATEFOLD_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("GATEFOLD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("GATEFOLD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment variable overrides
///
/// SESSION_SECRET is checked first so deployments can share the secret with
/// whatever issues the session cookies, then GATEFOLD_AUTH__SECRET.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let secret = env::var("SESSION_SECRET")
        .or_else(|_| env::var("GATEFOLD_AUTH__SECRET"))
        .ok();

    let base_url = env::var("GATEFOLD_UPSTREAM__BASE_URL").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(secret) = secret {
        builder = builder.set_override("auth.secret", secret)?;
    }
    if let Some(base_url) = base_url {
        builder = builder.set_override("upstream.base_url", base_url)?;
    }

    builder.build()
}
