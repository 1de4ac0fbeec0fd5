use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    LoggingConfig, RateLimitSettings, ServerConfig, SseConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub sse: SseConfig,
    pub rate_limit: RateLimitSettings,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for DN_CONFIG_DIR env var, else use ./.dn/
    /// 2. Load config.toml if it exists, else use defaults
    /// 3. Apply DN_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: DN_CONFIG_DIR env var > ./.dn/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate every section. Call after load() to fail fast at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.sse.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (cors: {})",
            self.server.host,
            self.server.port,
            if self.server.allows_any_origin() {
                String::from("*")
            } else {
                self.server.cors_origins.join(", ")
            }
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  sse: buffer={}, keep_alive={}s",
            self.sse.send_buffer_size, self.sse.keep_alive_interval_secs
        );
        info!(
            "  rate_limit: global={}/{}s, strict={}/{}s",
            self.rate_limit.global.max_requests,
            self.rate_limit.global.window_secs,
            self.rate_limit.strict.max_requests,
            self.rate_limit.strict.window_secs
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("DN_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("DN_SERVER_PORT", &mut self.server.port);
        Self::apply_env_list("DN_CORS_ORIGINS", &mut self.server.cors_origins);

        // Logging
        Self::apply_env_parse("DN_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("DN_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("DN_LOG_FILE", &mut self.logging.file);

        // SSE
        Self::apply_env_parse("DN_SSE_SEND_BUFFER_SIZE", &mut self.sse.send_buffer_size);
        Self::apply_env_parse(
            "DN_SSE_KEEP_ALIVE_INTERVAL_SECS",
            &mut self.sse.keep_alive_interval_secs,
        );

        // Rate limits
        Self::apply_env_parse(
            "DN_RATE_LIMIT_MAX_REQUESTS",
            &mut self.rate_limit.global.max_requests,
        );
        Self::apply_env_parse(
            "DN_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.global.window_secs,
        );
        Self::apply_env_parse(
            "DN_RATE_LIMIT_STATUS_CODE",
            &mut self.rate_limit.global.status_code,
        );
        Self::apply_env_parse(
            "DN_STRICT_RATE_LIMIT_MAX_REQUESTS",
            &mut self.rate_limit.strict.max_requests,
        );
        Self::apply_env_parse(
            "DN_STRICT_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.strict.window_secs,
        );
        Self::apply_env_parse(
            "DN_STRICT_RATE_LIMIT_STATUS_CODE",
            &mut self.rate_limit.strict.status_code,
        );
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Comma-separated; blank items are skipped
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect();
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
