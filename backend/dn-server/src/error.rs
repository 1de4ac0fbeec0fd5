use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] dn_config::ConfigError),

    #[error("Invalid rate limit settings: {0}")]
    RateLimit(#[from] dn_limit::LimitError),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
