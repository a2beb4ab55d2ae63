use std::{net::SocketAddr, str::FromStr, time::Duration};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_APP_URL: &str = "http://localhost:8080";
const DEFAULT_COMPANY_NAME: &str = "PufferPanel";
const DEFAULT_PUFFERD_VERSION: &str = "latest";

pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,

    /// Public base URL of the panel, used in emails and deploy scripts.
    pub app_url: String,
    pub company_name: String,

    /// reCAPTCHA secret; captcha checks are skipped when unset.
    pub captcha_secret: Option<String>,

    pub daemon_use_tls: bool,
    pub daemon_timeout: Option<Duration>,
    pub pufferd_version: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_address: match parse_var("BIND_ADDRESS")? {
                Some(addr) => addr,
                None => parse_value("BIND_ADDRESS", DEFAULT_BIND_ADDRESS)?,
            },
            app_url: var_or("APP_URL", DEFAULT_APP_URL),
            company_name: var_or("COMPANY_NAME", DEFAULT_COMPANY_NAME),
            captcha_secret: std::env::var("CAPTCHA_PRIVATE_KEY")
                .ok()
                .filter(|secret| !secret.trim().is_empty()),
            daemon_use_tls: parse_var("DAEMON_USE_TLS")?.unwrap_or(true),
            daemon_timeout: parse_var::<u64>("DAEMON_TIMEOUT_SECS")?.map(Duration::from_secs),
            pufferd_version: var_or("PUFFERD_VERSION", DEFAULT_PUFFERD_VERSION),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parses an optional variable, failing only when it is set to a malformed value.
fn parse_var<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => parse_value(name, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}
