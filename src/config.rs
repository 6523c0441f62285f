//! Application configuration loaded from environment variables.
//!
//! Every variable is optional:
//! - `OPSPILOT_API_BASE` — base URL of the reconciliation service
//! - `OPSPILOT_CA_CERT` — PEM file with extra CA roots for an HTTPS backend
//! - `OPSPILOT_REQUEST_TIMEOUT_SECS` — per-request timeout (unset: none)
//! - `OPSPILOT_DISCARD_STALE_RESPONSES` — drop copilot responses that were
//!   overtaken by a newer request
//! - `OPSPILOT_TICK_MS` — UI tick interval
//! - `OPSPILOT_LOG_FILE` — where log output goes while the UI owns the terminal

use std::path::PathBuf;
use std::time::Duration;

/// Default service endpoint.
const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Default UI tick interval in milliseconds.
const DEFAULT_TICK_MS: u64 = 250;

/// Default log destination.
const DEFAULT_LOG_FILE: &str = "opspilot-dashboard.log";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub log_file: PathBuf,
}

/// Connection settings for the reconciliation service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub ca_cert: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
}

/// Dashboard behaviour settings.
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub tick_ms: u64,
    /// When set, a copilot response is only shown if no newer request was
    /// issued for the response region in the meantime.
    pub discard_stale_responses: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            discard_stale_responses: false,
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`OpsPilotError::Config`](crate::OpsPilotError::Config) if the
/// base URL is not an http(s) URL or a numeric/boolean variable does not
/// parse.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = non_empty_var("OPSPILOT_API_BASE")
        .map(|url| validate_base_url(&url))
        .transpose()?
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    let request_timeout = non_empty_var("OPSPILOT_REQUEST_TIMEOUT_SECS")
        .map(|v| parse_u64("OPSPILOT_REQUEST_TIMEOUT_SECS", &v))
        .transpose()?
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let tick_ms = non_empty_var("OPSPILOT_TICK_MS")
        .map(|v| parse_u64("OPSPILOT_TICK_MS", &v))
        .transpose()?
        .unwrap_or(DEFAULT_TICK_MS);
    if tick_ms == 0 {
        return Err(crate::OpsPilotError::Config(
            "OPSPILOT_TICK_MS must be greater than zero".to_string(),
        ));
    }

    let discard_stale_responses = non_empty_var("OPSPILOT_DISCARD_STALE_RESPONSES")
        .map(|v| parse_bool("OPSPILOT_DISCARD_STALE_RESPONSES", &v))
        .transpose()?
        .unwrap_or(false);

    Ok(AppConfig {
        api: ApiConfig {
            base_url,
            ca_cert: non_empty_var("OPSPILOT_CA_CERT").map(PathBuf::from),
            request_timeout,
        },
        ui: UiConfig {
            tick_ms,
            discard_stale_responses,
        },
        log_file: non_empty_var("OPSPILOT_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
    })
}

/// Checks that `raw` is an absolute http(s) URL and strips trailing slashes.
fn validate_base_url(raw: &str) -> crate::Result<String> {
    let url = reqwest::Url::parse(raw).map_err(|e| {
        crate::OpsPilotError::Config(format!("OPSPILOT_API_BASE is not a valid URL: {e}"))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(crate::OpsPilotError::Config(format!(
            "OPSPILOT_API_BASE must use http or https, got {other}"
        ))),
    }
}

fn parse_u64(name: &str, value: &str) -> crate::Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| crate::OpsPilotError::Config(format!("{name} must be a whole number")))
}

fn parse_bool(name: &str, value: &str) -> crate::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(crate::OpsPilotError::Config(format!(
            "{name} must be true or false"
        ))),
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
