use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::cli::Args;
use crate::service::DEFAULT_TIMEOUT;

pub(crate) const API_URL_ENV: &str = "SCREENING_API_URL";
const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub(crate) service: ServiceSection,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServiceSection {
    pub(crate) api_url: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
}

/// Resolved once at startup and passed down; nothing reads the environment later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClientConfig {
    pub(crate) api_url: String,
    pub(crate) timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub(crate) fn load_config_file(path: &Path) -> anyhow::Result<ConfigFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

pub(crate) fn load_client_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let file = match &args.config {
        Some(path) => Some(load_config_file(path)?),
        None => None,
    };
    let env_api_url = std::env::var(API_URL_ENV).ok();
    resolve_client_config(
        args.api_url.as_deref(),
        args.timeout_secs,
        env_api_url.as_deref(),
        file.as_ref(),
    )
}

/// Precedence: flag, then environment, then file, then defaults.
pub(crate) fn resolve_client_config(
    flag_api_url: Option<&str>,
    flag_timeout_secs: Option<u64>,
    env_api_url: Option<&str>,
    file: Option<&ConfigFile>,
) -> anyhow::Result<ClientConfig> {
    let defaults = ClientConfig::default();
    let file_api_url = file.and_then(|file| file.service.api_url.as_deref());
    let api_url = [flag_api_url, env_api_url, file_api_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or(defaults.api_url);
    validate_api_url(&api_url)?;

    let timeout = match flag_timeout_secs.or(file.and_then(|file| file.service.timeout_secs)) {
        Some(0) => anyhow::bail!("timeout_secs must be greater than zero"),
        Some(secs) => Duration::from_secs(secs),
        None => defaults.timeout,
    };
    Ok(ClientConfig { api_url, timeout })
}

fn validate_api_url(api_url: &str) -> anyhow::Result<()> {
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        anyhow::bail!("api_url must start with http:// or https:// (got {api_url})");
    }
    Ok(())
}
