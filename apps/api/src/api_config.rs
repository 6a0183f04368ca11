use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use flowcms_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_WEBFLOW_API_BASE_URL: &str = "https://api.webflow.com";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

#[derive(Debug, Clone)]
pub struct WebflowRuntimeConfig {
    pub access_token: String,
    pub api_base_url: Url,
    pub legacy_api_base_url: Url,
    pub publish_live: bool,
    pub http_timeout: Duration,
}

#[derive(Debug, Clone)]
pub enum CmsProviderConfig {
    Webflow(WebflowRuntimeConfig),
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub cms_provider: CmsProviderConfig,
    pub api_host: String,
    pub api_port: u16,
    pub port_fallback_attempts: u16,
    pub frontend_origins: Vec<String>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let cms_provider = match env::var("CMS_PROVIDER")
            .unwrap_or_else(|_| "webflow".to_owned())
            .as_str()
        {
            "webflow" => CmsProviderConfig::Webflow(load_webflow_config()?),
            "memory" => CmsProviderConfig::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "CMS_PROVIDER must be either 'webflow' or 'memory', got '{other}'"
                )));
            }
        };

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(5000);
        let port_fallback_attempts = env::var("PORT_FALLBACK_ATTEMPTS")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(10);

        let frontend_origins = parse_origins(
            &env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_owned()),
        );

        Ok(Self {
            cms_provider,
            api_host,
            api_port,
            port_fallback_attempts,
            frontend_origins,
        })
    }

    pub fn socket_address(&self, port: u16) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, port)))
    }
}

fn load_webflow_config() -> Result<WebflowRuntimeConfig, AppError> {
    let access_token = required_non_empty_env("WEBFLOW_ACCESS_TOKEN")?;
    let api_base_url = base_url_env("WEBFLOW_API_BASE_URL", DEFAULT_WEBFLOW_API_BASE_URL)?;
    let legacy_api_base_url =
        base_url_env("WEBFLOW_LEGACY_API_BASE_URL", DEFAULT_WEBFLOW_API_BASE_URL)?;
    let publish_live = env::var("WEBFLOW_PUBLISH_LIVE")
        .map(|value| !value.eq_ignore_ascii_case("false"))
        .unwrap_or(true);
    let http_timeout_secs = match env::var("WEBFLOW_HTTP_TIMEOUT_SECS") {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid WEBFLOW_HTTP_TIMEOUT_SECS: {error}"))
        })?,
        Err(_) => 10,
    };

    Ok(WebflowRuntimeConfig {
        access_token,
        api_base_url,
        legacy_api_base_url,
        publish_live,
        http_timeout: Duration::from_secs(http_timeout_secs),
    })
}

fn base_url_env(name: &str, default: &str) -> Result<Url, AppError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_owned());
    Url::parse(&value).map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::parse_origins;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://localhost:3000, ,http://localhost:3001 "),
            vec![
                "http://localhost:3000".to_owned(),
                "http://localhost:3001".to_owned()
            ]
        );
    }
}
