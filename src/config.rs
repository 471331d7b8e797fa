use crate::error::{Error, Result};
use crate::services::normalizer::McqItemPolicy;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `text` or `json`, got `{}`", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub groq_api_url: String,
    pub groq_api_key: String,
    pub material_model: String,
    pub mcq_model: String,
    pub upstream_timeout: Duration,
    pub mcq_item_policy: McqItemPolicy,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let groq_api_url = get_env_or("GROQ_API_URL", DEFAULT_GROQ_API_URL);
        validate_url("GROQ_API_URL", &groq_api_url)?;

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            groq_api_url,
            groq_api_key: get_env("GROQ_API_KEY")?,
            material_model: get_env("MATERIAL_MODEL")?,
            mcq_model: get_env("MCQ_MODEL")?,
            upstream_timeout: upstream_timeout()?,
            mcq_item_policy: get_env_parse_or("MCQ_ITEM_POLICY", McqItemPolicy::default())?,
            log_format: get_env_parse_or("LOG_FORMAT", LogFormat::Text)?,
        })
    }
}

/// Required and non-blank. There is no fallback for secrets or model ids.
fn get_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(Error::Config(format!("Missing environment variable: {}", name))),
    }
}

fn upstream_timeout() -> Result<Duration> {
    let secs: u64 = get_env_parse_or("UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?;
    if secs == 0 {
        return Err(Error::Config(
            "Invalid value for UPSTREAM_TIMEOUT_SECS: must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

fn get_env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(default),
    }
}

fn validate_url(name: &str, raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "Invalid value for {}: unsupported scheme `{}`",
            name, other
        ))),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_log_format() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn required_variable_must_be_set_and_non_blank() {
        const NAME: &str = "COURSE_CONTENT_TEST_REQUIRED_KEY";

        env::remove_var(NAME);
        match get_env(NAME) {
            Err(Error::Config(msg)) => assert!(msg.contains(NAME), "{msg}"),
            other => panic!("expected config error, got {:?}", other),
        }

        env::set_var(NAME, "   ");
        match get_env(NAME) {
            Err(Error::Config(msg)) => assert!(msg.contains(NAME), "{msg}"),
            other => panic!("expected config error, got {:?}", other),
        }

        env::set_var(NAME, " gsk-live ");
        assert_eq!(get_env(NAME).unwrap(), "gsk-live");
        env::remove_var(NAME);
    }

    // The only test that touches UPSTREAM_TIMEOUT_SECS.
    #[test]
    fn upstream_timeout_must_be_positive() {
        env::set_var("UPSTREAM_TIMEOUT_SECS", "0");
        match upstream_timeout() {
            Err(Error::Config(msg)) => assert!(msg.contains("UPSTREAM_TIMEOUT_SECS"), "{msg}"),
            other => panic!("expected config error, got {:?}", other),
        }

        env::set_var("UPSTREAM_TIMEOUT_SECS", "soon");
        assert!(matches!(upstream_timeout(), Err(Error::Config(_))));

        env::set_var("UPSTREAM_TIMEOUT_SECS", "15");
        assert_eq!(upstream_timeout().unwrap(), Duration::from_secs(15));

        env::remove_var("UPSTREAM_TIMEOUT_SECS");
        assert_eq!(
            upstream_timeout().unwrap(),
            Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS)
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(validate_url("GROQ_API_URL", DEFAULT_GROQ_API_URL).is_ok());
        assert!(validate_url("GROQ_API_URL", "ftp://example.com/x").is_err());
        assert!(validate_url("GROQ_API_URL", "not a url").is_err());
    }
}
