use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub openai_base_url: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
        let timeout = env::var("HTTP_TIMEOUT_SECS").unwrap_or_else(|_| "60".to_string());

        Self::from_parts(&host, &port, &openai_base_url, &timeout)
    }

    fn from_parts(host: &str, port: &str, openai_base_url: &str, timeout: &str) -> Result<Self> {
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(host)
            .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
        let timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| AppError::ConfigError(format!("Invalid HTTP timeout: {}", e)))?;

        url::Url::parse(openai_base_url)
            .map_err(|e| AppError::ConfigError(format!("Invalid OpenAI base URL: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            openai_base_url: openai_base_url.trim_end_matches('/').to_string(),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_parts() {
        let config =
            Config::from_parts("0.0.0.0", "8080", "http://localhost:9000/v1/", "5").unwrap();
        assert_eq!(config.server_addr.port(), 8080);
        assert_eq!(config.openai_base_url, "http://localhost:9000/v1");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_port() {
        let err =
            Config::from_parts("127.0.0.1", "http", DEFAULT_OPENAI_BASE_URL, "60").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(msg) if msg.starts_with("Invalid port")));
    }

    #[test]
    fn rejects_bad_base_url() {
        let err = Config::from_parts("127.0.0.1", "3000", "not a url", "60").unwrap_err();
        assert_eq!(err.kind(), "config");
    }
}
