use serde::Deserialize;

/// Default backend address for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api_url: std::env::var("FINSIGHT_API_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("FINSIGHT_API_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout_secs: std::env::var("FINSIGHT_TIMEOUT_SECS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|raw| {
                    raw.parse::<u64>()
                        .ok()
                        .filter(|&t| t >= 1)
                        .ok_or_else(|| {
                            anyhow::anyhow!("FINSIGHT_TIMEOUT_SECS must be a whole number >= 1")
                        })
                })
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        tracing::debug!("Backend URL: {}", config.api_url);
        tracing::debug!("Request timeout: {}s", config.timeout_secs);

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
