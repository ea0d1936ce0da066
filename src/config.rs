use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_url: String,
    pub ollama_model: String,
    pub temperature: f32,
    pub news_api_key: Option<String>,
    pub news_api_url: String,
    pub generation_timeout: Duration,
    pub news_timeout: Duration,
    pub export_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source, so tests don't
    /// have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let temperature: f32 = var("TEMPERATURE", "0.7")
            .parse()
            .context("TEMPERATURE must be a number")?;
        anyhow::ensure!(
            (0.0..=1.0).contains(&temperature),
            "TEMPERATURE must be between 0.0 and 1.0, got {}",
            temperature
        );

        Ok(Self {
            ollama_url: var("OLLAMA_URL", "http://localhost:11434"),
            ollama_model: var("OLLAMA_MODEL", "llama3.2"),
            temperature,
            news_api_key: lookup("NEWS_API_KEY").filter(|key| !key.trim().is_empty()),
            news_api_url: var("NEWS_API_URL", "https://newsapi.org/v2/everything"),
            generation_timeout: Duration::from_secs(
                var("GENERATION_TIMEOUT_SECS", "120")
                    .parse()
                    .context("GENERATION_TIMEOUT_SECS must be a number")?,
            ),
            news_timeout: Duration::from_secs(
                var("NEWS_TIMEOUT_SECS", "30")
                    .parse()
                    .context("NEWS_TIMEOUT_SECS must be a number")?,
            ),
            export_dir: PathBuf::from(var("EXPORT_DIR", ".")),
            log_dir: PathBuf::from(var("LOG_DIR", "logs")),
        })
    }
}
