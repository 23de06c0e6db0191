use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment};
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::deploy::{DeploySettings, PollSettings};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_platform_url")]
    pub platform_url: String,
    // Missing token is reported per request rather than at startup
    #[serde(default)]
    pub platform_token: Option<SecretString>,
    #[serde(default)]
    pub platform_team_id: Option<String>,
    // Readiness polling
    #[serde(default = "default_wait_for_ready")]
    pub wait_for_ready: bool,
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_platform_url() -> String {
    "https://api.vercel.com".to_string()
}

fn default_wait_for_ready() -> bool {
    true
}

fn default_poll_max_attempts() -> u32 {
    30
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn load() -> Result<Self> {
        #[cfg(debug_assertions)]
        if let Err(e) = dotenvy::from_filename(".env.local") {
            tracing::debug!(error = %e, "no .env.local loaded");
        }

        Self::from_env(Environment::default().separator("__"))
    }

    fn from_env(env: Environment) -> Result<Self> {
        let config: Self = ConfigBuilder::builder()
            .add_source(env)
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Url::parse(&config.platform_url)
            .with_context(|| format!("PLATFORM_URL {:?} is not a valid URL", config.platform_url))?;

        Ok(config)
    }

    pub fn deploy_settings(&self) -> DeploySettings {
        DeploySettings {
            wait_for_ready: self.wait_for_ready,
            poll: PollSettings {
                max_attempts: self.poll_max_attempts,
                interval: Duration::from_secs(self.poll_interval_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use config::Map;
    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_env(Environment::default().separator("__").source(Some(vars)))
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.platform_url, "https://api.vercel.com");
        assert!(config.platform_token.is_none());
        assert!(config.platform_team_id.is_none());
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.deploy_settings(), DeploySettings::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = load(&[
            ("PLATFORM_URL", "http://127.0.0.1:9000"),
            ("PLATFORM_TOKEN", "secret-token"),
            ("PLATFORM_TEAM_ID", "team_123"),
            ("WAIT_FOR_READY", "false"),
            ("POLL_MAX_ATTEMPTS", "5"),
            ("POLL_INTERVAL_SECS", "1"),
        ])
        .unwrap();

        assert_eq!(config.platform_url, "http://127.0.0.1:9000");
        assert_eq!(
            config.platform_token.as_ref().map(|t| t.expose_secret()),
            Some("secret-token")
        );
        assert_eq!(config.platform_team_id.as_deref(), Some("team_123"));

        let settings = config.deploy_settings();
        assert!(!settings.wait_for_ready);
        assert_eq!(settings.poll.max_attempts, 5);
        assert_eq!(settings.poll.interval, Duration::from_secs(1));
    }

    #[test]
    fn test_token_is_not_printed() {
        let config = load(&[("PLATFORM_TOKEN", "secret-token")]).unwrap();
        assert!(!format!("{config:?}").contains("secret-token"));
    }

    #[test]
    fn test_invalid_platform_url_rejected() {
        assert!(load(&[("PLATFORM_URL", "not a url")]).is_err());
    }
}
