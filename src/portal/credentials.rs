use crate::configuration::PortalSettings;
use crate::error::ScrapeError;
use secrecy::{ExposeSecret, Secret};

/// Portal login, read from configuration once per scrape.
#[derive(Debug)]
pub struct PortalCredentials {
    pub username: Secret<String>,
    pub password: Secret<String>,
}

impl PortalCredentials {
    pub fn from_settings(settings: &PortalSettings) -> Result<Self, ScrapeError> {
        let username = required(&settings.username, "portal.username")?;
        let password = required(&settings.password, "portal.password")?;
        Ok(Self { username, password })
    }
}

/// Blank values count as missing.
fn required(
    value: &Option<Secret<String>>,
    setting: &'static str,
) -> Result<Secret<String>, ScrapeError> {
    match value {
        Some(secret) if !secret.expose_secret().trim().is_empty() => Ok(secret.clone()),
        _ => {
            tracing::error!("{} is not configured", setting);
            Err(ScrapeError::ConfigError(format!("{} is missing", setting)))
        }
    }
}
