use crate::constant::{
    BALANCE_SELECTOR, DATA_PATH, LOCAL_ENVIRONMENT, LOGIN_PATH, PORTAL_ORIGIN,
    PORTAL_UTC_OFFSET_HOURS, PRODUCTION_ENVIRONMENT,
};
use crate::error::BizErrorEnum;
use chrono::{FixedOffset, Offset, Utc};
use config::{Config, File};
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub portal: PortalSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    #[serde(default)]
    pub locale: Locale,
    /// Leave unset to serve the balance without a password.
    pub api_password: Option<Secret<String>>,
}

#[derive(Deserialize, Clone)]
pub struct PortalSettings {
    pub base_url: String,
    pub login_path: String,
    pub data_path: String,
    // Optional so a missing credential becomes a scrape error instead of a boot failure.
    pub username: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    pub balance_selector: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub utc_offset_hours: i32,
}

impl PortalSettings {
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    pub fn data_url(&self) -> String {
        format!("{}{}", self.base_url, self.data_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    /// The portal's local timezone. Out-of-range offsets fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "utc_offset_hours={} is out of range, using UTC",
                    self.utc_offset_hours
                );
                Utc.fix()
            })
    }
}

/// Language of the messages put into `{"error": ...}` bodies.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

pub fn get_configuration() -> Result<Settings, BizErrorEnum> {
    let base_path = std::env::current_dir().map_err(|e| {
        tracing::error!("Failed to get current dir.");
        BizErrorEnum::GetCurrentDirError(e)
    })?;
    let config_dir = base_path.join("configuration");
    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| LOCAL_ENVIRONMENT.into())
        .try_into()
        .map_err(|e| {
            tracing::error!("Failed to parse APP_ENVIRONMENT: {:?}", e);
            BizErrorEnum::ParseEnvironmentVariableError(e)
        })?;
    let environment_filename = format!("{}.yaml", environment.as_str());
    // Credentials only ever come from the environment,
    // e.g. `APP_PORTAL__USERNAME=...` sets `Settings.portal.username`
    let settings = Config::builder()
        // The portal is fixed, files only need to override it for tests or a layout change
        .set_default("portal.base_url", PORTAL_ORIGIN)
        .and_then(|builder| builder.set_default("portal.login_path", LOGIN_PATH))
        .and_then(|builder| builder.set_default("portal.data_path", DATA_PATH))
        .and_then(|builder| builder.set_default("portal.balance_selector", BALANCE_SELECTOR))
        .and_then(|builder| {
            builder.set_default("portal.utc_offset_hours", i64::from(PORTAL_UTC_OFFSET_HOURS))
        })
        .map_err(|e| {
            tracing::error!("Failed to set config defaults.");
            BizErrorEnum::BuildConfigSourcesError(e)
        })?
        .add_source(File::from(config_dir.join("base.yaml")))
        .add_source(File::from(config_dir.join(environment_filename)))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .map_err(|e| {
            tracing::error!("Failed to build config sources.");
            BizErrorEnum::BuildConfigSourcesError(e)
        })?;
    // Try to convert the configuration values it read into our Settings type
    settings.try_deserialize().map_err(|e| {
        tracing::error!("Failed to deserialize config file.");
        BizErrorEnum::DeserializeConfigurationFileError(e)
    })
}

/// The possible runtime environment for our application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => LOCAL_ENVIRONMENT,
            Environment::Production => PRODUCTION_ENVIRONMENT,
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            LOCAL_ENVIRONMENT => Ok(Self::Local),
            PRODUCTION_ENVIRONMENT => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either 'local' or 'production'.",
                other
            )),
        }
    }
}
