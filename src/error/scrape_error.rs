use crate::configuration::Locale;
use reqwest::StatusCode;
use std::fmt::{Debug, Formatter};

/// Everything that can stop a balance scrape.
///
/// None of these escape the portal client: `ScrapeOutcome::from_error`
/// turns each of them into an `{"error": ...}` body.
#[derive(thiserror::Error)]
pub enum ScrapeError {
    #[error("Portal configuration is incomplete: {0}.")]
    ConfigError(String),

    #[error("No login form was found on the login page.")]
    FormNotFoundError,

    #[error("Failed to talk to the portal: {0}")]
    NetworkError(#[source] reqwest::Error),

    // Either the layout changed or the login silently failed.
    // The portal gives us no way to tell which.
    #[error("The balance element was not found on the status page.")]
    ElementNotFoundError,

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl ScrapeError {
    /// Short machine-friendly name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::ConfigError(_) => "config",
            ScrapeError::FormNotFoundError => "form_not_found",
            ScrapeError::NetworkError(_) => "network",
            ScrapeError::ElementNotFoundError => "element_not_found",
            ScrapeError::UnexpectedError(_) => "unexpected",
        }
    }

    /// HTTP status the portal answered with, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ScrapeError::NetworkError(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ScrapeError::NetworkError(e) if e.is_timeout())
    }

    /// Message shown to the widget user.
    pub fn user_message(&self, locale: Locale) -> String {
        match locale {
            Locale::Ja => match self {
                ScrapeError::ConfigError(_) => "環境変数が設定されていません。".into(),
                ScrapeError::FormNotFoundError => "ログインフォームが見つかりませんでした。".into(),
                ScrapeError::ElementNotFoundError => {
                    "データ要素が見つかりませんでした。サイトの構造が変わった可能性があります。"
                        .into()
                }
                ScrapeError::NetworkError(_) | ScrapeError::UnexpectedError(_) => {
                    format!("スクレイピング中にエラーが発生しました: {}", self)
                }
            },
            Locale::En => match self {
                ScrapeError::ConfigError(_) => "The portal settings are missing or invalid.".into(),
                ScrapeError::FormNotFoundError => "The login form could not be found.".into(),
                ScrapeError::ElementNotFoundError => {
                    "The balance element could not be found. The site layout may have changed."
                        .into()
                }
                ScrapeError::NetworkError(_) | ScrapeError::UnexpectedError(_) => {
                    format!("An error occurred while scraping: {}", self)
                }
            },
        }
    }
}

// We are still using a bespoke implementation of `Debug`
// to get a nice report using the error source chain
impl Debug for ScrapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        crate::error::error_chain_fmt(self, f)
    }
}
