use crate::configuration::Locale;
use crate::constant::OBSERVED_AT_FORMAT;
use crate::error::ScrapeError;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// What the balance endpoint answers, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScrapeOutcome {
    #[serde(rename_all = "camelCase")]
    Balance { balance: String, observed_at: String },
    Error { error: String },
}

impl ScrapeOutcome {
    pub fn observed(balance: String, now: DateTime<Utc>, offset: FixedOffset) -> Self {
        ScrapeOutcome::Balance {
            balance,
            observed_at: format_observed_at(now, offset),
        }
    }

    pub fn from_error(error: &ScrapeError, locale: Locale) -> Self {
        ScrapeOutcome::Error {
            error: error.user_message(locale),
        }
    }
}

#[cfg(test)]
impl ScrapeOutcome {
    pub fn is_balance(&self) -> bool {
        matches!(self, ScrapeOutcome::Balance { .. })
    }
}

/// `YYYY-MM-DD HH:MM` in the portal's timezone, whatever the server's is.
pub fn format_observed_at(now: DateTime<Utc>, offset: FixedOffset) -> String {
    now.with_timezone(&offset)
        .format(OBSERVED_AT_FORMAT)
        .to_string()
}
