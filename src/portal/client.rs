use crate::configuration::{Locale, PortalSettings};
use crate::error::ScrapeError;
use crate::portal::{
    extract_balance, parse_balance_selector, LoginForm, LoginPayload, PortalCredentials,
    PortalSession, ScrapeOutcome,
};
use crate::telemetry;
use chrono::Utc;

/// Logs into the portal and reads the remaining data balance.
///
/// Holds nothing but configuration: every call opens its own session,
/// so two scrapes never share cookies.
#[derive(Clone)]
pub struct PortalClient {
    settings: PortalSettings,
    locale: Locale,
}

impl PortalClient {
    pub fn new(settings: PortalSettings, locale: Locale) -> Self {
        Self { settings, locale }
    }

    /// Run one scrape and package the result. Never fails: every error ends
    /// up as `ScrapeOutcome::Error`.
    #[tracing::instrument(
        name = "Check data balance",
        skip(self),
        fields(error_kind = tracing::field::Empty)
    )]
    pub async fn check_balance(&self) -> ScrapeOutcome {
        match self.fetch_balance().await {
            Ok(balance) => {
                tracing::info!("Data balance read successfully");
                ScrapeOutcome::observed(balance, Utc::now(), self.settings.utc_offset())
            }
            Err(error) => {
                telemetry::record_field("error_kind", &error.kind());
                tracing::warn!("Failed to read the data balance: {:?}", error);
                ScrapeOutcome::from_error(&error, self.locale)
            }
        }
    }

    /// The scrape itself. Stops at the first failing step, without retrying.
    pub async fn fetch_balance(&self) -> Result<String, ScrapeError> {
        // Both checks run before anything touches the network
        let credentials = PortalCredentials::from_settings(&self.settings)?;
        parse_balance_selector(&self.settings.balance_selector)?;

        // Dropped on every return below, which closes its connections
        let session = PortalSession::open(self.settings.timeout())?;

        let login_url = self.settings.login_url();
        let login_page = session.get(&login_url).await?;

        let origin = self.settings.base_url.clone();
        let form = telemetry::spawn_blocking_with_tracing(move || {
            LoginForm::parse(&login_page.body, &origin, &login_url)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Login form parsing task failed: {}", e))??;
        tracing::debug!(action = %form.action, fields = form.fields.len(), "Login form found");

        let payload = LoginPayload::build(&form, &credentials);
        tracing::debug!("Submitting login form: {:?}", payload);
        // The portal answers with a redirect and a cookie, there is nothing to check here.
        // A rejected login only shows up as a missing balance element below.
        session.post_form(&form.action, payload.pairs()).await?;

        let status_page = session.get_success(&self.settings.data_url()).await?;

        let selector = self.settings.balance_selector.clone();
        telemetry::spawn_blocking_with_tracing(move || {
            extract_balance(&status_page.body, &selector)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Balance extraction task failed: {}", e))?
    }
}
