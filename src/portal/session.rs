use crate::error::ScrapeError;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// Cookie-keeping HTTP session for a single scrape.
///
/// Every session owns a private cookie jar and connection pool. Both are
/// dropped together with the session, whichever way the scrape ends.
#[derive(Debug)]
pub struct PortalSession {
    http_client: Client,
}

/// Status and body of one portal response.
#[derive(Debug)]
pub struct PortalPage {
    pub status: StatusCode,
    pub body: String,
}

impl PortalSession {
    pub fn open(timeout: Duration) -> Result<Self, ScrapeError> {
        let http_client = Client::builder()
            .cookie_store(true)
            // timeout is a MUST option for client
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build the portal http client: {:?}", e);
                ScrapeError::NetworkError(e)
            })?;
        Ok(Self { http_client })
    }

    /// GET `url`, whatever status comes back.
    #[tracing::instrument(name = "Portal GET", skip(self))]
    pub async fn get(&self, url: &str) -> Result<PortalPage, ScrapeError> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to GET {}: {:?}", url, e);
            ScrapeError::NetworkError(e)
        })?;
        read_page(response).await
    }

    /// GET `url`, treating any non-2xx status as a `NetworkError`.
    #[tracing::instrument(name = "Portal GET (success required)", skip(self))]
    pub async fn get_success(&self, url: &str) -> Result<PortalPage, ScrapeError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| {
                tracing::error!("Failed to GET {}: {:?}", url, e);
                ScrapeError::NetworkError(e)
            })?;
        read_page(response).await
    }

    /// POST `payload` as `application/x-www-form-urlencoded`.
    #[tracing::instrument(name = "Portal POST", skip(self, payload))]
    pub async fn post_form<T>(&self, url: &str, payload: &T) -> Result<PortalPage, ScrapeError>
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .http_client
            .post(url)
            .form(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to POST {}: {:?}", url, e);
                ScrapeError::NetworkError(e)
            })?;
        read_page(response).await
    }
}

async fn read_page(response: Response) -> Result<PortalPage, ScrapeError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        tracing::error!("Failed to read the portal response body: {:?}", e);
        ScrapeError::NetworkError(e)
    })?;
    tracing::debug!(status = status.as_u16(), bytes = body.len(), "Portal responded");
    Ok(PortalPage { status, body })
}
