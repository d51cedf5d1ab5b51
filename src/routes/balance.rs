use crate::configuration::{Locale, PortalSettings};
use crate::portal::PortalClient;
use actix_web::{web, HttpResponse};

/// Scrape errors are still a 200: the widget reads `error` from the body.
#[tracing::instrument(name = "/: Data balance", skip(portal, locale))]
pub async fn balance(portal: web::Data<PortalSettings>, locale: web::Data<Locale>) -> HttpResponse {
    let client = PortalClient::new(portal.get_ref().clone(), **locale);
    let outcome = client.check_balance().await;
    HttpResponse::Ok().json(outcome)
}
