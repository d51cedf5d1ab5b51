use crate::constant::BEARER_PREFIX;
use crate::error::BizErrorEnum;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, HttpRequest};
use actix_web_lab::middleware::Next;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use subtle::ConstantTimeEq;

/// Password the widget must present. `None` leaves the endpoint open.
#[derive(Clone)]
pub struct ApiPassword(pub Option<Secret<String>>);

#[derive(Deserialize)]
struct ApiPasswordQuery {
    password: Option<String>,
}

/// Rejects requests that do not carry the configured API password,
/// either as `?password=<secret>` or as `Authorization: Bearer <secret>`.
///
/// Wrapped with `actix_web_lab::middleware::from_fn`. Rejections are
/// turned into a response right here so the CORS headers still get added
/// on the way out.
pub async fn reject_invalid_api_password(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let expected = req
        .app_data::<web::Data<ApiPassword>>()
        .and_then(|api_password| api_password.0.clone());

    if let Some(expected) = expected {
        if let Err(error) = verify_api_password(req.request(), &expected) {
            tracing::warn!("Rejected a request: {}", error);
            return Ok(req.error_response(error).map_into_right_body());
        }
    }

    next.call(req)
        .await
        .map(ServiceResponse::map_into_left_body)
}

fn verify_api_password(
    request: &HttpRequest,
    expected: &Secret<String>,
) -> Result<(), BizErrorEnum> {
    let provided = api_password_from_request(request)?;
    let matches = provided
        .expose_secret()
        .as_bytes()
        .ct_eq(expected.expose_secret().as_bytes());
    if !bool::from(matches) {
        return Err(BizErrorEnum::InvalidApiPassword);
    }
    Ok(())
}

/// The query parameter wins when both are present.
fn api_password_from_request(request: &HttpRequest) -> Result<Secret<String>, BizErrorEnum> {
    let from_query = web::Query::<ApiPasswordQuery>::from_query(request.query_string())
        .ok()
        .and_then(|query| query.into_inner().password);
    if let Some(password) = from_query {
        return Ok(Secret::new(password));
    }

    let header_value = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(BizErrorEnum::ApiPasswordIsMissing)?
        .to_str()
        .map_err(BizErrorEnum::AuthorizationHeaderIsInvalidUtf8String)?;
    let token = header_value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BizErrorEnum::AuthorizationSchemeNotBearer)?;

    Ok(Secret::new(token.trim().to_string()))
}
