use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt::{Debug, Formatter};

#[derive(thiserror::Error)]
pub enum BizErrorEnum {
    // VALIDATE API PASSWORD
    #[error("The API password was missing.")]
    ApiPasswordIsMissing,

    #[error("The 'Authorization' header was not a valid UTF8 string.")]
    AuthorizationHeaderIsInvalidUtf8String(#[source] actix_web::http::header::ToStrError),

    #[error("The authorization scheme was not 'Bearer'.")]
    AuthorizationSchemeNotBearer,

    #[error("Invalid API password.")]
    InvalidApiPassword,

    // OTHER
    #[error("Failed to bind TcpListener.")]
    BindTcpListenerError(#[source] std::io::Error),

    #[error("Failed to listen TcpListener.")]
    ListenTcpListenerError(#[source] std::io::Error),

    #[error("Failed to run server.")]
    RunServerError(#[source] std::io::Error),

    #[error("Failed to determine the current directory.")]
    GetCurrentDirError(#[source] std::io::Error),

    #[error("Failed to parse environment variable.")]
    ParseEnvironmentVariableError(String),

    #[error("Failed to build config sources.")]
    BuildConfigSourcesError(#[source] config::ConfigError),

    #[error("Failed to deserialize config file.")]
    DeserializeConfigurationFileError(#[source] config::ConfigError),

    #[error("Failed to set logger.")]
    SetLoggerError(#[source] tracing_log::log::SetLoggerError),

    #[error("Failed to set subscriber.")]
    SetSubscriberError(#[source] tracing::dispatcher::SetGlobalDefaultError),
}

impl Debug for BizErrorEnum {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        crate::error::error_chain_fmt(self, f)
    }
}

impl ResponseError for BizErrorEnum {
    fn status_code(&self) -> StatusCode {
        match self {
            BizErrorEnum::ApiPasswordIsMissing
            | BizErrorEnum::AuthorizationHeaderIsInvalidUtf8String(_)
            | BizErrorEnum::AuthorizationSchemeNotBearer
            | BizErrorEnum::InvalidApiPassword => StatusCode::UNAUTHORIZED,

            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The widget only understands JSON, so even rejections carry an `error` field.
    fn error_response(&self) -> HttpResponse<BoxBody> {
        let message = match self.status_code() {
            StatusCode::UNAUTHORIZED => self.to_string(),
            _ => "Internal server error.".to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}
