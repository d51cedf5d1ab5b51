use crate::auth::{self, ApiPassword};
use crate::configuration::{Locale, PortalSettings, Settings};
use crate::error::BizErrorEnum;
use crate::routes;
use actix_web::dev::Server;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, App, HttpServer};
use secrecy::Secret;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

// A new type to hold the newly built server and its port
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(config: Settings) -> Result<Self, BizErrorEnum> {
        // Port 0 lets the OS pick one, which the tests rely on
        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(address).map_err(|e| {
            tracing::error!("Failed to bind to TcpListener");
            BizErrorEnum::BindTcpListenerError(e)
        })?;
        let port = listener
            .local_addr()
            .map_err(BizErrorEnum::BindTcpListenerError)?
            .port();

        let server = run(
            listener,
            config.portal,
            config.application.locale,
            config.application.api_password,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // A more expressive name that makes it clear that
    // this function only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), BizErrorEnum> {
        self.server.await.map_err(|e| {
            tracing::error!("Failed to run server.");
            BizErrorEnum::RunServerError(e)
        })
    }
}

pub fn run(
    listener: TcpListener,
    portal: PortalSettings,
    locale: Locale,
    api_password: Option<Secret<String>>,
) -> Result<Server, BizErrorEnum> {
    if api_password.is_none() {
        tracing::warn!("No API password configured, the balance endpoint is public");
    }
    let portal = web::Data::new(portal);
    let locale = web::Data::new(locale);
    let api_password = web::Data::new(ApiPassword(api_password));

    let server = HttpServer::new(move || {
        App::new()
            // The widget runs in a webview and needs CORS on every answer
            .wrap(cors_headers())
            .wrap(TracingLogger::default())
            .app_data(portal.clone())
            .app_data(locale.clone())
            .app_data(api_password.clone())
            .service(
                web::resource("/")
                    .wrap(actix_web_lab::middleware::from_fn(
                        auth::reject_invalid_api_password,
                    ))
                    .route(web::get().to(routes::balance)),
            )
            .route("/health_check", web::get().to(routes::health_check))
    })
    .listen(listener)
    .map_err(|e| {
        tracing::error!("Failed to listen to TcpListener");
        BizErrorEnum::ListenTcpListenerError(e)
    })?
    .run();

    // No .await here!
    Ok(server)
}

fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET"))
        .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
}
