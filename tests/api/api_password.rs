use crate::helpers::{self, TestApp, LOGIN_PAGE, TEST_API_PASSWORD};
use secrecy::Secret;
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

async fn spawn_guarded_app() -> TestApp {
    let app = TestApp::spawn_app_with(|config| {
        config.application.api_password = Some(Secret::new(TEST_API_PASSWORD.to_string()))
    })
    .await;
    helpers::mount_portal(
        &app.portal_server,
        LOGIN_PAGE,
        &helpers::status_page("<span>512MB</span>"),
    )
    .await;
    app
}

#[tokio::test]
async fn requests_without_the_api_password_are_rejected() {
    // Arrange
    let app = TestApp::spawn_app_with(|config| {
        config.application.api_password = Some(Secret::new(TEST_API_PASSWORD.to_string()))
    })
    .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.portal_server)
        .await;

    // Act
    let response = app.get_balance().await;

    // Assert
    assert_eq!(401, response.status().as_u16());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn a_wrong_api_password_is_rejected() {
    let app = spawn_guarded_app().await;

    let query = app.get_balance_with_query_password("guess").await;
    let bearer = app.get_balance_with_bearer("guess").await;

    assert_eq!(401, query.status().as_u16());
    assert_eq!(401, bearer.status().as_u16());
}

#[tokio::test]
async fn the_api_password_is_accepted_as_a_query_parameter() {
    let app = spawn_guarded_app().await;

    let response = app.get_balance_with_query_password(TEST_API_PASSWORD).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["balance"], "512MB");
}

#[tokio::test]
async fn the_api_password_is_accepted_as_a_bearer_token() {
    let app = spawn_guarded_app().await;

    let response = app.get_balance_with_bearer(TEST_API_PASSWORD).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn the_health_check_is_not_guarded() {
    let app = spawn_guarded_app().await;

    let response = app.get_health_check().await;

    assert!(response.status().is_success());
}
