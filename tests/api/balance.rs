use crate::helpers::{self, TestApp, LOGIN_PAGE, NO_FORM_PAGE};
use data_balance::configuration::Locale;
use wiremock::matchers::{any, body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn the_balance_is_returned_with_a_timestamp() {
    // Arrange
    let app = TestApp::spawn_app().await;
    helpers::mount_portal(
        &app.portal_server,
        LOGIN_PAGE,
        &helpers::status_page("<span>512MB</span>"),
    )
    .await;

    // Act
    let response = app.get_balance().await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["balance"], "512MB");
    helpers::assert_is_observed_at(&body["observedAt"]);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn the_login_form_is_submitted_with_hidden_fields_and_credentials() {
    let app = TestApp::spawn_app().await;
    let mut login = Mock::given(method("POST"))
        .and(path(data_balance::constant::LOGIN_PATH))
        .and(body_string_contains("token=abc123"))
        .and(body_string_contains("josso_cmd=login"));
    for pair in helpers::credential_pairs() {
        login = login.and(body_string_contains(pair));
    }
    login
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.portal_server)
        .await;
    helpers::mount_login_page(&app.portal_server, LOGIN_PAGE).await;
    helpers::mount_status_page(&app.portal_server, &helpers::status_page("<span>512MB</span>"))
        .await;

    let response = app.get_balance().await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn a_changed_status_page_is_reported_as_a_json_error() {
    let app = TestApp::spawn_app_with(|config| config.application.locale = Locale::Ja).await;
    helpers::mount_portal(
        &app.portal_server,
        LOGIN_PAGE,
        "<html><body><p>ご契約状況</p></body></html>",
    )
    .await;

    let response = app.get_balance().await;

    // Scrape errors are not HTTP errors
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("balance").is_none());
    assert_eq!(
        body["error"],
        "データ要素が見つかりませんでした。サイトの構造が変わった可能性があります。"
    );
}

#[tokio::test]
async fn a_missing_login_form_is_reported_without_logging_in() {
    let app = TestApp::spawn_app_with(|config| config.application.locale = Locale::En).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.portal_server)
        .await;
    helpers::mount_login_page(&app.portal_server, NO_FORM_PAGE).await;

    let response = app.get_balance().await;

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "The login form could not be found.");
}

#[tokio::test]
async fn missing_credentials_are_reported_before_contacting_the_portal() {
    let app = TestApp::spawn_app_with(|config| config.portal.password = None).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.portal_server)
        .await;

    let response = app.get_balance().await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn cors_headers_are_set() {
    let app = TestApp::spawn_app().await;
    helpers::mount_portal(
        &app.portal_server,
        LOGIN_PAGE,
        &helpers::status_page("<span>512MB</span>"),
    )
    .await;

    let response = app.get_balance().await;

    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET");
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
}
