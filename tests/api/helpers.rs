use data_balance::configuration::{self, Locale, PortalSettings, Settings};
use data_balance::constant::{DATA_PATH, LOGIN_PATH, PASSWORD_FIELD, USERNAME_FIELD};
use data_balance::portal::PortalClient;
use data_balance::startup::Application;
use data_balance::telemetry;
use once_cell::sync::Lazy;
use secrecy::Secret;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // `sink` and `stdout` are different types, hence the two branches
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        telemetry::init_subscriber(subscriber).expect("Failed to init subscriber");
    } else {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        telemetry::init_subscriber(subscriber).expect("Failed to init subscriber");
    };
});

pub const TEST_USERNAME: &str = "08012345678";
pub const TEST_PASSWORD: &str = "correct horse battery staple";
pub const TEST_API_PASSWORD: &str = "secure_api_key_2025";

/// Login page with a hidden anti-forgery token and a site-relative action.
pub const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <form method="post" action="/hisso/signon/login.do">
    <input type="hidden" name="josso_cmd" value="login">
    <input type="hidden" name="token" value="abc123">
    <input type="text" name="josso_username" value="">
    <input type="password" name="josso_password">
    <input type="checkbox" name="remember" value="on">
    <input type="submit" value="ログイン">
  </form>
</body></html>"#;

pub const NO_FORM_PAGE: &str = "<html><body><h1>メンテナンス中</h1></body></html>";

/// Status page with `balance_markup` at the place the balance selector points to.
pub fn status_page(balance_markup: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><body>
<span>
  <div>
    <div>
      <div class="article col span_7">
        <dl><dt>ご契約プラン</dt><dd>7GB</dd></dl>
        <dl><dt>電話番号</dt><dd>080-xxxx-xxxx</dd></dl>
        <dl><dt>更新日</dt><dd>毎月1日</dd></dl>
        <dl><dt>データ残量</dt><dd><span>{balance_markup}</span></dd></dl>
      </div>
    </div>
  </div>
</span>
</body></html>"#
    )
}

/// Portal settings pointing at `portal_server`, with test credentials.
pub fn portal_settings(portal_server: &MockServer) -> PortalSettings {
    let mut config = configuration::get_configuration().expect("Failed to read configuration");
    config.portal.base_url = portal_server.uri();
    config.portal.username = Some(Secret::new(TEST_USERNAME.to_string()));
    config.portal.password = Some(Secret::new(TEST_PASSWORD.to_string()));
    config.portal.timeout_milliseconds = 2_000;
    config.portal
}

pub fn portal_client(settings: PortalSettings) -> PortalClient {
    PortalClient::new(settings, Locale::En)
}

/// Serve the login page, accept any login POST and serve `status_html`.
pub async fn mount_portal(portal_server: &MockServer, login_html: &str, status_html: &str) {
    mount_login_page(portal_server, login_html).await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(portal_server)
        .await;
    mount_status_page(portal_server, status_html).await;
}

pub async fn mount_login_page(portal_server: &MockServer, login_html: &str) {
    Mock::given(method("GET"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_html))
        .mount(portal_server)
        .await;
}

pub async fn mount_status_page(portal_server: &MockServer, status_html: &str) {
    Mock::given(method("GET"))
        .and(path(DATA_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(status_html))
        .mount(portal_server)
        .await;
}

/// `name=value` the way `reqwest` form-encodes it (spaces become `+`).
pub fn form_pair(name: &str, value: &str) -> String {
    format!("{}={}", name, value.replace(' ', "+"))
}

pub fn credential_pairs() -> [String; 2] {
    [
        form_pair(USERNAME_FIELD, TEST_USERNAME),
        form_pair(PASSWORD_FIELD, TEST_PASSWORD),
    ]
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub portal_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spin up an instance of our application in the background,
    /// talking to a mock portal.
    pub async fn spawn_app() -> TestApp {
        Self::spawn_app_with(|_| {}).await
    }

    pub async fn spawn_app_with(customise: impl FnOnce(&mut Settings)) -> TestApp {
        Lazy::force(&TRACING);

        let portal_server = MockServer::start().await;
        let mut config = configuration::get_configuration().expect("Failed to read configuration");
        config.application.port = 0;
        config.application.api_password = None;
        config.portal = portal_settings(&portal_server);
        customise(&mut config);

        let application = Application::build(config).expect("Failed to build application");
        let port = application.port();
        // Launch the server as a background task
        let _ = tokio::spawn(application.run_until_stopped());

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            portal_server,
            api_client: reqwest::Client::new(),
        }
    }

    pub async fn get_balance(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_balance_with_query_password(&self, password: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/", &self.address))
            .query(&[("password", password)])
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_balance_with_bearer(&self, token: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/", &self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_health_check(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/health_check", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn assert_is_observed_at(value: &serde_json::Value) {
    let observed_at = value.as_str().expect("observedAt is not a string");
    assert!(
        chrono::NaiveDateTime::parse_from_str(observed_at, "%Y-%m-%d %H:%M").is_ok(),
        "observedAt has an unexpected format: {}",
        observed_at
    );
}
