/// environment variable
pub const LOCAL_ENVIRONMENT: &str = "local";
pub const PRODUCTION_ENVIRONMENT: &str = "production";

/// reserved input names of the portal's login form
pub const USERNAME_FIELD: &str = "josso_username";
pub const PASSWORD_FIELD: &str = "josso_password";

/// input type copied through to the login payload
pub const HIDDEN_INPUT_TYPE: &str = "hidden";

/// portal
pub const PORTAL_ORIGIN: &str = "https://his.mvno.ne.jp";
pub const LOGIN_PATH: &str = "/hisso/signon/login.do";
pub const DATA_PATH: &str = "/checkout/status";
pub const BALANCE_SELECTOR: &str = "body > span > div:nth-child(1) > div > div.article.col.span_7 > dl:nth-child(4) > dd > span:nth-child(1) > span";

/// the portal reports in Japan Standard Time
pub const PORTAL_UTC_OFFSET_HOURS: i32 = 9;
pub const OBSERVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// api password can also arrive as `Authorization: Bearer <secret>`
pub const BEARER_PREFIX: &str = "Bearer ";
