//! Scraping the remaining data balance out of the carrier portal.
//!
//! One call to [`PortalClient::check_balance`] walks the whole pipeline:
//! fetch the login page, read its form, post the credentials, fetch the
//! status page and pull the balance out of it.

mod balance;
mod client;
mod credentials;
mod login_form;
mod outcome;
mod payload;
mod session;

pub use balance::*;
pub use client::PortalClient;
pub use credentials::PortalCredentials;
pub use login_form::*;
pub use outcome::*;
pub use payload::LoginPayload;
pub use session::{PortalPage, PortalSession};
