use crate::error::ScrapeError;
use scraper::{Html, Selector};

/// Parse the configured balance selector.
///
/// A selector that does not parse is a configuration mistake, so it is
/// reported as a `ConfigError`.
pub fn parse_balance_selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| {
        tracing::error!("Invalid balance selector {}: {:?}", css, e);
        ScrapeError::ConfigError(format!("portal.balance_selector is invalid: {:?}", e))
    })
}

/// Text of the first element of `html` matched by `selector`.
///
/// Each text node is trimmed and the pieces are joined, so markup such as
/// `<span> 512 <b>MB</b> </span>` reads `512MB`.
pub fn extract_balance(html: &str, selector: &str) -> Result<String, ScrapeError> {
    let selector = parse_balance_selector(selector)?;
    let document = Html::parse_document(html);
    let element = document.select(&selector).next().ok_or_else(|| {
        tracing::warn!("The balance selector matched nothing on the status page");
        ScrapeError::ElementNotFoundError
    })?;

    Ok(element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect())
}
