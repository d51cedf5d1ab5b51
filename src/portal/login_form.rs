use crate::constant::{HIDDEN_INPUT_TYPE, PASSWORD_FIELD, USERNAME_FIELD};
use crate::error::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// How an input of the login form is treated when building the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `type="hidden"`: anti-forgery tokens, session markers. Copied verbatim.
    Hidden,
    Username,
    Password,
    /// Anything else. Never submitted.
    Other,
}

impl FieldKind {
    /// Reserved names win over the `type` attribute, so a credential input is
    /// always filled from configuration, even if the portal marks it hidden.
    pub fn classify(name: &str, input_type: &str) -> Self {
        match name {
            USERNAME_FIELD => FieldKind::Username,
            PASSWORD_FIELD => FieldKind::Password,
            _ if input_type.eq_ignore_ascii_case(HIDDEN_INPUT_TYPE) => FieldKind::Hidden,
            _ => FieldKind::Other,
        }
    }
}

/// A named `<input>` of the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
}

/// The first form of the login page, as the portal served it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// Absolute URL the credentials are posted to.
    pub action: String,
    /// Named inputs, in document order.
    pub fields: Vec<FormField>,
}

impl LoginForm {
    /// Read the first `<form>` of `html`.
    ///
    /// `origin` resolves a site-relative action (`/path`); `page_url` is
    /// where a form without an action posts to.
    pub fn parse(html: &str, origin: &str, page_url: &str) -> Result<Self, ScrapeError> {
        let document = Html::parse_document(html);
        let form_selector = static_selector("form")?;
        let input_selector = static_selector("input")?;

        let form = document
            .select(&form_selector)
            .next()
            .ok_or(ScrapeError::FormNotFoundError)?;

        let action = resolve_action(form.value().attr("action"), origin, page_url);
        let mut inputs: Vec<ElementRef<'_>> = form.select(&input_selector).collect();
        if inputs.is_empty() {
            inputs = detached_inputs(&document, form)?;
        }
        let fields = inputs.iter().filter_map(read_field).collect();

        Ok(Self { action, fields })
    }
}

#[cfg(test)]
impl LoginForm {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Inputs owned by `form` that the parser did not nest inside it.
///
/// A form opened between `<table>` and `<tr>` is closed on the spot and its
/// inputs land in the table cells after it. Those count up to the next
/// `<form>`. An input with a `form` attribute belongs to the form whose `id`
/// it names, wherever it sits.
fn detached_inputs<'a>(
    document: &'a Html,
    form: ElementRef<'a>,
) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    let selector = static_selector("form, input")?;
    let form_id = form.value().id();
    let mut following = false;
    let mut inputs = Vec::new();

    for element in document.select(&selector) {
        if element.id() == form.id() {
            following = true;
            continue;
        }
        if element.value().name() == "form" {
            following = false;
            continue;
        }
        let owned = match element.value().attr("form") {
            Some(owner) => Some(owner) == form_id,
            None => following,
        };
        if owned {
            inputs.push(element);
        }
    }
    Ok(inputs)
}

fn read_field(input: &ElementRef<'_>) -> Option<FormField> {
    let element = input.value();
    let name = element.attr("name").filter(|name| !name.is_empty())?;
    let input_type = element.attr("type").unwrap_or("");
    let value = element.attr("value").unwrap_or("");

    Some(FormField {
        name: name.to_string(),
        kind: FieldKind::classify(name, input_type),
        value: value.to_string(),
    })
}

fn resolve_action(action: Option<&str>, origin: &str, page_url: &str) -> String {
    match action.map(str::trim) {
        None | Some("") => page_url.to_string(),
        Some(path) if path.starts_with('/') => {
            format!("{}{}", origin.trim_end_matches('/'), path)
        }
        Some(absolute) => absolute.to_string(),
    }
}

fn static_selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Invalid selector {}: {:?}", css, e).into())
}
