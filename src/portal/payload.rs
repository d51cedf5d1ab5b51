use crate::portal::{FieldKind, LoginForm, PortalCredentials};
use secrecy::ExposeSecret;
use std::fmt::{Debug, Formatter};

/// Form-encoded body of the login POST.
///
/// Hidden inputs are copied as served, the two reserved inputs get the
/// configured credentials, everything else is left out. A name seen twice
/// keeps its first position and its last value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginPayload(Vec<(String, String)>);

impl LoginPayload {
    pub fn build(form: &LoginForm, credentials: &PortalCredentials) -> Self {
        let mut payload = Self::default();
        for field in &form.fields {
            let value = match field.kind {
                FieldKind::Hidden => field.value.as_str(),
                FieldKind::Username => credentials.username.expose_secret().as_str(),
                FieldKind::Password => credentials.password.expose_secret().as_str(),
                FieldKind::Other => continue,
            };
            payload.insert(&field.name, value);
        }
        payload
    }

    fn insert(&mut self, name: &str, value: &str) {
        match self.0.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value.to_string(),
            None => self.0.push((name.to_string(), value.to_string())),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// Pairs in submission order, ready for `reqwest::RequestBuilder::form`.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

#[cfg(test)]
impl LoginPayload {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Values include the password, only names go to the logs
impl Debug for LoginPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LoginPayload")
            .field(&self.names().collect::<Vec<_>>())
            .finish()
    }
}
