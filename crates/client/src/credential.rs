//! Cookie-derived credential.

use std::fmt;

use reqwest::header::HeaderValue;

use crate::error::ClientError;

/// Authentication token sent as the `Cookie` header of every request.
///
/// Built once from the cookie jar and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Joins cookie pairs into `name1=value1; name2=value2`.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let token = pairs
            .into_iter()
            .map(|(name, value)| format!("{}={}", name.as_ref(), value.as_ref()))
            .collect::<Vec<_>>()
            .join("; ");
        Self { token }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    /// The token as a sensitive header value.
    pub fn header_value(&self) -> Result<HeaderValue, ClientError> {
        let mut value =
            HeaderValue::from_str(&self.token).map_err(|_| ClientError::InvalidCredential)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .finish()
    }
}
