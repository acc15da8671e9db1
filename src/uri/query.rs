//! Query params: lookup, editing, and rendering.

use super::{
    Uri, UriError,
    encoding::{self, UriPart},
    parser,
};

/// Render params as the encoded `k=v&…` form.
pub(crate) fn render_query(params: &[(String, Option<String>)], out: &mut String) {
    for (n, (key, value)) in params.iter().enumerate() {
        if n > 0 {
            out.push('&');
        }
        out.push_str(&encoding::encode(key, UriPart::Query));
        if let Some(value) = value {
            out.push('=');
            out.push_str(&encoding::encode(value, UriPart::Query));
        }
    }
}

impl Uri {
    /// Returns the first value of `key`, comparing keys case-insensitively.
    ///
    /// `None` when the key is absent or carries no value.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.get_param_at(key, 0)
    }

    /// Returns the nth value of `key`, comparing keys case-insensitively.
    pub fn get_param_at(&self, key: &str, index: usize) -> Option<&str> {
        self.params()?
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .nth(index)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Returns the first value of `key`, or `default` when absent.
    pub fn get_param_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_param(key).unwrap_or(default)
    }

    /// Returns every value of `key` in order, comparing keys
    /// case-insensitively. Valueless pairs yield `None` entries.
    pub fn get_params(&self, key: &str) -> Vec<Option<&str>> {
        self.params()
            .into_iter()
            .flatten()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_deref())
            .collect()
    }

    /// Append one param pair.
    pub fn with_param(&self, key: &str, value: Option<&str>) -> Uri {
        let mut uri = self.clone();
        uri.params
            .get_or_insert_default()
            .push((key.to_string(), value.map(str::to_string)));
        uri
    }

    /// Append param pairs.
    pub fn with_params(&self, pairs: &[(&str, Option<&str>)]) -> Uri {
        let mut uri = self.clone();
        uri.params.get_or_insert_default().extend(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.map(str::to_string))),
        );
        uri
    }

    /// Append the params of another uri, if it has a query.
    pub fn with_params_from(&self, other: &Uri) -> Uri {
        let mut uri = self.clone();
        if let Some(params) = other.params() {
            uri.params.get_or_insert_default().extend(params.iter().cloned());
        }
        uri
    }

    /// Replace the whole query with a parsed query string.
    ///
    /// Keys and values are decoded; an empty string produces a bare `?`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] on an invalid query character.
    pub fn with_query(&self, text: &str) -> Result<Uri, UriError> {
        let params = parser::parse_query_text(text)?;
        let mut uri = self.clone();
        uri.params = Some(params);
        Ok(uri)
    }

    /// Drop the query entirely.
    pub fn without_query(&self) -> Uri {
        let mut uri = self.clone();
        uri.params = None;
        uri
    }

    /// Drop every pair whose key matches, comparing case-insensitively.
    pub fn without_params(&self, key: &str) -> Uri {
        let mut uri = self.clone();
        if let Some(params) = &mut uri.params {
            params.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        }
        uri
    }
}
