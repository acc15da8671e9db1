//! Structural relations between uris.
//!
//! The relation operations compare uris by authority and by ordered
//! segment list. `strict` selects the authority rule: strict requires the
//! exact scheme and numerically equal ports, lenient treats `http` and
//! `https` as interchangeable and two inferred default ports as equal,
//! which lets uris relate across TLS termination boundaries.

use super::{Uri, UriError, scheme};

impl Uri {
    /// Highest similarity this uri can score: scheme, host, and every
    /// segment.
    pub fn max_similarity(&self) -> usize {
        2 + self.segments.len()
    }

    /// Count of matching leading tokens in the order scheme, host,
    /// segments; zero when scheme, host, or port disagree under `strict`.
    pub fn similarity(&self, other: &Uri, strict: bool) -> usize {
        if !self.authority_matches(other, strict) {
            return 0;
        }
        2 + common_prefix(self.segments(), other.segments())
    }

    /// Whether `prefix`'s segments lead this uri's, with an agreeing
    /// scheme, host, and port under `strict`.
    pub fn has_prefix(&self, prefix: &Uri, strict: bool) -> bool {
        self.authority_matches(prefix, strict)
            && common_prefix(self.segments(), prefix.segments()) == prefix.segments.len()
    }

    /// Relative path from `other` to this uri: one `..` per unmatched
    /// segment on the `other` side, then this uri's remainder.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ruta::Uri;
    /// let uri = Uri::parse("http://h/a/b/c").unwrap();
    /// let other = Uri::parse("http://h/a/x/y").unwrap();
    /// assert_eq!(uri.get_relative_path_to(&other, true).unwrap(), "../../b/c");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Err`] when scheme, host, or port disagree under `strict`.
    pub fn get_relative_path_to(&self, other: &Uri, strict: bool) -> Result<String, UriError> {
        if !self.authority_matches(other, strict) {
            return Err(UriError::Mismatch);
        }
        let common = common_prefix(self.segments(), other.segments());
        let mut out = String::new();
        for _ in common..other.segments.len() {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str("..");
        }
        for segment in &self.segments[common..] {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(segment);
        }
        Ok(out)
    }

    /// Translate this uri from under `from` to under `to`.
    ///
    /// Scheme, host, and port come from `to`; credentials, trailing slash,
    /// query, and fragment stay with this uri. Segments of `from` that do
    /// not lead this uri's path become `..` segments, so a uri that has
    /// `from` as prefix maps onto `to` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] when scheme, host, or port of this uri and `from`
    /// disagree under `strict`.
    pub fn change_prefix(&self, from: &Uri, to: &Uri, strict: bool) -> Result<Uri, UriError> {
        if !self.authority_matches(from, strict) {
            return Err(UriError::Mismatch);
        }
        let common = common_prefix(self.segments(), from.segments());
        let mut segments = to.segments.clone();
        segments.extend((common..from.segments.len()).map(|_| String::from("..")));
        segments.extend(self.segments[common..].iter().cloned());

        let mut uri = self.clone();
        uri.scheme = to.scheme.clone();
        uri.host = to.host.clone();
        uri.port = to.port;
        uri.segments = segments;
        Ok(uri)
    }

    pub(crate) fn authority_matches(&self, other: &Uri, strict: bool) -> bool {
        scheme::schemes_match(&self.scheme, &other.scheme, strict)
            && self.host.eq_ignore_ascii_case(&other.host)
            && ports_match(self, other, strict)
    }
}

fn ports_match(a: &Uri, b: &Uri, strict: bool) -> bool {
    if a.port() == b.port() {
        return true;
    }
    !strict && a.uses_default_port() && b.uses_default_port()
}

fn common_prefix(a: &[String], b: &[String]) -> usize {
    a.iter()
        .zip(b)
        .take_while(|(x, y)| x.eq_ignore_ascii_case(y))
        .count()
}
