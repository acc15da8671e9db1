//! Projections, rendering, and trait wiring.

use std::hash::{Hash, Hasher};

use super::{
    Uri, UriError,
    encoding::{self, UriPart},
    path, query,
};

impl Uri {
    /// Returns `user[:password]` encoded, if a user is present.
    ///
    /// ```not_rust
    /// http://user:pw@example.com:8042/over/there
    ///        \_____/
    ///           |
    ///       user info
    /// ```
    pub fn user_info(&self) -> Option<String> {
        let user = self.user()?;
        let mut out = encoding::encode(user, UriPart::UserInfo);
        if let Some(password) = self.password() {
            out.push(':');
            out.push_str(&encoding::encode(password, UriPart::UserInfo));
        }
        Some(out)
    }

    /// Returns `host[:port]`, the port omitted when inferred.
    ///
    /// ```not_rust
    /// http://user:pw@example.com:8042/over/there
    ///                \______________/
    ///                       |
    ///                   host port
    /// ```
    pub fn host_port(&self) -> String {
        let mut out = String::with_capacity(self.host.len() + 6);
        out.push_str(&self.host);
        self.push_port(&mut out);
        out
    }

    /// Returns `[user_info@]host[:port]`.
    ///
    /// ```not_rust
    /// http://user:pw@example.com:8042/over/there
    ///        \_______________________/
    ///                   |
    ///               authority
    /// ```
    pub fn authority(&self) -> String {
        let mut out = String::new();
        if let Some(user_info) = self.user_info() {
            out.push_str(&user_info);
            out.push('@');
        }
        out.push_str(&self.host);
        self.push_port(&mut out);
        out
    }

    /// Returns `scheme://host[:port]`.
    pub fn scheme_host_port(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.scheme);
        out.push_str("://");
        out.push_str(&self.host);
        self.push_port(&mut out);
        out
    }

    /// Returns the rendered path: `/`-joined segments plus the trailing
    /// slash; empty when the uri has neither segments nor a trailing
    /// slash.
    pub fn path(&self) -> String {
        let mut out = String::new();
        path::render_path(self, &mut out, false);
        out
    }

    /// Returns the encoded `k=v&…` query, if a query is present.
    pub fn query(&self) -> Option<String> {
        self.params().map(|params| {
            let mut out = String::new();
            query::render_query(params, &mut out);
            out
        })
    }

    /// Returns `[?query][#fragment]`, empty when the uri has neither.
    pub fn query_fragment(&self) -> String {
        let mut out = String::new();
        self.push_query_fragment(&mut out);
        out
    }

    /// Returns `path[?query][#fragment]`.
    pub fn path_query_fragment(&self) -> String {
        let mut out = String::new();
        path::render_path(self, &mut out, false);
        self.push_query_fragment(&mut out);
        out
    }

    /// Canonical rendering with a present password replaced by `xxx`,
    /// safe for logs.
    pub fn to_sanitized_string(&self) -> String {
        let mut out = String::new();
        self.render(&mut out, false, false);
        out
    }

    /// Rendering for native uri consumers.
    ///
    /// When segment double-encoding is enabled, each segment additionally
    /// encodes `:`, `|`, and trailing dot runs so that libraries which
    /// decode once still see them escaped.
    pub fn to_native_uri(&self) -> String {
        let mut out = String::new();
        self.render(&mut out, true, true);
        out
    }

    fn render(&self, out: &mut String, include_password: bool, native: bool) {
        out.push_str(&self.scheme);
        out.push_str("://");
        if let Some(user) = self.user() {
            out.push_str(&encoding::encode(user, UriPart::UserInfo));
            if let Some(password) = self.password() {
                out.push(':');
                if include_password {
                    out.push_str(&encoding::encode(password, UriPart::UserInfo));
                } else {
                    out.push_str("xxx");
                }
            }
            out.push('@');
        }
        out.push_str(&self.host);
        self.push_port(out);
        path::render_path(self, out, native);
        self.push_query_fragment(out);
    }

    fn push_port(&self, out: &mut String) {
        if !self.uses_default_port() {
            if let Some(port) = self.port {
                out.push(':');
                out.push_str(itoa::Buffer::new().format(port));
            }
        }
    }

    fn push_query_fragment(&self, out: &mut String) {
        if let Some(params) = self.params() {
            out.push('?');
            query::render_query(params, out);
        }
        if let Some(fragment) = self.fragment() {
            out.push('#');
            out.push_str(&encoding::encode(fragment, UriPart::Fragment));
        }
    }
}

// ===== Formatting =====

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        self.render(&mut out, true, false);
        f.write_str(&out)
    }
}

impl std::fmt::Debug for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

// ===== Conversions =====

impl std::str::FromStr for Uri {
    type Err = UriError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::try_parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = UriError;

    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Uri::try_parse(value)
    }
}

impl TryFrom<String> for Uri {
    type Error = UriError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uri::try_parse(&value)
    }
}

// ===== Equality =====

fn eq_opt_ci(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Uri) -> bool {
        self.scheme.eq_ignore_ascii_case(&other.scheme)
            && self.host.eq_ignore_ascii_case(&other.host)
            && self.port == other.port
            && eq_opt_ci(self.user(), other.user())
            && self.password == other.password
            && self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
            && eq_opt_ci(self.fragment(), other.fragment())
            && params_eq(self.params(), other.params())
    }
}

impl Eq for Uri { }

fn params_eq(
    a: Option<&[(String, Option<String>)]>,
    b: Option<&[(String, Option<String>)]>,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.len() == b.len()
                && a.iter().zip(b).all(|((ka, va), (kb, vb))| {
                    ka.eq_ignore_ascii_case(kb) && va == vb
                })
        }
        (None, None) => true,
        _ => false,
    }
}

// ===== Hashing =====

/// Feed a string into the hasher lowercased, with a terminator so
/// adjacent fields cannot run together.
fn hash_ci<H: Hasher>(text: &str, state: &mut H) {
    for byte in text.bytes() {
        state.write_u8(byte.to_ascii_lowercase());
    }
    state.write_u8(0xff);
}

fn hash_opt_ci<H: Hasher>(text: Option<&str>, state: &mut H) {
    match text {
        Some(text) => {
            state.write_u8(1);
            hash_ci(text, state);
        }
        None => state.write_u8(0),
    }
}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ci(&self.scheme, state);
        hash_ci(&self.host, state);
        self.port.hash(state);
        hash_opt_ci(self.user(), state);
        self.password.hash(state);
        state.write_usize(self.segments.len());
        for segment in &self.segments {
            hash_ci(segment, state);
        }
        hash_opt_ci(self.fragment(), state);
        match self.params() {
            Some(params) => {
                state.write_u8(1);
                state.write_usize(params.len());
                for (key, value) in params {
                    hash_ci(key, state);
                    value.hash(state);
                }
            }
            None => state.write_u8(0),
        }
    }
}

// ===== Serde =====

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct UriVisitor;

        impl serde::de::Visitor<'_> for UriVisitor {
            type Value = Uri;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an absolute uri string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Uri::try_parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(UriVisitor)
    }
}
