//! Uniform Resource Identifier parsing and manipulation.
//!
//! # Generic Syntax
//!
//! [`Uri`] represents an absolute uri, always carrying a scheme and a
//! host. The accepted grammar is a superset of [RFC3986]: segment, query,
//! and fragment additionally accept `^ | [ ] { }`, and `\` inside a path
//! is normalized to `/`.
//!
//! # Percent Encoding
//!
//! User, password, query params, and fragment are stored in decoded form
//! and re-encoded on rendering; scheme, host, and path segments are stored
//! as written. Use [`encoding`] to encode or decode strings for a
//! specific uri part.
//!
//! [RFC3986]: <https://datatracker.ietf.org/doc/html/rfc3986>

mod error;
pub mod encoding;
mod parser;
mod scheme;
mod authority;
mod path;
mod query;
mod relation;
mod with;
mod impls;


pub use error::UriError;

/// An absolute uri.
///
/// # Syntax Component
///
/// The following is an example uri and its component parts:
///
/// ```not_rust
///   http://user:pw@example.com:8042/over/there?name=ferret#nose
///   \__/   \_____/ \_________/ \__/ \________/ \_________/ \__/
///    |        |         |       |       |           |       |
/// scheme  user info    host    port  segments     query  fragment
/// ```
///
/// # Immutability
///
/// A `Uri` is never mutated: every `with_*` and `at*` method returns a new
/// value, so instances are freely shareable between threads.
///
/// # Equality
///
/// Scheme, host, user, segments, and fragment compare ASCII
/// case-insensitively; password and param values compare exactly; param
/// keys case-insensitively; ports numerically. Whether the port is the
/// scheme default is metadata and never part of equality, as are the
/// trailing slash and the segment double-encoding flag.
#[derive(Clone)]
pub struct Uri {
    scheme: String,
    user: Option<String>,
    password: Option<String>,
    host: String,
    /// Effective port: explicit, or the scheme default.
    port: Option<u16>,
    /// As written, never empty; a segment born from a slash run keeps the
    /// extra slashes as a prefix.
    segments: Vec<String>,
    trailing_slash: bool,
    /// `None` means no `?` at all; `Some` but empty means a bare `?`.
    params: Option<Vec<(String, Option<String>)>>,
    fragment: Option<String>,
    /// Re-render segments double-encoded for native uri interop.
    double_encode: bool,
}

/// Everything needed to assemble a [`Uri`] without parsing.
///
/// `port: None` asks for the scheme default. Segments must be non-empty
/// and in their encoded form; params and fragment are taken decoded.
#[derive(Debug, Clone, Default)]
pub struct Parts {
    pub scheme: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: Option<u16>,
    pub segments: Vec<String>,
    pub trailing_slash: bool,
    pub params: Option<Vec<(String, Option<String>)>>,
    pub fragment: Option<String>,
}

impl Uri {
    /// Parse an absolute uri, `None` on any syntactic error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ruta::Uri;
    /// let uri = Uri::parse("http://example.com:8042/over/there?name=ferret").unwrap();
    /// assert_eq!(uri.host(), "example.com");
    /// assert_eq!(uri.segments(), ["over", "there"]);
    /// ```
    #[inline]
    pub fn parse(text: &str) -> Option<Uri> {
        Self::try_parse(text).ok()
    }

    /// Parse an absolute uri.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] with the offending component kind if the input is
    /// not a valid uri.
    pub fn try_parse(text: &str) -> Result<Uri, UriError> {
        parser::parse(text).map(Uri::from_raw)
    }

    /// Create a minimal uri from a scheme and host.
    ///
    /// The port is the scheme default, the path is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the scheme or host is malformed.
    pub fn new(scheme: &str, host: &str) -> Result<Uri, UriError> {
        scheme::validate_scheme(scheme.as_bytes())?;
        authority::validate_host(host.as_bytes())?;
        Ok(Uri {
            scheme: scheme.to_string(),
            user: None,
            password: None,
            host: host.to_string(),
            port: scheme::default_port(scheme),
            segments: Vec::new(),
            trailing_slash: false,
            params: None,
            fragment: None,
            double_encode: false,
        })
    }

    /// Assemble a uri from [`Parts`].
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the scheme, host, or any segment is malformed.
    pub fn from_parts(parts: Parts) -> Result<Uri, UriError> {
        scheme::validate_scheme(parts.scheme.as_bytes())?;
        authority::validate_host(parts.host.as_bytes())?;
        for segment in &parts.segments {
            path::validate_segment(segment)?;
        }
        let port = parts.port.or_else(|| scheme::default_port(&parts.scheme));
        Ok(Uri {
            scheme: parts.scheme,
            user: parts.user,
            password: parts.password,
            host: parts.host,
            port,
            segments: parts.segments,
            trailing_slash: parts.trailing_slash,
            params: parts.params,
            fragment: parts.fragment,
            double_encode: false,
        })
    }

    /// Create an http uri for the loopback host on the given port.
    ///
    /// Request-context layers use this to address the server's own
    /// listener when translating public uris into internal ones.
    pub fn localhost(port: u16) -> Uri {
        Uri {
            scheme: "http".to_string(),
            user: None,
            password: None,
            host: "localhost".to_string(),
            port: Some(port),
            segments: Vec::new(),
            trailing_slash: false,
            params: None,
            fragment: None,
            double_encode: false,
        }
    }

    fn from_raw(raw: parser::RawParts) -> Uri {
        let port = raw.port.or_else(|| scheme::default_port(&raw.scheme));
        Uri {
            scheme: raw.scheme,
            user: raw.user,
            password: raw.password,
            host: raw.host,
            port,
            segments: raw.segments,
            trailing_slash: raw.trailing_slash,
            params: raw.params,
            fragment: raw.fragment,
            double_encode: false,
        }
    }

    // ===== Accessors =====

    /// Returns the scheme as written.
    #[inline]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the decoded user, if any.
    #[inline]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Returns the decoded password, if any.
    #[inline]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the host as written, brackets included for IPv6 literals.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether the host is a bracketed IPv6 literal.
    #[inline]
    pub fn host_is_ip(&self) -> bool {
        authority::is_ip_literal(self.host.as_bytes())
    }

    /// Whether the host addresses the local machine by name or loopback
    /// literal.
    pub fn host_is_localhost(&self) -> bool {
        self.host.eq_ignore_ascii_case("localhost")
            || self.host == "127.0.0.1"
            || self.host.eq_ignore_ascii_case("[::1]")
    }

    /// Returns the effective port: explicit, or the scheme default.
    #[inline]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Whether the effective port equals the scheme default.
    ///
    /// A uri without a port on a scheme without a default also counts as
    /// default. This is metadata: it controls whether rendering emits the
    /// port, and never takes part in equality.
    #[inline]
    pub fn uses_default_port(&self) -> bool {
        self.port == scheme::default_port(&self.scheme)
    }

    /// Returns the path segments as written.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the last path segment, if any.
    #[inline]
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Whether the path carries a trailing slash.
    #[inline]
    pub fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Returns the decoded query params in order, if a query is present.
    ///
    /// An empty slice is a bare `?`, distinct from no query at all.
    #[inline]
    pub fn params(&self) -> Option<&[(String, Option<String>)]> {
        self.params.as_deref()
    }

    /// Returns the decoded fragment, if any.
    #[inline]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Whether segments re-render double-encoded for native uri interop.
    #[inline]
    pub fn uses_segment_double_encoding(&self) -> bool {
        self.double_encode
    }
}
