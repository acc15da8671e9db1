//! Fluent builders: every method returns a new uri, none mutate.

use super::{Uri, UriError, authority, scheme};

impl Uri {
    /// Replace the scheme.
    ///
    /// When the current port was inferred, it follows the new scheme's
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the scheme is malformed.
    pub fn with_scheme(&self, value: &str) -> Result<Uri, UriError> {
        scheme::validate_scheme(value.as_bytes())?;
        let was_default = self.uses_default_port();
        let mut uri = self.clone();
        uri.scheme = value.to_string();
        if was_default {
            uri.port = scheme::default_port(value);
        }
        Ok(uri)
    }

    /// Replace the host.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the host is malformed.
    pub fn with_host(&self, value: &str) -> Result<Uri, UriError> {
        authority::validate_host(value.as_bytes())?;
        let mut uri = self.clone();
        uri.host = value.to_string();
        Ok(uri)
    }

    /// Set an explicit port.
    pub fn with_port(&self, port: u16) -> Uri {
        let mut uri = self.clone();
        uri.port = Some(port);
        uri
    }

    /// Drop the explicit port, falling back to the scheme default.
    pub fn without_port(&self) -> Uri {
        let mut uri = self.clone();
        uri.port = scheme::default_port(&uri.scheme);
        uri
    }

    /// Set the user and password, both decoded.
    pub fn with_credentials(&self, user: &str, password: Option<&str>) -> Uri {
        let mut uri = self.clone();
        uri.user = Some(user.to_string());
        uri.password = password.map(str::to_string);
        uri
    }

    /// Set the user, clearing any password.
    pub fn with_user(&self, user: &str) -> Uri {
        self.with_credentials(user, None)
    }

    /// Copy the credentials of another uri, clearing them when the other
    /// has none.
    pub fn with_credentials_from(&self, other: &Uri) -> Uri {
        let mut uri = self.clone();
        uri.user = other.user.clone();
        uri.password = other.password.clone();
        uri
    }

    /// Drop user and password.
    pub fn without_credentials(&self) -> Uri {
        let mut uri = self.clone();
        uri.user = None;
        uri.password = None;
        uri
    }

    /// Set the decoded fragment.
    pub fn with_fragment(&self, fragment: &str) -> Uri {
        let mut uri = self.clone();
        uri.fragment = Some(fragment.to_string());
        uri
    }

    /// Drop the fragment.
    pub fn without_fragment(&self) -> Uri {
        let mut uri = self.clone();
        uri.fragment = None;
        uri
    }

    /// Set the trailing slash.
    pub fn with_trailing_slash(&self) -> Uri {
        let mut uri = self.clone();
        uri.trailing_slash = true;
        uri
    }

    /// Drop the trailing slash.
    pub fn without_trailing_slash(&self) -> Uri {
        let mut uri = self.clone();
        uri.trailing_slash = false;
        uri
    }

    /// Re-render segments double-encoded for native uri interop.
    pub fn with_segment_double_encoding(&self) -> Uri {
        let mut uri = self.clone();
        uri.double_encode = true;
        uri
    }

    /// Render segments as written.
    pub fn without_segment_double_encoding(&self) -> Uri {
        let mut uri = self.clone();
        uri.double_encode = false;
        uri
    }

    /// Drop path, query, and fragment.
    pub fn without_path_query_fragment(&self) -> Uri {
        let mut uri = self.clone();
        uri.segments.clear();
        uri.trailing_slash = false;
        uri.params = None;
        uri.fragment = None;
        uri
    }

    /// Drop credentials, path, query, and fragment.
    pub fn without_credentials_path_query_fragment(&self) -> Uri {
        let mut uri = self.without_path_query_fragment();
        uri.user = None;
        uri.password = None;
        uri
    }
}
