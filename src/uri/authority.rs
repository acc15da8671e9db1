//! Host validation.

use crate::matches;

use super::UriError;

/// Validate a host supplied outside the parser: a regular name in the
/// unreserved-plus-`$&'()*+,-.!;=_~` class, or a bracketed IPv6 literal.
/// Percent-encoded bytes are never legal in a host.
pub(crate) const fn validate_host(bytes: &[u8]) -> Result<(), UriError> {
    if bytes.is_empty() {
        return Err(UriError::Host);
    }

    if !matches!(bytes.first(), Some(b'[')) {
        let mut bytes = bytes;
        while let [byte, rest @ ..] = bytes {
            if matches::is_authority(*byte) && *byte != b'%' {
                bytes = rest;
            } else {
                return Err(UriError::Host);
            }
        }
        Ok(())
    } else if let [b'[', ip @ .., b']'] = bytes {
        if ip.is_empty() {
            return Err(UriError::Host);
        }
        let mut ip = ip;
        while let [byte, rest @ ..] = ip {
            if matches::is_ipv6(*byte) {
                ip = rest;
            } else {
                return Err(UriError::Host);
            }
        }
        Ok(())
    } else {
        Err(UriError::Host)
    }
}

/// Whether the host is a bracketed IPv6 literal.
pub(crate) const fn is_ip_literal(bytes: &[u8]) -> bool {
    matches!(bytes.first(), Some(b'['))
}
