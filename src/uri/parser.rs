//! One-pass absolute uri parser.
//!
//! The parser walks the input left to right through the states
//! scheme, authority, host, port, path, query, and fragment, resolving the
//! user-info/host-port ambiguity lazily: the token before the first `:` is
//! committed as a user only when an `@` terminates it, and as a host when
//! a path, query, fragment, or end-of-input terminator does.
//!
//! Tokens are sliced out of the input and decoded only when a `%` or `+`
//! was seen while scanning them, so well-formed uris parse with one
//! allocation per component.

use crate::matches;

use super::{UriError, encoding};

/// Raw components of an absolute uri.
pub(crate) struct RawParts {
    pub scheme: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    /// Explicit port from the input, if any.
    pub port: Option<u16>,
    pub segments: Vec<String>,
    pub trailing_slash: bool,
    pub params: Option<Vec<(String, Option<String>)>>,
    pub fragment: Option<String>,
}

/// Raw components of a relative path-query-fragment tail.
pub(crate) struct PathTail {
    pub segments: Vec<String>,
    pub trailing_slash: bool,
    pub params: Option<Vec<(String, Option<String>)>>,
    pub fragment: Option<String>,
}

/// Parse an absolute uri.
pub(crate) fn parse(text: &str) -> Result<RawParts, UriError> {
    let bytes = text.as_bytes();

    let (scheme, mut i) = parse_scheme(text, bytes)?;
    let auth = parse_authority(text, bytes, &mut i)?;
    let tail = parse_tail(text, bytes, i)?;

    Ok(RawParts {
        scheme,
        user: auth.user,
        password: auth.password,
        host: auth.host,
        port: auth.port,
        segments: tail.segments,
        trailing_slash: tail.trailing_slash,
        params: tail.params,
        fragment: tail.fragment,
    })
}

/// Parse a relative `path[?query][#fragment]` tail.
///
/// A leading `/` is accepted and consumed; segments may equally start
/// immediately.
pub(crate) fn parse_path_tail(text: &str) -> Result<PathTail, UriError> {
    parse_tail(text, text.as_bytes(), 0)
}

/// Parse a query string without its leading `?`.
pub(crate) fn parse_query_text(
    text: &str,
) -> Result<Vec<(String, Option<String>)>, UriError> {
    let bytes = text.as_bytes();
    let mut i = 0;
    let params = parse_query(text, bytes, &mut i)?;
    match bytes.get(i) {
        None => Ok(params),
        Some(_) => Err(UriError::Query),
    }
}

#[inline]
fn peek(bytes: &[u8], i: usize) -> Option<u8> {
    bytes.get(i).copied()
}

// ===== Scheme =====

fn parse_scheme(text: &str, bytes: &[u8]) -> Result<(String, usize), UriError> {
    match peek(bytes, 0) {
        Some(byte) if byte.is_ascii_alphabetic() => {}
        Some(_) => return Err(UriError::Scheme),
        None => return Err(UriError::Incomplete),
    }

    let mut i = 1;
    while let Some(byte) = peek(bytes, i) {
        if byte == b':' {
            break;
        }
        if !matches::is_scheme(byte) {
            return Err(UriError::Scheme);
        }
        i += 1;
    }

    // the scheme must be followed by "://"
    if !bytes[i..].starts_with(b"://") {
        return Err(UriError::Scheme);
    }

    Ok((text[..i].to_string(), i + 3))
}

// ===== Authority =====

struct Auth {
    user: Option<String>,
    password: Option<String>,
    host: String,
    port: Option<u16>,
}

/// Tracks `%` and `+` seen while scanning one token.
#[derive(Default, Clone, Copy)]
struct Seen {
    pct: bool,
    plus: bool,
}

impl Seen {
    #[inline]
    fn mark(&mut self, byte: u8) {
        match byte {
            b'%' => self.pct = true,
            b'+' => self.plus = true,
            _ => {}
        }
    }

    /// Decode a completed user, password, or query token.
    #[inline]
    fn finish(self, token: &str) -> String {
        if self.pct || self.plus {
            encoding::decode(token)
        } else {
            token.to_string()
        }
    }
}

#[inline]
const fn is_auth_end(byte: u8) -> bool {
    matches!(byte, b'/' | b'\\' | b'?' | b'#')
}

fn parse_authority(text: &str, bytes: &[u8], i: &mut usize) -> Result<Auth, UriError> {
    if peek(bytes, *i) == Some(b'[') {
        let (host, port) = parse_host(text, bytes, i)?;
        return Ok(Auth { user: None, password: None, host, port });
    }

    // first token: host, or user once an "@" shows up
    let start = *i;
    let mut seen = Seen::default();
    loop {
        match peek(bytes, *i) {
            Some(byte) if matches::is_authority(byte) => {
                seen.mark(byte);
                *i += 1;
            }
            Some(b'@') => {
                let user = seen.finish(&text[start..*i]);
                *i += 1;
                let (host, port) = parse_host(text, bytes, i)?;
                return Ok(Auth { user: Some(user), password: None, host, port });
            }
            Some(b':') => break,
            Some(byte) if is_auth_end(byte) => {
                return commit_host(text, start, *i, seen, None);
            }
            Some(_) => return Err(UriError::Host),
            None => return commit_host(text, start, *i, seen, None),
        }
    }

    // second token: port, or password once an "@" shows up
    let first = (start, *i, seen);
    *i += 1;
    let start = *i;
    let mut seen = Seen::default();
    loop {
        match peek(bytes, *i) {
            Some(byte) if matches::is_authority(byte) || byte == b':' => {
                seen.mark(byte);
                *i += 1;
            }
            Some(b'@') => {
                let user = first.2.finish(&text[first.0..first.1]);
                let password = seen.finish(&text[start..*i]);
                *i += 1;
                let (host, port) = parse_host(text, bytes, i)?;
                return Ok(Auth {
                    user: Some(user),
                    password: Some(password),
                    host,
                    port,
                });
            }
            Some(byte) if is_auth_end(byte) => break,
            Some(_) => return Err(UriError::Host),
            None => break,
        }
    }

    let port = parse_port(&bytes[start..*i])?;
    commit_host(text, first.0, first.1, first.2, Some(port))
}

fn commit_host(
    text: &str,
    start: usize,
    end: usize,
    seen: Seen,
    port: Option<u16>,
) -> Result<Auth, UriError> {
    // percent-encoded bytes never form a legal host
    if start == end || seen.pct {
        return Err(UriError::Host);
    }
    Ok(Auth {
        user: None,
        password: None,
        host: text[start..end].to_string(),
        port,
    })
}

/// Parse the host (regular name or bracketed IPv6 literal) and an optional
/// port, leaving the cursor on the path opener or at the end of input.
fn parse_host(
    text: &str,
    bytes: &[u8],
    i: &mut usize,
) -> Result<(String, Option<u16>), UriError> {
    let start = *i;

    let host = if peek(bytes, *i) == Some(b'[') {
        *i += 1;
        while let Some(byte) = peek(bytes, *i) {
            if !matches::is_ipv6(byte) {
                break;
            }
            *i += 1;
        }
        // brackets must close around at least one character
        if *i == start + 1 || peek(bytes, *i) != Some(b']') {
            return Err(UriError::Host);
        }
        *i += 1;
        text[start..*i].to_string()
    } else {
        let mut seen = Seen::default();
        while let Some(byte) = peek(bytes, *i) {
            if !matches::is_authority(byte) {
                break;
            }
            seen.mark(byte);
            *i += 1;
        }
        if start == *i || seen.pct {
            return Err(UriError::Host);
        }
        text[start..*i].to_string()
    };

    let port = match peek(bytes, *i) {
        Some(b':') => {
            *i += 1;
            let start = *i;
            while let Some(byte) = peek(bytes, *i) {
                if !byte.is_ascii_digit() {
                    break;
                }
                *i += 1;
            }
            Some(parse_port(&bytes[start..*i])?)
        }
        _ => None,
    };

    match peek(bytes, *i) {
        Some(byte) if is_auth_end(byte) => Ok((host, port)),
        Some(_) => Err(UriError::Host),
        None => Ok((host, port)),
    }
}

fn parse_port(digits: &[u8]) -> Result<u16, UriError> {
    if digits.is_empty() {
        return Err(UriError::Port);
    }
    let mut value: u32 = 0;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(UriError::Port);
        }
        value = value * 10 + (byte - b'0') as u32;
        if value > u16::MAX as u32 {
            return Err(UriError::Port);
        }
    }
    Ok(value as u16)
}

// ===== Path =====

fn parse_tail(text: &str, bytes: &[u8], mut i: usize) -> Result<PathTail, UriError> {
    let mut segments = Vec::new();
    let mut trailing_slash = false;

    match peek(bytes, i) {
        Some(b'/' | b'\\') => {
            i += 1;
            parse_segments(text, bytes, &mut i, &mut segments, &mut trailing_slash)?;
        }
        Some(b'?' | b'#') | None => {}
        Some(_) => {
            // relative tail, first segment starts immediately
            parse_segments(text, bytes, &mut i, &mut segments, &mut trailing_slash)?;
        }
    }

    let params = match peek(bytes, i) {
        Some(b'?') => {
            i += 1;
            Some(parse_query(text, bytes, &mut i)?)
        }
        _ => None,
    };

    let fragment = match peek(bytes, i) {
        Some(b'#') => {
            i += 1;
            Some(parse_fragment(text, bytes, &mut i)?)
        }
        _ => None,
    };

    match peek(bytes, i) {
        None => Ok(PathTail { segments, trailing_slash, params, fragment }),
        Some(_) => Err(UriError::Path),
    }
}

/// Consume segments until a `?`, `#`, or the end of input.
///
/// The cursor enters just past a boundary slash (or at the first byte of a
/// relative segment). Extra slashes of a run become a `/` prefix on the
/// next segment; backslashes extend a leading run and are otherwise
/// normalized to `/` inside the segment they appear in. A single trailing
/// slash sets the flag instead of producing an empty segment.
fn parse_segments(
    text: &str,
    bytes: &[u8],
    i: &mut usize,
    segments: &mut Vec<String>,
    trailing_slash: &mut bool,
) -> Result<(), UriError> {
    loop {
        // leading run: extra slashes become part of the segment
        let mut prefix = 0;
        while let Some(b'/' | b'\\') = peek(bytes, *i) {
            prefix += 1;
            *i += 1;
        }

        let start = *i;
        let mut backslash = false;
        let end = loop {
            match peek(bytes, *i) {
                Some(byte @ (b'/' | b'?' | b'#')) => break Some(byte),
                None => break None,
                Some(b'\\') => {
                    backslash = true;
                    *i += 1;
                }
                Some(byte) if matches::is_segment(byte) => *i += 1,
                Some(_) => return Err(UriError::Path),
            }
        };

        let body = &text[start..*i];
        if prefix > 0 || !body.is_empty() {
            let mut segment = String::with_capacity(prefix + body.len());
            for _ in 0..prefix {
                segment.push('/');
            }
            if backslash {
                segment.push_str(&body.replace('\\', "/"));
            } else {
                segment.push_str(body);
            }
            segments.push(segment);
        } else if end != Some(b'/') {
            // lone boundary slash at the end of the path
            *trailing_slash = true;
        }

        match end {
            Some(b'/') => *i += 1,
            _ => return Ok(()),
        }
    }
}

// ===== Query =====

#[inline]
const fn is_query_token(byte: u8) -> bool {
    matches::is_query(byte) && !matches!(byte, b'=' | b'&' | b'#')
}

/// Consume `key` / `key=value` pairs until a `#` or the end of input. The
/// leading `?` is already consumed; an immediately terminated query yields
/// an empty list, which callers keep distinct from "no query".
fn parse_query(
    text: &str,
    bytes: &[u8],
    i: &mut usize,
) -> Result<Vec<(String, Option<String>)>, UriError> {
    let mut params = Vec::new();

    if let Some(b'#') | None = peek(bytes, *i) {
        return Ok(params);
    }

    loop {
        let start = *i;
        let mut seen = Seen::default();
        let key_end = loop {
            match peek(bytes, *i) {
                Some(byte) if is_query_token(byte) => {
                    seen.mark(byte);
                    *i += 1;
                }
                Some(byte @ (b'=' | b'&' | b'#')) => break Some(byte),
                None => break None,
                Some(_) => return Err(UriError::Query),
            }
        };
        let key = seen.finish(&text[start..*i]);

        let end = match key_end {
            Some(b'=') => {
                *i += 1;
                let start = *i;
                let mut seen = Seen::default();
                let end = loop {
                    match peek(bytes, *i) {
                        Some(byte) if matches::is_query(byte) && byte != b'&' => {
                            seen.mark(byte);
                            *i += 1;
                        }
                        Some(byte @ (b'&' | b'#')) => break Some(byte),
                        None => break None,
                        Some(_) => return Err(UriError::Query),
                    }
                };
                params.push((key, Some(seen.finish(&text[start..*i]))));
                end
            }
            end => {
                params.push((key, None));
                end
            }
        };

        match end {
            Some(b'&') => *i += 1,
            _ => return Ok(params),
        }
    }
}

// ===== Fragment =====

fn parse_fragment(text: &str, bytes: &[u8], i: &mut usize) -> Result<String, UriError> {
    let start = *i;
    let mut seen = Seen::default();
    while let Some(byte) = peek(bytes, *i) {
        if !matches::is_fragment(byte) {
            return Err(UriError::Fragment);
        }
        seen.mark(byte);
        *i += 1;
    }
    Ok(seen.finish(&text[start..*i]))
}
