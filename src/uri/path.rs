//! Path segments: validation, composition, and rendering.

use crate::matches;

use super::{Uri, UriError, parser};

/// Validate a segment supplied outside the parser.
///
/// A segment is non-empty and holds segment characters; `/` is tolerated
/// anywhere since segments born from slash runs or backslash normalization
/// legitimately contain it.
pub(crate) const fn validate_segment(text: &str) -> Result<(), UriError> {
    let mut bytes = text.as_bytes();
    if bytes.is_empty() {
        return Err(UriError::Segment);
    }
    while let [byte, rest @ ..] = bytes {
        if matches::is_segment(*byte) || *byte == b'/' {
            bytes = rest;
        } else {
            return Err(UriError::Segment);
        }
    }
    Ok(())
}

/// Render the path: one `/` before each segment, plus the trailing slash.
pub(crate) fn render_path(uri: &Uri, out: &mut String, native: bool) {
    for segment in uri.segments() {
        out.push('/');
        if native && uri.uses_segment_double_encoding() {
            render_native_segment(segment, out);
        } else {
            out.push_str(segment);
        }
    }
    if uri.trailing_slash() {
        out.push('/');
    }
}

/// Double-encode the characters some native uri libraries reject in a
/// segment: `:`, `|`, and trailing dot runs. Surviving one decode pass
/// downstream, they arrive singly encoded.
fn render_native_segment(segment: &str, out: &mut String) {
    let kept = segment.trim_end_matches('.');
    for ch in kept.chars() {
        match ch {
            ':' => out.push_str("%253A"),
            '|' => out.push_str("%257C"),
            ch => out.push(ch),
        }
    }
    for _ in kept.len()..segment.len() {
        out.push_str("%252E");
    }
}

impl Uri {
    /// Append one or more encoded segments.
    ///
    /// An empty final segment sets the trailing slash instead of being
    /// appended; any other empty segment is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ruta::Uri;
    /// let uri = Uri::parse("http://h/a/b").unwrap();
    /// assert_eq!(uri.at(&["c", ""]).unwrap().to_string(), "http://h/a/b/c/");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Err`] on an empty non-final segment or an invalid
    /// character.
    pub fn at(&self, segments: &[&str]) -> Result<Uri, UriError> {
        let mut uri = self.clone();
        let Some((last, init)) = segments.split_last() else {
            return Ok(uri);
        };
        for segment in init {
            validate_segment(segment)?;
            uri.segments.push(segment.to_string());
        }
        if last.is_empty() {
            uri.trailing_slash = true;
        } else {
            validate_segment(last)?;
            uri.segments.push(last.to_string());
            uri.trailing_slash = false;
        }
        Ok(uri)
    }

    /// Append a relative `path[?query][#fragment]` tail.
    ///
    /// Segments extend the path, query pairs extend the params, and a
    /// fragment in the tail replaces the current one.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the tail is not a valid path-query-fragment.
    pub fn at_path(&self, tail: &str) -> Result<Uri, UriError> {
        let tail = parser::parse_path_tail(tail)?;
        let mut uri = self.clone();
        if !tail.segments.is_empty() {
            uri.segments.extend(tail.segments);
            uri.trailing_slash = tail.trailing_slash;
        } else if tail.trailing_slash {
            uri.trailing_slash = true;
        }
        if let Some(params) = tail.params {
            match &mut uri.params {
                Some(existing) => existing.extend(params),
                None => uri.params = Some(params),
            }
        }
        if tail.fragment.is_some() {
            uri.fragment = tail.fragment;
        }
        Ok(uri)
    }

    /// Replace path, query, and fragment with the parsed input.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the input is not a valid path-query-fragment.
    pub fn at_absolute_path(&self, tail: &str) -> Result<Uri, UriError> {
        let tail = parser::parse_path_tail(tail)?;
        let mut uri = self.clone();
        uri.segments = tail.segments;
        uri.trailing_slash = tail.trailing_slash;
        uri.params = tail.params;
        uri.fragment = tail.fragment;
        Ok(uri)
    }

    /// Keep only the first `count` segments.
    pub fn with_first_segments(&self, count: usize) -> Uri {
        let mut uri = self.clone();
        if count < uri.segments.len() {
            uri.segments.truncate(count);
            uri.trailing_slash = false;
        }
        uri
    }

    /// Drop the first `count` segments.
    pub fn without_first_segments(&self, count: usize) -> Uri {
        let mut uri = self.clone();
        uri.segments.drain(..count.min(uri.segments.len()));
        uri
    }

    /// Drop the last segment.
    pub fn without_last_segment(&self) -> Uri {
        self.without_last_segments(1)
    }

    /// Drop the last `count` segments.
    pub fn without_last_segments(&self, count: usize) -> Uri {
        let mut uri = self.clone();
        let keep = uri.segments.len().saturating_sub(count);
        if keep < uri.segments.len() {
            uri.segments.truncate(keep);
            uri.trailing_slash = false;
        }
        uri
    }
}
