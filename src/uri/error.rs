/// A possible error value when parsing, building, or relating URIs.
#[derive(Clone, PartialEq, Eq)]
pub enum UriError {
    /// Input ends before all components parsed.
    Incomplete,
    /// Scheme is empty, malformed, or not followed by `://`.
    Scheme,
    /// Authority is malformed: the host is empty, holds an invalid or
    /// percent-encoded byte, or an invalid character follows the user
    /// info.
    Host,
    /// Port is empty, non-numeric, or out of range.
    Port,
    /// Path contains an invalid character.
    Path,
    /// Query contains an invalid character.
    Query,
    /// Fragment contains an invalid character.
    Fragment,
    /// A supplied segment is empty or contains an invalid character.
    Segment,
    /// Scheme, host, or port of two URIs disagree under the requested
    /// strictness.
    Mismatch,
}

// ===== Error =====

macro_rules! gen_error {
    ($($variant:pat => $msg:literal),* $(,)?) => {
        impl std::fmt::Display for UriError {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                use UriError::*;
                match self {
                    $($variant => f.write_str($msg),)*
                }
            }
        }
    };
}

gen_error! {
    Incomplete => "URI incomplete",
    Scheme => "URI scheme invalid",
    Host => "URI host invalid",
    Port => "URI port invalid",
    Path => "URI path contains invalid character",
    Query => "URI query contains invalid character",
    Fragment => "URI fragment contains invalid character",
    Segment => "URI segment invalid",
    Mismatch => "URI scheme, host, or port mismatch",
}

impl std::error::Error for UriError { }

impl std::fmt::Debug for UriError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}
