macro_rules! byte_map {
    {
        $(#[$meta:meta])*
        $vis:vis const fn $fn_id:ident(
            default: $def:literal,
            $(true: $pat:pat,)?
        );
    } => {
        $(#[$meta])*
        $vis const fn $fn_id(byte: u8) -> bool {
            const PAT: [bool; 256] = {
                let mut bytes = [$def; 256];
                let mut byte;
                $(
                    byte = 0;
                    loop {
                        if matches!(byte, $pat) {
                            bytes[byte as usize] = true;
                        }
                        if byte == 255 {
                            break;
                        }
                        byte += 1;
                    }
                )?
                bytes
            };
            PAT[byte as usize]
        }
    };
}

// ===== parser classes =====

byte_map! {
    #[inline(always)]
    pub const fn is_hex(
        default: false,
        true: b'a'..=b'f' | b'A'..=b'F' | b'0'..=b'9',
    );
}

byte_map! {
    /// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
    #[inline(always)]
    pub const fn is_scheme(
        default: false,
        true:
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' |
            b'+' | b'-' | b'.',
    );
}

byte_map! {
    /// Bytes that may appear in an authority token before its role (user,
    /// password or host) is known. Hosts keep the unreserved set plus
    /// `$%&'()*+,-.!;=_~`; the `%` is only transient, a completed host
    /// containing one is rejected.
    #[inline(always)]
    pub const fn is_authority(
        default: false,
        true:
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' |
            b'%' |
            b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b'!' | b';' | b'=',
    );
}

byte_map! {
    /// hex / ":" / "."
    #[inline(always)]
    pub const fn is_ipv6(
        default: false,
        true:
            b'a'..=b'f' | b'A'..=b'F' | b'0'..=b'9' |
            b':' |
            b'.',
    );
}

byte_map! {
    /// pchar widened by `^ | [ ] { }`.
    ///
    /// pchar   = unreserved / pct-encoded / sub-delims / ":" / "@"
    /// segment = *pchar
    #[inline(always)]
    pub const fn is_segment(
        default: false,
        true:
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' |
            b'%' |
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' |
            b':' |
            b'@' |
            b'^' | b'|' | b'[' | b']' | b'{' | b'}',
    );
}

byte_map! {
    /// query = *( pchar / "/" / "?" ), widened by `^ | [ ] { }`.
    #[inline(always)]
    pub const fn is_query(
        default: false,
        true:
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' |
            b'%' |
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' |
            b':' |
            b'@' |
            b'^' | b'|' | b'[' | b']' | b'{' | b'}' |
            b'/' |
            b'?',
    );
}

byte_map! {
    /// Query class plus "#": a fragment runs to the end of input, later
    /// number signs are literal.
    #[inline(always)]
    pub const fn is_fragment(
        default: false,
        true:
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' |
            b'%' |
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' |
            b':' |
            b'@' |
            b'^' | b'|' | b'[' | b']' | b'{' | b'}' |
            b'/' |
            b'?' |
            b'#',
    );
}

// ===== encoder safe classes =====
//
// Bytes emitted literally by the encoder for each uri part. Space is not
// in any class, it is handled upfront and becomes "+". Everything outside
// the class becomes "%HH" per UTF-8 byte.

byte_map! {
    /// ALPHA / DIGIT / "'" / "(" / ")" / "*" / "-" / "." / "_" / "!"
    #[inline(always)]
    pub const fn is_safe(
        default: false,
        true:
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' |
            b'\'' | b'(' | b')' | b'*' | b'-' | b'.' | b'_' | b'!',
    );
}

byte_map! {
    /// Safe class plus "&" / "=".
    #[inline(always)]
    pub const fn is_safe_userinfo(
        default: false,
        true:
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' |
            b'\'' | b'(' | b')' | b'*' | b'-' | b'.' | b'_' | b'!' |
            b'&' | b'=',
    );
}

byte_map! {
    /// Safe class plus "@" / "^".
    #[inline(always)]
    pub const fn is_safe_segment(
        default: false,
        true:
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' |
            b'\'' | b'(' | b')' | b'*' | b'-' | b'.' | b'_' | b'!' |
            b'@' | b'^',
    );
}

byte_map! {
    /// Segment class plus "/" / ":" / "~" / "$" / "," / ";" / "|".
    #[inline(always)]
    pub const fn is_safe_query(
        default: false,
        true:
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' |
            b'\'' | b'(' | b')' | b'*' | b'-' | b'.' | b'_' | b'!' |
            b'@' | b'^' |
            b'/' | b':' | b'~' | b'$' | b',' | b';' | b'|',
    );
}

byte_map! {
    /// Query class plus "#".
    #[inline(always)]
    pub const fn is_safe_fragment(
        default: false,
        true:
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' |
            b'\'' | b'(' | b')' | b'*' | b'-' | b'.' | b'_' | b'!' |
            b'@' | b'^' |
            b'/' | b':' | b'~' | b'$' | b',' | b';' | b'|' |
            b'#',
    );
}
