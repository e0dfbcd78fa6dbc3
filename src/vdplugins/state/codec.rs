//! Percent-encoding for the shareable query representation.
//!
//! `decode(&encode(q)) == q` holds for every string. Decoding is strict: a
//! `%` not followed by two hex digits, or escapes that do not form UTF-8, are
//! errors rather than being passed through.

use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed percent-escape at byte {0}")]
    MalformedEscape(usize),

    #[error("escaped bytes are not valid UTF-8")]
    InvalidUtf8,
}

pub fn encode(query: &str) -> String {
    urlencoding::encode(query).into_owned()
}

pub fn decode(encoded: &str) -> Result<String, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return Err(DecodeError::MalformedEscape(i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(encoded)
        .map(Cow::into_owned)
        .map_err(|_| DecodeError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decodes_spaces() {
        assert_eq!(decode("hello%20world").unwrap(), "hello world");
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode("a b#c%d+e"), "a%20b%23c%25d%2Be");
        assert_eq!(encode("plain-text_1.0~"), "plain-text_1.0~");
    }

    #[test]
    fn plus_is_not_a_space() {
        assert_eq!(decode("a+b").unwrap(), "a+b");
    }

    #[test]
    fn rejects_truncated_escape() {
        assert_eq!(decode("abc%2"), Err(DecodeError::MalformedEscape(3)));
        assert_eq!(decode("%"), Err(DecodeError::MalformedEscape(0)));
    }

    #[test]
    fn rejects_non_hex_escape() {
        assert_eq!(decode("%zzabc"), Err(DecodeError::MalformedEscape(0)));
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert_eq!(decode("%FF%FE"), Err(DecodeError::InvalidUtf8));
    }

    #[test]
    fn unicode_round_trips() {
        let q = "日本語 ünïcödé 🎉";
        assert_eq!(decode(&encode(q)).unwrap(), q);
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(q in any::<String>()) {
            prop_assert_eq!(decode(&encode(&q)).unwrap(), q);
        }
    }
}
