//! Utilities for percent-encoding.
//!
//! Component values in this crate store *decoded* text; these functions are
//! the codec applied at the serialization and parsing boundaries. Encoding is
//! driven by an allow [`Table`] per component, with uppercase hex and two
//! special cases from the source data model:
//!
//! - U+0000 encodes as the two-byte modified-UTF-8 form `%C0%80`;
//! - decoding maps `%C0%80` back to U+0000 and every other invalid octet
//!   sequence to U+FFFD.
//!
//! # Examples
//!
//! ```
//! use pliant_uri::encoding::{decode, encode, table};
//!
//! assert_eq!(encode("te st", table::QUERY), "te%20st");
//! assert_eq!(decode("te%20st")?, "te st");
//! assert_eq!(encode("\0", table::PCHAR), "%C0%80");
//! assert_eq!(decode("%C0%80")?, "\0");
//! # Ok::<_, pliant_uri::ParseError>(())
//! ```

pub mod table;
pub(crate) mod utf8;

use crate::error::{ParseError, ParseErrorKind};
use std::borrow::Cow;
use std::fmt;
use table::{Table, HEX_TABLE};
use utf8::Utf8Acc;

const fn gen_octet_table() -> [u8; 256] {
    let mut out = [0xFF; 256];

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i;
        out[(i - 10 + b'a') as usize] = i;
        i += 1;
    }
    out
}

static OCTET_TABLE: &[u8; 256] = &gen_octet_table();

/// Decodes a single hex digit, with `0xFF` marking a non-hex byte.
#[inline]
pub(crate) fn hex_value(b: u8) -> Option<u8> {
    match OCTET_TABLE[b as usize] {
        0xFF => None,
        v => Some(v),
    }
}

/// Percent-encodes a decoded string with the given allow table.
///
/// Allowed ASCII bytes pass through verbatim; everything else is emitted as
/// percent-encoded UTF-8 octets with uppercase hex digits, except that U+0000
/// becomes `%C0%80`.
pub fn encode<'a>(s: &'a str, table: &Table) -> Cow<'a, str> {
    if s.bytes().all(|b| table.allows(b)) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 2);
    for ch in s.chars() {
        encode_char(ch, table, &mut out);
    }
    Cow::Owned(out)
}

fn encode_char(ch: char, table: &Table, out: &mut String) {
    if ch == '\0' {
        out.push_str("%C0%80");
    } else {
        let mut buf = [0; 4];
        for &b in ch.encode_utf8(&mut buf).as_bytes() {
            table.encode(b, out);
        }
    }
}

/// Writes the encoded form of a decoded string into a formatter sink.
pub(crate) fn encode_to<W: fmt::Write>(s: &str, table: &Table, w: &mut W) -> fmt::Result {
    for ch in s.chars() {
        if ch == '\0' {
            w.write_str("%C0%80")?;
        } else {
            let mut buf = [0; 4];
            for &b in ch.encode_utf8(&mut buf).as_bytes() {
                if table.allows(b) {
                    w.write_char(b as char)?;
                } else {
                    w.write_char('%')?;
                    w.write_char(HEX_TABLE[b as usize * 2] as char)?;
                    w.write_char(HEX_TABLE[b as usize * 2 + 1] as char)?;
                }
            }
        }
    }
    Ok(())
}

/// Percent-decodes a string.
///
/// Each `%XX` triplet becomes one octet and the octets are reassembled as
/// UTF-8; other characters pass through. Invalid sequences decode to U+FFFD,
/// so `decode` only fails on a malformed triplet, with the error index at the
/// percent character.
pub fn decode(s: &str) -> Result<Cow<'_, str>, ParseError> {
    if !s.as_bytes().contains(&b'%') {
        return Ok(Cow::Borrowed(s));
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut acc = Utf8Acc::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let octet = match (bytes.get(i + 1), bytes.get(i + 2)) {
                (Some(&hi), Some(&lo)) => match (hex_value(hi), hex_value(lo)) {
                    (Some(hi), Some(lo)) => hi << 4 | lo,
                    _ => return Err(ParseError::new(i, ParseErrorKind::InvalidOctet)),
                },
                _ => return Err(ParseError::new(i, ParseErrorKind::InvalidOctet)),
            };
            acc.push(octet, &mut out);
            i += 3;
        } else {
            acc.push(b, &mut out);
            i += 1;
        }
    }
    acc.finish(&mut out);
    Ok(Cow::Owned(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_borrows_when_clean() {
        assert!(matches!(encode("abc123", table::PCHAR), Cow::Borrowed(_)));
        assert!(matches!(encode("a b", table::PCHAR), Cow::Owned(_)));
    }

    #[test]
    fn encode_uses_uppercase_hex() {
        assert_eq!(encode("a b", table::PCHAR), "a%20b");
        assert_eq!(encode("测", table::PCHAR), "%E6%B5%8B");
        assert_eq!(encode("/", table::PCHAR), "%2F");
    }

    #[test]
    fn decode_rejects_bad_octets() {
        let e = decode("a%zzb").unwrap_err();
        assert_eq!(e.index(), 1);
        assert_eq!(e.kind(), ParseErrorKind::InvalidOctet);
        let e = decode("abc%4").unwrap_err();
        assert_eq!(e.index(), 3);
    }

    #[test]
    fn decode_replaces_invalid_sequences() {
        assert_eq!(decode("%E6%B5").unwrap(), "\u{FFFD}");
        assert_eq!(decode("%ED%A0%80").unwrap(), "\u{FFFD}\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn decode_passes_raw_text_through() {
        assert_eq!(decode("no escapes").unwrap(), "no escapes");
        assert_eq!(decode("mixed 测 %E6%B5%8B").unwrap(), "mixed 测 测");
    }

    #[test]
    fn round_trip() {
        for s in ["", "plain", "te st", "测试", "a/b?c#d", "\0mid\0"] {
            let enc = encode(s, table::PCHAR);
            assert_eq!(decode(&enc).unwrap(), s);
        }
    }
}
