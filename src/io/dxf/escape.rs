//! `\U+XXXX` escaping for pre-R2007 text values
//!
//! Code points outside the BMP are written as a UTF-16 surrogate pair of
//! escapes and recombined on read.

use std::fmt::Write;

const ESCAPE_PREFIX: &str = "\\U+";

/// Replace every code point >= 128 with its `\U+HHHH` form.
///
/// ASCII text passes through unchanged.
pub fn escape_unicode(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut units = [0u16; 2];
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        for unit in ch.encode_utf16(&mut units) {
            // writing to a String cannot fail
            let _ = write!(out, "\\U+{:04X}", unit);
        }
    }
    out
}

/// Decode every `\U+HHHH` sequence.
///
/// A sequence whose four characters after `\U+` are not hex digits
/// becomes `?`; a backslash not followed by `U+` is copied as-is.
pub fn unescape_unicode(text: &str) -> String {
    if !text.contains(ESCAPE_PREFIX) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut pending_high: Option<u16> = None;

    while let Some(pos) = rest.find('\\') {
        let (before, tail) = rest.split_at(pos);
        if !before.is_empty() {
            flush_high(&mut out, &mut pending_high);
            out.push_str(before);
        }

        if !tail.starts_with(ESCAPE_PREFIX) {
            flush_high(&mut out, &mut pending_high);
            out.push('\\');
            rest = &tail[1..];
            continue;
        }

        let digits = &tail[ESCAPE_PREFIX.len()..];
        let hex_len: usize = digits.chars().take(4).map(char::len_utf8).sum();
        let hex = &digits[..hex_len];
        if hex.chars().count() < 4 {
            // truncated sequence at end of value: copy verbatim
            flush_high(&mut out, &mut pending_high);
            out.push_str(tail);
            rest = "";
            continue;
        }

        match parse_hex4(hex) {
            Some(unit) => push_unit(&mut out, &mut pending_high, unit),
            None => {
                flush_high(&mut out, &mut pending_high);
                out.push('?');
            }
        }
        rest = &digits[hex_len..];
    }

    flush_high(&mut out, &mut pending_high);
    out.push_str(rest);
    out
}

fn parse_hex4(hex: &str) -> Option<u16> {
    if hex.len() != 4 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}

fn push_unit(out: &mut String, pending_high: &mut Option<u16>, unit: u16) {
    match unit {
        0xD800..=0xDBFF => {
            flush_high(out, pending_high);
            *pending_high = Some(unit);
        }
        0xDC00..=0xDFFF => match pending_high.take() {
            Some(high) => {
                let decoded = char::decode_utf16([high, unit])
                    .next()
                    .and_then(|r| r.ok())
                    .unwrap_or('?');
                out.push(decoded);
            }
            None => out.push('?'),
        },
        _ => {
            flush_high(out, pending_high);
            out.push(char::from_u32(unit as u32).unwrap_or('?'));
        }
    }
}

/// A high surrogate with no low partner cannot be represented.
fn flush_high(out: &mut String, pending_high: &mut Option<u16>) {
    if pending_high.take().is_some() {
        out.push('?');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_latin() {
        assert_eq!(escape_unicode("Repère pièce"), "Rep\\U+00E8re pi\\U+00E8ce");
    }

    #[test]
    fn test_unescape_latin() {
        assert_eq!(unescape_unicode("Rep\\U+00E8re pi\\U+00E8ce"), "Repère pièce");
        assert_eq!(unescape_unicode("\\U+4F60\\U+597D"), "你好");
    }

    #[test]
    fn test_unescape_invalid_hex() {
        assert_eq!(unescape_unicode("a\\U+XYZWb"), "a?b");
    }

    #[test]
    fn test_unescape_other_backslashes() {
        assert_eq!(unescape_unicode("C:\\path\\U+0041"), "C:\\pathA");
        assert_eq!(unescape_unicode("tail\\U+00"), "tail\\U+00");
        assert_eq!(unescape_unicode("\\P"), "\\P");
    }

    #[test]
    fn test_astral_round_trip() {
        let escaped = escape_unicode("😀");
        assert_eq!(escaped, "\\U+D83D\\U+DE00");
        assert_eq!(unescape_unicode(&escaped), "😀");
    }

    #[test]
    fn test_lone_surrogate() {
        assert_eq!(unescape_unicode("\\U+D83Dx"), "?x");
        assert_eq!(unescape_unicode("\\U+DE00"), "?");
    }

    proptest! {
        #[test]
        fn escape_then_unescape_is_identity(s in "\\PC*") {
            prop_assume!(!s.contains(ESCAPE_PREFIX));
            prop_assert_eq!(unescape_unicode(&escape_unicode(&s)), s);
        }

        #[test]
        fn escape_is_identity_for_ascii(s in "[ -~]*") {
            prop_assert_eq!(escape_unicode(&s), s);
        }

        #[test]
        fn escaped_output_is_ascii(s in "\\PC*") {
            prop_assert!(escape_unicode(&s).is_ascii());
        }
    }
}
