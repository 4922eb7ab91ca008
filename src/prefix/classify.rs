//! Byte classification for the prefixing tokenizer.
//!
//! All delimiters the tokenizer reacts to are single-byte ASCII, so UTF-8
//! continuation bytes never match any of these predicates.

/// ASCII letters, `-` and `_`.
#[inline]
pub const fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'-' || b == b'_'
}

/// Name characters plus `!`, so that `<!--` and `<!DOCTYPE` read as tag names.
#[inline]
pub const fn is_tag_char(b: u8) -> bool {
    is_name_char(b) || b == b'!'
}

/// Space, tab, CR, LF.
#[inline]
pub const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
pub const fn is_non_whitespace(b: u8) -> bool {
    !is_whitespace(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_chars() {
        for b in b"abcXYZ-_" {
            assert!(is_name_char(*b), "{}", *b as char);
        }
        for b in b"0129!:./=\"' >" {
            assert!(!is_name_char(*b), "{}", *b as char);
        }
    }

    #[test]
    fn test_tag_chars_admit_bang() {
        assert!(is_tag_char(b'!'));
        assert!(is_tag_char(b'-'));
        assert!(!is_tag_char(b'/'));
        assert!(!is_tag_char(b'>'));
    }

    #[test]
    fn test_whitespace() {
        for b in b" \t\r\n" {
            assert!(is_whitespace(*b));
            assert!(!is_non_whitespace(*b));
        }
        // form feed is not treated as whitespace
        assert!(!is_whitespace(0x0c));
        assert!(is_non_whitespace(b'a'));
    }

    #[test]
    fn test_utf8_continuation_bytes_are_inert() {
        for b in "é漢".as_bytes() {
            assert!(!is_tag_char(*b));
            assert!(!is_whitespace(*b));
        }
    }
}
