//! Character classes and the percent-encoder shared by all textual components.
//!
//! Every filter works the same way: characters allowed by the component's
//! [`CharClass`] are copied through, a `%` followed by two hex digits is kept
//! as an existing escape, and everything else (including a lone `%`) is
//! percent-encoded octet by octet.
//!
//! ```text
//! unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~" / <Unicode letter>
//! sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
//! ```

use std::borrow::Cow;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// A set of characters that may appear unencoded in a URI component.
///
/// ASCII membership is a bitmap. Non-ASCII characters are allowed when they
/// are alphabetic and not numeric, which approximates the Unicode letter
/// categories (`L*`) of `unreserved`.
///
/// # Examples
///
/// ```
/// use uri_value::CharClass;
///
/// assert!(CharClass::PATH.allows('/'));
/// assert!(!CharClass::USER_INFO.allows(':'));
/// assert!(CharClass::QUERY.allows('é'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClass(u128);

impl CharClass {
    /// `ALPHA / DIGIT / "-" / "." / "_" / "~"`
    pub const UNRESERVED: Self = Self::range(b'a', b'z')
        .or(Self::range(b'A', b'Z'))
        .or(Self::range(b'0', b'9'))
        .or(Self::new(b"-._~"));

    /// `"!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
    pub const SUB_DELIMS: Self = Self::new(b"!$&'()*+,;=");

    /// Characters left raw in user info: `unreserved / sub-delims`.
    pub const USER_INFO: Self = Self::UNRESERVED.or(Self::SUB_DELIMS);

    /// Characters left raw in a path.
    ///
    /// A path keeps `: @ & = + $ , / ; ( )` but encodes the remaining
    /// sub-delims (`! ' *`).
    pub const PATH: Self = Self::UNRESERVED.or(Self::new(b":@&=+$,/;()"));

    /// `*( pchar / "/" / "?" )` per RFC 3986 §3.4.
    pub const QUERY: Self = Self::UNRESERVED
        .or(Self::SUB_DELIMS)
        .or(Self::new(b":@/?"));

    /// Same production as [`CharClass::QUERY`], per RFC 3986 §3.5.
    pub const FRAGMENT: Self = Self::QUERY;

    /// Creates a class from a list of ASCII bytes.
    ///
    /// Only used to build the constants above, so a non-ASCII byte or `%`
    /// fails const evaluation.
    const fn new(mut bytes: &[u8]) -> Self {
        let mut bits = 0u128;
        while let [cur, rem @ ..] = bytes {
            assert!(*cur < 128 && *cur != b'%', "class must be ASCII and exclude %");
            bits |= 1u128 << *cur;
            bytes = rem;
        }
        Self(bits)
    }

    const fn range(lo: u8, hi: u8) -> Self {
        let mut bits = 0u128;
        let mut b = lo;
        while b <= hi {
            bits |= 1u128 << b;
            b += 1;
        }
        Self(bits)
    }

    /// Returns a class allowing everything `self` or `other` allows.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Checks whether `ch` may appear unencoded.
    #[inline]
    #[must_use]
    pub fn allows(self, ch: char) -> bool {
        if ch.is_ascii() {
            self.0 & (1u128 << u32::from(ch)) != 0
        } else {
            ch.is_alphabetic() && !ch.is_numeric()
        }
    }
}

/// Percent-encodes every character of `input` not allowed by `class`.
///
/// Existing `%XX` escapes are preserved, so encoding is idempotent and never
/// double-encodes. A `%` not followed by two hex digits becomes `%25`.
/// Returns the input unchanged (borrowed) when nothing needs encoding.
///
/// # Examples
///
/// ```
/// use uri_value::{encode, CharClass};
///
/// assert_eq!(encode("foo:bar", CharClass::USER_INFO), "foo%3Abar");
/// assert_eq!(encode("%41%ZZ", CharClass::USER_INFO), "%41%25ZZ");
/// assert_eq!(encode("a b", CharClass::PATH), "a%20b");
/// ```
#[must_use]
pub fn encode(input: &str, class: CharClass) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let mut out: Option<String> = None;

    for (i, c) in input.char_indices() {
        let keep = if c == '%' {
            is_escape_at(bytes, i)
        } else {
            class.allows(c)
        };

        if keep {
            if let Some(buf) = out.as_mut() {
                buf.push(c);
            }
            continue;
        }

        let buf = out.get_or_insert_with(|| {
            let mut buf = String::with_capacity(input.len() + 8);
            buf.push_str(&input[..i]);
            buf
        });
        push_encoded(buf, c);
    }

    out.map_or(Cow::Borrowed(input), Cow::Owned)
}

/// Returns true if `input` is already in encoded form for `class`.
///
/// Equivalent to `encode(input, class)` returning the input unchanged.
#[must_use]
pub fn is_encoded(input: &str, class: CharClass) -> bool {
    let bytes = input.as_bytes();
    input.char_indices().all(|(i, c)| {
        if c == '%' {
            is_escape_at(bytes, i)
        } else {
            class.allows(c)
        }
    })
}

fn is_escape_at(bytes: &[u8], i: usize) -> bool {
    matches!(
        bytes.get(i + 1..i + 3),
        Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
    )
}

fn push_encoded(buf: &mut String, c: char) {
    let mut utf8 = [0u8; 4];
    for &b in c.encode_utf8(&mut utf8).as_bytes() {
        buf.push('%');
        buf.push(HEX_UPPER[usize::from(b >> 4)] as char);
        buf.push(HEX_UPPER[usize::from(b & 0x0f)] as char);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_is_never_encoded() {
        let s = "AZaz09-._~";
        assert!(matches!(encode(s, CharClass::USER_INFO), Cow::Borrowed(_)));
        assert!(matches!(encode(s, CharClass::PATH), Cow::Borrowed(_)));
        assert!(matches!(encode(s, CharClass::QUERY), Cow::Borrowed(_)));
    }

    #[test]
    fn user_info_encodes_gen_delims() {
        assert_eq!(encode("foo:bar", CharClass::USER_INFO), "foo%3Abar");
        assert_eq!(encode("user@example.com", CharClass::USER_INFO), "user%40example.com");
        assert_eq!(encode("a/b", CharClass::USER_INFO), "a%2Fb");
    }

    #[test]
    fn user_info_keeps_sub_delims() {
        assert_eq!(encode("!$&'()*+,;=", CharClass::USER_INFO), "!$&'()*+,;=");
    }

    #[test]
    fn valid_escape_is_not_double_encoded() {
        assert_eq!(encode("%25", CharClass::USER_INFO), "%25");
        assert_eq!(encode("%2f%2F", CharClass::PATH), "%2f%2F");
    }

    #[test]
    fn lone_percent_is_encoded() {
        assert_eq!(encode("%ZZ", CharClass::USER_INFO), "%25ZZ");
        assert_eq!(encode("%", CharClass::PATH), "%25");
        assert_eq!(encode("100%", CharClass::QUERY), "100%25");
        assert_eq!(encode("%4", CharClass::QUERY), "%254");
    }

    #[test]
    fn path_encodes_some_sub_delims() {
        assert_eq!(encode("a!b", CharClass::PATH), "a%21b");
        assert_eq!(encode("a*b'c", CharClass::PATH), "a%2Ab%27c");
        assert_eq!(encode("/a(b);c=d", CharClass::PATH), "/a(b);c=d");
    }

    #[test]
    fn query_keeps_question_mark_and_slash() {
        assert_eq!(encode("a=b?c/d", CharClass::QUERY), "a=b?c/d");
        assert_eq!(encode("a b", CharClass::QUERY), "a%20b");
        assert_eq!(encode("a#b", CharClass::QUERY), "a%23b");
    }

    #[test]
    fn unicode_letters_stay_raw() {
        assert_eq!(encode("/café", CharClass::PATH), "/café");
        assert_eq!(encode("ключ", CharClass::QUERY), "ключ");
    }

    #[test]
    fn letter_numbers_are_encoded() {
        assert!(!CharClass::PATH.allows('\u{216B}'));
        assert!(!CharClass::QUERY.allows('\u{2160}'));
        assert_eq!(encode("\u{216B}", CharClass::PATH), "%E2%85%AB");
        assert!(CharClass::PATH.allows('\u{00E9}'));
    }

    #[test]
    fn non_letter_unicode_is_utf8_encoded() {
        assert_eq!(encode("€", CharClass::PATH), "%E2%82%AC");
        assert_eq!(encode("a\u{1F600}", CharClass::FRAGMENT), "a%F0%9F%98%80");
    }

    #[test]
    fn encoding_is_idempotent() {
        let once = encode("/a b/%zz/€", CharClass::PATH).into_owned();
        assert_eq!(encode(&once, CharClass::PATH), once);
        assert!(is_encoded(&once, CharClass::PATH));
    }

    #[test]
    fn is_encoded_rejects_raw_characters() {
        assert!(!is_encoded("a b", CharClass::QUERY));
        assert!(!is_encoded("%g0", CharClass::QUERY));
        assert!(is_encoded("", CharClass::QUERY));
    }

    #[test]
    fn class_membership() {
        assert!(CharClass::SUB_DELIMS.allows('!'));
        assert!(!CharClass::SUB_DELIMS.allows('a'));
        assert!(!CharClass::PATH.allows('?'));
        assert!(!CharClass::PATH.allows('#'));
        assert!(CharClass::QUERY.allows('?'));
        assert!(!CharClass::QUERY.allows('#'));
        assert!(!CharClass::UNRESERVED.allows('%'));
    }
}
