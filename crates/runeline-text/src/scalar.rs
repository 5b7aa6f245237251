#![forbid(unsafe_code)]

//! Scalar-index to byte-offset translation for UTF-8 text.
//!
//! Every buffer in this workspace addresses text by *scalar index* (the
//! position counted in Unicode scalar values), never by byte offset. This
//! module is the one place where the two are converted:
//!
//! - [`is_scalar_start`] - classify a byte as lead or continuation
//! - [`scalar_count`] - the canonical length function
//! - [`scalar_to_byte_offset`] - locate the i-th scalar in a byte sequence
//! - [`scalar_chunks`] - split a string into per-scalar chunks
//!
//! All scanning routines branch only on [`is_scalar_start`], so a chunk can
//! never begin or end in the middle of a multi-byte encoding.
//!
//! # Example
//! ```
//! use runeline_text::scalar::{scalar_count, scalar_to_byte_offset};
//!
//! let s = "日本語";
//! assert_eq!(scalar_count(s), 3);
//! assert_eq!(scalar_to_byte_offset(s, 1), 3); // 日 is 3 bytes
//! ```

/// True if `byte` begins a new Unicode scalar value.
///
/// A UTF-8 continuation byte has its top two bits set to `10`; every other
/// byte (ASCII or a multi-byte lead) starts a scalar.
#[inline]
#[must_use]
pub const fn is_scalar_start(byte: u8) -> bool {
    (byte & 0xC0) != 0x80
}

/// Encoded length in bytes (1-4) of the scalar whose encoding begins with
/// `lead`.
///
/// `lead` must satisfy [`is_scalar_start`]; the length is derived from the
/// lead-byte bit pattern alone, which is what lets fixed-capacity cluster
/// storage get away without a separate length field.
#[inline]
#[must_use]
pub const fn scalar_len(lead: u8) -> usize {
    debug_assert!(is_scalar_start(lead), "continuation byte has no length");
    if lead < 0x80 {
        1
    } else if lead < 0xE0 {
        2
    } else if lead < 0xF0 {
        3
    } else {
        4
    }
}

/// Count the scalar values in `s`.
///
/// This is the canonical length function: every "how many scalars" question
/// in the workspace routes through here, never through byte length.
#[must_use]
pub fn scalar_count(s: &str) -> usize {
    s.bytes().filter(|&b| is_scalar_start(b)).count()
}

/// Byte offset at which the `scalar_index`-th scalar of `s` begins.
///
/// Index `0` returns `0` without scanning. An index at or beyond the end
/// returns the byte length, i.e. the append point. The end-of-buffer policy
/// for out-of-range indices is deliberate: callers that clamp an insert to
/// an append rely on it.
///
/// # Example
/// ```
/// use runeline_text::scalar::scalar_to_byte_offset;
///
/// assert_eq!(scalar_to_byte_offset("日A本", 0), 0);
/// assert_eq!(scalar_to_byte_offset("日A本", 1), 3);
/// assert_eq!(scalar_to_byte_offset("日A本", 2), 4);
/// assert_eq!(scalar_to_byte_offset("日A本", 99), 7);
/// ```
#[must_use]
pub fn scalar_to_byte_offset(s: &str, scalar_index: usize) -> usize {
    if scalar_index == 0 {
        return 0;
    }

    let bytes = s.as_bytes();
    let mut seen = 0;
    // Byte 0 begins scalar 0, which was handled above; start counting from
    // the second byte.
    for (offset, &b) in bytes.iter().enumerate().skip(1) {
        if is_scalar_start(b) {
            seen += 1;
            if seen == scalar_index {
                return offset;
            }
        }
    }

    bytes.len()
}

/// The first `scalar_index` scalars of `s`.
///
/// Returns the whole string when `scalar_index` is at or past the end,
/// consistent with [`scalar_to_byte_offset`].
#[must_use]
pub fn prefix(s: &str, scalar_index: usize) -> &str {
    &s[..scalar_to_byte_offset(s, scalar_index)]
}

/// Split `s` into scalar-aligned chunks, one per scalar value.
///
/// Each chunk's first byte satisfies [`is_scalar_start`] and none of its
/// interior bytes do. The chunks concatenate back to `s` exactly.
///
/// # Example
/// ```
/// use runeline_text::scalar::scalar_chunks;
///
/// let chunks: Vec<&str> = scalar_chunks("日A語").collect();
/// assert_eq!(chunks, vec!["日", "A", "語"]);
/// ```
#[must_use]
pub fn scalar_chunks(s: &str) -> ScalarChunks<'_> {
    ScalarChunks { rest: s }
}

/// Iterator over the scalar-aligned chunks of a string.
///
/// Created by [`scalar_chunks`].
#[derive(Debug, Clone)]
pub struct ScalarChunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for ScalarChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.rest.as_bytes();
        if bytes.is_empty() {
            return None;
        }

        // Scan forward to the next scalar start; everything before it is one
        // chunk. The boundary falls on a char boundary by definition.
        let mut end = 1;
        while end < bytes.len() && !is_scalar_start(bytes[end]) {
            end += 1;
        }

        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_bytes_are_scalar_starts() {
        for b in 0x00..=0x7F {
            assert!(is_scalar_start(b), "0x{b:02x} should start a scalar");
        }
    }

    #[test]
    fn continuation_bytes_are_not_scalar_starts() {
        for b in 0x80..=0xBF {
            assert!(!is_scalar_start(b), "0x{b:02x} is a continuation byte");
        }
    }

    #[test]
    fn lead_bytes_are_scalar_starts() {
        for b in 0xC0..=0xFF_u8 {
            assert!(is_scalar_start(b), "0x{b:02x} should start a scalar");
        }
    }

    #[test]
    fn scalar_len_per_lead_pattern() {
        assert_eq!(scalar_len(b'a'), 1);
        assert_eq!(scalar_len("é".as_bytes()[0]), 2);
        assert_eq!(scalar_len("日".as_bytes()[0]), 3);
        assert_eq!(scalar_len("🎉".as_bytes()[0]), 4);
    }

    #[test]
    fn count_empty_is_zero() {
        assert_eq!(scalar_count(""), 0);
    }

    #[test]
    fn count_matches_chars() {
        for s in ["abc", "日本語", "aé日🎉", "e\u{0301}"] {
            assert_eq!(scalar_count(s), s.chars().count(), "{s:?}");
        }
    }

    #[test]
    fn combining_marks_count_separately() {
        // One grapheme, two scalar values. Scalar indexing is deliberately
        // blind to grapheme clusters.
        assert_eq!(scalar_count("e\u{0301}"), 2);
    }

    #[test]
    fn offset_zero_is_zero() {
        assert_eq!(scalar_to_byte_offset("", 0), 0);
        assert_eq!(scalar_to_byte_offset("日本語", 0), 0);
    }

    #[test]
    fn offset_walks_multibyte_scalars() {
        let s = "日本語";
        assert_eq!(scalar_to_byte_offset(s, 1), 3);
        assert_eq!(scalar_to_byte_offset(s, 2), 6);
        assert_eq!(scalar_to_byte_offset(s, 3), 9);
    }

    #[test]
    fn offset_past_end_is_byte_length() {
        assert_eq!(scalar_to_byte_offset("abc", 3), 3);
        assert_eq!(scalar_to_byte_offset("abc", 100), 3);
        assert_eq!(scalar_to_byte_offset("日本語", 7), 9);
    }

    #[test]
    fn offset_matches_char_indices() {
        let s = "aé日🎉z";
        for (i, (byte_offset, _)) in s.char_indices().enumerate() {
            assert_eq!(scalar_to_byte_offset(s, i), byte_offset);
        }
    }

    #[test]
    fn prefix_takes_leading_scalars() {
        assert_eq!(prefix("日本語", 0), "");
        assert_eq!(prefix("日本語", 2), "日本");
        assert_eq!(prefix("日本語", 3), "日本語");
        assert_eq!(prefix("日本語", 10), "日本語");
    }

    #[test]
    fn chunks_split_per_scalar() {
        let chunks: Vec<&str> = scalar_chunks("日A本語").collect();
        assert_eq!(chunks, vec!["日", "A", "本", "語"]);
    }

    #[test]
    fn chunks_of_empty_input_yield_nothing() {
        assert_eq!(scalar_chunks("").count(), 0);
    }

    #[test]
    fn chunks_concatenate_back() {
        let s = "aé日🎉 e\u{0301}";
        let joined: String = scalar_chunks(s).collect();
        assert_eq!(joined, s);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn count_agrees_with_chars(s in "\\PC*") {
            prop_assert_eq!(scalar_count(&s), s.chars().count());
        }

        #[test]
        fn offset_lands_on_char_boundary(s in "\\PC*", i in 0usize..64) {
            let offset = scalar_to_byte_offset(&s, i);
            prop_assert!(s.is_char_boundary(offset));
        }

        #[test]
        fn chunks_are_single_scalars(s in "\\PC*") {
            for chunk in scalar_chunks(&s) {
                prop_assert_eq!(scalar_count(chunk), 1);
                prop_assert!(is_scalar_start(chunk.as_bytes()[0]));
                for &b in &chunk.as_bytes()[1..] {
                    prop_assert!(!is_scalar_start(b));
                }
            }
        }

        #[test]
        fn chunk_count_equals_scalar_count(s in "\\PC*") {
            prop_assert_eq!(scalar_chunks(&s).count(), scalar_count(&s));
        }
    }
}
