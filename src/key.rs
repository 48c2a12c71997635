//! Keys: the `Keyed` capability and case-insensitive comparison/hashing.
//!
//! Keys are compared one char at a time: each char is mapped to upper case,
//! then to lower case, and the results must be equal. Only single-char
//! mappings apply, so a key never changes length when folded. Hashing feeds
//! the same folded chars, so two keys that compare equal always hash equal.

use core::hash::Hasher;
use std::rc::Rc;

/// A value that knows its own key.
///
/// The table only calls this while rehashing, to rebuild each entry in the
/// resized array. It must match, ignoring case, the key the value was
/// inserted under.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl<T: Keyed + ?Sized> Keyed for &T {
    fn key(&self) -> &str {
        (**self).key()
    }
}

impl<T: Keyed + ?Sized> Keyed for Box<T> {
    fn key(&self) -> &str {
        (**self).key()
    }
}

impl<T: Keyed + ?Sized> Keyed for Rc<T> {
    fn key(&self) -> &str {
        (**self).key()
    }
}

/// Upper case when that is a single char, then the first char of the lower
/// case. `'ς'`, `'σ'` and `'Σ'` all fold to `'σ'`; `'İ'`, `'ı'` and `'I'`
/// fold to `'i'`; `'ß'` stays `'ß'`.
#[inline]
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    let u = match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    };
    u.to_lowercase().next().unwrap_or(u)
}

#[inline]
fn folded(key: &str) -> impl Iterator<Item = char> + '_ {
    key.chars().map(fold_char)
}

/// Case-insensitive key equality used for every lookup and duplicate check.
///
/// Two keys match when they have the same number of chars and each pair of
/// chars folds to the same char (see the module docs).
pub fn keys_match(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    folded(a).eq(folded(b))
}

/// Feed the case-folded form of `key` into `state`.
pub(crate) fn hash_folded<H: Hasher>(key: &str, state: &mut H) {
    for c in folded(key) {
        state.write_u32(c as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::BuildHasher;
    use hashbrown::hash_map::DefaultHashBuilder;

    fn folded_hash(s: &DefaultHashBuilder, key: &str) -> u64 {
        let mut state = s.build_hasher();
        hash_folded(key, &mut state);
        state.finish()
    }

    #[test]
    fn ascii_case_is_ignored() {
        assert!(keys_match("ABC", "abc"));
        assert!(keys_match("isbn-9780", "ISBN-9780"));
        assert!(!keys_match("abc", "abd"));
        assert!(!keys_match("abc", "abcd"));
        assert!(keys_match("", ""));
    }

    #[test]
    fn unicode_case_is_ignored() {
        assert!(keys_match("ÉCOLE", "école"));
        assert!(keys_match("Straße", "STRAßE"));
        assert!(!keys_match("école", "ecole"));
    }

    #[test]
    fn folds_char_by_char() {
        assert!(keys_match("ΟΔΟΣ", "οδος"));
        assert!(keys_match("οδος", "οδοσ"));
        assert!(keys_match("İSTANBUL", "istanbul"));
        assert!(keys_match("ıi", "II"));
        assert!(keys_match("\u{212A}elvin", "kelvin"));
        // 'ß' has no single-char upper case, so it never matches "SS".
        assert!(!keys_match("straße", "STRASSE"));
        assert!(keys_match("ß", "ẞ"));
    }

    /// Invariant: matching keys produce identical hashes.
    #[test]
    fn matching_keys_hash_equal() {
        let s = DefaultHashBuilder::default();
        for (a, b) in [
            ("ABC", "abc"),
            ("ÉCOLE", "école"),
            ("x1Y2", "X1y2"),
            ("οδος", "ΟΔΟΣ"),
            ("İ", "i"),
        ] {
            assert!(keys_match(a, b));
            assert_eq!(folded_hash(&s, a), folded_hash(&s, b));
        }
        assert_ne!(folded_hash(&s, "abc"), folded_hash(&s, "abd"));
    }

    #[test]
    fn keyed_forwards_through_pointers() {
        struct Code(&'static str);
        impl Keyed for Code {
            fn key(&self) -> &str {
                self.0
            }
        }

        let c = Code("409801");
        assert_eq!((&c).key(), "409801");
        assert_eq!(Box::new(Code("a")).key(), "a");
        assert_eq!(Rc::new(Code("b")).key(), "b");
    }
}
