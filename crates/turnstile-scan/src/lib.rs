//! Palindrome detection and token marking.
//!
//! Detection is a pure function over one row's joined text; marking
//! rewrites tokens in place. Both halves are deterministic, so running
//! detection twice on the same text always yields the same set in the
//! same order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use indexmap::IndexSet;

/// Distinct palindromic substrings of `text`, in discovery order.
///
/// Enumeration walks start index ascending, then length ascending, so
/// overlapping palindromes are all visited and the set's iteration
/// order is the leftmost-shortest-first discovery order. Substrings
/// shorter than two characters are never reported. Comparison is
/// `char`-based, so multi-byte text cannot split a code point.
///
/// Cubic in the row length, which stays short in practice.
pub fn find_palindromes(text: &str) -> IndexSet<String> {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let mut found = IndexSet::new();
    for start in 0..n {
        for end in (start + 2)..=n {
            let window = &chars[start..end];
            if is_palindrome(window) {
                found.insert(window.iter().collect());
            }
        }
    }
    found
}

/// True if `chars` reads identically forward and backward.
fn is_palindrome(chars: &[char]) -> bool {
    let n = chars.len();
    (0..n / 2).all(|i| chars[i] == chars[n - 1 - i])
}

/// Replace every token that starts with any of `palindromes` by
/// `marker`, returning how many tokens changed.
///
/// Match order is irrelevant: the replacement value is the same for
/// every hit, so re-matching an already-marked token is a no-op.
pub fn mark_tokens(tokens: &mut [String], palindromes: &IndexSet<String>, marker: &str) -> usize {
    let mut replaced = 0;
    for token in tokens.iter_mut() {
        if palindromes.iter().any(|p| token.starts_with(p.as_str())) {
            *token = marker.to_owned();
            replaced += 1;
        }
    }
    replaced
}
