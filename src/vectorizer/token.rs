/// Split a text into terms: lower-case, then split on whitespace.
///
/// Punctuation stays attached and nothing is stemmed, so `"Dog."` and
/// `"dog"` are different terms. Documents and queries go through the same
/// function, which is what keeps them in one vocabulary space.
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
