use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Word tokens of two or more word characters. The same rule applies at
    // index build time and at query time.
    static ref RE: Regex = Regex::new(r"(?u)\w\w+").expect("valid regex");
}

/// Tokenize text into lowercase word tokens using NFKC normalization.
/// Single-character tokens are dropped. No stemming, no stopword removal.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}
