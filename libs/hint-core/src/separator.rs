//! Separator classification.
//!
//! Separators are revealed for free while hinting: they never count as the
//! hinted letter and stay visible in masked output.

/// Punctuation treated as a separator in every target.
pub const DEFAULT_SEPARATORS: &[char] = &[
    '-',
    '\u{2011}', // non-breaking hyphen
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\'',
    '\u{2019}', // right single quotation mark
    '.',
    ',',
];

/// Built-in separators plus any configured extras.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeparatorSet {
    extra: Vec<char>,
}

impl SeparatorSet {
    /// Create a set with additional separator characters.
    pub fn with_extra(extra: &[char]) -> Self {
        let mut extra = extra.to_vec();
        extra.sort_unstable();
        extra.dedup();
        Self { extra }
    }

    /// Whether `c` is revealed without counting as a hinted letter.
    pub fn contains(&self, c: char) -> bool {
        c.is_whitespace() || DEFAULT_SEPARATORS.contains(&c) || self.extra.binary_search(&c).is_ok()
    }
}
