//! Diacritic- and case-insensitive projection of a target string.
//!
//! The projection is built per Unicode scalar value: canonical decomposition,
//! combining marks dropped, lowercased, then optionally folded further for
//! letters whose diacritics have no canonical decomposition. An [`Alignment`]
//! records which raw scalar produced each normalized character so matched
//! prefixes can be mapped back onto the raw text for display.

use crate::separator::SeparatorSet;
use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Folds raw text into its comparison form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    extended_folding: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            extended_folding: true,
        }
    }
}

impl Normalizer {
    /// Create a normalizer, optionally folding letters that NFD leaves intact.
    pub fn new(extended_folding: bool) -> Self {
        Self { extended_folding }
    }

    /// Append the normalized form of a single scalar value to `out`.
    ///
    /// Pure combining marks produce nothing.
    pub fn fold_char(&self, c: char, out: &mut Vec<char>) {
        let extended = self.extended_folding;
        decompose_canonical(c, |d| {
            if is_combining_mark(d) {
                return;
            }
            // Lowercasing can reintroduce marks ('İ' -> "i\u{307}").
            out.extend(
                d.to_lowercase()
                    .filter(|l| !is_combining_mark(*l))
                    .map(|l| if extended { fold_letter(l) } else { l }),
            );
        });
    }

    /// Normalize a whole string. Separators are kept as-is.
    pub fn normalize(&self, s: &str) -> Vec<char> {
        let mut out = Vec::with_capacity(s.len());
        for c in s.chars() {
            self.fold_char(c, &mut out);
        }
        out
    }
}

/// Kazakh Cyrillic letters whose diacritics are not canonical decompositions.
fn fold_letter(c: char) -> char {
    match c {
        'ә' => 'а',
        'ғ' => 'г',
        'қ' => 'к',
        'ң' => 'н',
        'ө' => 'о',
        'ұ' | 'ү' => 'у',
        'һ' => 'х',
        _ => c,
    }
}

/// Outcome of matching learner input against the normalized target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch {
    /// Length of the longest common normalized prefix.
    pub matched: usize,
    /// Length of the normalized input.
    pub input_len: usize,
}

impl PrefixMatch {
    /// Normalized input characters past the matched prefix.
    pub fn mismatched(&self) -> usize {
        self.input_len.saturating_sub(self.matched)
    }
}

/// Normalized form of a target plus the raw <-> normalized index maps.
#[derive(Debug, Clone)]
pub struct Alignment {
    raw: Vec<char>,
    /// Byte offset of each raw scalar, with a trailing entry for the end.
    byte_offsets: Vec<usize>,
    normalized: Vec<char>,
    raw_to_norm: Vec<usize>,
    norm_to_raw: Vec<usize>,
    normalizer: Normalizer,
}

impl Alignment {
    /// Build the alignment for `target`. Never fails; an empty target yields
    /// empty maps.
    pub fn build(target: &str, normalizer: Normalizer) -> Self {
        let char_count = target.chars().count();
        let mut raw = Vec::with_capacity(char_count);
        let mut byte_offsets = Vec::with_capacity(char_count + 1);
        let mut normalized = Vec::with_capacity(char_count);
        let mut raw_to_norm = Vec::with_capacity(char_count);
        let mut norm_to_raw = Vec::with_capacity(char_count);

        for (raw_index, (offset, c)) in target.char_indices().enumerate() {
            raw.push(c);
            byte_offsets.push(offset);

            let cursor = normalized.len();
            raw_to_norm.push(cursor);
            normalizer.fold_char(c, &mut normalized);
            let produced = normalized.len() - cursor;
            norm_to_raw.extend(std::iter::repeat(raw_index).take(produced));
        }
        byte_offsets.push(target.len());

        Self {
            raw,
            byte_offsets,
            normalized,
            raw_to_norm,
            norm_to_raw,
            normalizer,
        }
    }

    /// Number of raw scalar values.
    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }

    /// Number of normalized characters.
    pub fn normalized_len(&self) -> usize {
        self.normalized.len()
    }

    pub fn raw_chars(&self) -> &[char] {
        &self.raw
    }

    pub fn normalized(&self) -> &[char] {
        &self.normalized
    }

    pub fn raw_to_norm(&self) -> &[usize] {
        &self.raw_to_norm
    }

    pub fn norm_to_raw(&self) -> &[usize] {
        &self.norm_to_raw
    }

    pub fn normalizer(&self) -> Normalizer {
        self.normalizer
    }

    /// Byte offset in the target of raw scalar index `raw_index`.
    /// Indices past the end clamp to the target length.
    pub fn byte_offset(&self, raw_index: usize) -> usize {
        let last = self.byte_offsets.len() - 1;
        self.byte_offsets[raw_index.min(last)]
    }

    /// Longest common prefix between the normalized input and the target.
    pub fn matched_prefix(&self, input: &str) -> PrefixMatch {
        let folded = self.normalizer.normalize(input);
        let matched = folded
            .iter()
            .zip(&self.normalized)
            .take_while(|(typed, expected)| typed == expected)
            .count();
        PrefixMatch {
            matched,
            input_len: folded.len(),
        }
    }

    /// Raw index just past the scalar that produced the `n`-th normalized char.
    pub fn raw_index_from_norm_count(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        if n >= self.norm_to_raw.len() {
            return self.raw.len();
        }
        self.skip_marks((self.norm_to_raw[n - 1] + 1).min(self.raw.len()))
    }

    /// Move `pos` past combining marks so a base letter is never shown
    /// without its accents.
    fn skip_marks(&self, mut pos: usize) -> usize {
        while pos < self.raw.len() && is_combining_mark(self.raw[pos]) {
            pos += 1;
        }
        pos
    }

    /// Hint cursor after revealing one more meaningful character.
    ///
    /// Separators in front of that character are revealed along with it. The
    /// result is never below `current`, even if the matched prefix shrank.
    pub fn reveal_next(&self, current: usize, matched: usize, separators: &SeparatorSet) -> usize {
        let mut pos = current.max(self.raw_index_from_norm_count(matched));
        // Marks attached to a separator are revealed with it.
        while pos < self.raw.len()
            && (separators.contains(self.raw[pos]) || is_combining_mark(self.raw[pos]))
        {
            pos += 1;
        }
        if pos < self.raw.len() {
            pos = self.skip_marks(pos + 1);
        }
        current.max(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn norm(s: &str) -> String {
        Normalizer::default().normalize(s).into_iter().collect()
    }

    #[test]
    fn strips_case_and_diacritics() {
        assert_eq!(norm("Café"), "cafe");
        assert_eq!(norm("NAÏVE"), "naive");
        assert_eq!(norm("Ёлка"), "елка");
        assert_eq!(norm("İstanbul"), "istanbul");
    }

    #[test]
    fn keeps_separators() {
        assert_eq!(norm("Ana-Tili, ok."), "ana-tili, ok.");
    }

    #[test]
    fn extended_folding_covers_kazakh_letters() {
        assert_eq!(norm("ӘҒҚҢӨҰҮҺ"), "агкноуух");
        // і is its own letter, not an accented и.
        assert_eq!(norm("І"), "і");
        let plain = Normalizer::new(false);
        assert_eq!(plain.normalize("әже").into_iter().collect::<String>(), "әже");
    }

    #[test]
    fn alignment_for_precomposed_text() {
        let a = Alignment::build("café", Normalizer::default());
        assert_eq!(a.raw_len(), 4);
        assert_eq!(a.normalized(), &['c', 'a', 'f', 'e']);
        assert_eq!(a.raw_to_norm(), &[0, 1, 2, 3]);
        assert_eq!(a.norm_to_raw(), &[0, 1, 2, 3]);
    }

    #[test]
    fn combining_mark_inherits_cursor() {
        let a = Alignment::build("cafe\u{301}s", Normalizer::default());
        assert_eq!(a.raw_len(), 6);
        assert_eq!(a.normalized_len(), 5);
        assert_eq!(a.raw_to_norm(), &[0, 1, 2, 3, 4, 4]);
        assert_eq!(a.norm_to_raw(), &[0, 1, 2, 3, 5]);
        // Matching "cafe" covers the trailing mark too.
        assert_eq!(a.raw_index_from_norm_count(4), 5);
    }

    #[test]
    fn multi_char_decomposition_maps_back_to_one_scalar() {
        // Hangul syllables decompose canonically into several jamo.
        let a = Alignment::build("한국", Normalizer::default());
        assert_eq!(a.raw_len(), 2);
        assert_eq!(a.normalized_len(), 6);
        assert_eq!(a.norm_to_raw(), &[0, 0, 0, 1, 1, 1]);
        assert_eq!(a.raw_to_norm(), &[0, 3]);
        assert_eq!(a.raw_index_from_norm_count(1), 1);
        assert_eq!(a.raw_index_from_norm_count(4), 2);
    }

    #[test]
    fn empty_target() {
        let a = Alignment::build("", Normalizer::default());
        assert_eq!(a.raw_len(), 0);
        assert_eq!(a.normalized_len(), 0);
        assert_eq!(a.byte_offset(0), 0);
        assert_eq!(a.raw_index_from_norm_count(3), 0);
        assert_eq!(a.matched_prefix("abc"), PrefixMatch { matched: 0, input_len: 3 });
    }

    #[test]
    fn byte_offsets_follow_scalars() {
        let a = Alignment::build("әже", Normalizer::default());
        assert_eq!(a.byte_offset(0), 0);
        assert_eq!(a.byte_offset(1), 2);
        assert_eq!(a.byte_offset(3), 6);
        assert_eq!(a.byte_offset(10), 6);
    }

    #[test]
    fn matched_prefix_stops_at_first_mismatch() {
        let a = Alignment::build("Ana tili", Normalizer::default());
        assert_eq!(a.matched_prefix("ana"), PrefixMatch { matched: 3, input_len: 3 });
        assert_eq!(a.matched_prefix("anx ti"), PrefixMatch { matched: 2, input_len: 6 });
        assert_eq!(a.matched_prefix("ANA TILI and more").matched, 8);
        assert_eq!(a.matched_prefix("").matched, 0);
    }

    #[test]
    fn matched_prefix_is_diacritic_tolerant() {
        let a = Alignment::build("әже", Normalizer::default());
        assert_eq!(a.matched_prefix("аже").matched, 3);
        assert_eq!(a.matched_prefix("ӘЖ").matched, 2);
    }

    #[test]
    fn raw_index_from_norm_count_bounds() {
        let a = Alignment::build("ana-tili", Normalizer::default());
        assert_eq!(a.raw_index_from_norm_count(0), 0);
        assert_eq!(a.raw_index_from_norm_count(3), 3);
        assert_eq!(a.raw_index_from_norm_count(8), 8);
        assert_eq!(a.raw_index_from_norm_count(100), 8);
    }

    #[test]
    fn reveal_skips_separator_before_letter() {
        let a = Alignment::build("ana-tili", Normalizer::default());
        let separators = SeparatorSet::default();
        assert_eq!(a.reveal_next(0, 0, &separators), 1);
        assert_eq!(a.reveal_next(3, 0, &separators), 5);
        assert_eq!(a.reveal_next(0, 3, &separators), 5);
    }

    #[test]
    fn reveal_consumes_trailing_separators() {
        let a = Alignment::build("ok.", Normalizer::default());
        let separators = SeparatorSet::default();
        assert_eq!(a.reveal_next(2, 0, &separators), 3);
        assert_eq!(a.reveal_next(3, 0, &separators), 3);
    }

    #[test]
    fn reveal_never_moves_backwards() {
        let a = Alignment::build("salem", Normalizer::default());
        let separators = SeparatorSet::default();
        // Matched prefix regressed below the cursor: cursor still advances.
        assert_eq!(a.reveal_next(3, 1, &separators), 4);
        assert_eq!(a.reveal_next(5, 0, &separators), 5);
    }

    #[test]
    fn reveal_keeps_combining_marks_with_their_letter() {
        let a = Alignment::build("e\u{301}te\u{301}", Normalizer::default());
        let separators = SeparatorSet::default();
        assert_eq!(a.reveal_next(0, 0, &separators), 2);
        assert_eq!(a.reveal_next(2, 0, &separators), 3);
        assert_eq!(a.reveal_next(3, 0, &separators), 5);
    }

    #[test]
    fn reveal_skips_marks_attached_to_separator() {
        let a = Alignment::build("a-\u{301}b", Normalizer::default());
        assert_eq!(a.reveal_next(1, 0, &SeparatorSet::default()), 4);
        assert_eq!(a.reveal_next(0, 1, &SeparatorSet::default()), 4);
    }

    #[test]
    fn distinct_letters_do_not_match() {
        let a = Alignment::build("ліс", Normalizer::default());
        assert_eq!(a.matched_prefix("лис"), PrefixMatch { matched: 1, input_len: 3 });
        assert_eq!(a.matched_prefix("ЛІС").matched, 3);
    }

    #[test]
    fn reveal_honours_extra_separators() {
        let a = Alignment::build("a/b", Normalizer::default());
        assert_eq!(a.reveal_next(1, 0, &SeparatorSet::default()), 2);
        assert_eq!(a.reveal_next(1, 0, &SeparatorSet::with_extra(&['/'])), 3);
    }
}
