//! Per-exercise hint engine.
//!
//! One engine is built per target word. The exercise UI feeds it the full
//! current input on every keystroke and asks it for one more letter when the
//! learner presses the hint button:
//!
//! ```
//! use hint_core::HintEngine;
//!
//! let mut engine = HintEngine::new("su");
//! let state = engine.request_next_hint("");
//! assert_eq!(state.hinted_part, "s");
//! assert_eq!(state.remaining_part, "u");
//!
//! let state = engine.request_next_hint("s");
//! assert!(state.is_completed);
//! assert_eq!(state.progress_pct, 100);
//! ```

use crate::error::Result;
use crate::normalize::Alignment;
use crate::separator::SeparatorSet;
use crate::types::{progress_pct, EffectiveSettings, HintState};
use unicode_normalization::char::is_combining_mark;

/// Hint state machine for a single target word.
///
/// States are in-progress and completed. Completion is reached once the shown
/// prefix covers the whole target and is never left again.
#[derive(Debug, Clone)]
pub struct HintEngine {
    target: String,
    alignment: Alignment,
    separators: SeparatorSet,
    max_hints: Option<u32>,
    /// Hint cursor in raw scalars. Never decreases.
    revealed_raw_index: usize,
    /// Recomputed from scratch on every input update.
    matched_norm_count: usize,
    error_count: usize,
    hints_used: u32,
    completed: bool,
}

impl HintEngine {
    /// Create an engine with default settings.
    pub fn new(target: impl Into<String>) -> Self {
        Self::build(target.into(), &EffectiveSettings::default())
    }

    /// Create an engine with explicit settings.
    pub fn with_settings(target: impl Into<String>, settings: &EffectiveSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build(target.into(), settings))
    }

    fn build(target: String, settings: &EffectiveSettings) -> Self {
        let alignment = Alignment::build(&target, settings.normalizer());
        tracing::debug!(
            raw_len = alignment.raw_len(),
            normalized_len = alignment.normalized_len(),
            "hint engine created"
        );
        let completed = alignment.raw_len() == 0;

        Self {
            target,
            alignment,
            separators: settings.separators(),
            max_hints: settings.max_hints,
            revealed_raw_index: 0,
            matched_norm_count: 0,
            error_count: 0,
            hints_used: 0,
            completed,
        }
    }

    /// Record the learner's current input (the full value, not a delta).
    ///
    /// Every call adds the unmatched tail of the normalized input to the
    /// error counter, even when the input did not change since the last call.
    pub fn update_user_input(&mut self, input: &str) -> HintState {
        self.apply_input(input);
        self.state()
    }

    /// Record `input`, then reveal the next meaningful character.
    ///
    /// Separators ahead of that character are revealed with it. Once the
    /// exercise is completed this is a no-op returning the unchanged state.
    pub fn request_next_hint(&mut self, input: &str) -> HintState {
        if self.completed {
            return self.state();
        }

        self.apply_input(input);
        if self.completed {
            return self.state();
        }

        if self.hint_limit_reached() {
            tracing::debug!(hints_used = self.hints_used, "hint limit reached");
            return self.state();
        }

        let previous = self.revealed_raw_index;
        self.revealed_raw_index =
            self.alignment
                .reveal_next(previous, self.matched_norm_count, &self.separators);
        if self.revealed_raw_index > previous {
            self.hints_used += 1;
        }
        tracing::debug!(
            from = previous,
            to = self.revealed_raw_index,
            hints_used = self.hints_used,
            "revealed hint"
        );
        self.latch_completion();

        self.state()
    }

    /// Current snapshot. Does not mutate the engine.
    pub fn state(&self) -> HintState {
        let raw_len = self.alignment.raw_len();
        let hinted_end = self.hinted_end();
        let split = self.alignment.byte_offset(hinted_end);

        HintState {
            target: self.target.clone(),
            hinted_part: self.target[..split].to_string(),
            remaining_part: self.target[split..].to_string(),
            last_revealed_index: hinted_end.checked_sub(1),
            errors: self.error_count,
            is_completed: hinted_end >= raw_len,
            matched_length: self.matched_norm_count,
            progress_pct: progress_pct(hinted_end, raw_len),
            hints_used: self.hints_used,
            hints_remaining: self.max_hints.map(|max| max.saturating_sub(self.hints_used)),
        }
    }

    /// Shown share of the target, 0-100.
    pub fn progress(&self) -> u8 {
        progress_pct(self.hinted_end(), self.alignment.raw_len())
    }

    /// Shown prefix followed by the hidden rest, each hidden letter replaced
    /// by `placeholder`. Separators stay visible; combining marks in the
    /// hidden rest are dropped so accents do not add placeholders.
    pub fn masked_display(&self, placeholder: char) -> String {
        let hinted_end = self.hinted_end();
        let split = self.alignment.byte_offset(hinted_end);
        let mut out = String::with_capacity(self.target.len());
        out.push_str(&self.target[..split]);
        out.extend(
            self.alignment.raw_chars()[hinted_end..]
                .iter()
                .filter(|&&c| !is_combining_mark(c))
                .map(|&c| if self.separators.contains(c) { c } else { placeholder }),
        );
        out
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Hint cursor in raw scalar values.
    pub fn revealed_index(&self) -> usize {
        self.revealed_raw_index
    }

    pub fn matched_length(&self) -> usize {
        self.matched_norm_count
    }

    pub fn errors(&self) -> usize {
        self.error_count
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn apply_input(&mut self, input: &str) {
        let prefix = self.alignment.matched_prefix(input);
        self.matched_norm_count = prefix.matched;
        self.error_count += prefix.mismatched();
        tracing::trace!(
            matched = prefix.matched,
            input_len = prefix.input_len,
            errors = self.error_count,
            "input updated"
        );
        self.latch_completion();
    }

    fn hint_limit_reached(&self) -> bool {
        self.max_hints.is_some_and(|max| self.hints_used >= max)
    }

    /// End of the shown prefix in raw scalars.
    fn hinted_end(&self) -> usize {
        if self.completed {
            return self.alignment.raw_len();
        }
        self.revealed_raw_index
            .max(self.alignment.raw_index_from_norm_count(self.matched_norm_count))
    }

    fn latch_completion(&mut self) {
        if !self.completed && self.hinted_end() >= self.alignment.raw_len() {
            self.completed = true;
            tracing::debug!(errors = self.error_count, hints_used = self.hints_used, "exercise completed");
        }
    }
}
