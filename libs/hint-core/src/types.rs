//! Snapshot and settings types shared with the exercise UI.

use crate::error::{HintError, Result};
use crate::normalize::Normalizer;
use crate::separator::SeparatorSet;
use serde::{Deserialize, Serialize};

/// Read-only view of an exercise's hint state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintState {
    /// The raw target word or phrase.
    pub target: String,
    /// Prefix of the target shown to the learner.
    pub hinted_part: String,
    /// Rest of the target, still hidden.
    pub remaining_part: String,
    /// Scalar index of the last shown character, `None` when nothing is shown.
    pub last_revealed_index: Option<usize>,
    /// Cumulative mistake counter. Re-accumulates on every update with wrong input.
    pub errors: usize,
    pub is_completed: bool,
    /// Normalized characters of the current input that match the target.
    pub matched_length: usize,
    /// Shown share of the target, 0-100.
    pub progress_pct: u8,
    pub hints_used: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints_remaining: Option<u32>,
}

/// Percentage of `raw_len` covered by `hinted_end`, rounded half up.
pub fn progress_pct(hinted_end: usize, raw_len: usize) -> u8 {
    if raw_len == 0 {
        return 100;
    }
    let pct = (hinted_end.min(raw_len) as f64 / raw_len as f64 * 100.0).round();
    pct as u8
}

/// Global hint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintSettings {
    /// Fold letters whose diacritics have no canonical decomposition.
    pub extended_folding: bool,
    /// Characters revealed for free in addition to the built-in separators.
    pub extra_separators: Vec<char>,
    /// Maximum hints per exercise. `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hints: Option<u32>,
}

impl Default for HintSettings {
    fn default() -> Self {
        Self {
            extended_folding: true,
            extra_separators: Vec::new(),
            max_hints: None,
        }
    }
}

/// Per-exercise overrides (all fields optional).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_folding: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_separators: Option<Vec<char>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hints: Option<u32>,
}

/// Effective settings (global merged with exercise overrides).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    pub extended_folding: bool,
    pub extra_separators: Vec<char>,
    pub max_hints: Option<u32>,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self::merge(&HintSettings::default(), None)
    }
}

impl EffectiveSettings {
    /// Merge global settings with optional exercise overrides.
    pub fn merge(global: &HintSettings, overrides: Option<&ExerciseOverrides>) -> Self {
        match overrides {
            Some(o) => Self {
                extended_folding: o.extended_folding.unwrap_or(global.extended_folding),
                extra_separators: o
                    .extra_separators
                    .clone()
                    .unwrap_or_else(|| global.extra_separators.clone()),
                max_hints: o.max_hints.or(global.max_hints),
            },
            None => Self {
                extended_folding: global.extended_folding,
                extra_separators: global.extra_separators.clone(),
                max_hints: global.max_hints,
            },
        }
    }

    /// Reject settings the engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        if let Some(&ch) = self.extra_separators.iter().find(|c| c.is_alphanumeric()) {
            return Err(HintError::InvalidSeparator { ch });
        }
        if self.max_hints == Some(0) {
            return Err(HintError::ZeroHintLimit);
        }
        Ok(())
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.extended_folding)
    }

    pub fn separators(&self) -> SeparatorSet {
        SeparatorSet::with_extra(&self.extra_separators)
    }
}
