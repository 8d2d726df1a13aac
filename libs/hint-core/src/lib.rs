//! Progressive letter-hint engine for typing exercises.
//!
//! Provides:
//! - Diacritic- and case-insensitive alignment of a target word
//! - Prefix matching of the learner's input against the target
//! - One-letter-at-a-time hint reveal that skips separators
//! - Serializable snapshots and settings for the exercise UI

pub mod engine;
pub mod error;
pub mod normalize;
pub mod separator;
pub mod types;

pub use engine::HintEngine;
pub use error::{HintError, Result};
pub use normalize::{Alignment, Normalizer, PrefixMatch};
pub use separator::{SeparatorSet, DEFAULT_SEPARATORS};
pub use types::{EffectiveSettings, ExerciseOverrides, HintSettings, HintState};
