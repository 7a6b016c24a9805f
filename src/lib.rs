#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Splitter configuration types.
pub mod config;
/// Centralized constants used by the generator, defaults, and log labels.
pub mod constants;
/// Rating observations and the rating store.
pub mod data;
/// Dense index over a rating store.
pub mod index;
/// Fold size and coverage diagnostics.
pub mod metrics;
/// Deterministic generator owned by each split call.
pub mod rng;
/// Splitting strategies and the fold container.
pub mod splits;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::{SplitConfig, SplitterConfig};
pub use data::{Rating, RatingStore};
pub use errors::SplitError;
pub use index::{InnerRating, TrainSet};
pub use metrics::{FoldSizeSkew, FoldSummary, fold_size_skew, summarize};
pub use rng::DeterministicRng;
pub use splits::{
    Folds, KFoldSplitter, RatioSplitter, SplitStrategy, Splitter, UserKeepNSplitter,
    UserLooSplitter, fold_ranges,
};
pub use types::{InnerId, ItemId, RatingValue, Seed, UserId};
