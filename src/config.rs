use serde::{Deserialize, Serialize};

use crate::constants::defaults::{FOLDS, KEEP_N, REPEAT, TEST_RATIO};
use crate::data::RatingStore;
use crate::errors::SplitError;
use crate::splits::{
    Folds, KFoldSplitter, RatioSplitter, SplitStrategy, Splitter, UserKeepNSplitter,
    UserLooSplitter,
};
use crate::types::Seed;

fn default_folds() -> usize {
    FOLDS
}

fn default_repeat() -> usize {
    REPEAT
}

fn default_keep_n() -> usize {
    KEEP_N
}

fn default_test_ratio() -> f64 {
    TEST_RATIO
}

fn default_seed() -> Seed {
    42
}

/// Declarative splitter selection, tagged by `strategy`.
///
/// ```json
/// { "strategy": "user_keep_n", "repeat": 3, "n": 5, "test_ratio": 0.1 }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SplitterConfig {
    /// K-fold cross validation.
    KFold {
        /// Number of folds.
        #[serde(default = "default_folds")]
        k: usize,
    },
    /// Per-user leave-one-out.
    UserLoo {
        /// Number of independent repeats.
        #[serde(default = "default_repeat")]
        repeat: usize,
    },
    /// Per-user keep-N.
    UserKeepN {
        /// Number of independent repeats.
        #[serde(default = "default_repeat")]
        repeat: usize,
        /// Ratings kept in train per test user.
        #[serde(default = "default_keep_n")]
        n: usize,
        /// Fraction of users selected as test users.
        #[serde(default = "default_test_ratio")]
        test_ratio: f64,
    },
    /// Random ratio hold-out.
    Ratio {
        /// Number of independent repeats.
        #[serde(default = "default_repeat")]
        repeat: usize,
        /// Fraction of ratings held out.
        #[serde(default = "default_test_ratio")]
        test_ratio: f64,
    },
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig::KFold { k: FOLDS }
    }
}

impl SplitterConfig {
    /// Validate parameters and build the corresponding strategy.
    pub fn build(&self) -> Result<SplitStrategy, SplitError> {
        Ok(match *self {
            SplitterConfig::KFold { k } => KFoldSplitter::new(k)?.into(),
            SplitterConfig::UserLoo { repeat } => UserLooSplitter::new(repeat)?.into(),
            SplitterConfig::UserKeepN {
                repeat,
                n,
                test_ratio,
            } => UserKeepNSplitter::new(repeat, n, test_ratio)?.into(),
            SplitterConfig::Ratio { repeat, test_ratio } => {
                RatioSplitter::new(repeat, test_ratio)?.into()
            }
        })
    }
}

/// Top-level split configuration: a strategy plus the seed it runs with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Seed for the generator owned by each split call.
    #[serde(default = "default_seed")]
    pub seed: Seed,
    /// Strategy selection.
    #[serde(default)]
    pub splitter: SplitterConfig,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            splitter: SplitterConfig::default(),
        }
    }
}

impl SplitConfig {
    /// Build the configured strategy and split `store` with the configured seed.
    pub fn run(&self, store: &RatingStore) -> Result<Folds, SplitError> {
        self.splitter.build()?.split(store, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Rating;

    #[test]
    fn deserializes_tagged_strategy() {
        let config: SplitterConfig = serde_json::from_str(
            r#"{"strategy": "user_keep_n", "repeat": 3, "n": 5, "test_ratio": 0.1}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            SplitterConfig::UserKeepN {
                repeat: 3,
                n: 5,
                test_ratio: 0.1
            }
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: SplitterConfig = serde_json::from_str(r#"{"strategy": "k_fold"}"#).unwrap();
        assert_eq!(config, SplitterConfig::KFold { k: FOLDS });

        let config: SplitterConfig =
            serde_json::from_str(r#"{"strategy": "ratio", "repeat": 2}"#).unwrap();
        assert_eq!(
            config,
            SplitterConfig::Ratio {
                repeat: 2,
                test_ratio: TEST_RATIO
            }
        );
    }

    #[test]
    fn unknown_strategy_fails_to_parse() {
        let result: Result<SplitterConfig, _> =
            serde_json::from_str(r#"{"strategy": "bootstrap"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn build_validates_parameters() {
        let err = SplitterConfig::KFold { k: 0 }.build().unwrap_err();
        assert!(matches!(err, SplitError::InvalidArgument(_)));

        let err = SplitterConfig::UserKeepN {
            repeat: 1,
            n: 1,
            test_ratio: 2.0,
        }
        .build()
        .unwrap_err();
        assert!(matches!(err, SplitError::InvalidArgument(_)));
    }

    #[test]
    fn build_maps_each_variant() {
        let names: Vec<&str> = [
            SplitterConfig::KFold { k: 2 },
            SplitterConfig::UserLoo { repeat: 1 },
            SplitterConfig::UserKeepN {
                repeat: 1,
                n: 1,
                test_ratio: 0.5,
            },
            SplitterConfig::Ratio {
                repeat: 1,
                test_ratio: 0.5,
            },
        ]
        .iter()
        .map(|config| config.build().unwrap().name())
        .collect();
        assert_eq!(names, vec!["k_fold", "user_loo", "user_keep_n", "ratio"]);
    }

    #[test]
    fn split_config_runs_with_configured_seed() {
        let store: RatingStore = (0..10).map(|i| Rating::new(i, i, 1.0)).collect();
        let config: SplitConfig = serde_json::from_str(
            r#"{"seed": 7, "splitter": {"strategy": "k_fold", "k": 5}}"#,
        )
        .unwrap();
        let first = config.run(&store).unwrap();
        let second = config.run(&store).unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(first.test(), second.test());
    }

    #[test]
    fn split_config_defaults_to_five_folds() {
        let config: SplitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SplitConfig::default());
        assert_eq!(config.seed, 42);
    }
}
