/// Constants used by the deterministic generator.
pub mod rng {
    /// Golden-ratio increment applied to the splitmix64 state on every draw.
    pub const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
    /// First splitmix64 output multiplier.
    pub const MIX_MULTIPLIER_A: u64 = 0xBF58_476D_1CE4_E5B9;
    /// Second splitmix64 output multiplier.
    pub const MIX_MULTIPLIER_B: u64 = 0x94D0_49BB_1331_11EB;
}

/// Default parameters used by splitter configuration.
pub mod defaults {
    /// Fold count for k-fold cross validation.
    pub const FOLDS: usize = 5;
    /// Number of independent repeats for per-user and ratio strategies.
    pub const REPEAT: usize = 1;
    /// Ratings kept in train for each held-out user under keep-N.
    pub const KEEP_N: usize = 10;
    /// Fraction of users (keep-N) or ratings (ratio) held out for testing.
    pub const TEST_RATIO: f64 = 0.2;
}

/// Strategy labels attached to log events and summaries.
pub mod strategy {
    /// Label for the k-fold strategy.
    pub const K_FOLD: &str = "k_fold";
    /// Label for the per-user leave-one-out strategy.
    pub const USER_LOO: &str = "user_loo";
    /// Label for the per-user keep-N strategy.
    pub const USER_KEEP_N: &str = "user_keep_n";
    /// Label for the random ratio strategy.
    pub const RATIO: &str = "ratio";
}
