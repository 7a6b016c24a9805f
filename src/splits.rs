use std::ops::Range;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::constants::strategy::{K_FOLD, RATIO, USER_KEEP_N, USER_LOO};
use crate::data::{Rating, RatingStore};
use crate::errors::SplitError;
use crate::index::TrainSet;
use crate::rng::{DeterministicRng, permutation};
use crate::types::Seed;

/// Train/test pairs produced by one splitter invocation.
///
/// `train()` and `test()` always have the same length: the fold count for
/// k-fold, the repeat count for every other strategy.
#[derive(Clone, Debug, Default)]
pub struct Folds {
    train: Vec<TrainSet>,
    test: Vec<RatingStore>,
}

impl Folds {
    /// Empty fold list with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            train: Vec::with_capacity(capacity),
            test: Vec::with_capacity(capacity),
        }
    }

    /// Append one (train, test) pair.
    pub fn push(&mut self, train: TrainSet, test: RatingStore) {
        self.train.push(train);
        self.test.push(test);
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.train.len()
    }

    /// Returns true if no pairs were produced.
    pub fn is_empty(&self) -> bool {
        self.train.is_empty()
    }

    /// Train indexes in fold order.
    pub fn train(&self) -> &[TrainSet] {
        &self.train
    }

    /// Held-out stores in fold order.
    pub fn test(&self) -> &[RatingStore] {
        &self.test
    }

    /// Iterate (train, test) pairs in fold order.
    pub fn iter(&self) -> impl Iterator<Item = (&TrainSet, &RatingStore)> {
        self.train.iter().zip(&self.test)
    }

    /// Consume into the two parallel sequences.
    pub fn into_parts(self) -> (Vec<TrainSet>, Vec<RatingStore>) {
        (self.train, self.test)
    }

    /// Consume into owned (train, test) pairs.
    pub fn into_pairs(self) -> Vec<(TrainSet, RatingStore)> {
        self.train.into_iter().zip(self.test).collect()
    }
}

/// Strategy that partitions a rating store into train/test pairs.
///
/// Implementations must not share generator state across calls: the same
/// store and seed always produce the same folds.
pub trait Splitter {
    /// Split `store` using a generator seeded from `seed`.
    fn split(&self, store: &RatingStore, seed: Seed) -> Result<Folds, SplitError>;
}

impl<F> Splitter for F
where
    F: Fn(&RatingStore, Seed) -> Result<Folds, SplitError>,
{
    fn split(&self, store: &RatingStore, seed: Seed) -> Result<Folds, SplitError> {
        self(store, seed)
    }
}

/// Contiguous fold ranges over `0..len`.
///
/// Each fold gets `len / k` positions and the first `len % k` folds get one
/// extra, so the ranges tile `0..len` left to right without gaps.
pub fn fold_ranges(len: usize, k: usize) -> Vec<Range<usize>> {
    if k == 0 {
        return Vec::new();
    }
    let base = len / k;
    let remainder = len % k;
    let mut ranges = Vec::with_capacity(k);
    let mut begin = 0;
    for fold in 0..k {
        let end = begin + base + usize::from(fold < remainder);
        ranges.push(begin..end);
        begin = end;
    }
    ranges
}

fn validate_repeat(strategy: &str, repeat: usize) -> Result<(), SplitError> {
    if repeat == 0 {
        return Err(SplitError::InvalidArgument(format!(
            "{strategy}: repeat must be at least 1"
        )));
    }
    Ok(())
}

fn validate_ratio(strategy: &str, test_ratio: f64) -> Result<(), SplitError> {
    if !test_ratio.is_finite() || !(0.0..=1.0).contains(&test_ratio) {
        return Err(SplitError::InvalidArgument(format!(
            "{strategy}: test_ratio must be within [0, 1], got {test_ratio}"
        )));
    }
    Ok(())
}

fn held_out_count(total: usize, ratio: f64) -> usize {
    ((total as f64) * ratio).floor() as usize
}

/// Stratified k-fold cross validation over rating positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KFoldSplitter {
    k: usize,
}

impl KFoldSplitter {
    /// Create a splitter producing `k` folds.
    pub fn new(k: usize) -> Result<Self, SplitError> {
        if k == 0 {
            return Err(SplitError::InvalidArgument(format!(
                "{K_FOLD}: fold count must be at least 1"
            )));
        }
        Ok(Self { k })
    }

    /// Configured fold count.
    pub fn k(&self) -> usize {
        self.k
    }
}

impl Splitter for KFoldSplitter {
    fn split(&self, store: &RatingStore, seed: Seed) -> Result<Folds, SplitError> {
        let len = store.len();
        if len == 0 {
            return Err(SplitError::EmptyDataSet(format!(
                "{K_FOLD}: cannot build {} folds from an empty store",
                self.k
            )));
        }
        if self.k > len {
            return Err(SplitError::InvalidArgument(format!(
                "{K_FOLD}: fold count {} exceeds store length {len}",
                self.k
            )));
        }

        let mut rng = DeterministicRng::new(seed);
        let perm = permutation(len, &mut rng);
        let mut folds = Folds::with_capacity(self.k);
        for (fold, range) in fold_ranges(len, self.k).into_iter().enumerate() {
            let test_index = perm[range.clone()].to_vec();
            let train_index: Vec<usize> = perm[..range.start]
                .iter()
                .chain(&perm[range.end..])
                .copied()
                .collect();
            let test = store.subset(&test_index)?;
            let train = TrainSet::new(&store.subset(&train_index)?);
            debug!(
                strategy = K_FOLD,
                fold,
                train_len = train.len(),
                test_len = test.len(),
                "fold built"
            );
            folds.push(train, test);
        }
        info!(strategy = K_FOLD, folds = folds.len(), len, seed, "split complete");
        Ok(folds)
    }
}

/// Per-user leave-one-out: each repeat holds out one random rating per user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserLooSplitter {
    repeat: usize,
}

impl UserLooSplitter {
    /// Create a splitter producing `repeat` independent probes.
    pub fn new(repeat: usize) -> Result<Self, SplitError> {
        validate_repeat(USER_LOO, repeat)?;
        Ok(Self { repeat })
    }

    /// Configured repeat count.
    pub fn repeat(&self) -> usize {
        self.repeat
    }
}

impl Splitter for UserLooSplitter {
    fn split(&self, store: &RatingStore, seed: Seed) -> Result<Folds, SplitError> {
        let mut rng = DeterministicRng::new(seed);
        let index = TrainSet::new(store);
        let users = index.user_count();
        let mut folds = Folds::with_capacity(self.repeat);
        for repeat in 0..self.repeat {
            let mut train = Vec::with_capacity(index.len() - users);
            let mut test = Vec::with_capacity(users);
            for (user, ratings) in index.ratings_by_user().iter().enumerate() {
                // Indexed users always have at least one rating.
                let held_out = rng.random_range(0..ratings.len());
                for (position, rating) in ratings.iter().enumerate() {
                    let rating = index.outer_rating(user, rating);
                    if position == held_out {
                        test.push(rating);
                    } else {
                        train.push(rating);
                    }
                }
            }
            let train = TrainSet::new(&RatingStore::from(train));
            let test = RatingStore::from(test);
            debug!(
                strategy = USER_LOO,
                repeat,
                users,
                train_len = train.len(),
                test_len = test.len(),
                "repeat built"
            );
            folds.push(train, test);
        }
        info!(strategy = USER_LOO, repeats = folds.len(), users, seed, "split complete");
        Ok(folds)
    }
}

/// Per-user keep-N: a fraction of users keep only `n` ratings in train.
///
/// Simulates cold users: the remaining ratings of each held-out user form the
/// test store, while every other user contributes all ratings to train.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UserKeepNSplitter {
    repeat: usize,
    n: usize,
    test_ratio: f64,
}

impl UserKeepNSplitter {
    /// Create a keep-N splitter.
    pub fn new(repeat: usize, n: usize, test_ratio: f64) -> Result<Self, SplitError> {
        validate_repeat(USER_KEEP_N, repeat)?;
        validate_ratio(USER_KEEP_N, test_ratio)?;
        Ok(Self {
            repeat,
            n,
            test_ratio,
        })
    }

    /// Configured repeat count.
    pub fn repeat(&self) -> usize {
        self.repeat
    }

    /// Ratings kept in train per test user.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Fraction of users selected as test users.
    pub fn test_ratio(&self) -> f64 {
        self.test_ratio
    }
}

impl Splitter for UserKeepNSplitter {
    fn split(&self, store: &RatingStore, seed: Seed) -> Result<Folds, SplitError> {
        let mut rng = DeterministicRng::new(seed);
        let index = TrainSet::new(store);
        let users = index.user_count();
        let test_users = held_out_count(users, self.test_ratio).min(users);
        if test_users == 0 && users > 0 {
            warn!(
                strategy = USER_KEEP_N,
                users,
                test_ratio = self.test_ratio,
                "no test users selected; test folds will be empty"
            );
        }

        let user_ratings = index.ratings_by_user();
        let mut folds = Folds::with_capacity(self.repeat);
        for repeat in 0..self.repeat {
            let mut train: Vec<Rating> = Vec::with_capacity(index.len());
            let mut test: Vec<Rating> = Vec::new();
            let user_perm = permutation(users, &mut rng);
            let (held_out, kept) = user_perm.split_at(test_users);

            for &user in kept {
                train.extend(
                    user_ratings[user]
                        .iter()
                        .map(|rating| index.outer_rating(user, rating)),
                );
            }
            for &user in held_out {
                let ratings = &user_ratings[user];
                let order = permutation(ratings.len(), &mut rng);
                for (rank, position) in order.into_iter().enumerate() {
                    let rating = index.outer_rating(user, &ratings[position]);
                    if rank < self.n {
                        train.push(rating);
                    } else {
                        test.push(rating);
                    }
                }
            }

            let train = TrainSet::new(&RatingStore::from(train));
            let test = RatingStore::from(test);
            debug!(
                strategy = USER_KEEP_N,
                repeat,
                test_users,
                train_len = train.len(),
                test_len = test.len(),
                "repeat built"
            );
            folds.push(train, test);
        }
        info!(
            strategy = USER_KEEP_N,
            repeats = folds.len(),
            users,
            test_users,
            seed,
            "split complete"
        );
        Ok(folds)
    }
}

/// Random hold-out of a fixed fraction of rating positions per repeat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatioSplitter {
    repeat: usize,
    test_ratio: f64,
}

impl RatioSplitter {
    /// Create a ratio splitter.
    pub fn new(repeat: usize, test_ratio: f64) -> Result<Self, SplitError> {
        validate_repeat(RATIO, repeat)?;
        validate_ratio(RATIO, test_ratio)?;
        Ok(Self { repeat, test_ratio })
    }

    /// Configured repeat count.
    pub fn repeat(&self) -> usize {
        self.repeat
    }

    /// Fraction of ratings held out per repeat.
    pub fn test_ratio(&self) -> f64 {
        self.test_ratio
    }
}

impl Splitter for RatioSplitter {
    fn split(&self, store: &RatingStore, seed: Seed) -> Result<Folds, SplitError> {
        let mut rng = DeterministicRng::new(seed);
        let len = store.len();
        let test_len = held_out_count(len, self.test_ratio).min(len);
        let mut folds = Folds::with_capacity(self.repeat);
        for repeat in 0..self.repeat {
            let perm = permutation(len, &mut rng);
            let (test_index, train_index) = perm.split_at(test_len);
            let test = store.subset(test_index)?;
            let train = TrainSet::new(&store.subset(train_index)?);
            debug!(
                strategy = RATIO,
                repeat,
                train_len = train.len(),
                test_len = test.len(),
                "repeat built"
            );
            folds.push(train, test);
        }
        info!(strategy = RATIO, repeats = folds.len(), len, seed, "split complete");
        Ok(folds)
    }
}

/// Closed set of built-in strategies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SplitStrategy {
    /// K-fold cross validation.
    KFold(KFoldSplitter),
    /// Per-user leave-one-out.
    UserLoo(UserLooSplitter),
    /// Per-user keep-N.
    UserKeepN(UserKeepNSplitter),
    /// Random ratio hold-out.
    Ratio(RatioSplitter),
}

impl SplitStrategy {
    /// Stable strategy label used in logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            SplitStrategy::KFold(_) => K_FOLD,
            SplitStrategy::UserLoo(_) => USER_LOO,
            SplitStrategy::UserKeepN(_) => USER_KEEP_N,
            SplitStrategy::Ratio(_) => RATIO,
        }
    }
}

impl Splitter for SplitStrategy {
    fn split(&self, store: &RatingStore, seed: Seed) -> Result<Folds, SplitError> {
        match self {
            SplitStrategy::KFold(splitter) => splitter.split(store, seed),
            SplitStrategy::UserLoo(splitter) => splitter.split(store, seed),
            SplitStrategy::UserKeepN(splitter) => splitter.split(store, seed),
            SplitStrategy::Ratio(splitter) => splitter.split(store, seed),
        }
    }
}

impl From<KFoldSplitter> for SplitStrategy {
    fn from(splitter: KFoldSplitter) -> Self {
        SplitStrategy::KFold(splitter)
    }
}

impl From<UserLooSplitter> for SplitStrategy {
    fn from(splitter: UserLooSplitter) -> Self {
        SplitStrategy::UserLoo(splitter)
    }
}

impl From<UserKeepNSplitter> for SplitStrategy {
    fn from(splitter: UserKeepNSplitter) -> Self {
        SplitStrategy::UserKeepN(splitter)
    }
}

impl From<RatioSplitter> for SplitStrategy {
    fn from(splitter: RatioSplitter) -> Self {
        SplitStrategy::Ratio(splitter)
    }
}
