use std::collections::HashSet;

use crate::splits::Folds;
use crate::types::UserId;

/// Size and coverage counts for one (train, test) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldSummary {
    pub fold: usize,
    pub train_ratings: usize,
    pub test_ratings: usize,
    pub train_users: usize,
    pub train_items: usize,
    pub test_users: usize,
    /// Test users with no rating on the train side.
    pub cold_test_users: usize,
}

/// Spread of held-out sizes across folds.
#[derive(Clone, Debug, PartialEq)]
pub struct FoldSizeSkew {
    pub folds: usize,
    pub total: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub ratio: f64,
}

/// Per-fold counts in fold order.
pub fn summarize(folds: &Folds) -> Vec<FoldSummary> {
    folds
        .iter()
        .enumerate()
        .map(|(fold, (train, test))| {
            let test_users: HashSet<UserId> = test.iter().map(|rating| rating.user).collect();
            let cold_test_users = test_users
                .iter()
                .filter(|user| train.user_inner_id(**user).is_none())
                .count();
            FoldSummary {
                fold,
                train_ratings: train.len(),
                test_ratings: test.len(),
                train_users: train.user_count(),
                train_items: train.item_count(),
                test_users: test_users.len(),
                cold_test_users,
            }
        })
        .collect()
}

/// Compute spread of test sizes; `None` when there are no folds.
pub fn fold_size_skew(folds: &Folds) -> Option<FoldSizeSkew> {
    if folds.is_empty() {
        return None;
    }
    let sizes: Vec<usize> = folds.test().iter().map(|test| test.len()).collect();
    let total: usize = sizes.iter().sum();
    let min = sizes.iter().copied().min().unwrap_or(0);
    let max = sizes.iter().copied().max().unwrap_or(0);
    let mean = total as f64 / sizes.len() as f64;
    let ratio = if min == 0 {
        f64::INFINITY
    } else {
        max as f64 / min as f64
    };
    Some(FoldSizeSkew {
        folds: sizes.len(),
        total,
        min,
        max,
        mean,
        ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Rating, RatingStore};
    use crate::index::TrainSet;
    use crate::splits::{KFoldSplitter, Splitter, UserLooSplitter};

    #[test]
    fn skew_reports_balanced_folds() {
        let store: RatingStore = (0..10).map(|i| Rating::new(i % 3, i, 1.0)).collect();
        let folds = KFoldSplitter::new(5).unwrap().split(&store, 42).unwrap();
        let skew = fold_size_skew(&folds).expect("skew");
        assert_eq!(skew.folds, 5);
        assert_eq!(skew.total, 10);
        assert_eq!(skew.min, 2);
        assert_eq!(skew.max, 2);
        assert!((skew.ratio - 1.0).abs() < 1e-6);
    }

    #[test]
    fn skew_reports_uneven_folds() {
        let store: RatingStore = (0..7).map(|i| Rating::new(i, i, 1.0)).collect();
        let folds = KFoldSplitter::new(3).unwrap().split(&store, 1).unwrap();
        let skew = fold_size_skew(&folds).expect("skew");
        assert_eq!(skew.min, 2);
        assert_eq!(skew.max, 3);
        assert!((skew.ratio - 1.5).abs() < 1e-6);
        assert!((skew.mean - 7.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn skew_is_none_without_folds() {
        assert!(fold_size_skew(&Folds::default()).is_none());
    }

    #[test]
    fn summary_flags_cold_test_users() {
        let store =
            RatingStore::from_columns(&[1, 2, 2], &[10, 10, 20], &[1.0, 2.0, 3.0]).unwrap();
        let folds = UserLooSplitter::new(1).unwrap().split(&store, 0).unwrap();
        let summary = summarize(&folds);
        assert_eq!(summary.len(), 1);
        let fold = &summary[0];
        assert_eq!(fold.test_ratings, 2);
        assert_eq!(fold.test_users, 2);
        assert_eq!(fold.train_users, 1);
        assert_eq!(fold.cold_test_users, 1);
    }

    #[test]
    fn summary_counts_manual_fold() {
        let train_store = RatingStore::from_columns(&[1, 1], &[10, 20], &[1.0, 1.0]).unwrap();
        let test = RatingStore::from_columns(&[1], &[30], &[1.0]).unwrap();
        let mut folds = Folds::with_capacity(1);
        folds.push(TrainSet::new(&train_store), test);
        let summary = summarize(&folds);
        assert_eq!(
            summary[0],
            FoldSummary {
                fold: 0,
                train_ratings: 2,
                test_ratings: 1,
                train_users: 1,
                train_items: 2,
                test_users: 1,
                cold_test_users: 0,
            }
        );
    }
}
