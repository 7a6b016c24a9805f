use serde::{Deserialize, Serialize};

use crate::errors::SplitError;

pub use crate::types::{ItemId, RatingValue, UserId};

/// A single (user, item, rating) observation keyed by outer ids.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Outer user id.
    pub user: UserId,
    /// Outer item id.
    pub item: ItemId,
    /// Observed rating value.
    pub value: RatingValue,
}

impl Rating {
    /// Build a rating observation.
    pub const fn new(user: UserId, item: ItemId, value: RatingValue) -> Self {
        Self { user, item, value }
    }
}

/// Immutable ordered collection of rating observations.
///
/// Splitters only ever read from a store; every derived store is a fresh copy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingStore {
    ratings: Vec<Rating>,
}

impl RatingStore {
    /// Build a store from three parallel columns of equal length.
    pub fn from_columns(
        users: &[UserId],
        items: &[ItemId],
        values: &[RatingValue],
    ) -> Result<Self, SplitError> {
        if users.len() != items.len() || users.len() != values.len() {
            return Err(SplitError::InvalidArgument(format!(
                "rating columns must have equal length (users={}, items={}, values={})",
                users.len(),
                items.len(),
                values.len()
            )));
        }
        let ratings = users
            .iter()
            .zip(items)
            .zip(values)
            .map(|((&user, &item), &value)| Rating::new(user, item, value))
            .collect();
        Ok(Self { ratings })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Returns true if the store has no observations.
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Observation at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Rating> {
        self.ratings.get(index)
    }

    /// Iterate observations in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rating> {
        self.ratings.iter()
    }

    /// Observations as a slice.
    pub fn as_slice(&self) -> &[Rating] {
        &self.ratings
    }

    /// New store holding exactly the observations at `indices`, in that order.
    ///
    /// Duplicated indices are copied as many times as they appear.
    pub fn subset(&self, indices: &[usize]) -> Result<Self, SplitError> {
        let mut ratings = Vec::with_capacity(indices.len());
        for &index in indices {
            let rating = self.ratings.get(index).ok_or_else(|| {
                SplitError::InvalidArgument(format!(
                    "subset index {index} out of range for store of length {}",
                    self.ratings.len()
                ))
            })?;
            ratings.push(*rating);
        }
        Ok(Self { ratings })
    }
}

impl From<Vec<Rating>> for RatingStore {
    fn from(ratings: Vec<Rating>) -> Self {
        Self { ratings }
    }
}

impl FromIterator<Rating> for RatingStore {
    fn from_iter<I: IntoIterator<Item = Rating>>(iter: I) -> Self {
        Self {
            ratings: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RatingStore {
    type Item = Rating;
    type IntoIter = std::vec::IntoIter<Rating>;

    fn into_iter(self) -> Self::IntoIter {
        self.ratings.into_iter()
    }
}

impl<'a> IntoIterator for &'a RatingStore {
    type Item = &'a Rating;
    type IntoIter = std::slice::Iter<'a, Rating>;

    fn into_iter(self) -> Self::IntoIter {
        self.ratings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> RatingStore {
        RatingStore::from_columns(&[1, 1, 2], &[10, 20, 10], &[5.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn from_columns_zips_parallel_arrays() {
        let store = sample_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1), Some(&Rating::new(1, 20, 3.0)));
        assert_eq!(store.get(3), None);
    }

    #[test]
    fn from_columns_rejects_mismatched_lengths() {
        let err = RatingStore::from_columns(&[1, 2], &[10], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            SplitError::InvalidArgument(ref msg) if msg.contains("equal length")
        ));
    }

    #[test]
    fn subset_preserves_requested_order() {
        let store = sample_store();
        let subset = store.subset(&[2, 0]).unwrap();
        assert_eq!(
            subset.as_slice(),
            &[Rating::new(2, 10, 4.0), Rating::new(1, 10, 5.0)]
        );
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn subset_rejects_out_of_range_index() {
        let store = sample_store();
        let err = store.subset(&[0, 3]).unwrap_err();
        assert!(matches!(
            err,
            SplitError::InvalidArgument(ref msg) if msg.contains("out of range")
        ));
    }

    #[test]
    fn empty_subset_is_empty_store() {
        let subset = sample_store().subset(&[]).unwrap();
        assert!(subset.is_empty());
    }

    #[test]
    fn collects_from_iterator() {
        let store: RatingStore = sample_store()
            .into_iter()
            .filter(|rating| rating.user == 1)
            .collect();
        assert_eq!(store.len(), 2);
        assert!(store.iter().all(|rating| rating.user == 1));
    }
}
