use indexmap::IndexSet;

use crate::data::{Rating, RatingStore};
use crate::types::{InnerId, ItemId, RatingValue, UserId};

/// A rating keyed by the inner id of its counterpart.
///
/// Inside [`TrainSet::ratings_by_user`] the id is an inner item id; inside
/// [`TrainSet::ratings_by_item`] it is an inner user id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InnerRating {
    /// Inner id of the counterpart user or item.
    pub id: InnerId,
    /// Observed rating value.
    pub value: RatingValue,
}

/// Dense index over one rating store snapshot.
///
/// Inner ids are assigned in order of first appearance, so the same store
/// always produces the same index. The index is immutable once built.
#[derive(Clone, Debug, Default)]
pub struct TrainSet {
    users: IndexSet<UserId>,
    items: IndexSet<ItemId>,
    user_ratings: Vec<Vec<InnerRating>>,
    item_ratings: Vec<Vec<InnerRating>>,
    len: usize,
    global_mean: RatingValue,
}

impl TrainSet {
    /// Build the index with a single in-order scan of `store`.
    pub fn new(store: &RatingStore) -> Self {
        let mut users = IndexSet::new();
        let mut items = IndexSet::new();
        let mut user_ratings: Vec<Vec<InnerRating>> = Vec::new();
        let mut item_ratings: Vec<Vec<InnerRating>> = Vec::new();
        let mut sum = 0.0;

        for rating in store {
            let (user, new_user) = users.insert_full(rating.user);
            if new_user {
                user_ratings.push(Vec::new());
            }
            let (item, new_item) = items.insert_full(rating.item);
            if new_item {
                item_ratings.push(Vec::new());
            }
            user_ratings[user].push(InnerRating {
                id: item,
                value: rating.value,
            });
            item_ratings[item].push(InnerRating {
                id: user,
                value: rating.value,
            });
            sum += rating.value;
        }

        let len = store.len();
        let global_mean = if len == 0 { 0.0 } else { sum / len as f64 };
        Self {
            users,
            items,
            user_ratings,
            item_ratings,
            len,
            global_mean,
        }
    }

    /// Number of distinct users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of distinct items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of indexed observations.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no observations were indexed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mean rating value, or `0.0` for an empty index.
    pub fn global_mean(&self) -> RatingValue {
        self.global_mean
    }

    /// Inner id of an outer user id, if indexed.
    pub fn user_inner_id(&self, user: UserId) -> Option<InnerId> {
        self.users.get_index_of(&user)
    }

    /// Inner id of an outer item id, if indexed.
    pub fn item_inner_id(&self, item: ItemId) -> Option<InnerId> {
        self.items.get_index_of(&item)
    }

    /// Outer user id for an inner id.
    pub fn user_outer_id(&self, inner: InnerId) -> Option<UserId> {
        self.users.get_index(inner).copied()
    }

    /// Outer item id for an inner id.
    pub fn item_outer_id(&self, inner: InnerId) -> Option<ItemId> {
        self.items.get_index(inner).copied()
    }

    /// Per-user rating lists indexed by inner user id, in encounter order.
    pub fn ratings_by_user(&self) -> &[Vec<InnerRating>] {
        &self.user_ratings
    }

    /// Per-item rating lists indexed by inner item id, in encounter order.
    pub fn ratings_by_item(&self) -> &[Vec<InnerRating>] {
        &self.item_ratings
    }

    /// Ratings of one user; empty for an unknown inner id.
    pub fn user_ratings(&self, user: InnerId) -> &[InnerRating] {
        self.user_ratings.get(user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Outer-id rating for a user's rating list entry.
    pub(crate) fn outer_rating(&self, user: InnerId, rating: &InnerRating) -> Rating {
        Rating::new(self.users[user], self.items[rating.id], rating.value)
    }

    /// Rebuild a rating store grouped by user in inner-id order.
    pub fn to_store(&self) -> RatingStore {
        self.user_ratings
            .iter()
            .enumerate()
            .flat_map(|(user, ratings)| {
                ratings
                    .iter()
                    .map(move |rating| self.outer_rating(user, rating))
            })
            .collect()
    }
}

impl From<&RatingStore> for TrainSet {
    fn from(store: &RatingStore) -> Self {
        Self::new(store)
    }
}
