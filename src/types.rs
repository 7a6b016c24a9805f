/// Outer user identifier as supplied by the data source.
/// Examples: `1`, `6040`
pub type UserId = u64;
/// Outer item identifier as supplied by the data source.
/// Examples: `1193`, `3952`
pub type ItemId = u64;
/// Contiguous zero-based identifier assigned by a [`crate::TrainSet`].
/// Example: `0` for the first user encountered in a store.
pub type InnerId = usize;
/// Observed rating value.
/// Examples: `4.0`, `3.5`
pub type RatingValue = f64;
/// Caller-supplied seed for a splitter invocation.
/// Example: `42`
pub type Seed = u64;
