//! Normalised rating records supplied by a data loader.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ItemId, UserId};

/// A single explicit rating a user gave an item.
///
/// Values are expected on a non-negative scale. Validation happens when the
/// rating is fed into a [`MatrixBuilder`](crate::MatrixBuilder).
///
/// # Examples
/// ```
/// use kindred_core::{ItemId, Rating, UserId};
///
/// let rating = Rating::new(UserId::new(1), ItemId::new(10), 4.5);
/// assert_eq!(rating.item, ItemId::new(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rating {
    /// User who gave the rating.
    pub user: UserId,
    /// Item being rated.
    pub item: ItemId,
    /// Rating value.
    pub value: f64,
}

impl Rating {
    /// Construct a rating record.
    #[must_use]
    pub const fn new(user: UserId, item: ItemId, value: f64) -> Self {
        Self { user, item, value }
    }
}

/// An ordered collection of [`Rating`] records.
///
/// The table may contain several ratings for the same `(user, item)` pair;
/// matrix construction keeps the last one.
///
/// # Examples
/// ```
/// use kindred_core::{ItemId, Rating, RatingTable, UserId};
///
/// let table: RatingTable = [
///     Rating::new(UserId::new(1), ItemId::new(1), 5.0),
///     Rating::new(UserId::new(2), ItemId::new(1), 3.0),
/// ]
/// .into_iter()
/// .collect();
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RatingTable {
    ratings: Vec<Rating>,
}

impl RatingTable {
    /// Construct an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rating.
    pub fn push(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Iterate over ratings in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rating> {
        self.ratings.iter()
    }

    /// Number of records, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Report whether the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Keep only the ratings matching `predicate`.
    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&Rating) -> bool,
    {
        self.ratings.retain(predicate);
    }

    /// Consume the table and return the underlying records.
    #[must_use]
    pub fn into_inner(self) -> Vec<Rating> {
        self.ratings
    }
}

impl From<Vec<Rating>> for RatingTable {
    fn from(ratings: Vec<Rating>) -> Self {
        Self { ratings }
    }
}

impl FromIterator<Rating> for RatingTable {
    fn from_iter<I: IntoIterator<Item = Rating>>(iter: I) -> Self {
        Self {
            ratings: iter.into_iter().collect(),
        }
    }
}

impl Extend<Rating> for RatingTable {
    fn extend<I: IntoIterator<Item = Rating>>(&mut self, iter: I) {
        self.ratings.extend(iter);
    }
}

impl IntoIterator for RatingTable {
    type Item = Rating;
    type IntoIter = std::vec::IntoIter<Rating>;

    fn into_iter(self) -> Self::IntoIter {
        self.ratings.into_iter()
    }
}

impl<'a> IntoIterator for &'a RatingTable {
    type Item = &'a Rating;
    type IntoIter = std::slice::Iter<'a, Rating>;

    fn into_iter(self) -> Self::IntoIter {
        self.ratings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_preserves_insertion_order() {
        let mut table = RatingTable::new();
        table.push(Rating::new(UserId::new(2), ItemId::new(1), 1.0));
        table.push(Rating::new(UserId::new(1), ItemId::new(1), 2.0));
        let users: Vec<_> = table.iter().map(|r| r.user).collect();
        assert_eq!(users, vec![UserId::new(2), UserId::new(1)]);
    }

    #[test]
    fn retain_drops_filtered_rows() {
        let mut table: RatingTable = (1..=4)
            .map(|i| Rating::new(UserId::new(1), ItemId::new(i), 1.0))
            .collect();
        table.retain(|r| r.item.get() % 2 == 0);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
