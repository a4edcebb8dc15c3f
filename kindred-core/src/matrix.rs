//! Sparse user × item rating matrix.
//!
//! [`MatrixBuilder`] folds a stream of [`Rating`] records into an immutable
//! [`RatingMatrix`]. Each user's row is a sorted sparse map, so an absent
//! rating is genuinely absent rather than encoded as a sentinel. The dense,
//! zero-filled representation is still available through
//! [`RatingMatrix::dense_row`] for callers that need it.
//!
//! Rows and columns are ordered by ascending identifier, which keeps every
//! build of the same input identical.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{ItemId, MatrixError, Rating, RatingTable, UserId};

/// Value used by [`RatingMatrix::dense_row`] for items a user has not rated.
pub const ABSENT: f64 = 0.0;

/// One user's ratings with the norm split as `scale * scaled_norm`.
///
/// Dividing by the largest rating before squaring keeps `scaled_norm` within
/// `1.0..=sqrt(len)` for any finite ratings, so neither tiny nor huge values
/// collapse the norm to zero or infinity.
#[derive(Debug, Clone)]
struct Row {
    ratings: BTreeMap<ItemId, f64>,
    scale: f64,
    scaled_norm: f64,
}

impl Row {
    fn new(ratings: BTreeMap<ItemId, f64>) -> Self {
        let scale = ratings.values().copied().fold(0.0_f64, f64::max);
        let scaled_norm = if scale > 0.0 {
            ratings
                .values()
                .map(|value| {
                    let unit = value / scale;
                    unit * unit
                })
                .sum::<f64>()
                .sqrt()
        } else {
            0.0
        };
        Self {
            ratings,
            scale,
            scaled_norm,
        }
    }
}

// The cached norm terms are derived from `ratings`, so equality ignores them.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.ratings == other.ratings
    }
}

/// Accumulates ratings and produces a [`RatingMatrix`].
///
/// Later ratings for the same `(user, item)` pair replace earlier ones.
///
/// # Examples
/// ```
/// use kindred_core::{ItemId, MatrixBuilder, Rating, UserId};
///
/// # fn main() -> Result<(), kindred_core::MatrixError> {
/// let mut builder = MatrixBuilder::new();
/// builder.push(Rating::new(UserId::new(1), ItemId::new(1), 4.0))?;
/// builder.push(Rating::new(UserId::new(1), ItemId::new(1), 5.0))?;
/// let matrix = builder.build()?;
/// assert_eq!(matrix.rating(UserId::new(1), ItemId::new(1)), Some(5.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatrixBuilder {
    rows: BTreeMap<UserId, BTreeMap<ItemId, f64>>,
    items: BTreeSet<ItemId>,
}

impl MatrixBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single rating.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidRating`] when the value is negative, NaN
    /// or infinite. The builder is left unchanged in that case.
    pub fn push(&mut self, rating: Rating) -> Result<(), MatrixError> {
        let Rating { user, item, value } = rating;
        if !value.is_finite() || value < 0.0 {
            return Err(MatrixError::InvalidRating { user, item, value });
        }
        let previous = self.rows.entry(user).or_default().insert(item, value);
        if let Some(old) = previous {
            log::debug!("user {user} rated item {item} twice; keeping {value} over {old}");
        }
        self.items.insert(item);
        Ok(())
    }

    /// Add every rating yielded by `ratings`, stopping at the first invalid one.
    ///
    /// # Errors
    /// Propagates [`MatrixError::InvalidRating`] from [`MatrixBuilder::push`].
    pub fn extend<I>(&mut self, ratings: I) -> Result<(), MatrixError>
    where
        I: IntoIterator<Item = Rating>,
    {
        ratings.into_iter().try_for_each(|rating| self.push(rating))
    }

    /// Finish the matrix.
    ///
    /// # Errors
    /// Returns [`MatrixError::Empty`] when no ratings were pushed.
    pub fn build(self) -> Result<RatingMatrix, MatrixError> {
        if self.rows.is_empty() {
            return Err(MatrixError::Empty);
        }
        let mut users = Vec::with_capacity(self.rows.len());
        let mut rows = Vec::with_capacity(self.rows.len());
        for (user, ratings) in self.rows {
            users.push(user);
            rows.push(Row::new(ratings));
        }
        let index = users
            .iter()
            .enumerate()
            .map(|(position, user)| (*user, position))
            .collect();
        let items: Vec<ItemId> = self.items.into_iter().collect();
        log::debug!(
            "built rating matrix with {} users and {} items",
            users.len(),
            items.len()
        );
        Ok(RatingMatrix {
            users,
            rows,
            items,
            index,
        })
    }
}

/// Immutable user × item rating snapshot.
///
/// The matrix is `Send + Sync` and never mutated after construction, so one
/// instance can serve concurrent requests. New ratings require a rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    users: Vec<UserId>,
    rows: Vec<Row>,
    items: Vec<ItemId>,
    index: HashMap<UserId, usize>,
}

impl RatingMatrix {
    /// Build a matrix from a rating table.
    ///
    /// # Errors
    /// Returns [`MatrixError::Empty`] for an empty table and
    /// [`MatrixError::InvalidRating`] for unusable values.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::{ItemId, MatrixError, RatingMatrix, RatingTable};
    ///
    /// let err = RatingMatrix::from_table(&RatingTable::new()).unwrap_err();
    /// assert_eq!(err, MatrixError::Empty);
    /// ```
    pub fn from_table(table: &RatingTable) -> Result<Self, MatrixError> {
        Self::from_ratings(table.iter().copied())
    }

    /// Build a matrix from any iterator of ratings.
    ///
    /// # Errors
    /// See [`RatingMatrix::from_table`].
    pub fn from_ratings<I>(ratings: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = Rating>,
    {
        let mut builder = MatrixBuilder::new();
        builder.extend(ratings)?;
        builder.build()
    }

    /// Users in ascending order; the row order of the matrix.
    #[must_use]
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Items in ascending order; the column order of the matrix.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Number of rows.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Report whether `user` has a row.
    #[must_use]
    pub fn contains_user(&self, user: UserId) -> bool {
        self.index.contains_key(&user)
    }

    /// Borrow the row for `user`.
    #[must_use]
    pub fn row(&self, user: UserId) -> Option<UserRow<'_>> {
        let position = *self.index.get(&user)?;
        self.rows.get(position).map(|row| UserRow { user, row })
    }

    /// Iterate over every row in ascending user order.
    pub fn rows(&self) -> impl Iterator<Item = UserRow<'_>> + '_ {
        self.users
            .iter()
            .zip(&self.rows)
            .map(|(user, row)| UserRow { user: *user, row })
    }

    /// Return the rating `user` gave `item`, if any.
    #[must_use]
    pub fn rating(&self, user: UserId, item: ItemId) -> Option<f64> {
        self.row(user).and_then(|row| row.rating(item))
    }

    /// Reconstruct the dense row for `user` over [`RatingMatrix::items`],
    /// writing [`ABSENT`] where no rating exists.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::{ItemId, Rating, RatingMatrix, UserId};
    ///
    /// # fn main() -> Result<(), kindred_core::MatrixError> {
    /// let matrix = RatingMatrix::from_ratings([
    ///     Rating::new(UserId::new(1), ItemId::new(1), 5.0),
    ///     Rating::new(UserId::new(2), ItemId::new(2), 3.0),
    /// ])?;
    /// assert_eq!(matrix.dense_row(UserId::new(1)), Some(vec![5.0, 0.0]));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn dense_row(&self, user: UserId) -> Option<Vec<f64>> {
        let row = self.row(user)?;
        Some(
            self.items
                .iter()
                .map(|item| row.rating(*item).unwrap_or(ABSENT))
                .collect(),
        )
    }

    /// Iterate over the items `user` has not rated, in ascending order.
    ///
    /// Unknown users yield nothing.
    pub fn unrated_items(&self, user: UserId) -> impl Iterator<Item = ItemId> + '_ {
        let row = self.row(user);
        self.items
            .iter()
            .copied()
            .filter(move |item| row.is_some_and(|r| !r.has_rated(*item)))
    }
}

/// Borrowed view of one user's ratings.
#[derive(Debug, Clone, Copy)]
pub struct UserRow<'a> {
    user: UserId,
    row: &'a Row,
}

impl<'a> UserRow<'a> {
    /// Owner of the row.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Rating for `item`, if present.
    #[must_use]
    pub fn rating(&self, item: ItemId) -> Option<f64> {
        self.row.ratings.get(&item).copied()
    }

    /// Report whether the user rated `item`.
    #[must_use]
    pub fn has_rated(&self, item: ItemId) -> bool {
        self.row.ratings.contains_key(&item)
    }

    /// Iterate over `(item, rating)` pairs in ascending item order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, f64)> + 'a {
        self.row.ratings.iter().map(|(item, value)| (*item, *value))
    }

    /// Euclidean norm of the row, treating absent ratings as zero.
    ///
    /// Saturates to infinity for rows of very large ratings; similarity
    /// calculations should use [`UserRow::scale`] and
    /// [`UserRow::scaled_norm`] instead.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.row.scale * self.row.scaled_norm
    }

    /// Largest rating in the row, or `0.0` when every rating is zero.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.row.scale
    }

    /// Norm of the row after dividing every rating by [`UserRow::scale`].
    ///
    /// Lies in `1.0..=sqrt(len)` for rows with a positive rating and is
    /// `0.0` otherwise.
    #[must_use]
    pub const fn scaled_norm(&self) -> f64 {
        self.row.scaled_norm
    }

    /// Number of rated items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.row.ratings.len()
    }

    /// Report whether the row has no ratings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row.ratings.is_empty()
    }
}
