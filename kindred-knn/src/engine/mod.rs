//! `UserKnnRecommender` and the shared matrix snapshot it reads from.
//!
//! Requests take an `Arc` to the current matrix when they start, so a
//! concurrent [`SharedMatrix::replace`] never exposes a partially updated
//! matrix: in-flight requests finish on the old snapshot and later requests
//! see the new one.

use std::sync::{Arc, PoisonError, RwLock};

use kindred_core::{
    ItemId, MatrixError, RatingMatrix, RatingTable, RecommendError, RecommendRequest,
    RecommendResponse, Recommender, UserId,
};

use crate::{ConfigError, RecommendConfig, recommend, try_recommend};

/// Holder of the current [`RatingMatrix`] snapshot.
///
/// Supports one writer swapping in rebuilt matrices while many readers serve
/// requests.
#[derive(Debug)]
pub struct SharedMatrix {
    current: RwLock<Arc<RatingMatrix>>,
}

impl SharedMatrix {
    /// Wrap an already built matrix.
    #[must_use]
    pub fn new(matrix: RatingMatrix) -> Self {
        Self {
            current: RwLock::new(Arc::new(matrix)),
        }
    }

    /// Build the initial snapshot from a rating table.
    ///
    /// # Errors
    /// Propagates [`MatrixError`] from matrix construction.
    pub fn from_table(table: &RatingTable) -> Result<Self, MatrixError> {
        RatingMatrix::from_table(table).map(Self::new)
    }

    /// Return the current snapshot.
    ///
    /// The lock only ever guards an `Arc` swap, so a poisoned lock still
    /// holds a complete matrix and is read through.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RatingMatrix> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new matrix and return the previous snapshot.
    pub fn replace(&self, matrix: RatingMatrix) -> Arc<RatingMatrix> {
        let next = Arc::new(matrix);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        log::info!(
            "replacing rating matrix snapshot ({} users, {} items)",
            next.user_count(),
            next.item_count()
        );
        std::mem::replace(&mut *guard, next)
    }

    /// Rebuild the matrix from `table` and swap it in.
    ///
    /// The current snapshot is kept when the table is invalid.
    ///
    /// # Errors
    /// Propagates [`MatrixError`] from matrix construction.
    pub fn rebuild(&self, table: &RatingTable) -> Result<(), MatrixError> {
        let matrix = RatingMatrix::from_table(table)?;
        self.replace(matrix);
        Ok(())
    }
}

/// User-based collaborative filtering over a [`SharedMatrix`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use kindred_core::{ItemId, Rating, RatingMatrix, UserId};
/// use kindred_knn::{SharedMatrix, UserKnnRecommender};
///
/// # fn main() -> Result<(), kindred_core::MatrixError> {
/// let matrix = RatingMatrix::from_ratings([
///     Rating::new(UserId::new(1), ItemId::new(1), 5.0),
///     Rating::new(UserId::new(2), ItemId::new(1), 5.0),
///     Rating::new(UserId::new(2), ItemId::new(2), 4.0),
/// ])?;
/// let recommender = UserKnnRecommender::new(Arc::new(SharedMatrix::new(matrix)));
/// assert_eq!(recommender.recommend_items(UserId::new(1)), vec![ItemId::new(2)]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UserKnnRecommender {
    matrix: Arc<SharedMatrix>,
    config: RecommendConfig,
}

impl UserKnnRecommender {
    /// Construct a recommender using the default configuration.
    #[must_use]
    pub fn new(matrix: Arc<SharedMatrix>) -> Self {
        Self {
            matrix,
            config: RecommendConfig::default(),
        }
    }

    /// Construct a recommender with an explicit configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the configuration is invalid.
    pub fn with_config(
        matrix: Arc<SharedMatrix>,
        config: RecommendConfig,
    ) -> Result<Self, ConfigError> {
        let validated = config.validate()?;
        Ok(Self {
            matrix,
            config: validated,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> RecommendConfig {
        self.config
    }

    /// Snapshot holder shared with writers.
    #[must_use]
    pub fn matrix(&self) -> &SharedMatrix {
        &self.matrix
    }

    /// Recommend items for `user` using the configured sizes.
    ///
    /// Unknown users yield an empty list.
    #[must_use]
    pub fn recommend_items(&self, user: UserId) -> Vec<ItemId> {
        let snapshot = self.matrix.snapshot();
        recommend(
            &snapshot,
            user,
            self.config.k_neighbours,
            self.config.n_results,
        )
    }
}

impl Recommender for UserKnnRecommender {
    fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, RecommendError> {
        let snapshot = self.matrix.snapshot();
        try_recommend(
            &snapshot,
            request.user,
            request.k_neighbours,
            request.n_results,
        )
    }
}

#[cfg(test)]
mod tests;
