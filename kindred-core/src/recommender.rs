//! Recommend unseen items to a user.
//!
//! The `Recommender` trait turns a [`RecommendRequest`] into a ranked list of
//! [`Prediction`] values. Implementations hold an immutable rating snapshot
//! and must be thread-safe so requests can run in parallel.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ItemId, RecommendError, UserId};

/// Neighbourhood size used when the caller does not choose one.
pub const DEFAULT_NEIGHBOURS: usize = 5;

/// Result list length used when the caller does not choose one.
pub const DEFAULT_RESULTS: usize = 5;

/// Parameters for a recommendation request.
///
/// # Examples
/// ```rust
/// use kindred_core::{RecommendRequest, UserId};
///
/// let request = RecommendRequest::new(UserId::new(1)).with_neighbours(10);
/// assert_eq!(request.k_neighbours, 10);
/// assert_eq!(request.n_results, kindred_core::DEFAULT_RESULTS);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecommendRequest {
    /// User to recommend items for.
    pub user: UserId,
    /// Number of similar users whose ratings feed the prediction.
    pub k_neighbours: usize,
    /// Maximum number of items to return.
    pub n_results: usize,
}

impl RecommendRequest {
    /// Build a request using [`DEFAULT_NEIGHBOURS`] and [`DEFAULT_RESULTS`].
    #[must_use]
    pub const fn new(user: UserId) -> Self {
        Self {
            user,
            k_neighbours: DEFAULT_NEIGHBOURS,
            n_results: DEFAULT_RESULTS,
        }
    }

    /// Replace the neighbourhood size.
    #[must_use]
    pub const fn with_neighbours(mut self, k_neighbours: usize) -> Self {
        self.k_neighbours = k_neighbours;
        self
    }

    /// Replace the result list length.
    #[must_use]
    pub const fn with_results(mut self, n_results: usize) -> Self {
        self.n_results = n_results;
        self
    }
}

/// A predicted rating for an item the user has not rated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Prediction {
    /// Recommended item.
    pub item: ItemId,
    /// Similarity-weighted rating estimate.
    pub score: f64,
}

/// Measurements gathered while serving a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Wall-clock time spent on the request.
    pub elapsed: Duration,
    /// Neighbours actually selected (may be fewer than requested).
    pub neighbours: usize,
    /// Unrated items considered for prediction.
    pub candidates: usize,
    /// Candidates dropped because the weighted average was undefined.
    pub skipped: usize,
}

/// Ranked output of a recommendation request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecommendResponse {
    /// Predictions ordered by descending score, then ascending item id.
    pub predictions: Vec<Prediction>,
    /// Request measurements.
    pub diagnostics: Diagnostics,
}

impl RecommendResponse {
    /// A response carrying no recommendations.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Item identifiers in ranked order.
    #[must_use]
    pub fn items(&self) -> Vec<ItemId> {
        self.predictions.iter().map(|p| p.item).collect()
    }
}

/// Produce ranked recommendations for a user.
///
/// Implementations return [`RecommendError::UnknownUser`] for users missing
/// from their rating snapshot. "Nothing to recommend" is not an error and is
/// reported as an empty response.
///
/// # Examples
/// ```rust
/// use kindred_core::{
///     ItemId, Prediction, RecommendError, RecommendRequest, RecommendResponse, Recommender,
///     UserId,
/// };
///
/// struct Popular;
///
/// impl Recommender for Popular {
///     fn recommend(
///         &self,
///         request: &RecommendRequest,
///     ) -> Result<RecommendResponse, RecommendError> {
///         let predictions = (1..=request.n_results as u64)
///             .map(|id| Prediction { item: ItemId::new(id), score: 1.0 })
///             .collect();
///         Ok(RecommendResponse { predictions, ..RecommendResponse::empty() })
///     }
/// }
///
/// let response = Popular
///     .recommend(&RecommendRequest::new(UserId::new(1)).with_results(2))
///     .unwrap();
/// assert_eq!(response.items(), vec![ItemId::new(1), ItemId::new(2)]);
/// ```
pub trait Recommender: Send + Sync {
    /// Serve a request, producing ranked predictions or an error.
    ///
    /// # Errors
    /// Returns [`RecommendError`] when the request cannot be answered.
    fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, RecommendError>;
}
