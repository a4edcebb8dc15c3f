//! Configuration for [`UserKnnRecommender`](crate::UserKnnRecommender).

use kindred_core::{DEFAULT_NEIGHBOURS, DEFAULT_RESULTS, RecommendRequest, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable parameters of the user-based recommender.
///
/// Missing fields fall back to [`DEFAULT_NEIGHBOURS`] and
/// [`DEFAULT_RESULTS`] when deserialised.
///
/// # Examples
/// ```
/// use kindred_knn::RecommendConfig;
///
/// let config = RecommendConfig::default().validate().expect("defaults are valid");
/// assert_eq!(config.k_neighbours, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommendConfig {
    /// Number of similar users whose ratings feed each prediction.
    pub k_neighbours: usize,
    /// Maximum number of items returned per request.
    pub n_results: usize,
}

impl RecommendConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when either size is zero.
    pub const fn validate(self) -> Result<Self, ConfigError> {
        if self.k_neighbours == 0 {
            return Err(ConfigError::ZeroNeighbours);
        }
        if self.n_results == 0 {
            return Err(ConfigError::ZeroResults);
        }
        Ok(self)
    }

    /// Build a request for `user` carrying these parameters.
    #[must_use]
    pub const fn request(&self, user: UserId) -> RecommendRequest {
        RecommendRequest::new(user)
            .with_neighbours(self.k_neighbours)
            .with_results(self.n_results)
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            k_neighbours: DEFAULT_NEIGHBOURS,
            n_results: DEFAULT_RESULTS,
        }
    }
}

/// Errors raised when validating a [`RecommendConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The neighbourhood would always be empty.
    #[error("k_neighbours must be at least 1")]
    ZeroNeighbours,
    /// Every response would be empty.
    #[error("n_results must be at least 1")]
    ZeroResults,
}
