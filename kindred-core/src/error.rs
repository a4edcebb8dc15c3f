//! Error types raised while building matrices and serving recommendations.

use thiserror::Error;

use crate::{ItemId, UserId};

/// Errors returned by [`MatrixBuilder`](crate::MatrixBuilder).
///
/// Both variants describe invalid input data; the caller must supply a
/// usable rating table before recommendations can be served.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// No ratings were supplied, so there are no users or items.
    #[error("cannot build a rating matrix from an empty rating table")]
    Empty,
    /// A rating value was negative or not finite.
    #[error("rating {value} by user {user} for item {item} must be finite and non-negative")]
    InvalidRating {
        /// User who supplied the rating.
        user: UserId,
        /// Item the rating refers to.
        item: ItemId,
        /// Offending value.
        value: f64,
    },
}

/// Errors returned by [`Recommender::recommend`](crate::Recommender::recommend).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// The requested user has no row in the rating matrix.
    #[error("user {user} is not present in the rating matrix")]
    UnknownUser {
        /// Requested user.
        user: UserId,
    },
    /// The rating matrix could not be built.
    #[error("failed to build rating matrix: {0}")]
    Matrix(#[from] MatrixError),
}
