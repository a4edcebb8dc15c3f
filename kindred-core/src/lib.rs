//! Core domain types for the Kindred recommendation engine.
//!
//! The crate models the inputs and outputs of user-based collaborative
//! filtering without performing any I/O:
//! - [`Rating`] and [`RatingTable`] carry normalised `(user, item, value)`
//!   records handed over by a data loader.
//! - [`RatingMatrix`] is an immutable, sparse user × item snapshot built once
//!   through [`MatrixBuilder`] and shared read-only across requests.
//! - [`Recommender`] is the seam implemented by recommendation strategies,
//!   taking a [`RecommendRequest`] and returning a [`RecommendResponse`].
//!
//! Constructors return `Result` to surface invalid input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod ids;
pub mod matrix;
mod rating;
mod recommender;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use error::{MatrixError, RecommendError};
pub use ids::{ItemId, UserId};
pub use matrix::{MatrixBuilder, RatingMatrix, UserRow};
pub use rating::{Rating, RatingTable};
pub use recommender::{
    DEFAULT_NEIGHBOURS, DEFAULT_RESULTS, Diagnostics, Prediction, RecommendRequest,
    RecommendResponse, Recommender,
};
