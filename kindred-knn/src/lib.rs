//! User-based k-nearest-neighbour recommendations for Kindred.
//!
//! A request runs four stages over an immutable
//! [`RatingMatrix`](kindred_core::RatingMatrix) snapshot, each consuming the
//! full output of the previous one:
//! 1. [`similarities`] scores every user against the target with cosine
//!    similarity.
//! 2. [`select_neighbours`] keeps the `k` most similar users, excluding the
//!    target, breaking ties by ascending user id.
//! 3. [`predict`] estimates a similarity-weighted rating for every item the
//!    target has not rated, skipping items without evidence or with an
//!    undefined weighted average.
//! 4. [`rank`] orders the estimates by descending score, then ascending item
//!    id, and truncates to `n`.
//!
//! [`recommend`] is the infallible request boundary: an unknown user yields
//! an empty list and a log record. [`UserKnnRecommender`] wraps the pipeline
//! behind the [`Recommender`](kindred_core::Recommender) trait and reads from a
//! [`SharedMatrix`] that can be swapped while requests are in flight.
//!
//! # Examples
//!
//! ```
//! use kindred_core::{ItemId, Rating, RatingMatrix, UserId};
//! use kindred_knn::recommend;
//!
//! # fn main() -> Result<(), kindred_core::MatrixError> {
//! let matrix = RatingMatrix::from_ratings([
//!     Rating::new(UserId::new(1), ItemId::new(1), 5.0),
//!     Rating::new(UserId::new(1), ItemId::new(3), 3.0),
//!     Rating::new(UserId::new(2), ItemId::new(1), 4.0),
//!     Rating::new(UserId::new(3), ItemId::new(2), 5.0),
//!     Rating::new(UserId::new(3), ItemId::new(3), 4.0),
//! ])?;
//! assert_eq!(recommend(&matrix, UserId::new(1), 2, 2), vec![ItemId::new(2)]);
//! assert!(recommend(&matrix, UserId::new(99), 2, 2).is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod engine;
mod neighbours;
mod predictor;
mod recommend;
mod similarity;

pub use config::{ConfigError, RecommendConfig};
pub use engine::{SharedMatrix, UserKnnRecommender};
pub use neighbours::{Neighbour, Neighbourhood, select_neighbours};
pub use predictor::{PredictionMap, PredictionOutcome, predict, rank};
pub use recommend::{
    recommend, recommend_from_table, try_recommend, try_recommend_from_table,
};
pub use similarity::{SimilarityVector, cosine_similarity, similarities};
