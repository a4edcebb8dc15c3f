//! Facade crate for the Kindred recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the user-based
//! recommender and the CSV loader behind feature flags.
//!
//! ```
//! # #[cfg(all(feature = "knn", feature = "data"))]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use kindred_engine::{
//!     ItemId, RatingMatrix, UserId, join_ratings, read_catalogue, read_ratings, recommend,
//! };
//!
//! let ratings = read_ratings(
//!     "user_id,product_id,rating\n1,1,5\n1,3,3\n2,1,4\n3,2,5\n3,3,4\n3,9,5\n".as_bytes(),
//! )?;
//! let catalogue = read_catalogue("product_id,product_name\n1,Tea\n2,Coffee\n3,Cocoa\n".as_bytes())?;
//! let matrix = RatingMatrix::from_table(&join_ratings(ratings, &catalogue))?;
//!
//! let items = recommend(&matrix, UserId::new(1), 2, 2);
//! assert_eq!(items, vec![ItemId::new(2)]);
//! let names: Vec<_> = items
//!     .iter()
//!     .filter_map(|item| catalogue.get(*item).map(|product| product.name()))
//!     .collect();
//! assert_eq!(names, vec!["Coffee"]);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "knn", feature = "data")))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]

pub use kindred_core::{
    DEFAULT_NEIGHBOURS, DEFAULT_RESULTS, Diagnostics, ItemId, MatrixBuilder, MatrixError,
    Prediction, Rating, RatingMatrix, RatingTable, RecommendError, RecommendRequest,
    RecommendResponse, Recommender, UserId, UserRow,
};

#[cfg(feature = "knn")]
pub use kindred_knn::{
    ConfigError, RecommendConfig, SharedMatrix, UserKnnRecommender, recommend,
    recommend_from_table, try_recommend, try_recommend_from_table,
};

#[cfg(feature = "data")]
pub use kindred_data::{
    Catalogue, DataError, Product, join_ratings, load_catalogue, load_ratings, read_catalogue,
    read_ratings,
};
