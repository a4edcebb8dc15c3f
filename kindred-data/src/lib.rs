//! CSV loading for Kindred rating data.
//!
//! Reads a ratings file (`user_id,product_id,rating`) into a
//! [`RatingTable`](kindred_core::RatingTable) and a product file
//! (`product_id,product_name`, plus any extra columns) into a [`Catalogue`].
//! [`join_ratings`] keeps only ratings whose product appears in the
//! catalogue, so the matrix never holds items that cannot be displayed.
//!
//! Files are opened through `cap-std` with UTF-8 paths; the `read_*`
//! variants accept any [`std::io::Read`] for in-memory sources.

#![forbid(unsafe_code)]

mod catalogue;
mod error;
mod fs;
mod join;
mod ratings;

pub use catalogue::{Catalogue, Product, load_catalogue, read_catalogue};
pub use error::DataError;
pub use join::join_ratings;
pub use ratings::{load_ratings, read_ratings};
