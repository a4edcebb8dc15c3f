//! Joining ratings to the product catalogue.

use kindred_core::RatingTable;

use crate::Catalogue;

/// Keep only ratings whose product is listed in `catalogue`.
///
/// Dropped ratings are counted in a warning; order of the kept ratings is
/// preserved.
///
/// # Examples
/// ```
/// use kindred_data::{join_ratings, read_catalogue, read_ratings};
///
/// let ratings = read_ratings("user_id,product_id,rating\n1,1,5\n1,9,2\n".as_bytes())
///     .expect("valid ratings");
/// let catalogue = read_catalogue("product_id,product_name\n1,Tea\n".as_bytes())
///     .expect("valid catalogue");
/// assert_eq!(join_ratings(ratings, &catalogue).len(), 1);
/// ```
#[must_use]
pub fn join_ratings(mut ratings: RatingTable, catalogue: &Catalogue) -> RatingTable {
    let before = ratings.len();
    ratings.retain(|rating| catalogue.contains(rating.item));
    let dropped = before.saturating_sub(ratings.len());
    if dropped > 0 {
        log::warn!(
            "dropped {dropped} of {before} ratings for products missing from the catalogue"
        );
    }
    ratings
}
