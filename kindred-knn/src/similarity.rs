//! Cosine similarity between users' rating rows.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use kindred_core::{RatingMatrix, RecommendError, UserId, UserRow};

/// Similarity of every user in a matrix to one target user.
///
/// Covers the target itself. Scores lie in `-1.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityVector {
    target: UserId,
    scores: BTreeMap<UserId, f64>,
}

impl SimilarityVector {
    /// User the scores are relative to.
    #[must_use]
    pub const fn target(&self) -> UserId {
        self.target
    }

    /// Similarity between the target and `user`, if `user` is in the matrix.
    #[must_use]
    pub fn get(&self, user: UserId) -> Option<f64> {
        self.scores.get(&user).copied()
    }

    /// Iterate over `(user, similarity)` pairs in ascending user order.
    pub fn iter(&self) -> impl Iterator<Item = (UserId, f64)> + '_ {
        self.scores.iter().map(|(user, score)| (*user, *score))
    }

    /// Number of scored users, the target included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Report whether no users were scored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Score every user in `matrix` against `target`.
///
/// # Errors
/// Returns [`RecommendError::UnknownUser`] when `target` has no row.
///
/// # Examples
/// ```
/// use kindred_core::{ItemId, Rating, RatingMatrix, UserId};
/// use kindred_knn::similarities;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = RatingMatrix::from_ratings([
///     Rating::new(UserId::new(1), ItemId::new(1), 3.0),
///     Rating::new(UserId::new(2), ItemId::new(2), 3.0),
/// ])?;
/// let scores = similarities(&matrix, UserId::new(1))?;
/// assert_eq!(scores.get(UserId::new(1)), Some(1.0));
/// assert_eq!(scores.get(UserId::new(2)), Some(0.0));
/// # Ok(())
/// # }
/// ```
pub fn similarities(
    matrix: &RatingMatrix,
    target: UserId,
) -> Result<SimilarityVector, RecommendError> {
    let target_row = matrix
        .row(target)
        .ok_or(RecommendError::UnknownUser { user: target })?;
    let scores = matrix
        .rows()
        .map(|row| (row.user(), row_similarity(target_row, row)))
        .collect();
    Ok(SimilarityVector { target, scores })
}

/// Cosine similarity between two users, or `None` if either is unknown.
#[must_use]
pub fn cosine_similarity(matrix: &RatingMatrix, lhs: UserId, rhs: UserId) -> Option<f64> {
    let lhs_row = matrix.row(lhs)?;
    let rhs_row = matrix.row(rhs)?;
    Some(row_similarity(lhs_row, rhs_row))
}

/// A zero-norm row is similar to nothing, itself included.
///
/// Both rows are divided by their largest rating before the dot product, so
/// the result stays defined for any finite, non-negative ratings.
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity divides the dot product by the norm product"
)]
fn row_similarity(lhs: UserRow<'_>, rhs: UserRow<'_>) -> f64 {
    if !(lhs.scale() > 0.0 && rhs.scale() > 0.0) {
        return 0.0;
    }
    if lhs.user() == rhs.user() {
        return 1.0;
    }
    let denominator = lhs.scaled_norm() * rhs.scaled_norm();
    let similarity = scaled_dot(lhs, rhs) / denominator;
    if similarity.is_finite() {
        similarity.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Sum products of scaled ratings over co-rated items in ascending item
/// order, so that `scaled_dot(a, b)` and `scaled_dot(b, a)` are bit-identical.
#[expect(
    clippy::float_arithmetic,
    reason = "dot products accumulate floating-point products"
)]
fn scaled_dot(lhs: UserRow<'_>, rhs: UserRow<'_>) -> f64 {
    let (lhs_scale, rhs_scale) = (lhs.scale(), rhs.scale());
    let mut left = lhs.iter().peekable();
    let mut right = rhs.iter().peekable();
    let mut total = 0.0_f64;
    while let (Some(&(left_item, left_value)), Some(&(right_item, right_value))) =
        (left.peek(), right.peek())
    {
        match left_item.cmp(&right_item) {
            Ordering::Less => {
                left.next();
            }
            Ordering::Greater => {
                right.next();
            }
            Ordering::Equal => {
                total += (left_value / lhs_scale) * (right_value / rhs_scale);
                left.next();
                right.next();
            }
        }
    }
    total
}
