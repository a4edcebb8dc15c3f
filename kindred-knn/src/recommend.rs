//! Request boundary for user-based recommendations.
//!
//! `try_recommend` runs the full pipeline and reports failures; `recommend`
//! and `recommend_from_table` are the infallible boundary, translating every
//! failure into an empty list plus a log record.

use std::time::Instant;

use kindred_core::{
    Diagnostics, ItemId, RatingMatrix, RatingTable, RecommendError, RecommendResponse, UserId,
};

use crate::{predict, rank, select_neighbours, similarities};

/// Recommend up to `n_results` items for `user` from its `k_neighbours` most
/// similar users.
///
/// Never returns an item `user` already rated. An unknown user yields an
/// empty list; so does a user for whom no item has neighbour coverage.
#[must_use]
pub fn recommend(
    matrix: &RatingMatrix,
    user: UserId,
    k_neighbours: usize,
    n_results: usize,
) -> Vec<ItemId> {
    match try_recommend(matrix, user, k_neighbours, n_results) {
        Ok(response) => response.items(),
        Err(err) => {
            log::info!("returning no recommendations: {err}");
            Vec::new()
        }
    }
}

/// Run the recommendation pipeline, returning scored predictions and
/// diagnostics.
///
/// # Errors
/// Returns [`RecommendError::UnknownUser`] when `user` has no row in
/// `matrix`.
///
/// # Examples
/// ```
/// use kindred_core::{ItemId, Rating, RatingMatrix, RecommendError, UserId};
/// use kindred_knn::try_recommend;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = RatingMatrix::from_ratings([
///     Rating::new(UserId::new(1), ItemId::new(1), 5.0),
///     Rating::new(UserId::new(2), ItemId::new(1), 4.0),
///     Rating::new(UserId::new(2), ItemId::new(2), 2.0),
/// ])?;
/// let response = try_recommend(&matrix, UserId::new(1), 5, 5)?;
/// assert_eq!(response.items(), vec![ItemId::new(2)]);
/// assert_eq!(response.diagnostics.neighbours, 1);
///
/// let err = try_recommend(&matrix, UserId::new(7), 5, 5).unwrap_err();
/// assert_eq!(err, RecommendError::UnknownUser { user: UserId::new(7) });
/// # Ok(())
/// # }
/// ```
pub fn try_recommend(
    matrix: &RatingMatrix,
    user: UserId,
    k_neighbours: usize,
    n_results: usize,
) -> Result<RecommendResponse, RecommendError> {
    let started_at = Instant::now();
    let scores = similarities(matrix, user)?;
    let neighbourhood = select_neighbours(&scores, k_neighbours);
    let outcome = predict(matrix, user, &neighbourhood);
    let predictions = rank(&outcome.predictions, n_results);

    let diagnostics = Diagnostics {
        elapsed: started_at.elapsed(),
        neighbours: neighbourhood.len(),
        candidates: outcome.candidates,
        skipped: outcome.skipped,
    };
    log::debug!(
        "recommended {} items for user {user} from {} neighbours ({} candidates, {} skipped) in {:?}",
        predictions.len(),
        diagnostics.neighbours,
        diagnostics.candidates,
        diagnostics.skipped,
        diagnostics.elapsed
    );
    Ok(RecommendResponse {
        predictions,
        diagnostics,
    })
}

/// Build a matrix from `table` and recommend from it.
///
/// Invalid or empty tables yield an empty list and a warning, as do unknown
/// users. Callers serving many requests should build the matrix once and use
/// [`recommend`] instead.
#[must_use]
pub fn recommend_from_table(
    table: &RatingTable,
    user: UserId,
    k_neighbours: usize,
    n_results: usize,
) -> Vec<ItemId> {
    match try_recommend_from_table(table, user, k_neighbours, n_results) {
        Ok(response) => response.items(),
        Err(RecommendError::Matrix(err)) => {
            log::warn!("returning no recommendations for user {user}: {err}");
            Vec::new()
        }
        Err(err) => {
            log::info!("returning no recommendations: {err}");
            Vec::new()
        }
    }
}

/// Build a matrix from `table` and run [`try_recommend`] against it.
///
/// # Errors
/// Returns [`RecommendError::Matrix`] when the table is empty or holds an
/// invalid rating, and [`RecommendError::UnknownUser`] when `user` has no
/// ratings in it.
pub fn try_recommend_from_table(
    table: &RatingTable,
    user: UserId,
    k_neighbours: usize,
    n_results: usize,
) -> Result<RecommendResponse, RecommendError> {
    let matrix = RatingMatrix::from_table(table)?;
    try_recommend(&matrix, user, k_neighbours, n_results)
}
