//! Similarity-weighted rating prediction and ranking.
//!
//! For every item the target has not rated, the neighbours who did rate it
//! contribute `rating × similarity`; the estimate is that sum divided by the
//! sum of their similarities. Items nobody in the neighbourhood rated are left
//! out rather than scored as zero, and items whose similarity sum is not
//! positive are skipped because the weighted mean is undefined there.

use std::collections::BTreeMap;

use kindred_core::{ItemId, Prediction, RatingMatrix, UserId, UserRow};

use crate::Neighbourhood;

/// Predicted ratings keyed by item, covering only items the target has not
/// rated and for which an estimate is defined.
pub type PredictionMap = BTreeMap<ItemId, f64>;

/// Output of [`predict`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionOutcome {
    /// Defined estimates.
    pub predictions: PredictionMap,
    /// Unrated items that were considered.
    pub candidates: usize,
    /// Candidates with neighbour ratings but an undefined weighted average.
    pub skipped: usize,
}

enum Estimate {
    Defined(f64),
    NoEvidence,
    Undefined,
}

/// Estimate ratings for the items `target` has not rated.
///
/// Unknown targets and empty neighbourhoods produce an empty outcome; this
/// stage never fails.
///
/// # Examples
/// ```
/// use kindred_core::{ItemId, Rating, RatingMatrix, UserId};
/// use kindred_knn::{predict, select_neighbours, similarities};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = RatingMatrix::from_ratings([
///     Rating::new(UserId::new(1), ItemId::new(1), 4.0),
///     Rating::new(UserId::new(2), ItemId::new(1), 4.0),
///     Rating::new(UserId::new(2), ItemId::new(2), 3.0),
/// ])?;
/// let target = UserId::new(1);
/// let neighbours = select_neighbours(&similarities(&matrix, target)?, 5);
/// let outcome = predict(&matrix, target, &neighbours);
/// let estimate = outcome.predictions.get(&ItemId::new(2)).copied();
/// assert!(estimate.is_some_and(|score| (score - 3.0).abs() < 1e-9));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn predict(
    matrix: &RatingMatrix,
    target: UserId,
    neighbourhood: &Neighbourhood,
) -> PredictionOutcome {
    if !matrix.contains_user(target) {
        return PredictionOutcome::default();
    }
    let evidence: Vec<(UserRow<'_>, f64)> = neighbourhood
        .iter()
        .filter_map(|n| matrix.row(n.user).map(|row| (row, n.similarity)))
        .collect();

    let mut outcome = PredictionOutcome::default();
    for item in matrix.unrated_items(target) {
        outcome.candidates = outcome.candidates.saturating_add(1);
        match weighted_average(&evidence, item) {
            Estimate::Defined(score) => {
                outcome.predictions.insert(item, score);
            }
            Estimate::NoEvidence => {}
            Estimate::Undefined => {
                log::trace!(
                    "skipping item {item} for user {target}: similarity sum is not positive"
                );
                outcome.skipped = outcome.skipped.saturating_add(1);
            }
        }
    }
    outcome
}

#[expect(
    clippy::float_arithmetic,
    reason = "weighted averages need floating-point sums and a division"
)]
fn weighted_average(evidence: &[(UserRow<'_>, f64)], item: ItemId) -> Estimate {
    let mut weighted_sum = 0.0_f64;
    let mut similarity_sum = 0.0_f64;
    let mut contributors = 0_usize;
    for (row, similarity) in evidence {
        if let Some(rating) = row.rating(item) {
            weighted_sum += rating * similarity;
            similarity_sum += similarity;
            contributors = contributors.saturating_add(1);
        }
    }
    if contributors == 0 {
        return Estimate::NoEvidence;
    }
    if !(similarity_sum > 0.0) {
        return Estimate::Undefined;
    }
    let score = weighted_sum / similarity_sum;
    if score.is_finite() {
        Estimate::Defined(score)
    } else {
        Estimate::Undefined
    }
}

/// Order predictions by descending score, then ascending item id, and keep
/// the first `n`.
///
/// # Examples
/// ```
/// use kindred_core::ItemId;
/// use kindred_knn::{PredictionMap, rank};
///
/// let predictions = PredictionMap::from([
///     (ItemId::new(3), 4.0),
///     (ItemId::new(1), 4.0),
///     (ItemId::new(2), 5.0),
/// ]);
/// let ranked: Vec<_> = rank(&predictions, 2).iter().map(|p| p.item).collect();
/// assert_eq!(ranked, vec![ItemId::new(2), ItemId::new(1)]);
/// ```
#[must_use]
pub fn rank(predictions: &PredictionMap, n: usize) -> Vec<Prediction> {
    let mut ranked: Vec<Prediction> = predictions
        .iter()
        .map(|(item, score)| Prediction {
            item: *item,
            score: *score,
        })
        .collect();
    ranked.sort_unstable_by(|lhs, rhs| {
        rhs.score
            .total_cmp(&lhs.score)
            .then_with(|| lhs.item.cmp(&rhs.item))
    });
    ranked.truncate(n);
    ranked
}
