//! Neighbourhood selection: the `k` users most similar to a target.

use std::cmp::Ordering;

use kindred_core::UserId;

use crate::SimilarityVector;

/// A user selected as evidence for a prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    /// Neighbouring user.
    pub user: UserId,
    /// Similarity of the neighbour to the target.
    pub similarity: f64,
}

/// Users most similar to a target, most similar first.
///
/// Never contains the target and holds at most the requested number of
/// members. Equal similarities are ordered by ascending user id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Neighbourhood {
    members: Vec<Neighbour>,
}

impl Neighbourhood {
    /// Iterate over members in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, Neighbour> {
        self.members.iter()
    }

    /// Borrow the members in rank order.
    #[must_use]
    pub fn as_slice(&self) -> &[Neighbour] {
        &self.members
    }

    /// Member user ids in rank order.
    #[must_use]
    pub fn users(&self) -> Vec<UserId> {
        self.members.iter().map(|n| n.user).collect()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Report whether the neighbourhood is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a> IntoIterator for &'a Neighbourhood {
    type Item = &'a Neighbour;
    type IntoIter = std::slice::Iter<'a, Neighbour>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Pick the `k` users most similar to the target of `similarities`.
///
/// When fewer than `k` other users exist all of them are returned; `k == 0`
/// yields an empty neighbourhood.
///
/// # Examples
/// ```
/// use kindred_core::{ItemId, Rating, RatingMatrix, UserId};
/// use kindred_knn::{select_neighbours, similarities};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = RatingMatrix::from_ratings([
///     Rating::new(UserId::new(1), ItemId::new(1), 5.0),
///     Rating::new(UserId::new(2), ItemId::new(1), 1.0),
///     Rating::new(UserId::new(3), ItemId::new(2), 1.0),
/// ])?;
/// let scores = similarities(&matrix, UserId::new(1))?;
/// let neighbours = select_neighbours(&scores, 5);
/// assert_eq!(neighbours.users(), vec![UserId::new(2), UserId::new(3)]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn select_neighbours(similarities: &SimilarityVector, k: usize) -> Neighbourhood {
    if k == 0 {
        return Neighbourhood::default();
    }
    let target = similarities.target();
    let mut members: Vec<Neighbour> = similarities
        .iter()
        .filter(|(user, _)| *user != target)
        .map(|(user, similarity)| Neighbour { user, similarity })
        .collect();
    members.sort_unstable_by(by_similarity_then_user);
    members.truncate(k);
    log::trace!(
        "selected {} of {k} requested neighbours for user {target}",
        members.len()
    );
    Neighbourhood { members }
}

fn by_similarity_then_user(lhs: &Neighbour, rhs: &Neighbour) -> Ordering {
    rhs.similarity
        .total_cmp(&lhs.similarity)
        .then_with(|| lhs.user.cmp(&rhs.user))
}
