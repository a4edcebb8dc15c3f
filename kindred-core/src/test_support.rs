//! Fixtures shared by unit, behaviour, and property tests across the
//! workspace.

use crate::{ItemId, Rating, RatingMatrix, RatingTable, UserId};

/// Build a rating from raw identifiers.
#[must_use]
pub const fn rating(user: u64, item: u64, value: f64) -> Rating {
    Rating::new(UserId::new(user), ItemId::new(item), value)
}

/// Build a table from `(user, item, value)` triples.
#[must_use]
pub fn table(rows: &[(u64, u64, f64)]) -> RatingTable {
    rows.iter()
        .map(|&(user, item, value)| rating(user, item, value))
        .collect()
}

/// Build a matrix from `(user, item, value)` triples.
///
/// # Panics
/// Panics when the triples do not form a valid matrix; fixtures are expected
/// to be well formed.
#[must_use]
pub fn matrix(rows: &[(u64, u64, f64)]) -> RatingMatrix {
    match RatingMatrix::from_table(&table(rows)) {
        Ok(matrix) => matrix,
        Err(err) => panic!("fixture ratings must build a matrix: {err}"),
    }
}

/// The three-user, three-item fixture used throughout the docs:
/// user 1 rated items 1 and 3, user 2 rated item 1, user 3 rated items 2
/// and 3.
#[must_use]
pub fn three_user_matrix() -> RatingMatrix {
    matrix(&[
        (1, 1, 5.0),
        (1, 3, 3.0),
        (2, 1, 4.0),
        (3, 2, 5.0),
        (3, 3, 4.0),
    ])
}
