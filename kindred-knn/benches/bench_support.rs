//! Benchmark support utilities for the user-based recommender.
//!
//! Generates deterministic sparse rating tables so benchmark runs are
//! comparable across machines and commits.

use kindred_core::{ItemId, Rating, RatingTable, UserId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Ratings each generated user contributes.
const RATINGS_PER_USER: usize = 20;

/// Generate a sparse rating table for `users` users over `items` items.
///
/// Every user rates [`RATINGS_PER_USER`] items drawn uniformly with values
/// in `1.0..=5.0`. Repeated draws of the same item overwrite the earlier
/// value when the matrix is built, mirroring real duplicate submissions.
#[must_use]
pub fn generate_ratings(users: u64, items: u64, seed: u64) -> RatingTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut table = RatingTable::new();
    for user in 1..=users {
        for _ in 0..RATINGS_PER_USER {
            let item = rng.gen_range(1..=items);
            let value = rng.gen_range(1.0..=5.0);
            table.push(Rating::new(UserId::new(user), ItemId::new(item), value));
        }
    }
    table
}
