//! Tests for `UserKnnRecommender` and `SharedMatrix`.

use super::*;
use kindred_core::test_support::{matrix, table, three_user_matrix};
use rstest::{fixture, rstest};

#[fixture]
fn shared() -> Arc<SharedMatrix> {
    Arc::new(SharedMatrix::new(three_user_matrix()))
}

#[rstest]
fn snapshot_outlives_replacement(shared: Arc<SharedMatrix>) {
    let before = shared.snapshot();
    let previous = shared.replace(matrix(&[(7, 1, 1.0)]));

    assert!(Arc::ptr_eq(&before, &previous));
    assert!(before.contains_user(UserId::new(1)));
    let after = shared.snapshot();
    assert!(!after.contains_user(UserId::new(1)));
    assert!(after.contains_user(UserId::new(7)));
}

#[rstest]
fn invalid_rebuild_keeps_current_snapshot(shared: Arc<SharedMatrix>) {
    let err = shared
        .rebuild(&RatingTable::new())
        .expect_err("empty table should fail");
    assert_eq!(err, MatrixError::Empty);
    assert_eq!(shared.snapshot().user_count(), 3);
}

#[rstest]
fn rebuild_swaps_in_new_ratings(shared: Arc<SharedMatrix>) {
    shared
        .rebuild(&table(&[(1, 1, 5.0), (2, 1, 5.0), (2, 9, 4.0)]))
        .expect("valid table");
    let recommender = UserKnnRecommender::new(Arc::clone(&shared));
    assert_eq!(recommender.recommend_items(UserId::new(1)), vec![ItemId::new(9)]);
}

#[rstest]
fn trait_requests_use_request_sizes(shared: Arc<SharedMatrix>) {
    let recommender = UserKnnRecommender::new(shared);
    let request = RecommendRequest::new(UserId::new(1))
        .with_neighbours(2)
        .with_results(2);
    let response = Recommender::recommend(&recommender, &request).expect("known user");
    assert_eq!(response.items(), vec![ItemId::new(2)]);
    assert_eq!(response.diagnostics.neighbours, 2);
}

#[rstest]
fn trait_reports_unknown_users(shared: Arc<SharedMatrix>) {
    let recommender = UserKnnRecommender::new(shared);
    let err = Recommender::recommend(&recommender, &RecommendRequest::new(UserId::new(50)))
        .expect_err("unknown user");
    assert_eq!(
        err,
        RecommendError::UnknownUser {
            user: UserId::new(50)
        }
    );
    assert!(recommender.recommend_items(UserId::new(50)).is_empty());
}

#[rstest]
fn invalid_config_is_rejected(shared: Arc<SharedMatrix>) {
    let config = RecommendConfig {
        k_neighbours: 0,
        n_results: 5,
    };
    let err = UserKnnRecommender::with_config(shared, config).expect_err("invalid config");
    assert_eq!(err, ConfigError::ZeroNeighbours);
}

#[rstest]
fn configured_sizes_drive_boundary_calls(shared: Arc<SharedMatrix>) {
    let config = RecommendConfig {
        k_neighbours: 1,
        n_results: 5,
    };
    let recommender = UserKnnRecommender::with_config(shared, config).expect("valid config");
    // User 2 is user 1's closest neighbour and has no unrated coverage for item 2.
    assert!(recommender.recommend_items(UserId::new(1)).is_empty());
    assert_eq!(recommender.config(), config);
}

#[rstest]
fn concurrent_readers_share_one_snapshot(shared: Arc<SharedMatrix>) {
    let recommender = UserKnnRecommender::new(Arc::clone(&shared));
    let results: Vec<Vec<ItemId>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| recommender.recommend_items(UserId::new(1))))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("reader thread"))
            .collect()
    });
    assert!(results.iter().all(|items| items == &vec![ItemId::new(2)]));
}

#[rstest]
fn poisoned_lock_still_serves_the_complete_matrix(shared: Arc<SharedMatrix>) {
    let writer: std::thread::Result<()> = std::thread::scope(|scope| {
        scope
            .spawn(|| {
                let _guard = shared.current.write().expect("lock is healthy");
                panic!("writer failed while holding the lock");
            })
            .join()
    });
    assert!(writer.is_err());
    assert!(shared.current.is_poisoned());

    let snapshot = shared.snapshot();
    assert_eq!(snapshot.user_count(), 3);
    assert_eq!(snapshot.rating(UserId::new(1), ItemId::new(1)), Some(5.0));

    let previous = shared.replace(matrix(&[(7, 1, 1.0)]));
    assert!(Arc::ptr_eq(&snapshot, &previous));
    assert!(shared.snapshot().contains_user(UserId::new(7)));
}
