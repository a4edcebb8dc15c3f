#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for user-based recommendations.

use std::cell::RefCell;
use std::sync::Arc;

use kindred_core::test_support::{matrix, table, three_user_matrix};
use kindred_core::{ItemId, RecommendRequest, Recommender, UserId};
use kindred_knn::{SharedMatrix, UserKnnRecommender};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const THREE_USER_RATINGS: &[(u64, u64, f64)] = &[
    (1, 1, 5.0),
    (1, 3, 3.0),
    (2, 1, 4.0),
    (3, 2, 5.0),
    (3, 3, 4.0),
];

/// Shared state threaded through each scenario.
pub struct TestContext {
    shared: RefCell<Option<Arc<SharedMatrix>>>,
    items: RefCell<Option<Vec<ItemId>>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        shared: RefCell::default(),
        items: RefCell::default(),
    }
}

fn recommender(context: &TestContext) -> UserKnnRecommender {
    let shared = context
        .shared
        .borrow()
        .as_ref()
        .cloned()
        .expect("matrix must be initialised");
    UserKnnRecommender::new(shared)
}

fn record_items(context: &TestContext, items: Vec<ItemId>) {
    *context.items.borrow_mut() = Some(items);
}

fn recorded_items(context: &TestContext) -> Vec<ItemId> {
    context
        .items
        .borrow()
        .clone()
        .expect("recommendations should be requested")
}

#[given("the three user rating matrix")]
fn three_users(context: &TestContext) {
    *context.shared.borrow_mut() = Some(Arc::new(SharedMatrix::new(three_user_matrix())));
}

#[given("a rating matrix where two users rate different items")]
fn disjoint_users(context: &TestContext) {
    let matrix = matrix(&[(1, 1, 3.0), (2, 2, 3.0)]);
    *context.shared.borrow_mut() = Some(Arc::new(SharedMatrix::new(matrix)));
}

#[given("the matrix is rebuilt so user 2 also rates item 4")]
fn rebuild_with_item_four(context: &TestContext) {
    let mut ratings = table(THREE_USER_RATINGS);
    ratings.extend(table(&[(2, 4, 3.0)]));
    recommender(context)
        .matrix()
        .rebuild(&ratings)
        .expect("rebuild should succeed");
}

#[when("I request 2 recommendations for user 1 from 2 neighbours")]
fn request_small(context: &TestContext) {
    let request = RecommendRequest::new(UserId::new(1))
        .with_neighbours(2)
        .with_results(2);
    let response = recommender(context)
        .recommend(&request)
        .expect("user 1 is known");
    record_items(context, response.items());
}

#[when("I request recommendations for user 1")]
fn request_user_one(context: &TestContext) {
    let items = recommender(context).recommend_items(UserId::new(1));
    record_items(context, items);
}

#[when("I request recommendations for user 99")]
fn request_unknown(context: &TestContext) {
    let items = recommender(context).recommend_items(UserId::new(99));
    record_items(context, items);
}

#[then("the recommendations are item 2")]
fn only_item_two(context: &TestContext) {
    assert_eq!(recorded_items(context), vec![ItemId::new(2)]);
}

#[then("the recommendations are items 2 and 4")]
fn items_two_and_four(context: &TestContext) {
    assert_eq!(
        recorded_items(context),
        vec![ItemId::new(2), ItemId::new(4)]
    );
}

#[then("no items are recommended")]
fn nothing_recommended(context: &TestContext) {
    assert!(recorded_items(context).is_empty());
}

#[scenario(path = "tests/features/recommend.feature", index = 0)]
fn closest_neighbours_drive_recommendations(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommend.feature", index = 1)]
fn unknown_user_gets_nothing(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommend.feature", index = 2)]
fn disjoint_users_get_nothing(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommend.feature", index = 3)]
fn rebuilt_matrix_is_visible(context: TestContext) {
    let _ = context;
}
