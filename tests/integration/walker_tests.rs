//! Listing walk tests

use crate::fixtures::{mount_failing_listing, mount_listing, mount_slow_listing, test_fetcher};
use std::time::Duration;
use tioj_harvest::harvester::{FetchCause, ListWalker};
use tioj_harvest::{HarvestError, RankedUser, WindowScheduler};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ranked(name: &str, rank: u32) -> RankedUser {
    RankedUser {
        name: name.to_string(),
        rank,
    }
}

#[tokio::test]
async fn test_walk_fetches_every_page_in_order() {
    let server = MockServer::start().await;

    // Page 1 answers last so the window's completion order differs from page order
    mount_slow_listing(
        &server,
        1,
        &[(1, "alice"), (2, "bob")],
        Duration::from_millis(200),
    )
    .await;
    mount_listing(&server, 2, &[(3, "carol")], 1).await;
    mount_listing(&server, 3, &[], 1).await;
    mount_listing(&server, 4, &[(4, "dave")], 1).await;

    let walker = ListWalker::new(test_fetcher(&server), WindowScheduler::new(3));
    let users = walker.walk(4).await.expect("Walk should succeed");

    assert_eq!(
        users,
        vec![
            ranked("alice", 1),
            ranked("bob", 2),
            ranked("carol", 3),
            ranked("dave", 4)
        ]
    );
    server.verify().await;
}

#[tokio::test]
async fn test_walk_does_not_request_past_max_page() {
    let server = MockServer::start().await;

    mount_listing(&server, 1, &[(1, "alice")], 1).await;
    mount_listing(&server, 2, &[(2, "bob")], 1).await;
    mount_listing(&server, 3, &[(3, "carol")], 0).await;

    let walker = ListWalker::new(test_fetcher(&server), WindowScheduler::new(5));
    let users = walker.walk(2).await.expect("Walk should succeed");

    assert_eq!(users.len(), 2);
    server.verify().await;
}

#[tokio::test]
async fn test_walk_zero_pages_makes_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let walker = ListWalker::new(test_fetcher(&server), WindowScheduler::new(2));
    let users = walker.walk(0).await.expect("Walk should succeed");

    assert!(users.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn test_walk_failure_stops_later_chunks() {
    let server = MockServer::start().await;

    mount_listing(&server, 1, &[(1, "alice")], 1).await;
    mount_listing(&server, 2, &[(2, "bob")], 1).await;
    mount_failing_listing(&server, 3, 500).await;
    mount_listing(&server, 4, &[(3, "carol")], 0).await;
    mount_listing(&server, 5, &[(4, "dave")], 0).await;

    let walker = ListWalker::new(test_fetcher(&server), WindowScheduler::new(1));
    let result = walker.walk(5).await;

    match result {
        Err(HarvestError::Fetch(error)) => {
            assert_eq!(error.cause, FetchCause::Status(500));
            assert!(error.url.contains("page=3"));
        }
        other => panic!("Expected fetch error, got {:?}", other),
    }
    server.verify().await;
}

#[tokio::test]
async fn test_walk_failure_finishes_its_own_chunk() {
    let server = MockServer::start().await;

    // Window 3: pages 1-3 form the first chunk and all run; 4-5 never start
    mount_listing(&server, 1, &[(1, "alice")], 1).await;
    mount_failing_listing(&server, 2, 502).await;
    mount_listing(&server, 3, &[(2, "bob")], 1).await;
    mount_listing(&server, 4, &[(3, "carol")], 0).await;
    mount_listing(&server, 5, &[(4, "dave")], 0).await;

    let walker = ListWalker::new(test_fetcher(&server), WindowScheduler::new(3));
    let result = walker.walk(5).await;

    assert!(matches!(result, Err(HarvestError::Fetch(_))));
    server.verify().await;
}

#[tokio::test]
async fn test_walk_drops_user_repeated_across_pages() {
    let server = MockServer::start().await;

    mount_listing(&server, 1, &[(1, "alice"), (2, "bob")], 1).await;
    mount_listing(&server, 2, &[(2, "bob"), (3, "carol")], 1).await;

    let walker = ListWalker::new(test_fetcher(&server), WindowScheduler::new(2));
    let users = walker.walk(2).await.expect("Walk should succeed");

    assert_eq!(
        users,
        vec![ranked("alice", 1), ranked("bob", 2), ranked("carol", 3)]
    );
    server.verify().await;
}

#[tokio::test]
async fn test_fetch_single_page() {
    let server = MockServer::start().await;
    mount_listing(&server, 7, &[(61, "zoe"), (62, "yuri")], 1).await;

    let walker = ListWalker::new(test_fetcher(&server), WindowScheduler::new(1));
    let users = walker.fetch_page(7).await.expect("Fetch should succeed");

    assert_eq!(users, vec![ranked("zoe", 61), ranked("yuri", 62)]);
}
