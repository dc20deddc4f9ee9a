//! Per-user aggregation tests

use crate::fixtures::{activity_page, mount_activity, profile_page, test_fetcher};
use tioj_harvest::harvester::{AggregationError, Aggregator, FetchCause};
use tioj_harvest::RankedUser;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn alice() -> RankedUser {
    RankedUser {
        name: "alice".to_string(),
        rank: 3,
    }
}

async fn mount_profile_html(server: &MockServer, handle: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", handle)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_aggregate_full_record() {
    let server = MockServer::start().await;

    let badges = [
        ("success", "1001", "42"),
        ("warning", "1002", "42"),
        ("muted", "1003", "42"),
        ("success", "1004", "42"),
    ];
    mount_profile_html(&server, "alice", profile_page("Alice A.", "alice", &badges)).await;
    mount_activity(&server, "42", 15).await;

    let aggregator = Aggregator::new(test_fetcher(&server));
    let record = aggregator.aggregate(&alice()).await.expect("Aggregate should succeed");

    assert_eq!(record.rank, 3);
    assert_eq!(record.profile.handle, "alice");
    assert_eq!(record.profile.name.as_deref(), Some("Alice A."));
    assert_eq!(record.profile.about, "Hello from alice");
    assert_eq!(
        record.profile.avatar_url,
        Some(format!("{}/avatars/alice.png", server.uri()))
    );
    assert_eq!(record.profile.user_id.as_deref(), Some("42"));
    assert_eq!(record.profile.problems.solved, vec!["1001", "1004"]);
    assert_eq!(record.profile.problems.partial, vec!["1002"]);
    assert_eq!(record.profile.problems.attempted, vec!["1003"]);

    assert_eq!(record.activity.len(), 10);
    let ids: Vec<&str> = record
        .activity
        .iter()
        .map(|a| a.submission_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec!["9000", "8999", "8998", "8997", "8996", "8995", "8994", "8993", "8992", "8991"]
    );
    assert!(record.activity.iter().all(|a| a.language == "C++"));
    assert!(record.activity.iter().all(|a| a.status == "AC"));
    server.verify().await;
}

#[tokio::test]
async fn test_aggregate_last_badge_user_id_wins() {
    let server = MockServer::start().await;

    let badges = [("success", "1001", "7"), ("success", "1002", "8")];
    mount_profile_html(&server, "alice", profile_page("Alice", "alice", &badges)).await;

    Mock::given(method("GET"))
        .and(path("/submissions"))
        .and(query_param("filter_user_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_string(activity_page(10, 1)))
        .expect(0)
        .mount(&server)
        .await;
    mount_activity(&server, "8", 2).await;

    let aggregator = Aggregator::new(test_fetcher(&server));
    let record = aggregator.aggregate(&alice()).await.expect("Aggregate should succeed");

    assert_eq!(record.profile.user_id.as_deref(), Some("8"));
    assert_eq!(record.activity.len(), 2);
    server.verify().await;
}

#[tokio::test]
async fn test_aggregate_without_badges_skips_activity() {
    let server = MockServer::start().await;

    mount_profile_html(&server, "alice", profile_page("Alice", "alice", &[])).await;
    Mock::given(method("GET"))
        .and(path("/submissions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let aggregator = Aggregator::new(test_fetcher(&server));
    let record = aggregator.aggregate(&alice()).await.expect("Aggregate should succeed");

    assert_eq!(record.profile.user_id, None);
    assert!(record.profile.problems.is_empty());
    assert!(record.activity.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn test_aggregate_bare_profile_keeps_requested_handle() {
    let server = MockServer::start().await;

    mount_profile_html(
        &server,
        "alice",
        "<html><body><p>nothing here</p></body></html>".to_string(),
    )
    .await;

    let aggregator = Aggregator::new(test_fetcher(&server));
    let record = aggregator.aggregate(&alice()).await.expect("Aggregate should succeed");

    assert_eq!(record.profile.handle, "alice");
    assert_eq!(record.profile.name, None);
    assert_eq!(record.profile.avatar_url, None);
    assert_eq!(record.profile.about, "");
}

#[tokio::test]
async fn test_aggregate_profile_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let aggregator = Aggregator::new(test_fetcher(&server));
    let error = aggregator.aggregate(&alice()).await.unwrap_err();

    match error {
        AggregationError::Profile(e) => assert_eq!(e.cause, FetchCause::Status(500)),
        other => panic!("Expected profile error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_aggregate_activity_failure() {
    let server = MockServer::start().await;

    let badges = [("success", "1001", "42")];
    mount_profile_html(&server, "alice", profile_page("Alice", "alice", &badges)).await;
    Mock::given(method("GET"))
        .and(path("/submissions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let aggregator = Aggregator::new(test_fetcher(&server));
    let error = aggregator.aggregate(&alice()).await.unwrap_err();

    assert!(matches!(error, AggregationError::Activity(_)));
}
