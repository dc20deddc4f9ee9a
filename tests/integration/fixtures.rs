//! HTML fixtures and mock helpers shared by the integration tests

use std::path::Path;
use std::time::Duration;
use tioj_harvest::config::{
    Config, OutputConfig, RunConfig, SourceConfig, DEFAULT_CLIENT_IDENTIFIER,
};
use tioj_harvest::harvester::{Endpoints, Fetcher};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at a mock server
pub fn test_config(base_url: &str, max_page: u32, window: u32, directory: &Path) -> Config {
    Config {
        source: SourceConfig {
            base_url: base_url.to_string(),
            client_identifier: DEFAULT_CLIENT_IDENTIFIER.to_string(),
            request_timeout_secs: 5,
        },
        run: RunConfig {
            max_page,
            window,
            list_window: None,
            detail_window: None,
        },
        output: OutputConfig {
            directory: directory.display().to_string(),
        },
    }
}

pub fn test_fetcher(server: &MockServer) -> Fetcher {
    let config = test_config(&server.uri(), 0, 1, Path::new("unused"));
    Fetcher::from_config(&config.source).expect("Failed to build fetcher")
}

pub fn test_endpoints(server: &MockServer) -> Endpoints {
    Endpoints::new(&server.uri()).expect("Failed to parse mock server URI")
}

/// A ranking page with one row per `(rank, handle)`
pub fn listing_page(users: &[(u32, &str)]) -> String {
    let rows: String = users
        .iter()
        .map(|(rank, handle)| {
            format!(
                r#"<tr>
                  <td>{rank}</td>
                  <td><a href="/users/{handle}"><img class="img-rounded" src="/avatars/{handle}.png" alt="{handle}" /></a></td>
                  <td><a href="/users/{handle}">{handle}</a></td>
                </tr>"#
            )
        })
        .collect();

    format!(
        r#"<html><body><table class="table">
        <thead><tr><th>#</th><th></th><th>User</th></tr></thead>
        <tbody>{rows}</tbody>
        </table></body></html>"#
    )
}

/// A profile page; each badge is `(style, problem_id, user_id)`
pub fn profile_page(name: &str, handle: &str, badges: &[(&str, &str, &str)]) -> String {
    let badges: String = badges
        .iter()
        .map(|(style, problem, user_id)| {
            format!(
                r#"<a class="text-{style}" href="/problems/{problem}/submissions?filter_user_id={user_id}">{problem}</a> "#
            )
        })
        .collect();

    format!(
        r#"<html><body>
        <div class="col-md-3">
          <img class="img-rounded img-responsive" src="/avatars/{handle}.png" />
          <h5>{name}</h5>
          <h6>{handle}</h6>
          <dl><dt>About</dt><dd><dfn>Hello from {handle}</dfn></dd></dl>
        </div>
        <div class="col-md-9">{badges}</div>
        </body></html>"#
    )
}

/// A submissions page with `count` rows, ids descending from `first_id`
pub fn activity_page(first_id: u32, count: u32) -> String {
    let rows: String = (0..count)
        .map(|i| {
            let id = first_id - i;
            format!(
                r#"<tr>
                  <td><a href="/submissions/{id}">{id}</a></td>
                  <td><a href="/problems/1001">1001</a></td>
                  <td><a href="/users/alice">alice</a></td>
                  <td>10</td>
                  <td>2048</td>
                  <td class="text-success">AC</td>
                  <td>c++17</td>
                  <td>300</td>
                  <td>100</td>
                  <td>2023-05-01 12:00:00 +0800</td>
                </tr>"#
            )
        })
        .collect();

    format!("<html><body><table><tbody>{rows}</tbody></table></body></html>")
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Mounts a listing page expected to be fetched `times` times
pub async fn mount_listing(server: &MockServer, page: u32, users: &[(u32, &str)], times: u64) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", page.to_string()))
        .respond_with(html(listing_page(users)))
        .expect(times)
        .mount(server)
        .await;
}

/// Like [`mount_listing`], delaying the response
pub async fn mount_slow_listing(
    server: &MockServer,
    page: u32,
    users: &[(u32, &str)],
    delay: Duration,
) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", page.to_string()))
        .respond_with(html(listing_page(users)).set_delay(delay))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts a failing listing page
pub async fn mount_failing_listing(server: &MockServer, page: u32, status: u16) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts a profile page for `handle`, with badges carrying `user_id`
pub async fn mount_profile(server: &MockServer, handle: &str, user_id: Option<&str>) {
    let badges: Vec<(&str, &str, &str)> = match user_id {
        Some(id) => vec![("success", "1001", id), ("warning", "1002", id)],
        None => vec![],
    };

    Mock::given(method("GET"))
        .and(path(format!("/users/{}", handle)))
        .respond_with(html(profile_page(handle, handle, &badges)))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts the submissions page for `user_id`
pub async fn mount_activity(server: &MockServer, user_id: &str, rows: u32) {
    Mock::given(method("GET"))
        .and(path("/submissions"))
        .and(query_param("filter_user_id", user_id))
        .respond_with(html(activity_page(9000, rows)))
        .expect(1)
        .mount(server)
        .await;
}
