//! Integration tests for the GitHub-backed source.
//!
//! Uses wiremock for HTTP mocking. Covers repository pagination, run lookup,
//! job listing, log download, and status mapping (404/403 rate limit/5xx).

use assert_matches::assert_matches;
use citally_core::fakes::MemorySource;
use citally_core::http::{GitHubApiClient, WorkflowApiClient};
use citally_core::{
    collect_report, CiSource, Error, ErrorKind, GitHubSource, ReportCollector, ReportConfig,
    ReportEntry,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source(mock_server: &MockServer) -> GitHubSource {
    GitHubSource::new(mock_server.uri(), "test-token".to_string())
}

fn run_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "status": "completed",
        "conclusion": "success",
        "created_at": "2024-05-01T12:00:00Z"
    })
}

#[tokio::test]
async fn test_list_repositories_follows_link_header() {
    let mock_server = MockServer::start().await;

    let next = format!(
        "<{}/orgs/acme/repos?page=2>; rel=\"next\"",
        mock_server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "1"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "group01-a"}, {"name": "docs"}]))
                .insert_header("link", next.as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "group02-b"}])))
        .mount(&mock_server)
        .await;

    let repos = source(&mock_server)
        .list_repositories("acme")
        .await
        .expect("listing failed");

    let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["group01-a", "docs", "group02-b"]);
}

#[tokio::test]
async fn test_list_repositories_stops_on_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = GitHubApiClient::new(mock_server.uri(), None);
    let repos = client.list_org_repositories("acme").await.unwrap();
    assert!(repos.is_empty());
}

#[tokio::test]
async fn test_list_repositories_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = source(&mock_server)
        .list_repositories("acme")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Workflow);
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_rate_limit_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(403).insert_header("x-ratelimit-remaining", "0"))
        .mount(&mock_server)
        .await;

    let err = source(&mock_server)
        .list_repositories("acme")
        .await
        .unwrap_err();
    assert_matches!(err, Error::RateLimitExceeded(ref msg) if msg.contains("organization repositories"));
}

#[tokio::test]
async fn test_forbidden_without_rate_limit_is_workflow_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(403).insert_header("x-ratelimit-remaining", "42"))
        .mount(&mock_server)
        .await;

    let err = source(&mock_server)
        .list_repositories("acme")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Workflow);
}

#[tokio::test]
async fn test_latest_completed_run_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/runs"))
        .and(query_param("status", "completed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 3,
            "workflow_runs": [run_json(30, "lint"), run_json(20, "ci"), run_json(10, "ci")]
        })))
        .mount(&mock_server)
        .await;

    let run = source(&mock_server)
        .latest_completed_run("acme", "group01-a", "ci")
        .await
        .unwrap()
        .expect("expected a run");
    assert_eq!(run.id, 20);
    assert_eq!(run.name, "ci");
}

#[tokio::test]
async fn test_latest_completed_run_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "workflow_runs": [run_json(30, "lint")]
        })))
        .mount(&mock_server)
        .await;

    let client = WorkflowApiClient::new(mock_server.uri(), Some("test-token".to_string()));
    let run = client
        .find_latest_completed_run("acme", "group01-a", "ci")
        .await
        .unwrap();
    assert!(run.is_none());
}

#[tokio::test]
async fn test_list_jobs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/runs/20/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "jobs": [
                {"id": 201, "name": "build", "status": "completed", "conclusion": "success"},
                {"id": 202, "name": "run_tests", "status": "completed", "conclusion": "failure",
                 "started_at": "2024-05-01T12:00:00Z", "completed_at": "2024-05-01T12:05:00Z"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let jobs = source(&mock_server)
        .list_jobs("acme", "group01-a", 20)
        .await
        .unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[1].id, 202);
    assert_eq!(jobs[1].name, "run_tests");
}

#[tokio::test]
async fn test_fetch_job_log_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/jobs/202/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Summary\nunit-test ... passed\n"))
        .mount(&mock_server)
        .await;

    let log = source(&mock_server)
        .fetch_job_log("acme", "group01-a", 202)
        .await
        .unwrap();
    assert_eq!(log, "Summary\nunit-test ... passed\n");
}

#[tokio::test]
async fn test_fetch_job_log_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/jobs/202/logs"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = source(&mock_server)
        .fetch_job_log("acme", "group01-a", 202)
        .await
        .unwrap_err();
    assert_matches!(err, Error::Workflow(ref msg) if msg.contains("404"));
}

#[tokio::test]
async fn test_collect_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "group01-a"}, {"name": "website"}])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workflow_runs": [run_json(20, "ci")]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/runs/20/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{"id": 202, "name": "run_tests", "status": "completed"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/jobs/202/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "2024-05-01T12:00:00Z Summary\n\x1b[32munit-test\x1b[0m: passed\nlint-test: FAILED\n",
        ))
        .mount(&mock_server)
        .await;

    let config = ReportConfig::from_json_str(
        r#"{"org": "acme", "group_to_section": {"01": "teamA"},
            "actions": {"ci": ["unit-test", "lint-test"]}}"#,
    )
    .unwrap();

    let report = collect_report(&source(&mock_server), &config).await.unwrap();
    assert_eq!(
        report.entry("ci", "unit-test", "teamA"),
        Some(&ReportEntry { pass: 1, fail: 0 })
    );
    assert_eq!(
        report.entry("ci", "lint-test", "teamA"),
        Some(&ReportEntry { pass: 0, fail: 1 })
    );
}

#[tokio::test]
async fn test_collect_skips_rate_limited_log() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "group01-a"}])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workflow_runs": [run_json(20, "ci")]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/runs/20/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{"id": 202, "name": "run_tests"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/jobs/202/logs"))
        .respond_with(ResponseTemplate::new(403).insert_header("x-ratelimit-remaining", "0"))
        .mount(&mock_server)
        .await;

    let config = ReportConfig::from_json_str(
        r#"{"org": "acme", "group_to_section": {"01": "teamA"}, "actions": {"ci": ["unit-test"]}}"#,
    )
    .unwrap();

    let (report, stats) = ReportCollector::new(&source(&mock_server), &config)
        .collect()
        .await
        .expect("rate limit on one log must not abort collection");
    assert!(report.is_empty());
    assert!(report.last_updated.is_some());
    assert_eq!(stats.actions_skipped, 1);
}

#[tokio::test]
async fn test_memory_and_http_sources_agree() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "group01-a"}])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/group01-a/actions/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"workflow_runs": []})))
        .mount(&mock_server)
        .await;

    let config = ReportConfig::from_json_str(
        r#"{"org": "acme", "group_to_section": {"01": "teamA"}, "actions": {"ci": ["unit-test"]}}"#,
    )
    .unwrap();

    let over_http = collect_report(&source(&mock_server), &config).await.unwrap();
    let in_memory = collect_report(&MemorySource::new().with_repository("group01-a"), &config)
        .await
        .unwrap();

    assert_eq!(over_http.actions, in_memory.actions);
    assert!(over_http.is_empty());
}
