//! Preprint pagination tests against a mocked details API.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medrxiv_ideation::client::PreprintClient;
use medrxiv_ideation::config::Config;
use medrxiv_ideation::error::ClientError;
use medrxiv_ideation::models::{DateRange, FetchCursor};

fn range() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
    )
    .unwrap()
}

fn record(n: usize) -> serde_json::Value {
    json!({
        "title": format!("Paper {n}"),
        "abstract": format!("Abstract {n}."),
        "doi": format!("10.1101/2024.01.0{n}"),
        "date": "2024-01-02",
        "category": "epidemiology",
        "authors": "Doe, J.; Roe, R.",
        "version": "1"
    })
}

fn page(cursor: usize, total: usize, records: std::ops::Range<usize>) -> serde_json::Value {
    let collection: Vec<_> = records.map(record).collect();
    json!({
        "messages": [{
            "status": "ok",
            "cursor": cursor.to_string(),
            "count": collection.len(),
            "total": total
        }],
        "collection": collection
    })
}

fn page_path(cursor: usize) -> String {
    format!("/details/medrxiv/2024-01-01/2024-01-07/{cursor}")
}

async fn setup() -> (MockServer, PreprintClient) {
    let server = MockServer::start().await;
    let client = PreprintClient::new(&Config::for_testing(&server.uri())).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_fetch_concatenates_pages_in_order() {
    let (server, client) = setup().await;

    for (cursor, records) in [(0, 0..3), (3, 3..6), (6, 6..7)] {
        Mock::given(method("GET"))
            .and(path(page_path(cursor)))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(cursor, 7, records)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let papers = client.fetch(range()).await;

    let titles: Vec<_> = papers.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, (0..7).map(|n| format!("Paper {n}")).collect::<Vec<_>>());
    assert_eq!(papers[0].author_names, ["Doe, J.", "Roe, R."]);
    assert_eq!(papers[0].version, 1);
}

#[tokio::test]
async fn test_empty_page_terminates() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(page_path(0)))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 100, 0..2)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(page_path(2)))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, 100, 0..0)))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.fetch(range()).await.len(), 2);
}

#[tokio::test]
async fn test_missing_pagination_descriptor_stops_after_first_page() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(page_path(0)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"collection": [record(1), record(2)]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.fetch(range()).await.len(), 2);
}

#[tokio::test]
async fn test_no_posts_found_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(page_path(0)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"status": "no posts found"}],
            "collection": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.fetch(range()).await.is_empty());
}

#[tokio::test]
async fn test_server_error_keeps_partial_results() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(page_path(0)))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 10, 0..5)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(page_path(5)))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.fetch(range()).await.len(), 5);
}

#[tokio::test]
async fn test_malformed_body_keeps_partial_results() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(page_path(0)))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 10, 0..5)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(page_path(5)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    assert_eq!(client.fetch(range()).await.len(), 5);
}

#[tokio::test]
async fn test_fetch_page_reports_errors() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(page_path(0)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.fetch_page(range(), FetchCursor::start()).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_malformed_page_is_a_parse_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(page_path(0)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.fetch_page(range(), FetchCursor::start()).await.unwrap_err();
    assert!(!err.is_transport());
    assert!(matches!(err, ClientError::Parse(_)));
}

#[tokio::test]
async fn test_null_abstract_keeps_the_rest_of_the_page() {
    let (server, client) = setup().await;

    let mut nullable = record(1);
    nullable["abstract"] = serde_json::Value::Null;
    Mock::given(method("GET"))
        .and(path(page_path(0)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"status": "ok", "cursor": 0, "count": 2, "total": 2}],
            "collection": [record(0), nullable]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let papers = client.fetch(range()).await;
    assert_eq!(papers.len(), 2);
    assert_eq!(papers[1].title, "Paper 1");
    assert!(papers[1].abstract_text.is_empty());
}

#[tokio::test]
async fn test_first_page_failure_is_empty_not_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(client.fetch(range()).await.is_empty());
}
