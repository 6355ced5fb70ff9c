//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML operation → HTTP requests → pages

use futures::StreamExt;
use pagewalk::pagination::PageCollector;
use pagewalk::{
    load_operation_from_str, Cursor, Error, HttpOperation, IterationMode, IteratorConfig,
    JsonRequest, JsonResponse, OutputFormat, OutputSelector, OutputWriter, PageControl,
    PageIterator, PageResponse, StopReason,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post_definition(base_url: &str) -> pagewalk::OperationDefinition {
    load_operation_from_str(&format!(
        r#"
name: describe-instances
base_url: {base_url}
path: /instances:describe
method: POST
params:
  Region: us-east-1
pagination:
  cursor_param: NextToken
  cursor_path: NextToken
  page_size_param: MaxResults
  max_page_size: 3
items_path: Reservations
"#
    ))
    .unwrap()
}

fn iterator(
    def: &pagewalk::OperationDefinition,
    config: IteratorConfig,
) -> PageIterator<JsonRequest, HttpOperation> {
    let invoker = HttpOperation::from_definition(def).unwrap();
    PageIterator::new(JsonRequest::from_definition(def), invoker, config).unwrap()
}

fn ids(pages: &[JsonResponse]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| page.items().iter())
        .map(|item| item["Id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Auto pagination
// ============================================================================

#[tokio::test]
async fn test_get_operation_follows_query_cursor() {
    let server = MockServer::start().await;

    // Mounted first so the follow-up request matches it ahead of the open one
    Mock::given(method("GET"))
        .and(path("/v1/buckets"))
        .and(query_param("cursor", "c-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"buckets": ["c"]},
            "meta": {"next": ""}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/buckets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"buckets": ["a", "b"]},
            "meta": {"next": "c-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let def = load_operation_from_str(&format!(
        r#"
name: list-buckets
base_url: {}
path: /v1/buckets
pagination:
  cursor_param: cursor
  cursor_path: meta.next
items_path: data.buckets
"#,
        server.uri()
    ))
    .unwrap();

    let mut collector = PageCollector::new();
    let outcome = iterator(&def, IteratorConfig::default())
        .run(&mut collector)
        .await
        .unwrap();

    assert_eq!(outcome.pages, 2);
    assert_eq!(outcome.items, 3);
    assert_eq!(outcome.stop, StopReason::CursorExhausted);
    assert!(outcome.is_complete());

    let selector = OutputSelector::NamedField("data.buckets".to_string());
    let values: Vec<_> = collector
        .pages()
        .iter()
        .flat_map(|page| selector.project(page.body(), &json!({})))
        .collect();
    assert_eq!(values, vec![json!("a"), json!("b"), json!("c")]);
}

#[tokio::test]
async fn test_emit_limit_clamps_page_size() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .and(body_json(json!({"Region": "us-east-1", "MaxResults": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Id": "r-1"}, {"Id": "r-2"}, {"Id": "r-3"}],
            "NextToken": "t-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .and(body_json(json!({
            "Region": "us-east-1",
            "NextToken": "t-2",
            "MaxResults": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Id": "r-4"}, {"Id": "r-5"}],
            "NextToken": "t-3"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let def = post_definition(&server.uri());
    let config = IteratorConfig::default()
        .with_emit_limit(5)
        .with_max_page_size(3);

    let mut collector = PageCollector::new();
    let outcome = iterator(&def, config).run(&mut collector).await.unwrap();

    assert_eq!(ids(collector.pages()), vec!["r-1", "r-2", "r-3", "r-4", "r-5"]);
    assert_eq!(outcome.stop, StopReason::EmitLimitReached);
    assert_eq!(outcome.remaining_limit, Some(0));
    assert_eq!(outcome.final_cursor, Cursor::new("t-3"));
    assert!(outcome.has_more());
}

#[tokio::test]
async fn test_sink_can_stop_between_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Id": "r-1"}],
            "NextToken": "again"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let def = post_definition(&server.uri());
    let outcome = iterator(&def, IteratorConfig::default())
        .run(&mut |_: &JsonResponse| PageControl::Stop)
        .await
        .unwrap();

    assert_eq!(outcome.stop, StopReason::SinkStopped);
    assert_eq!(outcome.final_cursor, Cursor::new("again"));
}

// ============================================================================
// Late failures
// ============================================================================

async fn mount_failing_second_page(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .and(body_json(json!({"Region": "us-east-1", "MaxResults": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Id": "r-1"}, {"Id": "r-2"}],
            "NextToken": "t-2"
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .and(body_json(json!({"Region": "us-east-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Id": "r-1"}, {"Id": "r-2"}],
            "NextToken": "t-2"
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .respond_with(ResponseTemplate::new(500).set_body_string("InternalError"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_late_failure_under_limit_keeps_pages() {
    let server = MockServer::start().await;
    mount_failing_second_page(&server).await;

    let def = post_definition(&server.uri());
    let config = IteratorConfig::default()
        .with_emit_limit(10)
        .with_max_page_size(3);

    let mut collector = PageCollector::new();
    let outcome = iterator(&def, config).run(&mut collector).await.unwrap();

    assert_eq!(ids(collector.pages()), vec!["r-1", "r-2"]);
    assert!(matches!(outcome.stop, StopReason::LateFailure { .. }));
    assert_eq!(outcome.pages, 1);
    assert_eq!(outcome.final_cursor, Cursor::new("t-2"));
}

#[tokio::test]
async fn test_late_failure_without_limit_propagates() {
    let server = MockServer::start().await;
    mount_failing_second_page(&server).await;

    let def = post_definition(&server.uri());
    let mut collector = PageCollector::new();
    let failure = iterator(&def, IteratorConfig::default())
        .run(&mut collector)
        .await
        .unwrap_err();

    assert_eq!(collector.pages().len(), 1);
    assert_eq!(failure.page, 2);
    assert_eq!(failure.pages_emitted, 1);
    assert!(!failure.is_first_page());
    assert!(matches!(
        failure.into_inner(),
        Error::HttpStatus { status: 500, .. }
    ));
}

#[tokio::test]
async fn test_first_page_failure_under_limit_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .respond_with(ResponseTemplate::new(400).set_body_string("ValidationError"))
        .mount(&server)
        .await;

    let def = post_definition(&server.uri());
    let config = IteratorConfig::default().with_emit_limit(10);
    let failure = iterator(&def, config)
        .run(&mut PageCollector::new())
        .await
        .unwrap_err();

    assert!(failure.is_first_page());
    assert_eq!(failure.pages_emitted, 0);
    let err: Error = failure.into();
    assert_eq!(
        err.to_string(),
        format!(
            "page 1 failed after 0 delivered page(s): {}",
            Error::http_status(400, "ValidationError")
        )
    );
}

// ============================================================================
// Manual paging
// ============================================================================

#[tokio::test]
async fn test_manual_paging_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .and(body_json(json!({"Region": "us-east-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Id": "r-1"}],
            "NextToken": "t-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .and(body_json(json!({"Region": "us-east-1", "NextToken": "t-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Id": "r-2"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let def = post_definition(&server.uri());

    let first = IteratorConfig::default().with_mode(IterationMode::resolve(true, None));
    let outcome = iterator(&def, first)
        .run(&mut PageCollector::new())
        .await
        .unwrap();
    assert_eq!(outcome.stop, StopReason::SinglePage);
    let token = outcome.final_cursor.unwrap();

    // A caller hands the token back on a later, separate call
    let start = Cursor::new(token.as_str().to_string());
    let mode = IterationMode::resolve(false, start.as_ref());
    let second = IteratorConfig::default()
        .with_starting_cursor(start)
        .with_mode(mode);
    let mut collector = PageCollector::new();
    let outcome = iterator(&def, second).run(&mut collector).await.unwrap();

    assert_eq!(ids(collector.pages()), vec!["r-2"]);
    assert_eq!(outcome.final_cursor, None);
    assert_eq!(outcome.stop, StopReason::CursorExhausted);
}

// ============================================================================
// Streams and output
// ============================================================================

#[tokio::test]
async fn test_stream_yields_pages_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .and(body_json(json!({"Region": "us-east-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Id": "r-1"}],
            "NextToken": "t-2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .and(body_json(json!({"Region": "us-east-1", "NextToken": "t-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Id": "r-2"}, {"Id": "r-3"}]
        })))
        .mount(&server)
        .await;

    let def = post_definition(&server.uri());
    let pages: Vec<_> = iterator(&def, IteratorConfig::default())
        .into_stream()
        .map(|page| page.unwrap())
        .collect()
        .await;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].item_count(), 2);
    assert_eq!(ids(&pages), vec!["r-1", "r-2", "r-3"]);
}

#[tokio::test]
async fn test_projected_output_lines() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/instances:describe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Id": "r-1"}, {"Id": "r-2"}]
        })))
        .mount(&server)
        .await;

    let def = post_definition(&server.uri());
    let selector = def.default_selector();
    let mut writer = OutputWriter::new(Vec::new(), OutputFormat::Json);

    let mut sink = |page: &JsonResponse| {
        writer
            .write_all(&selector.project(page.body(), &json!({})))
            .unwrap();
        PageControl::Continue
    };
    iterator(&def, IteratorConfig::default())
        .run(&mut sink)
        .await
        .unwrap();

    assert_eq!(writer.written(), 2);
    let out = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(out, "{\"Id\":\"r-1\"}\n{\"Id\":\"r-2\"}\n");
}
