//! Tests for pagination module

use super::*;
use crate::dispatch::{DispatchOptions, Dispatcher, PageRequest};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};
use test_case::test_case;

// ============================================================================
// PageShape Tests
// ============================================================================

#[test]
fn test_page_shape_default() {
    let shape = PageShape::default();
    assert_eq!(shape.items_field, "data");
    assert_eq!(shape.next_page_field, "next_page");
}

#[test]
fn test_page_shape_partial_yaml() {
    let shape: PageShape = serde_yaml::from_str("items_field: results").unwrap();
    assert_eq!(shape.items_field, "results");
    assert_eq!(shape.next_page_field, "next_page");
}

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_from_null() {
    assert_eq!(NextPage::from_value(JsonValue::Null).unwrap(), None);
}

#[test]
fn test_next_page_from_string() {
    let next = NextPage::from_value(json!("https://api.example.com/items?page=2"))
        .unwrap()
        .unwrap();
    assert_eq!(
        next.uri.as_deref(),
        Some("https://api.example.com/items?page=2")
    );

    assert_eq!(NextPage::from_value(json!("")).unwrap(), None);
}

#[test]
fn test_next_page_from_object() {
    let next = NextPage::from_value(json!({
        "offset": "eyJ0eXAiOJiKV1iQLCJhbGciOiJIUzI1NiJ9",
        "path": "/tasks?project=1337&limit=5&offset=eyJ0eXAiOJiKV1iQLCJhbGciOiJIUzI1NiJ9",
        "uri": "https://app.asana.com/api/1.0/tasks?project=1337&limit=5&offset=eyJ0eXAiOJiKV1iQLCJhbGciOiJIUzI1NiJ9"
    }))
    .unwrap()
    .unwrap();

    assert_eq!(
        next.offset.as_deref(),
        Some("eyJ0eXAiOJiKV1iQLCJhbGciOiJIUzI1NiJ9")
    );
    assert!(next.path.is_some());
    assert!(next.uri.is_some());
}

#[test]
fn test_next_page_numeric_offset() {
    let next = NextPage::from_value(json!({"path": "/items", "offset": 40}))
        .unwrap()
        .unwrap();
    assert_eq!(next.offset.as_deref(), Some("40"));
}

#[test_case(json!(42); "number")]
#[test_case(json!(true); "boolean")]
#[test_case(json!([1, 2]); "array")]
#[test_case(json!({"uri": ["x"]}); "array uri")]
fn test_next_page_rejects_bad_shapes(value: JsonValue) {
    let err = NextPage::from_value(value).unwrap_err();
    assert!(err.is_protocol_error());
}

#[test]
fn test_next_page_request_prefers_uri() {
    let next = NextPage {
        offset: Some("abc".to_string()),
        path: Some("/tasks".to_string()),
        uri: Some("https://api.example.com/tasks?offset=abc".to_string()),
    };

    let request = next.request().unwrap();
    assert_eq!(request.target, "https://api.example.com/tasks?offset=abc");
    assert!(request.query.is_empty());
}

#[test]
fn test_next_page_request_path_with_offset() {
    let request = NextPage::with_path("/tasks", "abc").request().unwrap();
    assert_eq!(request.target, "/tasks");
    assert_eq!(request.query.get("offset"), Some(&"abc".to_string()));
}

#[test]
fn test_next_page_request_path_already_carrying_offset() {
    let next = NextPage::from_value(json!({
        "offset": "abc",
        "path": "/tasks?limit=2&offset=abc",
        "uri": null
    }))
    .unwrap()
    .unwrap();

    let request = next.request().unwrap();
    assert_eq!(request.target, "/tasks?limit=2&offset=abc");
    assert!(request.query.is_empty());
}

#[test]
fn test_next_page_request_path_with_other_query() {
    let request = NextPage::with_path("/tasks?limit=2&offset_hint=x", "abc")
        .request()
        .unwrap();
    assert_eq!(request.target, "/tasks?limit=2&offset_hint=x");
    assert_eq!(request.query.get("offset"), Some(&"abc".to_string()));
}

#[test]
fn test_next_page_request_empty_token() {
    assert!(NextPage::default().request().is_none());
    assert!(NextPage::with_uri("").request().is_none());
}

// ============================================================================
// PageResponse Tests
// ============================================================================

#[test]
fn test_page_response_valid() {
    let page: PageResponse = PageResponse::from_value(
        json!({"data": [{"gid": "1"}, {"gid": "2"}], "next_page": {"uri": "https://x/2"}}),
        &PageShape::default(),
    )
    .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.data[0]["gid"], "1");
    assert!(page.has_next_page());
}

#[test]
fn test_page_response_last_page() {
    let page: PageResponse =
        PageResponse::from_value(json!({"data": [], "next_page": null}), &PageShape::default())
            .unwrap();

    assert!(page.is_empty());
    assert!(page.next_page.is_none());
    assert!(!page.has_next_page());
}

#[test]
fn test_page_response_typed_items() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Task {
        gid: String,
        name: String,
    }

    let page: PageResponse<Task> = PageResponse::from_value(
        json!({"data": [{"gid": "1", "name": "Write docs"}], "next_page": null}),
        &PageShape::default(),
    )
    .unwrap();

    assert_eq!(
        page.data,
        vec![Task {
            gid: "1".to_string(),
            name: "Write docs".to_string()
        }]
    );
}

#[test]
fn test_page_response_undecodable_item() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Task {
        gid: String,
    }

    let result: Result<PageResponse<Task>> = PageResponse::from_value(
        json!({"data": [{"gid": "1"}, {"name": "no gid"}], "next_page": null}),
        &PageShape::default(),
    );
    assert!(matches!(result, Err(Error::JsonParse(_))));
}

#[test]
fn test_page_response_custom_shape() {
    let shape = PageShape::new("results", "next");
    let page: PageResponse = PageResponse::from_value(
        json!({"results": [1, 2, 3], "next": "https://x/2"}),
        &shape,
    )
    .unwrap();

    assert_eq!(page.len(), 3);
    assert_eq!(page.next_page, Some(NextPage::with_uri("https://x/2")));
}

#[test_case(json!({"next_page": null}), "missing `data`"; "missing items")]
#[test_case(json!({"data": []}), "missing `next_page`"; "missing next page")]
#[test_case(json!({"data": {"gid": "1"}, "next_page": null}), "`data` is not an array"; "items not array")]
#[test_case(json!([1, 2, 3]), "not an object"; "bare array")]
#[test_case(json!({"data": [1], "next_page": 7}), "next page must be"; "numeric next page")]
fn test_page_response_shape_errors(body: JsonValue, expected: &str) {
    let err = PageResponse::<JsonValue>::from_value(body, &PageShape::default()).unwrap_err();
    assert!(err.is_protocol_error());
    assert!(
        err.to_string().contains(expected),
        "unexpected message: {err}"
    );
}

// ============================================================================
// Resolver Tests
// ============================================================================

#[derive(Default)]
struct Recorder {
    requests: Mutex<Vec<(PageRequest, DispatchOptions)>>,
}

#[async_trait]
impl Dispatcher for Recorder {
    async fn get(&self, request: &PageRequest, options: &DispatchOptions) -> Result<JsonValue> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), options.clone()));
        Ok(json!({"data": [], "next_page": null}))
    }
}

#[tokio::test]
async fn test_next_page_resolver_follows_token() {
    let recorder = Arc::new(Recorder::default());
    let dispatcher: Arc<dyn Dispatcher> = recorder.clone();
    let options = DispatchOptions::new().header("X-Client", "test");

    let page: PageResponse = PageResponse {
        data: vec![json!(1)],
        next_page: Some(NextPage::with_path("/tasks", "off1")),
    };

    let future = next_page(&page, &dispatcher, &options).expect("next page");
    let body = future.await.unwrap();
    assert_eq!(body["next_page"], JsonValue::Null);

    let requests = recorder.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (request, seen_options) = &requests[0];
    assert_eq!(request.target, "/tasks");
    assert_eq!(request.query.get("offset"), Some(&"off1".to_string()));
    assert_eq!(seen_options, &options);
}

#[test]
fn test_next_page_resolver_last_page() {
    let dispatcher: Arc<dyn Dispatcher> = Arc::new(Recorder::default());
    let options = DispatchOptions::new();

    let last: PageResponse = PageResponse {
        data: vec![json!(1)],
        next_page: None,
    };
    assert!(next_page(&last, &dispatcher, &options).is_none());

    let empty_token: PageResponse = PageResponse {
        data: vec![],
        next_page: Some(NextPage::default()),
    };
    assert!(next_page(&empty_token, &dispatcher, &options).is_none());
}
