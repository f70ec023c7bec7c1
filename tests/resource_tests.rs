//! Tests for the generic resource layer over an in-memory transport.

mod common;

use std::sync::Arc;

use common::{basic_config, bearer_config, config_with_page_size, split_url, MockTransport, HOST};
use confluence_api::auth::Authorization;
use confluence_api::clients::{HttpError, HttpMethod};
use confluence_api::rest::{
    ApiError, Collection, FetchAllOptions, PageOptions, QueryParams, Resource, ResourceError,
    WriteOptions,
};
use confluence_api::{AccessToken, ApiToken, ConfluenceConfig, HostUrl};
use serde_json::{json, Value};

const ROOT: &str = "/rest/api/content";

fn resource(config: ConfluenceConfig, transport: &Arc<MockTransport>) -> Resource {
    Resource::new(ROOT, Arc::new(config), transport.clone())
}

// === Authentication ===

#[tokio::test]
async fn test_bearer_token_is_sent_alone() {
    let transport = MockTransport::new();
    transport.push_ok(200, json!({"id": "1"}));
    let resource = resource(bearer_config(), &transport);

    let _: Value = resource.fetch_one("1", None).await.unwrap();

    let request = &transport.requests()[0];
    let authorization = request.authorization.as_ref().unwrap();
    assert!(authorization.is_bearer());
    assert_eq!(authorization.header_value(), "Bearer tok");
}

#[tokio::test]
async fn test_basic_auth_is_sent_when_no_token() {
    let transport = MockTransport::new();
    transport.push_ok(200, json!({"id": "1"}));
    let resource = resource(basic_config(), &transport);

    let _: Value = resource.fetch_one("1", None).await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(
        request.authorization,
        Some(Authorization::Basic {
            username: "alice".to_string(),
            password: "secret".to_string(),
        })
    );
    assert_eq!(
        request.authorization.as_ref().unwrap().header_value(),
        "Basic YWxpY2U6c2VjcmV0"
    );
}

#[tokio::test]
async fn test_every_page_request_carries_only_the_chosen_credential() {
    let bearer = ConfluenceConfig::builder()
        .host(HostUrl::new(HOST).unwrap())
        .username("alice")
        .api_token(ApiToken::new("secret").unwrap())
        .access_token(AccessToken::new("tok").unwrap())
        .page_size(2)
        .build()
        .unwrap();
    let basic = config_with_page_size(2);

    for (config, expected) in [
        (bearer, "Bearer tok"),
        (basic, "Basic YWxpY2U6c2VjcmV0"),
    ] {
        let transport = MockTransport::new();
        transport.push_page(0, 2);
        transport.push_page(2, 2);
        transport.push_page(4, 1);
        let resource = resource(config, &transport);

        let all: Vec<Value> = resource.fetch_all(&FetchAllOptions::new()).await.unwrap();

        assert_eq!(all.len(), 5);
        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        for request in &requests {
            let authorization = request.authorization.as_ref().unwrap();
            assert_eq!(authorization.header_value(), expected);
            assert_eq!(authorization.is_bearer(), expected.starts_with("Bearer"));
        }
    }
}

// === Single-item operations ===

#[tokio::test]
async fn test_fetch_one_targets_root_and_id() {
    let transport = MockTransport::new();
    transport.push_ok(200, json!({"id": "42", "title": "Hello"}));
    let resource = resource(basic_config(), &transport);

    let mut params = QueryParams::new();
    params.insert("expand", "version");
    let body: Value = resource.fetch_one("42", Some(&params)).await.unwrap();

    assert_eq!(body["title"], "Hello");
    let request = &transport.requests()[0];
    assert_eq!(request.http_method, HttpMethod::Get);
    assert_eq!(
        request.url,
        format!("{HOST}/rest/api/content/42?expand=version")
    );
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_create_posts_json_body_with_params_and_headers() {
    let transport = MockTransport::new();
    transport.push_ok(200, json!({"id": "7"}));
    let resource = resource(basic_config(), &transport);

    let mut params = QueryParams::new();
    params.insert("status", "draft");
    let created: Value = resource
        .create(
            None,
            json!({"title": "New"}),
            WriteOptions::new().params(params).header("X-Trace", "abc"),
        )
        .await
        .unwrap();

    assert_eq!(created["id"], "7");
    let request = &transport.requests()[0];
    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.url, format!("{HOST}/rest/api/content/?status=draft"));
    assert_eq!(
        request.extra_headers.as_ref().unwrap().get("X-Trace"),
        Some(&"abc".to_string())
    );
}

#[tokio::test]
async fn test_update_puts_to_id() {
    let transport = MockTransport::new();
    transport.push_ok(200, json!({"id": "7", "title": "Renamed"}));
    let resource = resource(basic_config(), &transport);

    let updated: Value = resource
        .update("7", json!({"title": "Renamed"}), WriteOptions::new())
        .await
        .unwrap();

    assert_eq!(updated["title"], "Renamed");
    let request = &transport.requests()[0];
    assert_eq!(request.http_method, HttpMethod::Put);
    assert_eq!(request.url, format!("{HOST}/rest/api/content/7"));
}

#[tokio::test]
async fn test_remove_reports_2xx_only() {
    for (status, expected) in [(199, false), (200, true), (204, true), (299, true), (300, false)] {
        let transport = MockTransport::new();
        transport.push_ok(status, json!({}));
        let resource = resource(basic_config(), &transport);

        let removed = resource.remove("9", None, None).await.unwrap();
        assert_eq!(removed, expected, "status {status}");
        assert_eq!(transport.requests()[0].http_method, HttpMethod::Delete);
    }
}

#[tokio::test]
async fn test_remove_propagates_transport_errors() {
    let transport = MockTransport::new();
    transport.push_status_error(404, json!({"message": "No content with id 9"}));
    let resource = resource(basic_config(), &transport);

    let error = resource.remove("9", None, None).await.unwrap_err();
    let api = error.api_error().unwrap();
    assert_eq!(api.status_code, 404);
    assert_eq!(api.message, "No content with id 9");
}

// === Error normalization ===

#[tokio::test]
async fn test_status_error_is_normalized_with_body_data() {
    let transport = MockTransport::new();
    transport.push_status_error(
        400,
        json!({
            "statusCode": 400,
            "message": "Title is required",
            "data": {"errors": [{"field": "title"}]}
        }),
    );
    let resource = resource(basic_config(), &transport);

    let error = resource
        .create::<Value>(None, json!({}), WriteOptions::new())
        .await
        .unwrap_err();

    assert_eq!(
        error.api_error().unwrap(),
        &ApiError {
            status_code: 400,
            message: "Title is required".to_string(),
            data: json!({"errors": [{"field": "title"}]}),
        }
    );
}

#[tokio::test]
async fn test_status_error_without_body_gets_generic_message() {
    let transport = MockTransport::new();
    transport.push_status_error(503, json!({}));
    let resource = resource(basic_config(), &transport);

    let error = resource.fetch_one::<Value>("1", None).await.unwrap_err();
    let api = error.api_error().unwrap();

    assert_eq!(api.status_code, 503);
    assert_eq!(api.message, "Request failed with status code 503");
    assert_eq!(api.data, json!({}));
}

#[tokio::test]
async fn test_network_error_has_status_zero() {
    let transport = MockTransport::new();
    transport.push_err(HttpError::Network {
        message: "connection refused".to_string(),
    });
    let resource = resource(basic_config(), &transport);

    let error = resource.fetch_one::<Value>("1", None).await.unwrap_err();

    assert_eq!(error.status_code(), Some(0));
    assert_eq!(error.api_error().unwrap().message, "connection refused");
    assert_eq!(error.api_error().unwrap().data, json!({}));
}

#[tokio::test]
async fn test_fetch_page_rejects_non_2xx_response() {
    let transport = MockTransport::new();
    transport.push_ok(404, json!({"message": "Not here"}));
    let resource = resource(basic_config(), &transport);

    let error = resource
        .fetch_page::<Value>(&PageOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::Api(_)));
    assert_eq!(error.status_code(), Some(404));
}

// === Pagination ===

#[tokio::test]
async fn test_fetch_page_merges_paging_params() {
    let transport = MockTransport::new();
    transport.push_page(10, 2);
    let resource = resource(basic_config(), &transport);

    let mut params = QueryParams::new();
    params.insert("spaceKey", "DEMO");
    params.insert("limit", 999);
    let page: Collection<Value> = resource
        .fetch_page(&PageOptions {
            start: 10,
            limit: Some(2),
            id: Some("search".to_string()),
            params: Some(params),
            expand: vec!["space".to_string(), "version".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(page.size(), 2);
    let (path, query) = split_url(&transport.requests()[0].url);
    assert_eq!(path, format!("{HOST}/rest/api/content/search"));
    assert_eq!(query["start"], "10");
    assert_eq!(query["limit"], "2");
    assert_eq!(query["spaceKey"], "DEMO");
    assert_eq!(query["expand"], "space,version");
}

#[tokio::test]
async fn test_fetch_page_defaults_to_configured_limit() {
    let transport = MockTransport::new();
    let resource = resource(config_with_page_size(25), &transport);

    let _: Collection<Value> = resource.fetch_page(&PageOptions::default()).await.unwrap();

    let (_, query) = split_url(&transport.requests()[0].url);
    assert_eq!(query["start"], "0");
    assert_eq!(query["limit"], "25");
    assert!(!query.contains_key("expand"));
}

#[tokio::test]
async fn test_fetch_all_walks_pages_in_order() {
    let transport = MockTransport::new();
    transport.push_page(0, 3);
    transport.push_page(3, 3);
    transport.push_page(6, 1);
    let resource = resource(config_with_page_size(3), &transport);

    let all: Vec<Value> = resource.fetch_all(&FetchAllOptions::new()).await.unwrap();

    let ids: Vec<&str> = all.iter().map(|item| item["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["0", "1", "2", "3", "4", "5", "6"]);
    assert_eq!(transport.request_count(), 3);
    assert_eq!(transport.max_in_flight(), 1);

    let starts: Vec<String> = transport
        .requests()
        .iter()
        .map(|request| split_url(&request.url).1["start"].clone())
        .collect();
    assert_eq!(starts, ["0", "3", "6"]);
}

#[tokio::test]
async fn test_fetch_all_with_exact_multiple_needs_an_empty_page() {
    let transport = MockTransport::new();
    transport.push_page(0, 2);
    transport.push_page(2, 2);
    let resource = resource(config_with_page_size(2), &transport);

    let all: Vec<Value> = resource.fetch_all(&FetchAllOptions::new()).await.unwrap();

    assert_eq!(all.len(), 4);
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test]
async fn test_fetch_all_stops_after_empty_first_page() {
    let transport = MockTransport::new();
    let resource = resource(basic_config(), &transport);

    let all: Vec<Value> = resource.fetch_all(&FetchAllOptions::new()).await.unwrap();

    assert!(all.is_empty());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_fetch_all_aborts_on_first_error() {
    let transport = MockTransport::new();
    transport.push_page(0, 2);
    transport.push_status_error(500, json!({"message": "boom"}));
    transport.push_page(4, 2);
    let resource = resource(config_with_page_size(2), &transport);

    let error = resource
        .fetch_all::<Value>(&FetchAllOptions::new())
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), Some(500));
    assert_eq!(error.api_error().unwrap().message, "boom");
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_fetch_all_keeps_id_params_and_expand_on_every_page() {
    let transport = MockTransport::new();
    transport.push_page(0, 1);
    let resource = resource(config_with_page_size(1), &transport);

    let params: QueryParams = [("type", "page")].into_iter().collect();
    let _: Vec<Value> = resource
        .fetch_all(
            &FetchAllOptions::new()
                .id("123/child/attachment")
                .params(params)
                .expand(["version"]),
        )
        .await
        .unwrap();

    assert_eq!(transport.request_count(), 2);
    for request in transport.requests() {
        let (path, query) = split_url(&request.url);
        assert_eq!(path, format!("{HOST}/rest/api/content/123/child/attachment"));
        assert_eq!(query["type"], "page");
        assert_eq!(query["expand"], "version");
        assert_eq!(query["limit"], "1");
    }
}

#[tokio::test]
async fn test_total_size_probes_with_zero_limit() {
    let transport = MockTransport::new();
    transport.push_ok(200, json!({"results": [], "size": 0, "totalSize": 250}));
    let resource = resource(basic_config(), &transport);

    let total = resource.total_size(&FetchAllOptions::new()).await.unwrap();

    assert_eq!(total, 250);
    let (_, query) = split_url(&transport.requests()[0].url);
    assert_eq!(query["limit"], "0");
    assert_eq!(query["start"], "0");
}

#[tokio::test]
async fn test_total_size_missing_is_an_error() {
    let transport = MockTransport::new();
    transport.push_ok(200, json!({"results": [], "size": 0}));
    let resource = resource(basic_config(), &transport);

    let error = resource
        .total_size(&FetchAllOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::MissingTotalSize));
}

#[tokio::test]
async fn test_fetch_all_by_total_requests_ceil_of_batches() {
    let transport = MockTransport::new();
    transport.push_ok(200, json!({"results": [], "size": 0, "totalSize": 250}));
    transport.push_page(0, 100);
    transport.push_page(100, 100);
    transport.push_page(200, 50);
    let resource = resource(basic_config(), &transport);

    let all: Vec<Value> = resource
        .fetch_all_by_total(&FetchAllOptions::new())
        .await
        .unwrap();

    assert_eq!(all.len(), 250);
    assert_eq!(transport.request_count(), 4);
    let (_, last) = split_url(&transport.requests()[3].url);
    assert_eq!(last["start"], "200");
    assert_eq!(last["limit"], "100");
}

#[tokio::test]
async fn test_fetch_all_by_total_with_zero_total_only_probes() {
    let transport = MockTransport::new();
    transport.push_ok(200, json!({"results": [], "size": 0, "totalSize": 0}));
    let resource = resource(basic_config(), &transport);

    let all: Vec<Value> = resource
        .fetch_all_by_total(&FetchAllOptions::new())
        .await
        .unwrap();

    assert!(all.is_empty());
    assert_eq!(transport.request_count(), 1);
}
