// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::atomic::Ordering;

use chrono::Duration;
use serde_json::json;
use vector_catalog_gateway_services::RateLimiterConfig;

use crate::harness::GatewayHarness;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_search_cold_then_warm() {
    let harness = GatewayHarness::new();
    harness.index.set_hits(vec![(2, 0.9), (7, 0.7), (1, 0.7)]);

    let response = harness
        .post_search(json!({"query": "taxi ride from JFK", "topK": 5}))
        .await;
    assert_eq!(response.status(), http::StatusCode::OK);
    let cold = GatewayHarness::body_json(response).await;

    assert_eq!(cold["cacheHit"], false);
    assert_eq!(cold["shardKey"], "nyc_taxi_2023");
    let cold_ids: Vec<i64> = cold["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["id"].as_i64().unwrap())
        .collect();
    assert_eq!(cold_ids, vec![2, 1, 7]);

    harness.drain_cache_writes().await;

    let response = harness
        .post_search(json!({"query": "taxi ride from JFK", "topK": 5}))
        .await;
    assert_eq!(response.status(), http::StatusCode::OK);
    let warm = GatewayHarness::body_json(response).await;

    assert_eq!(warm["cacheHit"], true);
    assert_eq!(warm["queryHash"], cold["queryHash"]);
    let warm_ids: Vec<i64> = warm["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["id"].as_i64().unwrap())
        .collect();
    assert_eq!(warm_ids, cold_ids);
    assert!(
        warm["totalLatencyMs"].as_f64().unwrap() < cold["totalLatencyMs"].as_f64().unwrap(),
        "warm response must be faster than the cold one",
    );

    // Only the cold request consulted the embedder
    assert_eq!(harness.embedding.calls.load(Ordering::SeqCst), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_search_validation_error_names_the_field() {
    let harness = GatewayHarness::new();

    let response = harness.post_search(json!({"query": "", "topK": 5})).await;
    assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[http::header::CONTENT_TYPE],
        "application/problem+json",
    );

    let problem = GatewayHarness::body_json(response).await;
    assert_eq!(problem["status"], 400);
    assert!(problem["detail"].as_str().unwrap().contains("query"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_search_rejects_out_of_range_top_k() {
    let harness = GatewayHarness::new();

    let response = harness
        .post_search(json!({"query": "taxi", "topK": 101}))
        .await;
    assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);

    let problem = GatewayHarness::body_json(response).await;
    assert!(problem["detail"].as_str().unwrap().contains("topK"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_burst_over_permits_and_queue_is_rate_limited() {
    let harness = GatewayHarness::with_rate_limiter(RateLimiterConfig {
        permit_limit: 2,
        window: Duration::seconds(10),
        queue_limit: 0,
    });
    harness.index.set_hits(vec![(1, 0.5)]);

    for _ in 0..2 {
        let response = harness.post_search(json!({"query": "taxi ride"})).await;
        assert_eq!(response.status(), http::StatusCode::OK);
    }

    let response = harness.post_search(json!({"query": "taxi ride"})).await;
    assert_eq!(response.status(), http::StatusCode::TOO_MANY_REQUESTS);

    let problem = GatewayHarness::body_json(response).await;
    assert_eq!(problem["status"], 429);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_embedding_outage_maps_to_service_unavailable() {
    let harness = GatewayHarness::new();
    harness.embedding.unavailable.store(true, Ordering::SeqCst);

    let response = harness.post_search(json!({"query": "taxi ride"})).await;
    assert_eq!(response.status(), http::StatusCode::SERVICE_UNAVAILABLE);

    let correlation_id = response.headers()["X-Correlation-ID"]
        .to_str()
        .unwrap()
        .to_string();
    let problem = GatewayHarness::body_json(response).await;
    assert_eq!(problem["status"], 503);
    assert_eq!(problem["correlationId"], correlation_id.as_str());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_index_outage_degrades_to_empty_results() {
    let harness = GatewayHarness::new();
    harness.index.circuit_open.store(true, Ordering::SeqCst);

    let response = harness.post_search(json!({"query": "taxi ride"})).await;
    assert_eq!(response.status(), http::StatusCode::OK);

    let body = GatewayHarness::body_json(response).await;
    assert_eq!(body["results"], json!([]));
    assert_eq!(body["cacheHit"], false);
    assert_eq!(body["shardKey"], "nyc_taxi_2023");

    // No cache write for the degraded response
    for _ in 0..100 {
        tokio::task::yield_now().await;
    }
    assert!(harness.cache.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_shard_key_override_reaches_the_backend_and_is_echoed() {
    let harness = GatewayHarness::new();
    harness.index.set_hits(vec![(1, 0.5)]);

    let response = harness
        .post_search(json!({"query": "x", "shardKey": "nyc_taxi_2022"}))
        .await;
    assert_eq!(response.status(), http::StatusCode::OK);

    let body = GatewayHarness::body_json(response).await;
    assert_eq!(body["shardKey"], "nyc_taxi_2022");
    assert_eq!(
        harness.index.last_shard_key.lock().unwrap().as_deref(),
        Some("nyc_taxi_2022"),
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_correlation_id_is_echoed_when_supplied() {
    let harness = GatewayHarness::new();
    harness.index.set_hits(vec![(1, 0.5)]);

    let request = http::Request::builder()
        .method(http::Method::POST)
        .uri("/api/v1/search")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header("X-Correlation-ID", "deadbeef00112233")
        .body(axum::body::Body::from(
            serde_json::json!({"query": "taxi"}).to_string(),
        ))
        .unwrap();

    let response = harness.request(request).await;
    assert_eq!(
        response.headers()["X-Correlation-ID"],
        "deadbeef00112233",
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_correlation_id_is_synthesized_when_absent() {
    let harness = GatewayHarness::new();
    harness.index.set_hits(vec![(1, 0.5)]);

    let response = harness.post_search(json!({"query": "taxi"})).await;

    let correlation_id = response.headers()["X-Correlation-ID"].to_str().unwrap();
    assert_eq!(correlation_id.len(), 16);
    assert!(correlation_id.chars().all(|c| c.is_ascii_hexdigit()));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_index_info_returns_shard_descriptors() {
    let harness = GatewayHarness::new();

    let response = harness.get("/api/v1/index/info").await;
    assert_eq!(response.status(), http::StatusCode::OK);

    let body = GatewayHarness::body_json(response).await;
    assert_eq!(body["shards"][0]["shardKey"], "nyc_taxi_2023");
    assert_eq!(body["shards"][0]["dimension"], 384);
    assert_eq!(body["shards"][0]["isTrained"], true);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_index_reload_passes_through() {
    let harness = GatewayHarness::new();

    let request = http::Request::builder()
        .method(http::Method::POST)
        .uri("/api/v1/index/reload?shardKey=nyc_taxi_2022")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = harness.request(request).await;
    assert_eq!(response.status(), http::StatusCode::OK);

    let body = GatewayHarness::body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["reloadedShards"], json!(["nyc_taxi_2022"]));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
