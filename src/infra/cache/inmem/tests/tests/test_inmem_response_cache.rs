// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeZone as _;
use time_source::FakeSystemTimeSource;
use vector_catalog_cache_inmem::InMemoryResponseCache;
use vector_catalog_gateway::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct CacheHarness {
    cache: InMemoryResponseCache,
    clock: FakeSystemTimeSource,
}

impl CacheHarness {
    fn new() -> Self {
        let t0 = chrono::Utc.with_ymd_and_hms(2050, 1, 1, 12, 0, 0).unwrap();
        let clock = FakeSystemTimeSource::new(t0);

        Self {
            cache: InMemoryResponseCache::new(Duration::from_secs(300), Arc::new(clock.clone())),
            clock,
        }
    }
}

fn outcome(query_hash: &str) -> SearchOutcome {
    SearchOutcome {
        results: vec![SearchHit {
            id: 11,
            score: 0.42,
            metadata: serde_json::Map::new(),
        }],
        shard_key: "nyc_taxi_2023".to_string(),
        search_latency_ms: 7.0,
        total_latency_ms: 55.0,
        cache_hit: false,
        query_hash: query_hash.to_string(),
    }
}

fn fingerprint(query: &str) -> QueryFingerprint {
    QueryFingerprint::derive(query, 10, "nyc_taxi_2023")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_then_get_round_trips_within_ttl() {
    let harness = CacheHarness::new();
    let fp = fingerprint("taxi ride");
    let value = outcome("abc123");

    harness.cache.set(&fp, &value, None).await;

    harness.clock.advance(chrono::Duration::seconds(299));
    assert_eq!(harness.cache.get(&fp).await, Some(value));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_entry_expires_after_ttl() {
    let harness = CacheHarness::new();
    let fp = fingerprint("taxi ride");

    harness
        .cache
        .set(&fp, &outcome("abc123"), Some(Duration::from_secs(60)))
        .await;

    harness.clock.advance(chrono::Duration::seconds(61));
    assert_eq!(harness.cache.get(&fp).await, None);
    assert!(harness.cache.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_misses_on_unknown_fingerprint() {
    let harness = CacheHarness::new();

    assert_eq!(harness.cache.get(&fingerprint("never stored")).await, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delete_reports_whether_an_entry_was_removed() {
    let harness = CacheHarness::new();
    let fp = fingerprint("taxi ride");

    harness.cache.set(&fp, &outcome("abc123"), None).await;

    assert!(harness.cache.delete(&fp).await);
    assert!(!harness.cache.delete(&fp).await);
    assert_eq!(harness.cache.get(&fp).await, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_distinct_fingerprints_do_not_collide() {
    let harness = CacheHarness::new();

    harness
        .cache
        .set(&fingerprint("taxi ride"), &outcome("aaa"), None)
        .await;
    harness
        .cache
        .set(&fingerprint("bus ride"), &outcome("bbb"), None)
        .await;

    assert_eq!(
        harness.cache.get(&fingerprint("taxi ride")).await.unwrap().query_hash,
        "aaa",
    );
    assert_eq!(
        harness.cache.get(&fingerprint("bus ride")).await.unwrap().query_hash,
        "bbb",
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
