// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use vector_catalog_gateway::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_accepts_valid_query() {
    let query = SearchQuery::try_new("taxi ride", 10, Some("nyc_taxi_2022".to_string()), Some(32))
        .unwrap();

    assert_eq!(query.query, "taxi ride");
    assert_eq!(query.top_k, 10);
    assert_eq!(query.shard_key.as_deref(), Some("nyc_taxi_2022"));
    assert_eq!(query.nprobe, Some(32));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_rejects_empty_and_whitespace_query() {
    for query in ["", "   ", "\t\n"] {
        let err = SearchQuery::try_new(query, 10, None, None).unwrap_err();
        assert_eq!(err.field, "query");
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_rejects_overlong_query() {
    let err = SearchQuery::try_new("x".repeat(QUERY_MAX_LENGTH + 1), 10, None, None).unwrap_err();
    assert_eq!(err.field, "query");

    // Boundary value is accepted
    SearchQuery::try_new("x".repeat(QUERY_MAX_LENGTH), 10, None, None).unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_rejects_top_k_out_of_range() {
    assert_eq!(
        SearchQuery::try_new("q", 0, None, None).unwrap_err().field,
        "topK",
    );
    assert_eq!(
        SearchQuery::try_new("q", TOP_K_MAX + 1, None, None)
            .unwrap_err()
            .field,
        "topK",
    );

    SearchQuery::try_new("q", TOP_K_MAX, None, None).unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_rejects_nprobe_out_of_range() {
    assert_eq!(
        SearchQuery::try_new("q", 10, None, Some(0)).unwrap_err().field,
        "nprobe",
    );
    assert_eq!(
        SearchQuery::try_new("q", 10, None, Some(NPROBE_MAX + 1))
            .unwrap_err()
            .field,
        "nprobe",
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_empty_shard_key_means_default() {
    let query = SearchQuery::try_new("q", 10, Some(String::new()), None).unwrap();
    assert_eq!(query.shard_key, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
