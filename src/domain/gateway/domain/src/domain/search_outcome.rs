// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub score: f32,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The assembled search result. Serializes to the wire shape of the HTTP
/// response and of cached values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub results: Vec<SearchHit>,
    pub shard_key: String,
    /// Backend-reported index search time. Cache hits retain the value
    /// observed when the entry was populated.
    pub search_latency_ms: f64,
    /// Wall time of the current request as measured by the orchestrator
    pub total_latency_ms: f64,
    pub cache_hit: bool,
    pub query_hash: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Orders hits by descending score, ties broken by ascending id
pub fn rank_hits(hits: &mut [SearchHit]) {
    hits.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.id.cmp(&b.id))
    });
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
