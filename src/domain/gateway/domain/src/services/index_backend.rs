// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Typed client of the ANN index RPC service
#[async_trait::async_trait]
pub trait IndexBackend: Send + Sync {
    async fn search_index(
        &self,
        vector: &[f32],
        top_k: usize,
        shard_key: &str,
        nprobe: usize,
    ) -> Result<IndexSearchResult, BackendError>;

    /// Administrative pass-through, also used by the readiness probe
    async fn get_index_info(
        &self,
        shard_key: Option<&str>,
    ) -> Result<Vec<ShardDescriptor>, BackendError>;

    /// Administrative pass-through triggering a hot reload on the backend
    async fn reload_index(
        &self,
        shard_key: Option<&str>,
    ) -> Result<IndexReloadOutcome, BackendError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One raw hit as returned by the index backend. Metadata arrives as an
/// opaque JSON string and is only decoded during result assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    pub id: i64,
    pub score: f32,
    pub metadata_json: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexSearchResult {
    pub hits: Vec<IndexHit>,
    pub shard_key: String,
    pub search_latency_ms: f64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
