// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use vector_catalog_gateway::*;

use crate::ResiliencePolicy;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Decorates a raw index client with the composed resilience policy. Only the
/// search path is decorated; the administrative pass-throughs go straight to
/// the backend and rely on their callers' deadlines.
pub struct ResilientIndexBackend {
    inner: Arc<dyn IndexBackend>,
    policy: ResiliencePolicy,
}

impl ResilientIndexBackend {
    pub fn new(inner: Arc<dyn IndexBackend>, policy: ResiliencePolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait::async_trait]
impl IndexBackend for ResilientIndexBackend {
    async fn search_index(
        &self,
        vector: &[f32],
        top_k: usize,
        shard_key: &str,
        nprobe: usize,
    ) -> Result<IndexSearchResult, BackendError> {
        self.policy
            .execute(|| self.inner.search_index(vector, top_k, shard_key, nprobe))
            .await
    }

    async fn get_index_info(
        &self,
        shard_key: Option<&str>,
    ) -> Result<Vec<ShardDescriptor>, BackendError> {
        self.inner.get_index_info(shard_key).await
    }

    async fn reload_index(
        &self,
        shard_key: Option<&str>,
    ) -> Result<IndexReloadOutcome, BackendError> {
        self.inner.reload_index(shard_key).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
