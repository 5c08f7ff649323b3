// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tonic::transport::Channel;
use vector_catalog_gateway::*;

use crate::channel::map_rpc_status;
use crate::proto;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Raw (undecorated) client of the ANN index sidecar service
pub struct IndexBackendGrpc {
    client: proto::IndexServiceClient,
}

impl IndexBackendGrpc {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: proto::IndexServiceClient::new(channel),
        }
    }
}

#[async_trait::async_trait]
impl IndexBackend for IndexBackendGrpc {
    async fn search_index(
        &self,
        vector: &[f32],
        top_k: usize,
        shard_key: &str,
        nprobe: usize,
    ) -> Result<IndexSearchResult, BackendError> {
        let request = proto::SearchRequest {
            query_vector: vector.to_vec(),
            top_k: top_k as i32,
            shard_key: shard_key.to_string(),
            nprobe: nprobe as i32,
        };

        let mut client = self.client.clone();
        let response = client
            .search_index(request)
            .await
            .map_err(map_rpc_status)?
            .into_inner();

        tracing::debug!(
            shard_key = %response.shard_key,
            hits = response.results.len(),
            search_latency_ms = response.search_latency_ms,
            "Index search completed",
        );

        Ok(IndexSearchResult {
            hits: response
                .results
                .into_iter()
                .map(|r| IndexHit {
                    id: r.id,
                    score: r.score,
                    metadata_json: r.metadata_json,
                })
                .collect(),
            shard_key: response.shard_key,
            search_latency_ms: response.search_latency_ms,
        })
    }

    async fn get_index_info(
        &self,
        shard_key: Option<&str>,
    ) -> Result<Vec<ShardDescriptor>, BackendError> {
        let request = proto::IndexInfoRequest {
            shard_key: shard_key.unwrap_or_default().to_string(),
        };

        let mut client = self.client.clone();
        let response = client
            .get_index_info(request)
            .await
            .map_err(map_rpc_status)?
            .into_inner();

        Ok(response
            .shards
            .into_iter()
            .map(|s| ShardDescriptor {
                shard_key: s.shard_key,
                total_vectors: s.total_vectors.max(0) as u64,
                dimension: s.dimension.max(0) as usize,
                index_type: s.index_type,
                is_trained: s.is_trained,
                index_size_bytes: s.index_size_bytes.max(0) as u64,
            })
            .collect())
    }

    async fn reload_index(
        &self,
        shard_key: Option<&str>,
    ) -> Result<IndexReloadOutcome, BackendError> {
        let request = proto::ReloadIndexRequest {
            shard_key: shard_key.unwrap_or_default().to_string(),
        };

        let mut client = self.client.clone();
        let response = client
            .reload_index(request)
            .await
            .map_err(map_rpc_status)?
            .into_inner();

        Ok(IndexReloadOutcome {
            success: response.success,
            reloaded_shards: response.reloaded_shards,
            message: response.message,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
