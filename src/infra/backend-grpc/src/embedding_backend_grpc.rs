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

#[derive(Debug, Clone)]
pub struct EmbeddingBackendConfig {
    /// Model the gateway pins on every request
    pub model_name: String,
}

impl Default for EmbeddingBackendConfig {
    fn default() -> Self {
        Self {
            model_name: "all-MiniLM-L6-v2".to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Raw (undecorated) client of the embedding sidecar service
pub struct EmbeddingBackendGrpc {
    client: proto::EmbeddingServiceClient,
    config: EmbeddingBackendConfig,
}

impl EmbeddingBackendGrpc {
    pub fn new(channel: Channel, config: EmbeddingBackendConfig) -> Self {
        Self {
            client: proto::EmbeddingServiceClient::new(channel),
            config,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingBackend for EmbeddingBackendGrpc {
    async fn generate_embedding(&self, text: &str) -> Result<Embedding, BackendError> {
        let request = proto::EmbeddingRequest {
            text: text.to_string(),
            model_name: self.config.model_name.clone(),
        };

        // The client multiplexes over a cloned handle of the shared channel
        let mut client = self.client.clone();
        let response = client
            .generate_embedding(request)
            .await
            .map_err(map_rpc_status)?
            .into_inner();

        tracing::debug!(
            dimension = response.dimension,
            model_name = %response.model_name,
            "Generated query embedding",
        );

        let dimension = if response.dimension > 0 {
            response.dimension as usize
        } else {
            response.vector.len()
        };

        Ok(Embedding {
            vector: response.vector,
            dimension,
            model_name: response.model_name,
            latency_ms: response.latency_ms,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
