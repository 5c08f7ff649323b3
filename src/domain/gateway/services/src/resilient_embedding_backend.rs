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

/// Decorates a raw embedding client with the composed resilience policy.
/// There is no degraded path here: an unavailable embedder fails the request.
pub struct ResilientEmbeddingBackend {
    inner: Arc<dyn EmbeddingBackend>,
    policy: ResiliencePolicy,
}

impl ResilientEmbeddingBackend {
    pub fn new(inner: Arc<dyn EmbeddingBackend>, policy: ResiliencePolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait::async_trait]
impl EmbeddingBackend for ResilientEmbeddingBackend {
    async fn generate_embedding(&self, text: &str) -> Result<Embedding, BackendError> {
        self.policy
            .execute(|| self.inner.generate_embedding(text))
            .await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
