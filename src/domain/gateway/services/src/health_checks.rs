// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use observability::health::{HealthCheck, HealthCheckError};
use vector_catalog_gateway::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Readiness probe over the response cache connection
pub struct ResponseCacheHealthCheck {
    cache: Arc<dyn ResponseCache>,
}

impl ResponseCacheHealthCheck {
    pub fn new(cache: Arc<dyn ResponseCache>) -> Self {
        Self { cache }
    }
}

#[async_trait::async_trait]
impl HealthCheck for ResponseCacheHealthCheck {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn check(&self) -> Result<(), HealthCheckError> {
        self.cache.ping().await.map_err(HealthCheckError::Internal)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Readiness probe over the index backend's info RPC
pub struct IndexBackendHealthCheck {
    index_backend: Arc<dyn IndexBackend>,
}

impl IndexBackendHealthCheck {
    pub fn new(index_backend: Arc<dyn IndexBackend>) -> Self {
        Self { index_backend }
    }
}

#[async_trait::async_trait]
impl HealthCheck for IndexBackendHealthCheck {
    fn name(&self) -> &'static str {
        "index-backend"
    }

    async fn check(&self) -> Result<(), HealthCheckError> {
        match self.index_backend.get_index_info(None).await {
            Ok(_) => Ok(()),
            Err(e @ BackendError::Rpc(RpcError {
                code: RpcStatusCode::Unavailable,
                ..
            })) => Err(HealthCheckError::Unavailable {
                reason: e.to_string(),
            }),
            Err(e @ BackendError::CircuitOpen { .. }) => Err(HealthCheckError::Unavailable {
                reason: e.to_string(),
            }),
            Err(e) => Err(HealthCheckError::Internal(
                internal_error::ErrorIntoInternal::int_err(e),
            )),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
