// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::extract::{Extension, Query};
use axum::response::Json;
use dill::Catalog;
use http_common::{ApiError, CorrelationId};
use internal_error::ErrorIntoInternal;
use vector_catalog_gateway::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardKeyQueryParams {
    pub shard_key: Option<String>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfoResponseBody {
    pub shards: Vec<ShardDescriptor>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Shard descriptors of the index backend
pub async fn index_info_handler(
    Extension(catalog): Extension<Catalog>,
    Extension(correlation_id): Extension<CorrelationId>,
    Query(params): Query<ShardKeyQueryParams>,
) -> Result<Json<IndexInfoResponseBody>, ApiError> {
    let index_backend = catalog.get_one::<dyn IndexBackend>().unwrap();

    let shards = index_backend
        .get_index_info(params.shard_key.as_deref())
        .await
        .map_err(|e| map_backend_error(e, correlation_id))?;

    tracing::debug!(shards = shards.len(), "Returning index info");
    Ok(Json(IndexInfoResponseBody { shards }))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Triggers a hot reload of index shards on the backend
pub async fn index_reload_handler(
    Extension(catalog): Extension<Catalog>,
    Extension(correlation_id): Extension<CorrelationId>,
    Query(params): Query<ShardKeyQueryParams>,
) -> Result<Json<IndexReloadOutcome>, ApiError> {
    let index_backend = catalog.get_one::<dyn IndexBackend>().unwrap();

    let outcome = index_backend
        .reload_index(params.shard_key.as_deref())
        .await
        .map_err(|e| map_backend_error(e, correlation_id))?;

    tracing::info!(
        success = outcome.success,
        reloaded_shards = ?outcome.reloaded_shards,
        "Index reload completed",
    );
    Ok(Json(outcome))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn map_backend_error(e: BackendError, correlation_id: CorrelationId) -> ApiError {
    let api_error = match e {
        BackendError::Rpc(ref rpc) if rpc.is_transient() => {
            ApiError::service_unavailable(e.to_string())
        }
        BackendError::CircuitOpen { .. } | BackendError::DeadlineExceeded { .. } => {
            ApiError::service_unavailable(e.to_string())
        }
        BackendError::Rpc(rpc) => ApiError::bad_request(rpc.to_string()),
        BackendError::Internal(_) => ApiError::internal(e.int_err()),
    };

    api_error.with_correlation_id(correlation_id)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
