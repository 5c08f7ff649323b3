// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::extract::Extension;
use axum::response::Json;
use dill::Catalog;
use http_common::{ApiError, CorrelationId};
use tracing::Instrument;
use vector_catalog_gateway::*;
use vector_catalog_gateway_services::GatewaySearchConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestBody {
    pub query: String,
    pub top_k: Option<usize>,
    pub shard_key: Option<String>,
    pub nprobe: Option<usize>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Semantic search over the vector catalog
pub async fn search_handler(
    Extension(catalog): Extension<Catalog>,
    Extension(correlation_id): Extension<CorrelationId>,
    Json(body): Json<SearchRequestBody>,
) -> Result<Json<SearchOutcome>, ApiError> {
    let config = catalog.get_one::<GatewaySearchConfig>().unwrap();
    let orchestrator = catalog.get_one::<dyn SearchOrchestrator>().unwrap();

    let query = SearchQuery::try_new(
        body.query,
        body.top_k.unwrap_or(config.default_top_k),
        body.shard_key,
        body.nprobe,
    )
    .map_err(|e| {
        ApiError::bad_request(e.to_string()).with_correlation_id(correlation_id.clone())
    })?;

    let span = observability::tracing::root_span!(
        "gateway_search",
        search.query_length = query.query.len(),
        search.top_k = query.top_k,
        search.shard_key = tracing::field::Empty,
        search.nprobe = query.nprobe.unwrap_or(config.default_nprobe),
        search.cache_hit = tracing::field::Empty,
        search.result_count = tracing::field::Empty,
        search.total_latency_ms = tracing::field::Empty,
        search.search_latency_ms = tracing::field::Empty,
        search.query_hash = tracing::field::Empty,
    );

    let result = orchestrator.search(query).instrument(span.clone()).await;

    match result {
        Ok(outcome) => {
            span.record("search.shard_key", outcome.shard_key.as_str());
            span.record("search.cache_hit", outcome.cache_hit);
            span.record("search.result_count", outcome.results.len());
            span.record("search.total_latency_ms", outcome.total_latency_ms);
            span.record("search.search_latency_ms", outcome.search_latency_ms);
            span.record("search.query_hash", outcome.query_hash.as_str());

            Ok(Json(outcome))
        }
        Err(e @ SearchError::EmbeddingUnavailable { .. }) => Err(ApiError::service_unavailable(
            e.to_string(),
        )
        .with_correlation_id(correlation_id)),
        Err(SearchError::Internal(e)) => {
            Err(ApiError::internal(e).with_correlation_id(correlation_id))
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
