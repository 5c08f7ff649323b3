// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Instant;

use internal_error::ErrorIntoInternal;
use tracing::Instrument;
use vector_catalog_gateway::*;

use crate::{GatewaySearchConfig, SearchMetrics};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Cache-aside search pipeline. Owns all request-scoped values for one
/// request; the only shared state it touches is the cache connection, the
/// breakers inside the resilient backends, and the metrics.
pub struct SearchOrchestratorImpl {
    cache: Arc<dyn ResponseCache>,
    router: Arc<dyn ShardRouter>,
    embedding_backend: Arc<dyn EmbeddingBackend>,
    index_backend: Arc<dyn IndexBackend>,
    config: Arc<GatewaySearchConfig>,
    metrics: Arc<SearchMetrics>,
}

#[dill::component(pub)]
#[dill::interface(dyn SearchOrchestrator)]
impl SearchOrchestratorImpl {
    pub fn new(
        cache: Arc<dyn ResponseCache>,
        router: Arc<dyn ShardRouter>,
        embedding_backend: Arc<dyn EmbeddingBackend>,
        index_backend: Arc<dyn IndexBackend>,
        config: Arc<GatewaySearchConfig>,
        metrics: Arc<SearchMetrics>,
    ) -> Self {
        Self {
            cache,
            router,
            embedding_backend,
            index_backend,
            config,
            metrics,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchOrchestrator for SearchOrchestratorImpl {
    async fn search(&self, query: SearchQuery) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();
        let _active = ActiveSearchGuard::new(&self.metrics.active_searches);

        let shard_key = self.router.resolve_one(query.shard_key.as_deref());
        let fingerprint = QueryFingerprint::derive(&query.query, query.top_k, &shard_key);

        if let Some(mut cached) = self.cache.get(&fingerprint).await {
            tracing::debug!(%fingerprint, "Serving search response from cache");
            self.metrics.cache_hits_total.inc();

            cached.cache_hit = true;
            cached.total_latency_ms = elapsed_ms(started);

            self.metrics
                .search_duration_ms
                .observe(cached.total_latency_ms);
            return Ok(cached);
        }
        self.metrics.cache_misses_total.inc();

        let embedding = self.generate_embedding(&query.query).await?;

        let nprobe = query.nprobe.unwrap_or(self.config.default_nprobe);

        let search_result = match self
            .index_backend
            .search_index(&embedding.vector, query.top_k, &shard_key, nprobe)
            .await
        {
            Ok(result) => result,
            Err(BackendError::CircuitOpen { backend }) => {
                tracing::warn!(
                    backend,
                    %shard_key,
                    "Index backend circuit is open, returning degraded empty response",
                );
                let outcome = SearchOutcome {
                    results: Vec::new(),
                    shard_key,
                    search_latency_ms: 0.0,
                    total_latency_ms: elapsed_ms(started),
                    cache_hit: false,
                    query_hash: fingerprint.to_string(),
                };
                self.metrics
                    .search_duration_ms
                    .observe(outcome.total_latency_ms);
                // A degraded response must not shadow real results in cache
                return Ok(outcome);
            }
            Err(e) => return Err(e.int_err().into()),
        };

        let mut results = assemble_hits(search_result.hits, &fingerprint);
        rank_hits(&mut results);
        results.truncate(query.top_k);

        let outcome = SearchOutcome {
            results,
            shard_key: if search_result.shard_key.is_empty() {
                shard_key
            } else {
                search_result.shard_key
            },
            search_latency_ms: search_result.search_latency_ms,
            total_latency_ms: elapsed_ms(started),
            cache_hit: false,
            query_hash: fingerprint.to_string(),
        };

        self.populate_cache(fingerprint, outcome.clone());

        self.metrics
            .search_duration_ms
            .observe(outcome.total_latency_ms);
        Ok(outcome)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl SearchOrchestratorImpl {
    async fn generate_embedding(&self, text: &str) -> Result<Embedding, SearchError> {
        let span = tracing::info_span!(
            "EmbeddingBackend::generate_embedding",
            embedding.text_length = text.len(),
            embedding.dimension = tracing::field::Empty,
            embedding.model = tracing::field::Empty,
        );

        let embed_started = Instant::now();
        let result = self
            .embedding_backend
            .generate_embedding(text)
            .instrument(span.clone())
            .await;
        self.metrics
            .embedding_duration_ms
            .observe(elapsed_ms(embed_started));

        match result {
            Ok(embedding) => {
                span.record("embedding.dimension", embedding.dimension);
                span.record("embedding.model", embedding.model_name.as_str());
                Ok(embedding)
            }
            Err(source) => {
                tracing::error!(error = ?source, "Embedding backend call failed");
                Err(SearchError::EmbeddingUnavailable { source })
            }
        }
    }

    /// Fire-and-forget population: runs on a detached task so that a client
    /// disconnect cannot abort the write and defeat the cache for subsequent
    /// callers. The response latency does not include the write.
    fn populate_cache(&self, fingerprint: QueryFingerprint, outcome: SearchOutcome) {
        let cache = Arc::clone(&self.cache);

        tokio::task::spawn(async move {
            cache.set(&fingerprint, &outcome, None).await;
        });
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn assemble_hits(hits: Vec<IndexHit>, fingerprint: &QueryFingerprint) -> Vec<SearchHit> {
    hits.into_iter()
        .map(|hit| SearchHit {
            id: hit.id,
            score: hit.score,
            metadata: parse_hit_metadata(&hit.metadata_json, hit.id, fingerprint),
        })
        .collect()
}

/// An empty or malformed metadata payload yields an empty mapping and never
/// fails the request
fn parse_hit_metadata(
    metadata_json: &str,
    hit_id: i64,
    fingerprint: &QueryFingerprint,
) -> serde_json::Map<String, serde_json::Value> {
    if metadata_json.is_empty() {
        return serde_json::Map::new();
    }

    match serde_json::from_str::<serde_json::Value>(metadata_json) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(other) => {
            tracing::warn!(
                hit_id,
                %fingerprint,
                value_kind = ?other,
                "Hit metadata is valid JSON but not an object, dropping",
            );
            serde_json::Map::new()
        }
        Err(err) => {
            tracing::warn!(
                hit_id,
                %fingerprint,
                error = %err,
                "Failed to deserialize hit metadata, dropping",
            );
            serde_json::Map::new()
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct ActiveSearchGuard<'a> {
    gauge: &'a prometheus::IntGauge,
}

impl<'a> ActiveSearchGuard<'a> {
    fn new(gauge: &'a prometheus::IntGauge) -> Self {
        gauge.inc();
        Self { gauge }
    }
}

impl Drop for ActiveSearchGuard<'_> {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
