// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use dill::{Catalog, CatalogBuilder};
use internal_error::{InternalError, ResultIntoInternal};
use observability::health::HealthChecks;
use observability::metrics::MetricsProvider;
use time_source::{SystemTimeSource, SystemTimeSourceDefault};
use vector_catalog_backend_grpc::*;
use vector_catalog_cache_inmem::InMemoryResponseCache;
use vector_catalog_cache_redis::{RedisResponseCache, RedisResponseCacheConfig};
use vector_catalog_gateway::*;
use vector_catalog_gateway_services::*;

use crate::config::GatewayConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const EMBEDDING_CALL_TIMEOUT: Duration = Duration::from_secs(10);
const INDEX_CALL_TIMEOUT: Duration = Duration::from_secs(5);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn build_catalog(config: &GatewayConfig) -> Result<Catalog, InternalError> {
    let time_source: Arc<dyn SystemTimeSource> = Arc::new(SystemTimeSourceDefault);

    let metrics = SearchMetrics::new();

    let mut b = CatalogBuilder::new();

    b.add_value(GatewaySearchConfig {
        default_top_k: config.default_top_k,
        default_nprobe: config.default_nprobe,
        default_shard_key: config.default_shard_key.clone(),
    });

    // Backend clients share one multiplexed channel; each gets its own
    // process-wide breaker
    let channel = build_sidecar_channel(&config.sidecar_grpc_address)?;

    let embedding_raw: Arc<dyn EmbeddingBackend> = Arc::new(EmbeddingBackendGrpc::new(
        channel.clone(),
        EmbeddingBackendConfig {
            model_name: config.embedding_model.clone(),
        },
    ));
    let embedding_breaker = Arc::new(
        CircuitBreaker::new(
            BACKEND_LABEL_EMBEDDING,
            CircuitBreakerConfig::default(),
            Arc::clone(&time_source),
        )
        .with_open_gauge(
            metrics
                .circuit_breaker_open
                .with_label_values(&[BACKEND_LABEL_EMBEDDING]),
        ),
    );
    b.add_value(ResilientEmbeddingBackend::new(
        embedding_raw,
        ResiliencePolicy::new(
            BACKEND_LABEL_EMBEDDING,
            EMBEDDING_CALL_TIMEOUT,
            RetryPolicy::default(),
            embedding_breaker,
            Arc::clone(&time_source),
        ),
    ));
    b.bind::<dyn EmbeddingBackend, ResilientEmbeddingBackend>();

    let index_raw: Arc<dyn IndexBackend> = Arc::new(IndexBackendGrpc::new(channel));
    let index_breaker = Arc::new(
        CircuitBreaker::new(
            BACKEND_LABEL_INDEX,
            CircuitBreakerConfig::default(),
            Arc::clone(&time_source),
        )
        .with_open_gauge(
            metrics
                .circuit_breaker_open
                .with_label_values(&[BACKEND_LABEL_INDEX]),
        ),
    );
    b.add_value(ResilientIndexBackend::new(
        index_raw,
        ResiliencePolicy::new(
            BACKEND_LABEL_INDEX,
            INDEX_CALL_TIMEOUT,
            RetryPolicy::default(),
            index_breaker,
            Arc::clone(&time_source),
        ),
    ));
    b.bind::<dyn IndexBackend, ResilientIndexBackend>();

    match &config.redis_connection_string {
        Some(connection_string) => {
            let manager = RedisResponseCache::connect(connection_string).await?;
            b.add_value(RedisResponseCache::new(
                manager,
                RedisResponseCacheConfig {
                    key_prefix: config.redis_key_prefix.clone(),
                    default_ttl: config.default_cache_ttl,
                },
            ));
            b.bind::<dyn ResponseCache, RedisResponseCache>();
        }
        None => {
            tracing::warn!("No Redis endpoint configured, using the in-memory response cache");
            b.add_value(InMemoryResponseCache::new(
                config.default_cache_ttl,
                Arc::clone(&time_source),
            ));
            b.bind::<dyn ResponseCache, InMemoryResponseCache>();
        }
    }

    b.add_value(FixedWindowRateLimiter::new(
        RateLimiterConfig {
            permit_limit: config.rate_limit_permit_limit,
            window: chrono::Duration::from_std(config.rate_limit_window).int_err()?,
            queue_limit: config.rate_limit_queue_limit,
        },
        Arc::clone(&time_source),
    ));

    b.add_value(metrics);
    b.add::<ShardRouterImpl>();
    b.add::<SearchOrchestratorImpl>();

    let base_catalog = b.build();

    // Second stage: values that need resolved components
    let metrics = base_catalog.get_one::<SearchMetrics>().unwrap();
    let registry = prometheus::Registry::new();
    metrics.register(&registry).int_err()?;

    let cache = base_catalog.get_one::<dyn ResponseCache>().unwrap();
    let index_backend = base_catalog.get_one::<dyn IndexBackend>().unwrap();
    let health_checks = HealthChecks(vec![
        Arc::new(ResponseCacheHealthCheck::new(cache)),
        Arc::new(IndexBackendHealthCheck::new(index_backend)),
    ]);

    Ok(CatalogBuilder::new_chained(&base_catalog)
        .add_value(registry)
        .add_value(health_checks)
        .build())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
