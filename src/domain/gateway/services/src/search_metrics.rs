// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::*;
use observability::metrics::MetricsProvider;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BACKEND_LABEL_EMBEDDING: &str = "embedding";
pub const BACKEND_LABEL_INDEX: &str = "index";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct SearchMetrics {
    pub search_duration_ms: prometheus::Histogram,
    pub embedding_duration_ms: prometheus::Histogram,
    pub cache_hits_total: prometheus::IntCounter,
    pub cache_misses_total: prometheus::IntCounter,
    pub active_searches: prometheus::IntGauge,
    pub circuit_breaker_open: prometheus::IntGaugeVec,
}

#[component(pub)]
#[interface(dyn MetricsProvider)]
#[scope(Singleton)]
impl SearchMetrics {
    pub fn new() -> Self {
        use prometheus::*;

        Self {
            search_duration_ms: Histogram::with_opts(
                HistogramOpts::new(
                    "search_duration_ms",
                    "End-to-end search request duration in milliseconds",
                )
                .buckets(exponential_buckets(1.0, 2.0, 14).unwrap()),
            )
            .unwrap(),
            embedding_duration_ms: Histogram::with_opts(
                HistogramOpts::new(
                    "embedding_duration_ms",
                    "Embedding backend call duration in milliseconds",
                )
                .buckets(exponential_buckets(1.0, 2.0, 14).unwrap()),
            )
            .unwrap(),
            cache_hits_total: IntCounter::new(
                "cache_hits_total",
                "Number of search requests served from the response cache",
            )
            .unwrap(),
            cache_misses_total: IntCounter::new(
                "cache_misses_total",
                "Number of search requests that missed the response cache",
            )
            .unwrap(),
            active_searches: IntGauge::new(
                "active_searches",
                "Number of search requests currently in flight",
            )
            .unwrap(),
            circuit_breaker_open: IntGaugeVec::new(
                Opts::new(
                    "circuit_breaker_open",
                    "Whether the circuit breaker of a backend is currently open",
                ),
                &["backend"],
            )
            .unwrap(),
        }
    }
}

impl MetricsProvider for SearchMetrics {
    fn register(&self, reg: &prometheus::Registry) -> prometheus::Result<()> {
        reg.register(Box::new(self.search_duration_ms.clone()))?;
        reg.register(Box::new(self.embedding_duration_ms.clone()))?;
        reg.register(Box::new(self.cache_hits_total.clone()))?;
        reg.register(Box::new(self.cache_misses_total.clone()))?;
        reg.register(Box::new(self.active_searches.clone()))?;
        reg.register(Box::new(self.circuit_breaker_open.clone()))?;

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
