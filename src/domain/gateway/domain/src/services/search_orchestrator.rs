// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Owns one search request end-to-end: cache-aside lookup, shard routing,
/// embedding, index search, result assembly, and cache population
#[async_trait::async_trait]
pub trait SearchOrchestrator: Send + Sync {
    async fn search(&self, query: SearchQuery) -> Result<SearchOutcome, SearchError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum SearchError {
    /// The embedding backend could not serve the request after the resilience
    /// policy gave up. Unlike the index backend there is no degraded path: a
    /// query that cannot be embedded cannot be searched.
    #[error("Embedding backend is unavailable")]
    EmbeddingUnavailable {
        #[source]
        source: BackendError,
    },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
