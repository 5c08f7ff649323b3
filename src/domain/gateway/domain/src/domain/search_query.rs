// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const QUERY_MAX_LENGTH: usize = 2000;
pub const TOP_K_MAX: usize = 100;
pub const NPROBE_MAX: usize = 256;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A validated search request. The orchestrator only ever sees values that
/// passed the admission checks, so the fields are plain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Original query text. The embedding backend receives it as-is;
    /// normalization applies only to fingerprinting.
    pub query: String,
    pub top_k: usize,
    pub shard_key: Option<String>,
    pub nprobe: Option<usize>,
}

impl SearchQuery {
    pub fn try_new(
        query: impl Into<String>,
        top_k: usize,
        shard_key: Option<String>,
        nprobe: Option<usize>,
    ) -> Result<Self, SearchQueryValidationError> {
        let query = query.into();

        let trimmed_len = query.trim().chars().count();
        if trimmed_len == 0 {
            return Err(SearchQueryValidationError::new(
                "query",
                "must be a non-empty string",
            ));
        }
        if trimmed_len > QUERY_MAX_LENGTH {
            return Err(SearchQueryValidationError::new(
                "query",
                format!("must be at most {QUERY_MAX_LENGTH} characters"),
            ));
        }

        if top_k == 0 || top_k > TOP_K_MAX {
            return Err(SearchQueryValidationError::new(
                "topK",
                format!("must be between 1 and {TOP_K_MAX}"),
            ));
        }

        if let Some(nprobe) = nprobe {
            if nprobe == 0 || nprobe > NPROBE_MAX {
                return Err(SearchQueryValidationError::new(
                    "nprobe",
                    format!("must be between 1 and {NPROBE_MAX}"),
                ));
            }
        }

        // An empty shard key means "use the default", same as an absent one
        let shard_key = shard_key.filter(|s| !s.is_empty());

        Ok(Self {
            query,
            top_k,
            shard_key,
            nprobe,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid value for field '{field}': {reason}")]
pub struct SearchQueryValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl SearchQueryValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
