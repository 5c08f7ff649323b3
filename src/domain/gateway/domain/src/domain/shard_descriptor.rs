// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Read-only description of one index shard, as reported by the index
/// backend's info RPC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardDescriptor {
    pub shard_key: String,
    pub total_vectors: u64,
    pub dimension: usize,
    pub index_type: String,
    pub is_trained: bool,
    pub index_size_bytes: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexReloadOutcome {
    pub success: bool,
    pub reloaded_shards: Vec<String>,
    pub message: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
