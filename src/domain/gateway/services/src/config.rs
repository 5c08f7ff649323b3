// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Search defaults applied when a request omits the corresponding field
#[derive(Debug, Clone)]
pub struct GatewaySearchConfig {
    pub default_top_k: usize,
    pub default_nprobe: usize,
    pub default_shard_key: String,
}

impl Default for GatewaySearchConfig {
    fn default() -> Self {
        Self {
            default_top_k: 10,
            default_nprobe: 10,
            default_shard_key: "nyc_taxi_2023".to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
