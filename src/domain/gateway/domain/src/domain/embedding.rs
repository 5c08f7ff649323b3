// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Dense vector produced by the embedding backend for a single query. Lives
/// only for the duration of one orchestrated request.
#[derive(Debug, Clone)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub dimension: usize,
    pub model_name: String,
    /// Model inference time as reported by the backend
    pub latency_ms: f64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
