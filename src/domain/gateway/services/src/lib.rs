// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod config;
mod fixed_window_rate_limiter;
mod health_checks;
mod resilience;
mod resilient_embedding_backend;
mod resilient_index_backend;
mod search_metrics;
mod search_orchestrator_impl;
mod shard_router_impl;

pub use config::*;
pub use fixed_window_rate_limiter::*;
pub use health_checks::*;
pub use resilience::*;
pub use resilient_embedding_backend::*;
pub use resilient_index_backend::*;
pub use search_metrics::*;
pub use search_orchestrator_impl::*;
pub use shard_router_impl::*;
