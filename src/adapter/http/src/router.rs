// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::Router;

use crate::middleware::RateLimitLayer;
use crate::{index_info_handler, index_reload_handler, search_handler};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The `/api/v1` surface. The rate limiter guards only the search endpoint;
/// administrative and health routes are exempt.
pub fn api_router() -> Router {
    Router::new()
        .route(
            "/api/v1/search",
            axum::routing::post(search_handler).layer(RateLimitLayer::new()),
        )
        .route("/api/v1/index/info", axum::routing::get(index_info_handler))
        .route(
            "/api/v1/index/reload",
            axum::routing::post(index_reload_handler),
        )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
