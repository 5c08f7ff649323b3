// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Request/response tracing for the HTTP surface. Health and metrics routes
/// are expected to be mounted below this layer to keep them out of the logs.
pub fn http_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
