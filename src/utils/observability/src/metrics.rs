// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use ::axum::extract::Extension;
use ::axum::response::{IntoResponse, Response};
use http::StatusCode;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Implemented by components that own Prometheus collectors. Providers are
/// registered into the shared registry once at startup.
pub trait MetricsProvider: Send + Sync {
    fn register(&self, reg: &prometheus::Registry) -> prometheus::Result<()>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Renders the shared registry in the Prometheus text exposition format
pub async fn metrics_handler(Extension(catalog): Extension<dill::Catalog>) -> Response {
    use prometheus::Encoder;

    let registry = catalog.get_one::<prometheus::Registry>().unwrap();

    let mut buf = Vec::new();
    let encoder = prometheus::TextEncoder::new();

    match encoder.encode(&registry.gather(), &mut buf) {
        Ok(()) => (
            StatusCode::OK,
            [(http::header::CONTENT_TYPE, encoder.format_type().to_string())],
            buf,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = ?err, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
