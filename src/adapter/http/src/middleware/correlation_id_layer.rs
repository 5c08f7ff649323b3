// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::Response;
use http_common::{CorrelationId, CORRELATION_ID_HEADER};
use tower::{Layer, Service};
use tracing::Instrument;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const CORRELATION_ID_LENGTH: usize = 16;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Reads the incoming `X-Correlation-ID` header or synthesizes a fresh id,
/// exposes it to handlers via request extensions, binds it to the log
/// context, and echoes it on the response
#[derive(Debug, Clone)]
pub struct CorrelationIdLayer {}

impl CorrelationIdLayer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for CorrelationIdLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<Svc> Layer<Svc> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<Svc>;

    fn layer(&self, inner: Svc) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct CorrelationIdMiddleware<Svc> {
    inner: Svc,
}

impl<Svc> Service<http::Request<Body>> for CorrelationIdMiddleware<Svc>
where
    Svc: Service<http::Request<Body>, Response = Response> + Send + 'static + Clone,
    Svc::Future: Send + 'static,
{
    type Response = Svc::Response;
    type Error = Svc::Error;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: http::Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();

        let correlation_id = request
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| CorrelationId::new(value))
            .unwrap_or_else(|| {
                CorrelationId::new(random_strings::get_random_hex_string(
                    CORRELATION_ID_LENGTH,
                ))
            });

        request.extensions_mut().insert(correlation_id.clone());

        let span = tracing::info_span!("http_request", correlation_id = %correlation_id);

        Box::pin(async move {
            let mut response = inner.call(request).instrument(span).await?;

            if let Ok(header_value) = http::HeaderValue::from_str(correlation_id.as_str()) {
                response
                    .headers_mut()
                    .insert(CORRELATION_ID_HEADER, header_value);
            }

            Ok(response)
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
