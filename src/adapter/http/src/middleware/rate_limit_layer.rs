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
use axum::response::{IntoResponse, Response};
use http_common::{ApiError, CorrelationId};
use tower::{Layer, Service};
use vector_catalog_gateway_services::FixedWindowRateLimiter;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Admission control in front of the search endpoint. Requests beyond the
/// window budget wait in the limiter's queue; requests beyond the queue are
/// rejected with 429 before any work happens.
#[derive(Debug, Clone)]
pub struct RateLimitLayer {}

impl RateLimitLayer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for RateLimitLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<Svc> Layer<Svc> for RateLimitLayer {
    type Service = RateLimitMiddleware<Svc>;

    fn layer(&self, inner: Svc) -> Self::Service {
        RateLimitMiddleware { inner }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct RateLimitMiddleware<Svc> {
    inner: Svc,
}

impl<Svc> Service<http::Request<Body>> for RateLimitMiddleware<Svc>
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

    fn call(&mut self, request: http::Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let catalog = request
                .extensions()
                .get::<dill::Catalog>()
                .expect("Catalog not found in http server extensions");

            let rate_limiter = catalog.get_one::<FixedWindowRateLimiter>().unwrap();

            if rate_limiter.acquire().await.is_err() {
                tracing::warn!("Rejecting request over the rate limit");

                let mut api_error =
                    ApiError::too_many_requests("Request rate limit exceeded, retry later");
                if let Some(correlation_id) = request.extensions().get::<CorrelationId>() {
                    api_error = api_error.with_correlation_id(correlation_id.clone());
                }

                return Ok(api_error.into_response());
            }

            inner.call(request).await
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
