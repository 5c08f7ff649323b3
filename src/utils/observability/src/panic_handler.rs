// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::Any;
use std::backtrace::Backtrace;

use ::axum::body::Body;
use http::{header, Response, StatusCode};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Converts a panic that escaped a handler into a problem response instead of
/// tearing down the connection. Plugged into
/// `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let backtrace = Backtrace::force_capture();

    let error_msg = if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else {
        "Unknown panic payload"
    };

    tracing::error!(error_msg, error_backtrace = %backtrace, "Unhandled panic in request handler");

    let body = Body::from(
        r#"{"type":"about:blank","title":"Service Unavailable","status":503}"#,
    );
    Response::builder()
        .status(StatusCode::SERVICE_UNAVAILABLE)
        .header(header::CONTENT_TYPE, "application/problem+json")
        .body(body)
        .unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
