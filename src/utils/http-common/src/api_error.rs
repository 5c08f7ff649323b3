// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use internal_error::{BoxedError, InternalError};
use thiserror::Error;

use crate::CorrelationId;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Error type that all HTTP handlers return. Renders as an RFC 7807
/// `application/problem+json` response, optionally carrying the request's
/// correlation id.
#[derive(Error, Debug)]
#[error("API error {status}: {detail:?}")]
pub struct ApiError {
    status: StatusCode,
    detail: Option<String>,
    correlation_id: Option<CorrelationId>,
    #[source]
    source: Option<BoxedError>,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: Some(detail.into()),
            correlation_id: None,
            source: None,
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn too_many_requests(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, detail)
    }

    pub fn service_unavailable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, detail)
    }

    pub fn internal(source: impl Into<BoxedError>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            detail: Some("An internal error occurred".to_string()),
            correlation_id: None,
            source: Some(source.into()),
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<InternalError> for ApiError {
    fn from(e: InternalError) -> Self {
        Self::internal(e)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub trait IntoApiError {
    fn api_err(self) -> ApiError;
}

pub trait ResultIntoApiError<OK> {
    fn api_err(self) -> Result<OK, ApiError>;
}

impl<OK, E> ResultIntoApiError<OK> for Result<OK, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<OK, ApiError> {
        self.map_err(IntoApiError::api_err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ProblemBody {
    #[serde(rename = "type")]
    problem_type: &'static str,
    title: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                error = ?self.source,
                error_msg = ?self.detail,
                status = %self.status,
                "Request failed",
            );
        }

        let body = ProblemBody {
            problem_type: "about:blank",
            title: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            status: self.status.as_u16(),
            detail: self.detail,
            correlation_id: self.correlation_id.map(|cid| cid.as_str().to_string()),
        };

        let mut response = axum::Json(body).into_response();
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
