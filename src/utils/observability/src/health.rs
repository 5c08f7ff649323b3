// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use ::axum::extract::Extension;
use ::axum::response::{IntoResponse, Response};
use http::StatusCode;
use internal_error::InternalError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Deadline applied to every individual dependency probe
pub const READINESS_PROBE_DEADLINE: Duration = Duration::from_secs(3);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Implemented by infrastructure components that want to participate in the
/// readiness probe
#[async_trait::async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self) -> Result<(), HealthCheckError>;
}

#[derive(Debug, Error)]
pub enum HealthCheckError {
    #[error("Dependency is unavailable: {reason}")]
    Unavailable { reason: String },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// All probes that the readiness endpoint consults, assembled at startup and
/// registered in the catalog as a value
#[derive(Clone)]
pub struct HealthChecks(pub Vec<Arc<dyn HealthCheck>>);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, serde::Serialize)]
struct ReadinessReport {
    status: DependencyStatus,
    dependencies: Vec<DependencyReport>,
}

#[derive(Debug, serde::Serialize)]
struct DependencyReport {
    name: &'static str,
    status: DependencyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
enum DependencyStatus {
    Healthy,
    Unhealthy,
    Degraded,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Liveness is purely a process-is-running signal and checks no dependencies
pub async fn live_handler() -> impl IntoResponse {
    (StatusCode::OK, ::axum::Json(serde_json::json!({"status": "healthy"})))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn ready_handler(Extension(catalog): Extension<dill::Catalog>) -> Response {
    let health_checks = catalog.get_one::<HealthChecks>().unwrap();

    let mut dependencies = Vec::with_capacity(health_checks.0.len());

    for check in &health_checks.0 {
        let outcome = tokio::time::timeout(READINESS_PROBE_DEADLINE, check.check()).await;

        let report = match outcome {
            Ok(Ok(())) => DependencyReport {
                name: check.name(),
                status: DependencyStatus::Healthy,
                reason: None,
            },
            Ok(Err(HealthCheckError::Unavailable { reason })) => DependencyReport {
                name: check.name(),
                status: DependencyStatus::Unhealthy,
                reason: Some(reason),
            },
            Ok(Err(HealthCheckError::Internal(err))) => DependencyReport {
                name: check.name(),
                status: DependencyStatus::Degraded,
                reason: Some(err.reason()),
            },
            Err(_) => DependencyReport {
                name: check.name(),
                status: DependencyStatus::Unhealthy,
                reason: Some(format!(
                    "Probe did not respond within {READINESS_PROBE_DEADLINE:?}"
                )),
            },
        };

        if report.status != DependencyStatus::Healthy {
            tracing::warn!(
                dependency = report.name,
                status = ?report.status,
                reason = ?report.reason,
                "Readiness probe failed",
            );
        }

        dependencies.push(report);
    }

    let overall = if dependencies
        .iter()
        .all(|d| d.status == DependencyStatus::Healthy)
    {
        DependencyStatus::Healthy
    } else if dependencies
        .iter()
        .any(|d| d.status == DependencyStatus::Unhealthy)
    {
        DependencyStatus::Unhealthy
    } else {
        DependencyStatus::Degraded
    };

    let status_code = if overall == DependencyStatus::Healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        ::axum::Json(ReadinessReport {
            status: overall,
            dependencies,
        }),
    )
        .into_response()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
