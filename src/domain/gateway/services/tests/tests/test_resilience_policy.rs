// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use time_source::{SystemTimeSource, SystemTimeSourceDefault};
use vector_catalog_gateway::*;
use vector_catalog_gateway_services::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn test_policy(timeout: Duration, breaker_config: CircuitBreakerConfig) -> ResiliencePolicy {
    let time_source: Arc<dyn SystemTimeSource> = Arc::new(SystemTimeSourceDefault);

    ResiliencePolicy::new(
        "embedding",
        timeout,
        RetryPolicy::default(),
        Arc::new(CircuitBreaker::new(
            "embedding",
            breaker_config,
            Arc::clone(&time_source),
        )),
        time_source,
    )
}

fn transient_error() -> BackendError {
    BackendError::Rpc(RpcError::new(RpcStatusCode::Unavailable, "backend is down"))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(start_paused = true))]
async fn test_success_on_third_retry_makes_four_attempts() {
    let policy = test_policy(Duration::from_secs(10), CircuitBreakerConfig::default());
    let attempts = Arc::new(AtomicUsize::new(0));

    let result = policy
        .execute(|| {
            let attempts = Arc::clone(&attempts);
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) < 3 {
                    Err(transient_error())
                } else {
                    Ok(42)
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(start_paused = true))]
async fn test_exhausted_retries_surface_the_transient_error() {
    let policy = test_policy(Duration::from_secs(10), CircuitBreakerConfig::default());
    let attempts = Arc::new(AtomicUsize::new(0));

    let result: Result<(), _> = policy
        .execute(|| {
            let attempts = Arc::clone(&attempts);
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(transient_error())
            }
        })
        .await;

    assert!(matches!(
        result.unwrap_err(),
        BackendError::Rpc(RpcError {
            code: RpcStatusCode::Unavailable,
            ..
        }),
    ));
    // 1 initial + 3 retries
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(start_paused = true))]
async fn test_non_transient_error_is_not_retried() {
    let policy = test_policy(Duration::from_secs(10), CircuitBreakerConfig::default());
    let attempts = Arc::new(AtomicUsize::new(0));

    let result: Result<(), _> = policy
        .execute(|| {
            let attempts = Arc::clone(&attempts);
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(BackendError::Rpc(RpcError::new(
                    RpcStatusCode::InvalidArgument,
                    "bad request",
                )))
            }
        })
        .await;

    assert!(matches!(
        result.unwrap_err(),
        BackendError::Rpc(RpcError {
            code: RpcStatusCode::InvalidArgument,
            ..
        }),
    ));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(start_paused = true))]
async fn test_open_breaker_short_circuits_without_calling_backend() {
    let policy = test_policy(Duration::from_secs(10), CircuitBreakerConfig::default());

    // Trip the breaker: 5 executions, each exhausting its retries
    for _ in 0..5 {
        let _: Result<(), _> = policy.execute(|| async { Err(transient_error()) }).await;
    }
    assert_eq!(policy.breaker().state(), CircuitState::Open);

    let attempts = Arc::new(AtomicUsize::new(0));
    let result: Result<(), _> = policy
        .execute(|| {
            let attempts = Arc::clone(&attempts);
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

    assert!(matches!(
        result.unwrap_err(),
        BackendError::CircuitOpen {
            backend: "embedding",
        },
    ));
    assert_eq!(attempts.load(Ordering::SeqCst), 0);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(start_paused = true))]
async fn test_timeout_is_terminal_and_counts_as_breaker_failure() {
    // A single timed-out call is enough to trip this breaker
    let policy = test_policy(
        Duration::from_secs(5),
        CircuitBreakerConfig {
            min_throughput: 1,
            ..CircuitBreakerConfig::default()
        },
    );

    let result: Result<(), _> = policy
        .execute(|| async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        })
        .await;

    assert!(matches!(
        result.unwrap_err(),
        BackendError::DeadlineExceeded {
            backend: "embedding",
            timeout_ms: 5000,
        },
    ));
    assert_eq!(policy.breaker().state(), CircuitState::Open);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
