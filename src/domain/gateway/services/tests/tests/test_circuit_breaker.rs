// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use time_source::FakeSystemTimeSource;
use vector_catalog_gateway_services::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct CircuitBreakerHarness {
    breaker: CircuitBreaker,
    clock: FakeSystemTimeSource,
}

impl CircuitBreakerHarness {
    fn new() -> Self {
        let t0 = Utc.with_ymd_and_hms(2050, 1, 1, 12, 0, 0).unwrap();
        let clock = FakeSystemTimeSource::new(t0);

        let breaker = CircuitBreaker::new(
            "index",
            CircuitBreakerConfig::default(),
            Arc::new(clock.clone()),
        );

        Self { breaker, clock }
    }

    fn record_failure(&self) {
        self.breaker
            .try_acquire()
            .unwrap()
            .complete(CallOutcome::TransientFailure);
    }

    fn record_success(&self) {
        self.breaker
            .try_acquire()
            .unwrap()
            .complete(CallOutcome::Success);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_breaker_stays_closed_below_min_throughput() {
    let harness = CircuitBreakerHarness::new();

    for _ in 0..4 {
        harness.record_failure();
    }

    assert_eq!(harness.breaker.state(), CircuitState::Closed);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_breaker_opens_at_failure_ratio_over_min_throughput() {
    let harness = CircuitBreakerHarness::new();

    harness.record_success();
    harness.record_success();
    harness.record_failure();
    harness.record_failure();
    assert_eq!(harness.breaker.state(), CircuitState::Closed);

    // 3 failures out of 5 samples crosses the 50% ratio
    harness.record_failure();
    assert_eq!(harness.breaker.state(), CircuitState::Open);

    // Executions now fail fast without reaching the backend
    assert!(harness.breaker.try_acquire().is_err());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_breaker_ignores_non_transient_outcomes() {
    let harness = CircuitBreakerHarness::new();

    for _ in 0..10 {
        harness
            .breaker
            .try_acquire()
            .unwrap()
            .complete(CallOutcome::Bypassed);
    }

    assert_eq!(harness.breaker.state(), CircuitState::Closed);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_breaker_samples_age_out_of_the_rolling_window() {
    let harness = CircuitBreakerHarness::new();

    harness.record_failure();
    harness.record_failure();
    harness.record_failure();
    harness.record_failure();

    // Old failures leave the 10s window before the 5th sample arrives
    harness.clock.advance(Duration::seconds(11));

    harness.record_failure();
    assert_eq!(harness.breaker.state(), CircuitState::Closed);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_breaker_rejects_while_open_then_admits_single_probe() {
    let harness = CircuitBreakerHarness::new();

    for _ in 0..5 {
        harness.record_failure();
    }
    assert_eq!(harness.breaker.state(), CircuitState::Open);

    harness.clock.advance(Duration::seconds(29));
    assert!(harness.breaker.try_acquire().is_err());

    harness.clock.advance(Duration::seconds(1));
    let probe = harness.breaker.try_acquire().unwrap();
    assert_eq!(harness.breaker.state(), CircuitState::HalfOpen);

    // Only one probe is admitted while the first is in flight
    assert!(harness.breaker.try_acquire().is_err());

    probe.complete(CallOutcome::Success);
    assert_eq!(harness.breaker.state(), CircuitState::Closed);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_breaker_reopens_on_failed_probe() {
    let harness = CircuitBreakerHarness::new();

    for _ in 0..5 {
        harness.record_failure();
    }
    harness.clock.advance(Duration::seconds(30));

    let probe = harness.breaker.try_acquire().unwrap();
    probe.complete(CallOutcome::TransientFailure);

    assert_eq!(harness.breaker.state(), CircuitState::Open);
    assert!(harness.breaker.try_acquire().is_err());

    // The cool-down restarts from the failed probe
    harness.clock.advance(Duration::seconds(30));
    assert!(harness.breaker.try_acquire().is_ok());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_breaker_reopens_on_abandoned_probe() {
    let harness = CircuitBreakerHarness::new();

    for _ in 0..5 {
        harness.record_failure();
    }
    harness.clock.advance(Duration::seconds(30));

    {
        let _probe = harness.breaker.try_acquire().unwrap();
        // Dropped without completing, e.g. the caller was cancelled
    }

    assert_eq!(harness.breaker.state(), CircuitState::Open);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
