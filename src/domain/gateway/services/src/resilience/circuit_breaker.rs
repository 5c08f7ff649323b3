// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Rolling window over which failure ratios are evaluated
    pub sampling_window: Duration,
    /// Minimum number of sampled calls before the breaker can trip
    pub min_throughput: usize,
    /// Transient-failure ratio at which the breaker opens
    pub failure_ratio: f64,
    /// How long executions are rejected before a probe is admitted
    pub open_duration: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            sampling_window: Duration::seconds(10),
            min_throughput: 5,
            failure_ratio: 0.5,
            open_duration: Duration::seconds(30),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
#[error("Circuit breaker is open")]
pub struct CircuitOpenRejection;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    /// `(sampled_at, is_failure)` pairs within the sampling window
    samples: VecDeque<(DateTime<Utc>, bool)>,
    opened_at: Option<DateTime<Utc>>,
    probe_in_flight: bool,
}

/// Process-wide failure isolator shared by all callers of one backend policy.
/// State transitions are observed monotonically: an execution that begins
/// after the breaker opened is rejected without touching the backend.
pub struct CircuitBreaker {
    backend: &'static str,
    config: CircuitBreakerConfig,
    time_source: Arc<dyn SystemTimeSource>,
    state: Mutex<BreakerState>,
    open_gauge: Option<prometheus::IntGauge>,
}

impl CircuitBreaker {
    pub fn new(
        backend: &'static str,
        config: CircuitBreakerConfig,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Self {
        Self {
            backend,
            config,
            time_source,
            state: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                samples: VecDeque::new(),
                opened_at: None,
                probe_in_flight: false,
            }),
            open_gauge: None,
        }
    }

    /// Reports open/closed transitions through the given gauge (1 while the
    /// breaker rejects executions)
    pub fn with_open_gauge(mut self, gauge: prometheus::IntGauge) -> Self {
        self.open_gauge = Some(gauge);
        self
    }

    pub fn backend(&self) -> &'static str {
        self.backend
    }

    pub fn state(&self) -> CircuitState {
        self.state.lock().unwrap().state
    }

    /// Admission decision for one execution. The returned guard MUST be
    /// completed with the call outcome; dropping it records an abandoned call
    /// as a transient failure so a cancelled probe cannot wedge the breaker
    /// in half-open.
    pub fn try_acquire(&self) -> Result<CircuitCallGuard<'_>, CircuitOpenRejection> {
        let mut s = self.state.lock().unwrap();
        let now = self.time_source.now();

        match s.state {
            CircuitState::Closed => Ok(CircuitCallGuard::new(self, AdmissionMode::Normal)),
            CircuitState::Open => {
                let opened_at = s.opened_at.expect("open breaker must have opened_at");
                if now - opened_at >= self.config.open_duration {
                    s.state = CircuitState::HalfOpen;
                    s.probe_in_flight = true;
                    tracing::info!(
                        backend = self.backend,
                        "Circuit breaker transitioned to half-open, admitting probe",
                    );
                    Ok(CircuitCallGuard::new(self, AdmissionMode::Probe))
                } else {
                    Err(CircuitOpenRejection)
                }
            }
            CircuitState::HalfOpen => {
                if s.probe_in_flight {
                    Err(CircuitOpenRejection)
                } else {
                    s.probe_in_flight = true;
                    Ok(CircuitCallGuard::new(self, AdmissionMode::Probe))
                }
            }
        }
    }

    fn record(&self, mode: AdmissionMode, outcome: CallOutcome) {
        let mut s = self.state.lock().unwrap();
        let now = self.time_source.now();

        match mode {
            AdmissionMode::Probe => {
                s.probe_in_flight = false;
                match outcome {
                    // A responsive backend closes the circuit even when the
                    // response itself is a non-transient error
                    CallOutcome::Success | CallOutcome::Bypassed => self.close(&mut s),
                    CallOutcome::TransientFailure => self.open(&mut s, now),
                }
            }
            AdmissionMode::Normal => {
                // The breaker may have opened while this call was in flight
                if s.state != CircuitState::Closed {
                    return;
                }
                match outcome {
                    CallOutcome::Success => self.sample(&mut s, now, false),
                    CallOutcome::TransientFailure => {
                        self.sample(&mut s, now, true);
                        self.evaluate(&mut s, now);
                    }
                    CallOutcome::Bypassed => {}
                }
            }
        }
    }

    fn sample(&self, s: &mut BreakerState, now: DateTime<Utc>, is_failure: bool) {
        s.samples.push_back((now, is_failure));

        let horizon = now - self.config.sampling_window;
        while let Some((t, _)) = s.samples.front() {
            if *t >= horizon {
                break;
            }
            s.samples.pop_front();
        }
    }

    fn evaluate(&self, s: &mut BreakerState, now: DateTime<Utc>) {
        if s.samples.len() < self.config.min_throughput {
            return;
        }

        let failures = s.samples.iter().filter(|(_, f)| *f).count();
        let ratio = failures as f64 / s.samples.len() as f64;

        if ratio >= self.config.failure_ratio {
            tracing::warn!(
                backend = self.backend,
                failures,
                sampled = s.samples.len(),
                "Circuit breaker opened",
            );
            self.open(s, now);
        }
    }

    fn open(&self, s: &mut BreakerState, now: DateTime<Utc>) {
        s.state = CircuitState::Open;
        s.opened_at = Some(now);
        s.samples.clear();
        if let Some(gauge) = &self.open_gauge {
            gauge.set(1);
        }
    }

    fn close(&self, s: &mut BreakerState) {
        tracing::info!(backend = self.backend, "Circuit breaker closed");
        s.state = CircuitState::Closed;
        s.opened_at = None;
        s.samples.clear();
        if let Some(gauge) = &self.open_gauge {
            gauge.set(0);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy)]
enum AdmissionMode {
    Normal,
    Probe,
}

#[derive(Debug, Clone, Copy)]
pub enum CallOutcome {
    Success,
    TransientFailure,
    /// Non-transient outcome that must not influence failure accounting
    Bypassed,
}

pub struct CircuitCallGuard<'a> {
    breaker: &'a CircuitBreaker,
    mode: AdmissionMode,
    completed: bool,
}

impl<'a> CircuitCallGuard<'a> {
    fn new(breaker: &'a CircuitBreaker, mode: AdmissionMode) -> Self {
        Self {
            breaker,
            mode,
            completed: false,
        }
    }

    pub fn complete(mut self, outcome: CallOutcome) {
        self.completed = true;
        self.breaker.record(self.mode, outcome);
    }
}

impl Drop for CircuitCallGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.breaker
                .record(self.mode, CallOutcome::TransientFailure);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
