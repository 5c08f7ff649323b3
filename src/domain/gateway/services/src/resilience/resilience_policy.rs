// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::future::Future;
use std::sync::Arc;

use chrono::Duration;
use time_source::SystemTimeSource;
use vector_catalog_gateway::BackendError;

use crate::{CallOutcome, CircuitBreaker};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_backoff: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_backoff: Duration::milliseconds(100),
            max_jitter: Duration::milliseconds(100),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry `attempt` (1-based): `base·2^attempt` plus
    /// uniform jitter in `[0, max_jitter)`
    fn backoff(&self, attempt: u32) -> Duration {
        use rand::Rng;

        let exp = self.base_backoff * 2i32.saturating_pow(attempt);

        let jitter_ms = self.max_jitter.num_milliseconds();
        let jitter = if jitter_ms > 0 {
            Duration::milliseconds(rand::thread_rng().gen_range(0..jitter_ms))
        } else {
            Duration::zero()
        };

        exp + jitter
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Composed per-backend resilience policy. Logical ordering, outer to inner:
/// timeout, circuit breaker, retry, operation. Instantiated once per backend
/// and shared process-wide so that all callers observe the same breaker
/// state.
pub struct ResiliencePolicy {
    backend: &'static str,
    timeout: std::time::Duration,
    retry: RetryPolicy,
    breaker: Arc<CircuitBreaker>,
    time_source: Arc<dyn SystemTimeSource>,
}

impl ResiliencePolicy {
    pub fn new(
        backend: &'static str,
        timeout: std::time::Duration,
        retry: RetryPolicy,
        breaker: Arc<CircuitBreaker>,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Self {
        Self {
            backend,
            timeout,
            retry,
            breaker,
            time_source,
        }
    }

    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    /// Runs `op` under the composed policy. `op` is invoked once per attempt,
    /// so it must capture everything needed to issue a fresh call.
    pub async fn execute<T, Op, Fut>(&self, op: Op) -> Result<T, BackendError>
    where
        Op: Fn() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let guarded = async {
            let guard = match self.breaker.try_acquire() {
                Ok(guard) => guard,
                Err(_) => return Err(BackendError::circuit_open(self.backend)),
            };

            let result = self.execute_with_retries(&op).await;

            let outcome = match &result {
                Ok(_) => CallOutcome::Success,
                Err(BackendError::Rpc(e)) if e.is_transient() => CallOutcome::TransientFailure,
                Err(_) => CallOutcome::Bypassed,
            };
            guard.complete(outcome);

            result
        };

        match tokio::time::timeout(self.timeout, guarded).await {
            Ok(result) => result,
            // Dropping the in-flight call also drops its breaker guard, which
            // records the abandoned execution as a transient failure
            Err(_) => Err(BackendError::DeadlineExceeded {
                backend: self.backend,
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }

    async fn execute_with_retries<T, Op, Fut>(&self, op: &Op) -> Result<T, BackendError>
    where
        Op: Fn() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let mut attempt = 0;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(BackendError::Rpc(e))
                    if e.is_transient() && attempt < self.retry.max_retries =>
                {
                    attempt += 1;
                    let backoff = self.retry.backoff(attempt);

                    tracing::debug!(
                        backend = self.backend,
                        attempt,
                        code = %e.code,
                        backoff_ms = backoff.num_milliseconds(),
                        "Retrying transient backend failure",
                    );

                    self.time_source.sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
