// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    pub permit_limit: usize,
    pub window: Duration,
    pub queue_limit: usize,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            permit_limit: 100,
            window: Duration::seconds(10),
            queue_limit: 50,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
#[error("Rate limit exceeded")]
pub struct RateLimitedError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
struct WindowState {
    window_start: DateTime<Utc>,
    admitted: usize,
    queued: usize,
}

/// Process-wide fixed-window limiter, the sole intentional back-pressure
/// signal to clients. Requests beyond the window's permits wait in a bounded
/// queue for the next window; requests beyond the queue are rejected.
pub struct FixedWindowRateLimiter {
    config: RateLimiterConfig,
    time_source: Arc<dyn SystemTimeSource>,
    state: Mutex<WindowState>,
}

impl FixedWindowRateLimiter {
    pub fn new(config: RateLimiterConfig, time_source: Arc<dyn SystemTimeSource>) -> Self {
        let window_start = time_source.now();
        Self {
            config,
            time_source,
            state: Mutex::new(WindowState {
                window_start,
                admitted: 0,
                queued: 0,
            }),
        }
    }

    pub async fn acquire(&self) -> Result<(), RateLimitedError> {
        let mut slot = QueueSlot {
            limiter: self,
            active: false,
        };

        loop {
            let wait = {
                let mut s = self.state.lock().unwrap();
                let now = self.time_source.now();

                if now - s.window_start >= self.config.window {
                    s.window_start = now;
                    s.admitted = 0;
                }

                if s.admitted < self.config.permit_limit {
                    s.admitted += 1;
                    if slot.active {
                        s.queued -= 1;
                    }
                    None
                } else if slot.active {
                    Some(s.window_start + self.config.window - now)
                } else if s.queued >= self.config.queue_limit {
                    return Err(RateLimitedError);
                } else {
                    s.queued += 1;
                    slot.active = true;
                    Some(s.window_start + self.config.window - now)
                }
            };

            match wait {
                None => {
                    slot.active = false;
                    return Ok(());
                }
                Some(until_next_window) => self.time_source.sleep(until_next_window).await,
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Releases the queue slot if the waiting caller is cancelled, e.g. the
/// client disconnected while queued
struct QueueSlot<'a> {
    limiter: &'a FixedWindowRateLimiter,
    active: bool,
}

impl Drop for QueueSlot<'_> {
    fn drop(&mut self) {
        if self.active {
            let mut s = self.limiter.state.lock().unwrap();
            s.queued = s.queued.saturating_sub(1);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
