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
use tokio::sync::oneshot;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Abstracts the system time source
#[async_trait::async_trait]
pub trait SystemTimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration) {
        let std_duration = duration.to_std().unwrap_or_default();

        tokio::time::sleep(std_duration).await;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn SystemTimeSource)]
pub struct SystemTimeSourceDefault;

#[async_trait::async_trait]
impl SystemTimeSource for SystemTimeSourceDefault {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Reports a fixed point in time until told otherwise, but does not interfere
/// with sleeps
#[derive(Debug, Clone)]
pub struct SystemTimeSourceStub {
    t: Arc<Mutex<Option<DateTime<Utc>>>>,
}

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
#[dill::interface(dyn SystemTimeSource)]
impl SystemTimeSourceStub {
    pub fn new() -> Self {
        Self {
            t: Arc::new(Mutex::new(None)),
        }
    }

    pub fn new_set(t: DateTime<Utc>) -> Self {
        Self {
            t: Arc::new(Mutex::new(Some(t))),
        }
    }

    pub fn set(&self, t: DateTime<Utc>) {
        *self.t.lock().unwrap() = Some(t);
    }
}

impl SystemTimeSource for SystemTimeSourceStub {
    fn now(&self) -> DateTime<Utc> {
        match *self.t.lock().unwrap() {
            None => Utc::now(),
            Some(ref t) => *t,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
struct Sleeper {
    wake_up_time: DateTime<Utc>,
    waker_tx: oneshot::Sender<()>,
}

#[derive(Debug)]
struct FakeSystemTimeSourceState {
    t: DateTime<Utc>,
    sleepers: Vec<Sleeper>,
}

/// Fully simulated clock: time moves only when the test calls [`advance()`],
/// which also wakes the sleepers whose deadline was reached.
///
/// [`advance()`]: FakeSystemTimeSource::advance
#[derive(Debug, Clone)]
pub struct FakeSystemTimeSource {
    state: Arc<Mutex<FakeSystemTimeSourceState>>,
}

impl FakeSystemTimeSource {
    pub fn new(t: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeSystemTimeSourceState {
                t,
                sleepers: Vec::new(),
            })),
        }
    }

    /// Moves the clock forward and returns the number of sleepers woken up
    pub fn advance(&self, dt: Duration) -> usize {
        let ready: Vec<Sleeper> = {
            let mut state = self.state.lock().unwrap();

            let new_time = state.t + dt;
            state.t = new_time;

            let (ready, pending) = std::mem::take(&mut state.sleepers)
                .into_iter()
                .partition(|s| s.wake_up_time <= new_time);

            state.sleepers = pending;
            ready
        };

        // Wake outside of the lock
        let woken = ready.len();
        for sleeper in ready {
            // Receiver may already be gone during test cleanup
            let _ = sleeper.waker_tx.send(());
        }
        woken
    }
}

#[async_trait::async_trait]
impl SystemTimeSource for FakeSystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.state.lock().unwrap().t
    }

    async fn sleep(&self, duration: Duration) {
        if duration <= Duration::zero() {
            return;
        }

        let (tx, rx) = oneshot::channel();

        {
            let mut state = self.state.lock().unwrap();
            let wake_up_time = state.t + duration;
            state.sleepers.push(Sleeper {
                wake_up_time,
                waker_tx: tx,
            });
        }

        let _ = rx.await;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
