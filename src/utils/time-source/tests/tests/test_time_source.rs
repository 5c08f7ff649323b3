// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{Duration, TimeZone, Utc};
use time_source::{FakeSystemTimeSource, SystemTimeSource};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn fake_clock() -> FakeSystemTimeSource {
    FakeSystemTimeSource::new(Utc.with_ymd_and_hms(2050, 1, 1, 12, 0, 0).unwrap())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_fake_clock_only_moves_when_advanced() {
    let clock = fake_clock();
    let t0 = clock.now();

    assert_eq!(clock.now(), t0);

    clock.advance(Duration::seconds(30));
    assert_eq!(clock.now(), t0 + Duration::seconds(30));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_fake_sleep_wakes_only_past_its_deadline() {
    let clock = fake_clock();

    let sleeper = {
        let clock = clock.clone();
        tokio::spawn(async move { clock.sleep(Duration::seconds(60)).await })
    };
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(!sleeper.is_finished());

    assert_eq!(clock.advance(Duration::seconds(30)), 0);
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(!sleeper.is_finished());

    assert_eq!(clock.advance(Duration::seconds(30)), 1);
    sleeper.await.unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_fake_sleep_with_non_positive_duration_returns_immediately() {
    let clock = fake_clock();

    clock.sleep(Duration::zero()).await;
    clock.sleep(Duration::seconds(-5)).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
