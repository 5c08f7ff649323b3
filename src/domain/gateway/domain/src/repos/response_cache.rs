// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use internal_error::InternalError;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Failure-tolerant response cache. A broken cache must never break a search:
/// `get` and `set` swallow subsystem failures, degrading to miss / no-op
/// semantics, and log them.
#[async_trait::async_trait]
pub trait ResponseCache: Send + Sync {
    /// Returns `None` on miss, on deserialization failure, and on any cache
    /// subsystem failure
    async fn get(&self, fingerprint: &QueryFingerprint) -> Option<SearchOutcome>;

    /// Writes with the given TTL, falling back to the configured default.
    /// Swallows and logs failures.
    async fn set(&self, fingerprint: &QueryFingerprint, value: &SearchOutcome, ttl: Option<Duration>);

    async fn delete(&self, fingerprint: &QueryFingerprint) -> bool;

    /// Connectivity probe for the readiness endpoint
    async fn ping(&self) -> Result<(), InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
