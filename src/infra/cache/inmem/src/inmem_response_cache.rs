// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use internal_error::InternalError;
use time_source::SystemTimeSource;
use vector_catalog_gateway::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
struct Entry {
    expires_at: DateTime<Utc>,
    /// Serialized form, so that get/set exercise the same JSON round-trip as
    /// the real cache
    payload: String,
}

/// In-memory twin of the Redis cache, used by tests and by deployments that
/// run without a cache endpoint
pub struct InMemoryResponseCache {
    default_ttl: Duration,
    time_source: Arc<dyn SystemTimeSource>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryResponseCache {
    pub fn new(default_ttl: Duration, time_source: Arc<dyn SystemTimeSource>) -> Self {
        Self {
            default_ttl,
            time_source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn get(&self, fingerprint: &QueryFingerprint) -> Option<SearchOutcome> {
        let payload = {
            let mut entries = self.entries.lock().unwrap();
            let now = self.time_source.now();

            match entries.get(fingerprint.as_str()) {
                Some(entry) if entry.expires_at > now => entry.payload.clone(),
                Some(_) => {
                    entries.remove(fingerprint.as_str());
                    return None;
                }
                None => return None,
            }
        };

        match serde_json::from_str(&payload) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::warn!(%fingerprint, error = %err, "Discarding undeserializable cache entry");
                None
            }
        }
    }

    async fn set(&self, fingerprint: &QueryFingerprint, value: &SearchOutcome, ttl: Option<Duration>) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(%fingerprint, error = %err, "Failed to serialize cache value");
                return;
            }
        };

        let ttl = ttl.unwrap_or(self.default_ttl);
        let expires_at =
            self.time_source.now() + chrono::Duration::from_std(ttl).unwrap_or_default();

        self.entries
            .lock()
            .unwrap()
            .insert(fingerprint.as_str().to_string(), Entry { expires_at, payload });
    }

    async fn delete(&self, fingerprint: &QueryFingerprint) -> bool {
        self.entries
            .lock()
            .unwrap()
            .remove(fingerprint.as_str())
            .is_some()
    }

    async fn ping(&self) -> Result<(), InternalError> {
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
