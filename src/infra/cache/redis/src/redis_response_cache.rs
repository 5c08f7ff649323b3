// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use internal_error::{InternalError, ResultIntoInternal};
use redis::AsyncCommands;
use vector_catalog_gateway::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct RedisResponseCacheConfig {
    /// Namespace prepended to every key
    pub key_prefix: String,
    pub default_ttl: Duration,
}

impl Default for RedisResponseCacheConfig {
    fn default() -> Self {
        Self {
            key_prefix: "vc:".to_string(),
            default_ttl: Duration::from_secs(300),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Response cache on Redis. All subsystem failures degrade to miss / no-op
/// semantics so that a broken cache never breaks a search.
pub struct RedisResponseCache {
    manager: redis::aio::ConnectionManager,
    config: RedisResponseCacheConfig,
}

impl RedisResponseCache {
    pub fn new(manager: redis::aio::ConnectionManager, config: RedisResponseCacheConfig) -> Self {
        Self { manager, config }
    }

    /// Establishes the managed (auto-reconnecting, multiplexed) connection
    pub async fn connect(
        connection_string: &str,
    ) -> Result<redis::aio::ConnectionManager, InternalError> {
        let client = redis::Client::open(connection_string)
            .context_int_err(format!("Invalid Redis endpoint '{connection_string}'"))?;

        redis::aio::ConnectionManager::new(client)
            .await
            .context_int_err("Failed to establish Redis connection")
    }

    fn key(&self, fingerprint: &QueryFingerprint) -> String {
        format!("{}{fingerprint}", self.config.key_prefix)
    }
}

#[async_trait::async_trait]
impl ResponseCache for RedisResponseCache {
    async fn get(&self, fingerprint: &QueryFingerprint) -> Option<SearchOutcome> {
        let key = self.key(fingerprint);
        let mut conn = self.manager.clone();

        let payload: Option<String> = match conn.get(&key).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(%key, error = %err, "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(payload?.as_str()) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::warn!(%key, error = %err, "Discarding undeserializable cache entry");
                None
            }
        }
    }

    async fn set(&self, fingerprint: &QueryFingerprint, value: &SearchOutcome, ttl: Option<Duration>) {
        let key = self.key(fingerprint);

        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(%key, error = %err, "Failed to serialize cache value");
                return;
            }
        };

        let ttl = ttl.unwrap_or(self.config.default_ttl);
        let mut conn = self.manager.clone();

        if let Err(err) = conn
            .set_ex::<_, _, ()>(&key, payload, ttl.as_secs())
            .await
        {
            tracing::warn!(%key, error = %err, "Cache write failed, response not cached");
        }
    }

    async fn delete(&self, fingerprint: &QueryFingerprint) -> bool {
        let key = self.key(fingerprint);
        let mut conn = self.manager.clone();

        match conn.del::<_, i64>(&key).await {
            Ok(deleted) => deleted > 0,
            Err(err) => {
                tracing::warn!(%key, error = %err, "Cache delete failed");
                false
            }
        }
    }

    async fn ping(&self) -> Result<(), InternalError> {
        let mut conn = self.manager.clone();

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context_int_err("Redis PING failed")?;

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
