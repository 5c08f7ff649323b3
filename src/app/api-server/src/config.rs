// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use internal_error::{InternalError, ResultIntoInternal};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Gateway configuration assembled from `VC_*` environment variables,
/// following the sidecar's convention. Every option has a default suitable
/// for a local single-node setup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub http_address: IpAddr,
    pub http_port: u16,

    /// Host of both sidecar RPC services
    pub sidecar_grpc_address: String,

    /// When unset the gateway runs with the in-memory cache
    pub redis_connection_string: Option<String>,
    pub redis_key_prefix: String,
    pub default_cache_ttl: Duration,

    pub embedding_model: String,

    pub default_top_k: usize,
    pub default_nprobe: usize,
    pub default_shard_key: String,

    pub rate_limit_permit_limit: usize,
    pub rate_limit_window: Duration,
    pub rate_limit_queue_limit: usize,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, InternalError> {
        Ok(Self {
            http_address: env_or(
                "VC_HTTP_ADDRESS",
                IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            )?,
            http_port: env_or("VC_HTTP_PORT", 8080)?,
            sidecar_grpc_address: env_or(
                "VC_SIDECAR_GRPC_ADDRESS",
                "http://127.0.0.1:50051".to_string(),
            )?,
            redis_connection_string: std::env::var("VC_REDIS_CONNECTION_STRING").ok(),
            redis_key_prefix: env_or("VC_REDIS_KEY_PREFIX", "vc:".to_string())?,
            default_cache_ttl: Duration::from_secs(env_or(
                "VC_REDIS_DEFAULT_CACHE_TTL_SECONDS",
                300,
            )?),
            embedding_model: env_or("VC_EMBEDDING_MODEL", "all-MiniLM-L6-v2".to_string())?,
            default_top_k: env_or("VC_FAISS_DEFAULT_TOP_K", 10)?,
            default_nprobe: env_or("VC_FAISS_DEFAULT_NPROBE", 10)?,
            default_shard_key: env_or("VC_FAISS_DEFAULT_SHARD_KEY", "nyc_taxi_2023".to_string())?,
            rate_limit_permit_limit: env_or("VC_RATE_LIMIT_PERMIT_LIMIT", 100)?,
            rate_limit_window: Duration::from_secs(env_or("VC_RATE_LIMIT_WINDOW_SECONDS", 10)?),
            rate_limit_queue_limit: env_or("VC_RATE_LIMIT_QUEUE_LIMIT", 50)?,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn env_or<T>(key: &str, default: T) -> Result<T, InternalError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .context_int_err(format!("Invalid value of '{key}'")),
        Err(_) => Ok(default),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
