// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Status classification of a failed backend RPC, decoupled from the wire
/// library so that domain and service layers never see transport types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcStatusCode {
    Cancelled,
    InvalidArgument,
    NotFound,
    DeadlineExceeded,
    ResourceExhausted,
    Internal,
    Unavailable,
    Unknown,
}

impl std::fmt::Display for RpcStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Cancelled => "cancelled",
            Self::InvalidArgument => "invalid-argument",
            Self::NotFound => "not-found",
            Self::DeadlineExceeded => "deadline-exceeded",
            Self::ResourceExhausted => "resource-exhausted",
            Self::Internal => "internal",
            Self::Unavailable => "unavailable",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Error)]
#[error("Backend request failed with {code} status: {message}")]
pub struct RpcError {
    pub code: RpcStatusCode,
    pub message: String,
}

impl RpcError {
    pub fn new(code: RpcStatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Transient errors participate in retry and circuit-breaker accounting;
    /// everything else bypasses both
    pub fn is_transient(&self) -> bool {
        matches!(
            self.code,
            RpcStatusCode::Unavailable
                | RpcStatusCode::DeadlineExceeded
                | RpcStatusCode::ResourceExhausted
                | RpcStatusCode::Internal
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("Circuit breaker of the {backend} backend is open")]
    CircuitOpen { backend: &'static str },

    #[error("Call to the {backend} backend exceeded the {timeout_ms} ms deadline")]
    DeadlineExceeded {
        backend: &'static str,
        timeout_ms: u64,
    },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl BackendError {
    pub fn circuit_open(backend: &'static str) -> Self {
        Self::CircuitOpen { backend }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
