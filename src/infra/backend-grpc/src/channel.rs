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
use tonic::transport::{Channel, Endpoint};
use vector_catalog_gateway::{RpcError, RpcStatusCode};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Lazily-connecting multiplexed HTTP/2 channel shared by both sidecar
/// services. Keep-alive pings keep the connection warm between requests.
pub fn build_sidecar_channel(address: &str) -> Result<Channel, InternalError> {
    let endpoint = Endpoint::from_shared(address.to_string())
        .context_int_err(format!("Invalid sidecar address '{address}'"))?
        .connect_timeout(Duration::from_secs(5))
        .http2_keep_alive_interval(Duration::from_secs(60))
        .keep_alive_timeout(Duration::from_secs(30))
        .keep_alive_while_idle(true);

    Ok(endpoint.connect_lazy())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Maps transport statuses into the domain classification that drives retry
/// and circuit-breaker accounting
pub(crate) fn map_rpc_status(status: tonic::Status) -> RpcError {
    let code = match status.code() {
        tonic::Code::Cancelled => RpcStatusCode::Cancelled,
        tonic::Code::InvalidArgument => RpcStatusCode::InvalidArgument,
        tonic::Code::NotFound => RpcStatusCode::NotFound,
        tonic::Code::DeadlineExceeded => RpcStatusCode::DeadlineExceeded,
        tonic::Code::ResourceExhausted => RpcStatusCode::ResourceExhausted,
        tonic::Code::Internal => RpcStatusCode::Internal,
        tonic::Code::Unavailable => RpcStatusCode::Unavailable,
        _ => RpcStatusCode::Unknown,
    };

    RpcError::new(code, status.message())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
