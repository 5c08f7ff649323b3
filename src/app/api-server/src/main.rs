// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

mod api_server;
mod config;
mod dependencies;

use api_server::APIServer;
use config::GatewayConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() {
    observability::tracing::init_tracing("info,vector_catalog=debug");

    if let Err(err) = run().await {
        tracing::error!(error = %err.reason(), "Gateway terminated with an error");
        std::process::exit(1);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

async fn run() -> Result<(), InternalError> {
    let config = GatewayConfig::from_env()?;
    tracing::info!(?config, "Starting vector catalog gateway");

    let catalog = dependencies::build_catalog(&config).await?;

    let server = APIServer::new(catalog, config.http_address, config.http_port).await?;
    tracing::info!(addr = %server.local_addr(), "HTTP server is listening");

    server.run().await
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
