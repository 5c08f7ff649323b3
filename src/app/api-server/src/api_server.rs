// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::{IpAddr, SocketAddr};

use axum::Extension;
use dill::Catalog;
use internal_error::{InternalError, ResultIntoInternal};
use vector_catalog_adapter_http::CorrelationIdLayer;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct APIServer {
    server: axum::serve::Serve<axum::routing::IntoMakeService<axum::Router>, axum::Router>,
    local_addr: SocketAddr,
}

impl APIServer {
    pub async fn new(
        catalog: Catalog,
        address: IpAddr,
        port: u16,
    ) -> Result<Self, InternalError> {
        let addr = SocketAddr::from((address, port));
        let listener = tokio::net::TcpListener::bind(addr).await.int_err()?;
        let local_addr = listener.local_addr().unwrap();

        let router = vector_catalog_adapter_http::api_router()
            .layer(observability::axum::http_layer())
            // Note: Healthcheck and metrics routes are placed before the tracing layer (layers
            // execute bottom-up) to avoid spam in logs
            .route(
                "/health/live",
                axum::routing::get(observability::health::live_handler),
            )
            .route(
                "/health/ready",
                axum::routing::get(observability::health::ready_handler),
            )
            .route(
                "/metrics",
                axum::routing::get(observability::metrics::metrics_handler),
            )
            .layer(tower_http::catch_panic::CatchPanicLayer::custom(
                observability::panic_handler,
            ))
            .layer(CorrelationIdLayer::new())
            .layer(Extension(catalog));

        let server = axum::serve(listener, router.into_make_service());

        Ok(Self { server, local_addr })
    }

    pub fn local_addr(&self) -> &SocketAddr {
        &self.local_addr
    }

    pub async fn run(self) -> Result<(), InternalError> {
        self.server
            .with_graceful_shutdown(shutdown_signal())
            .await
            .int_err()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Resolves on SIGINT or SIGTERM, mirroring the sidecar's graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Received shutdown signal, stopping server");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
