// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Initializes the process-wide subscriber. `RUST_LOG` takes precedence over
/// the provided default directive.
pub fn init_tracing(default_directive: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Opens an `INFO`-level span that serves as the root of a logical operation,
/// e.g. one search request or one background job run
#[macro_export]
macro_rules! root_span {
    ($name:expr) => {
        $crate::root_span!($name,)
    };
    ($name:expr, $($fields:tt)*) => {
        ::tracing::info_span!($name, $($fields)*)
    };
}

pub use crate::root_span;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
