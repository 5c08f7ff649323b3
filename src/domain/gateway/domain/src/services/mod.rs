// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod backend_error;
mod embedding_backend;
mod index_backend;
mod search_orchestrator;
mod shard_router;

pub use backend_error::*;
pub use embedding_backend::*;
pub use index_backend::*;
pub use search_orchestrator::*;
pub use shard_router::*;
