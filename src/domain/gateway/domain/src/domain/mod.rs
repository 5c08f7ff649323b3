// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod embedding;
mod query_fingerprint;
mod search_outcome;
mod search_query;
mod shard_descriptor;

pub use embedding::*;
pub use query_fingerprint::*;
pub use search_outcome::*;
pub use search_query::*;
pub use shard_descriptor::*;
