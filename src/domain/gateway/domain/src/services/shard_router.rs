// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Maps a request's shard hint to the shard(s) that will be queried
pub trait ShardRouter: Send + Sync {
    /// Returns the requested key verbatim when present, the configured
    /// default otherwise
    fn resolve_one(&self, requested: Option<&str>) -> String;

    /// Singleton today; the signature leaves room for fan-out routing without
    /// changing the orchestrator's call site
    fn resolve_many(&self, requested: Option<&str>) -> Vec<String>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
