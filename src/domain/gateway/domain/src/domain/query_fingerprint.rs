// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use sha2::{Digest, Sha256};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Deterministic 64-bit digest over the canonicalized request, used as the
/// cache key and echoed to clients as `queryHash`.
///
/// The canonical tuple is `lower(trim(query)) | "|" | top_k | "|" |
/// shard_key`, so fingerprints are insensitive to query case and surrounding
/// whitespace but discriminate on every other component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryFingerprint(String);

impl QueryFingerprint {
    pub fn derive(query: &str, top_k: usize, shard_key: &str) -> Self {
        let canonical = format!("{}|{top_k}|{shard_key}", query.trim().to_lowercase());

        let digest = Sha256::digest(canonical.as_bytes());

        let hex: String = digest[..8].iter().map(|b| format!("{b:02x}")).collect();
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueryFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
