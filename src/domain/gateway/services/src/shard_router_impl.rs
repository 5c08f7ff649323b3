// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use vector_catalog_gateway::*;

use crate::GatewaySearchConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ShardRouterImpl {
    config: Arc<GatewaySearchConfig>,
}

#[dill::component(pub)]
#[dill::interface(dyn ShardRouter)]
impl ShardRouterImpl {
    pub fn new(config: Arc<GatewaySearchConfig>) -> Self {
        Self { config }
    }
}

impl ShardRouter for ShardRouterImpl {
    fn resolve_one(&self, requested: Option<&str>) -> String {
        match requested {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => self.config.default_shard_key.clone(),
        }
    }

    fn resolve_many(&self, requested: Option<&str>) -> Vec<String> {
        vec![self.resolve_one(requested)]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
