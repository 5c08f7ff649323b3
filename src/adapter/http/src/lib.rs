// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod index_admin_handler;
mod middleware;
mod router;
mod search_handler;

pub use index_admin_handler::*;
pub use middleware::*;
pub use router::*;
pub use search_handler::*;
