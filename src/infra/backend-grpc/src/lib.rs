// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod channel;
mod embedding_backend_grpc;
mod index_backend_grpc;
pub mod proto;

pub use channel::*;
pub use embedding_backend_grpc::*;
pub use index_backend_grpc::*;
