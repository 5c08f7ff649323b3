// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Wire types and unary clients of the `vectorservice` sidecar, written in
//! the shape `tonic-build` would emit. Kept by hand so the build does not
//! depend on `protoc` being present.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Messages
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EmbeddingRequest {
    #[prost(string, tag = "1")]
    pub text: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub model_name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EmbeddingResponse {
    #[prost(float, repeated, tag = "1")]
    pub vector: ::prost::alloc::vec::Vec<f32>,
    #[prost(string, tag = "2")]
    pub model_name: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub dimension: i32,
    #[prost(double, tag = "4")]
    pub latency_ms: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SearchRequest {
    #[prost(float, repeated, tag = "1")]
    pub query_vector: ::prost::alloc::vec::Vec<f32>,
    #[prost(int32, tag = "2")]
    pub top_k: i32,
    #[prost(string, tag = "3")]
    pub shard_key: ::prost::alloc::string::String,
    #[prost(int32, tag = "4")]
    pub nprobe: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SearchResult {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(float, tag = "2")]
    pub score: f32,
    #[prost(string, tag = "3")]
    pub metadata_json: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SearchResponse {
    #[prost(message, repeated, tag = "1")]
    pub results: ::prost::alloc::vec::Vec<SearchResult>,
    #[prost(string, tag = "2")]
    pub shard_key: ::prost::alloc::string::String,
    #[prost(double, tag = "3")]
    pub search_latency_ms: f64,
    #[prost(bool, tag = "4")]
    pub cache_hit: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IndexInfoRequest {
    /// Empty selects all shards
    #[prost(string, tag = "1")]
    pub shard_key: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ShardInfo {
    #[prost(string, tag = "1")]
    pub shard_key: ::prost::alloc::string::String,
    #[prost(int64, tag = "2")]
    pub total_vectors: i64,
    #[prost(int32, tag = "3")]
    pub dimension: i32,
    #[prost(string, tag = "4")]
    pub index_type: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub is_trained: bool,
    #[prost(int64, tag = "6")]
    pub index_size_bytes: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IndexInfoResponse {
    #[prost(message, repeated, tag = "1")]
    pub shards: ::prost::alloc::vec::Vec<ShardInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReloadIndexRequest {
    #[prost(string, tag = "1")]
    pub shard_key: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReloadIndexResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "3")]
    pub reloaded_shards: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// EmbeddingService client
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct EmbeddingServiceClient {
    inner: tonic::client::Grpc<tonic::transport::Channel>,
}

impl EmbeddingServiceClient {
    pub fn new(channel: tonic::transport::Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn generate_embedding(
        &mut self,
        request: impl tonic::IntoRequest<EmbeddingRequest>,
    ) -> Result<tonic::Response<EmbeddingResponse>, tonic::Status> {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::unknown(format!("Service was not ready: {e}"))
        })?;
        let codec = tonic::codec::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static(
            "/vectorservice.EmbeddingService/GenerateEmbedding",
        );
        self.inner.unary(request.into_request(), path, codec).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// IndexService client
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct IndexServiceClient {
    inner: tonic::client::Grpc<tonic::transport::Channel>,
}

impl IndexServiceClient {
    pub fn new(channel: tonic::transport::Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn search_index(
        &mut self,
        request: impl tonic::IntoRequest<SearchRequest>,
    ) -> Result<tonic::Response<SearchResponse>, tonic::Status> {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::unknown(format!("Service was not ready: {e}"))
        })?;
        let codec = tonic::codec::ProstCodec::default();
        let path =
            http::uri::PathAndQuery::from_static("/vectorservice.IndexService/SearchIndex");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn get_index_info(
        &mut self,
        request: impl tonic::IntoRequest<IndexInfoRequest>,
    ) -> Result<tonic::Response<IndexInfoResponse>, tonic::Status> {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::unknown(format!("Service was not ready: {e}"))
        })?;
        let codec = tonic::codec::ProstCodec::default();
        let path =
            http::uri::PathAndQuery::from_static("/vectorservice.IndexService/GetIndexInfo");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn reload_index(
        &mut self,
        request: impl tonic::IntoRequest<ReloadIndexRequest>,
    ) -> Result<tonic::Response<ReloadIndexResponse>, tonic::Status> {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::unknown(format!("Service was not ready: {e}"))
        })?;
        let codec = tonic::codec::ProstCodec::default();
        let path =
            http::uri::PathAndQuery::from_static("/vectorservice.IndexService/ReloadIndex");
        self.inner.unary(request.into_request(), path, codec).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
