//! A client for a remote key-value tree service.
//!
//! Trees live in a remote service and are addressed by an id and a token. This crate turns the
//! words of a command line into a typed [`Request`], sends it to the service over gRPC and turns
//! the reply into a printable [`Response`].

mod client;
mod error;
pub mod request;
pub mod response;
mod tracing_shim;
pub mod transitive;

/// Protobuf structs and gRPC stubs generated from `proto/tree.proto`.
#[allow(
    missing_docs,
    missing_debug_implementations,
    unreachable_pub,
    unused_qualifications,
    unused_results,
    clippy::missing_docs_in_private_items,
    clippy::nursery
)]
pub mod proto {
    tonic::include_proto!("tree");
}

pub use self::client::TreeClient;
pub use self::error::Error;
pub use self::request::{Credentials, ParseError, Request};
pub use self::response::Response;

/// The response of a unary RPC.
pub type RpcResponse<T> = Result<tonic::Response<T>, tonic::Status>;
