//! Client library for the XMPay merchant gateway.
//!
//! The gateway exposes the same seven operations over two transports. Both go
//! through one pipeline:
//!
//! 1. merchant defaults (channel id, notify URL) fill the gaps in the caller's order,
//! 2. the request is serialized to JSON and sealed into an encrypted envelope,
//! 3. the envelope travels over HTTP ([`http::HttpPayClient`]) or gRPC
//!    ([`grpc::GrpcPayClient`]),
//! 4. the response frame is checked, its payload decrypted and decoded.
//!
//! Both clients implement [`PayClient`](xmpay_types::client::PayClient), so callers
//! can switch transports without touching their code. Every failure is a
//! [`PayError`](error::PayError) naming the operation and the layer that failed.
//!
//! # Modules
//!
//! - [`cipher`]: authenticated encryption of envelope payloads.
//! - [`envelope`]: sealing requests and opening response frames.
//! - [`defaults`]: per-direction merchant defaults.
//! - [`core`]: state shared by both transports.
//! - [`http`]: the HTTP transport.
//! - [`grpc`]: the gRPC transport.
//! - [`error`]: the error taxonomy.
//!
//! The wire records, configuration and the client trait live in [`xmpay_types`],
//! re-exported here.

pub mod cipher;
pub mod core;
pub mod defaults;
pub mod envelope;
pub mod error;
pub mod grpc;
pub mod http;

#[cfg(test)]
mod equivalence;
#[cfg(test)]
mod testing;

pub use xmpay_types;
pub use xmpay_types::client::PayClient;
pub use xmpay_types::config::ClientConfig;

pub use error::{BuildError, ErrorKind, PayError, TransportError};
pub use grpc::GrpcPayClient;
pub use http::HttpPayClient;
