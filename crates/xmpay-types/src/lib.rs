#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the XMPay merchant gateway.
//!
//! This crate holds everything a caller and a transport need to agree on,
//! without pulling in any networking or cryptography:
//!
//! - [`client`] - The [`PayClient`](client::PayClient) trait implemented by every transport
//! - [`config`] - Merchant credentials, per-direction defaults and transport settings
//! - [`operation`] - The seven gateway operations and their stable names
//! - [`param`] - Caller-facing order parameters
//! - [`proto`] - Wire records: the encrypted envelope, the outer frame and the
//!   JSON payloads carried inside them
//!
//! # Wire Format
//!
//! Domain payloads are JSON with camelCase field names. They never travel in the
//! clear: a transport serializes them, encrypts the bytes and places the result in
//! the `data` field of a [`PayRpcParam`](proto::PayRpcParam) envelope. Responses come
//! back as a [`PayRpcResp`](proto::PayRpcResp) frame whose `data` field decrypts to
//! the JSON response record.

pub mod client;
pub mod config;
pub mod operation;
pub mod param;
pub mod proto;
