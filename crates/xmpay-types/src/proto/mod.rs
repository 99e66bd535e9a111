//! Wire records exchanged with the gateway.
//!
//! Two layers travel on the wire:
//!
//! - The **envelope** ([`PayRpcParam`]) and the **outer frame** ([`PayRpcResp`]).
//!   These are the only records a transport sees. They serialize as JSON for the HTTP
//!   transport and as protobuf messages of the `pb.PayService` gRPC service.
//! - The **domain records** in [`order`]. They are serialized to JSON, encrypted, and
//!   carried as the `data` string of an envelope or frame.
//!
//! # Example
//!
//! ```json
//! { "appKey": "pmO14m7sSjHJg7ov", "data": "q2Yf...base64..." }
//! ```
//!
//! ```json
//! { "code": 200, "message": "", "data": "Zm9v...base64..." }
//! ```

use serde::{Deserialize, Serialize};

pub mod order;

pub use order::*;

/// Frame code signalling business success.
pub const SUCCESS_CODE: i32 = 200;

/// Outbound envelope: the merchant identifier plus the encrypted request.
///
/// `data` is `None` only for operations without a request body.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRpcParam {
    #[prost(string, tag = "1")]
    pub app_key: String,
    #[prost(string, optional, tag = "2")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Outer response frame.
///
/// When `code` is [`SUCCESS_CODE`] the `data` string decrypts to the response record,
/// otherwise `message` explains the failure and `data` carries nothing meaningful.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct PayRpcResp {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    #[serde(default)]
    pub message: String,
    #[prost(string, tag = "3")]
    #[serde(default)]
    pub data: String,
}

impl PayRpcResp {
    /// A successful frame carrying an encrypted payload.
    pub fn success(data: impl Into<String>) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: String::new(),
            data: data.into(),
        }
    }

    /// A failed frame carrying the gateway's diagnostic.
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}
