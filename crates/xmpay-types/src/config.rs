//! Merchant client configuration.
//!
//! A [`ClientConfig`] carries the gateway endpoint, the merchant credential pair and
//! the defaults applied to orders that leave the notify URL or the channel id unset.
//! Loading it from a file or environment is the application's job; the type derives
//! [`Deserialize`] with both the camelCase and snake_case names used by existing
//! merchant configuration files:
//!
//! ```json
//! {
//!   "apiUrl": "https://xmpay.example",
//!   "accessId": "pmO14m7sSjHJg7ov",
//!   "accessKey": "LrJyqOFlkPwYpP",
//!   "inId": "10001",
//!   "outId": "10002",
//!   "inNotifyUrl": "https://merchant.example/notify/receive",
//!   "outNotifyUrl": "https://merchant.example/notify/out"
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// Whether the gRPC channel is encrypted.
///
/// HTTP clients take the scheme from `api_url` and ignore this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportSecurity {
    /// Cleartext HTTP/2.
    #[default]
    Plaintext,
    /// TLS using the bundled web PKI roots.
    Tls,
}

/// Configuration of a single gateway client.
///
/// The client takes ownership of its configuration and never mutates it.
#[serde_as]
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Gateway endpoint: a base URL for HTTP, `host:port` or a URL for gRPC.
    #[serde(alias = "api_url")]
    pub api_url: String,
    /// Public merchant identifier, sent in clear with every request.
    #[serde(alias = "access_id")]
    pub access_id: String,
    /// Merchant secret. Only used to derive the envelope key.
    #[serde(alias = "access_key")]
    pub access_key: String,
    /// Default deposit channel id, in string form.
    #[serde(default, alias = "in_id")]
    pub in_id: String,
    /// Default payout channel id, in string form.
    #[serde(default, alias = "out_id")]
    pub out_id: String,
    /// Default notify URL for deposit orders.
    #[serde(default, alias = "notify_in")]
    pub in_notify_url: String,
    /// Default notify URL for payout orders.
    #[serde(default, alias = "notify_out")]
    pub out_notify_url: String,
    #[serde(default, alias = "transport_security")]
    pub transport_security: TransportSecurity,
    /// Deadline of a single HTTP call.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "ClientConfig::default_http_timeout", alias = "http_timeout")]
    pub http_timeout: Duration,
    /// Deadline of a single gRPC call.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "ClientConfig::default_rpc_timeout", alias = "rpc_timeout")]
    pub rpc_timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(60);
    pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration with empty defaults and the standard timeouts.
    pub fn new(
        api_url: impl Into<String>,
        access_id: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            access_id: access_id.into(),
            access_key: access_key.into(),
            in_id: String::new(),
            out_id: String::new(),
            in_notify_url: String::new(),
            out_notify_url: String::new(),
            transport_security: TransportSecurity::default(),
            http_timeout: Self::DEFAULT_HTTP_TIMEOUT,
            rpc_timeout: Self::DEFAULT_RPC_TIMEOUT,
        }
    }

    /// Sets the channel id and notify URL used for deposit orders that leave them unset.
    pub fn with_deposit_defaults(
        mut self,
        channel_id: impl Into<String>,
        notify_url: impl Into<String>,
    ) -> Self {
        self.in_id = channel_id.into();
        self.in_notify_url = notify_url.into();
        self
    }

    /// Sets the channel id and notify URL used for payout orders that leave them unset.
    pub fn with_payout_defaults(
        mut self,
        channel_id: impl Into<String>,
        notify_url: impl Into<String>,
    ) -> Self {
        self.out_id = channel_id.into();
        self.out_notify_url = notify_url.into();
        self
    }

    pub fn with_transport_security(mut self, security: TransportSecurity) -> Self {
        self.transport_security = security;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    fn default_http_timeout() -> Duration {
        Self::DEFAULT_HTTP_TIMEOUT
    }

    fn default_rpc_timeout() -> Duration {
        Self::DEFAULT_RPC_TIMEOUT
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("access_id", &self.access_id)
            .field("access_key", &"<redacted>")
            .field("in_id", &self.in_id)
            .field("out_id", &self.out_id)
            .field("in_notify_url", &self.in_notify_url)
            .field("out_notify_url", &self.out_notify_url)
            .field("transport_security", &self.transport_security)
            .field("http_timeout", &self.http_timeout)
            .field("rpc_timeout", &self.rpc_timeout)
            .finish()
    }
}
