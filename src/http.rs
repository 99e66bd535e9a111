//! A [`PayClient`] that talks to the gateway over HTTP.
//!
//! Every operation is a single `POST` of a JSON [`PayRpcParam`] envelope to an
//! operation-specific path. The response body is a JSON [`PayRpcResp`] frame.
//!
//! ## Example
//!
//! ```rust,no_run
//! use xmpay::http::HttpPayClient;
//! use xmpay_types::client::PayClient;
//! use xmpay_types::config::ClientConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("https://xmpay.example", "access-id", "access-key")
//!     .with_deposit_defaults("10001", "https://merchant.example/notify/receive");
//! let client = HttpPayClient::try_new(config)?;
//! let balance = client.balance().await?;
//! println!("available: {}", balance.available);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - connection failures and non-200 HTTP statuses are [`PayError::Transport`]
//! - an expired deadline is [`TransportError::Timeout`]
//! - a body that is not a frame is [`PayError::Decode`]
//! - frame-level failures follow [`EnvelopeCodec::open`](crate::envelope::EnvelopeCodec::open)

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{Instrument, Span};
use url::Url;
use xmpay_types::client::PayClient;
use xmpay_types::config::ClientConfig;
use xmpay_types::operation::Operation;
use xmpay_types::param::{OrderParam, OutParam, ReceiveParam};
use xmpay_types::proto::{self, Direction, PayRpcParam, PayRpcResp};

use crate::core::{ClientCore, record_result};
use crate::error::{BuildError, PayError, TransportError};

/// Mapping from operation to request path, appended to the configured `api_url`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpRoutes {
    overrides: HashMap<Operation, String>,
}

impl HttpRoutes {
    pub const CREATE_VIRTUAL: &'static str = "/gateway/api/order/virtual";
    pub const CREATE_RECEIVE: &'static str = "/gateway/api/order/receive";
    pub const QUERY_RECEIVE: &'static str = "/gateway/api/order/receive/query";
    pub const CREATE_OUT: &'static str = "/gateway/api/order/out";
    pub const QUERY_OUT: &'static str = "/gateway/api/order/out/query";
    pub const CHANNEL_QUERY: &'static str = "/gateway/api/channel/query";
    pub const MERCHANT_BALANCE: &'static str = "/gateway/api/merchant/balance";

    /// The gateway's standard path for `operation`.
    pub const fn standard_path(operation: Operation) -> &'static str {
        match operation {
            Operation::CreateVirtual => Self::CREATE_VIRTUAL,
            Operation::CreateReceive => Self::CREATE_RECEIVE,
            Operation::QueryReceive => Self::QUERY_RECEIVE,
            Operation::CreateOut => Self::CREATE_OUT,
            Operation::QueryOut => Self::QUERY_OUT,
            Operation::ChannelQuery => Self::CHANNEL_QUERY,
            Operation::MerchantBalance => Self::MERCHANT_BALANCE,
        }
    }

    /// Serves `operation` from `path` instead of the standard path.
    pub fn with_path(mut self, operation: Operation, path: impl Into<String>) -> Self {
        self.overrides.insert(operation, path.into());
        self
    }

    pub fn path(&self, operation: Operation) -> &str {
        self.overrides
            .get(&operation)
            .map(String::as_str)
            .unwrap_or(Self::standard_path(operation))
    }

    /// Resolves every operation against `base_url`.
    fn resolve(&self, base_url: &str) -> Result<HashMap<Operation, Url>, BuildError> {
        let base = base_url.trim_end_matches('/');
        Operation::ALL
            .into_iter()
            .map(|operation| {
                Url::parse(&format!("{base}{}", self.path(operation)))
                    .map(|url| (operation, url))
                    .map_err(|source| BuildError::UrlParse {
                        context: "Failed to construct route URL",
                        source,
                    })
            })
            .collect()
    }
}

/// HTTP client for the gateway.
#[derive(Clone, Debug)]
pub struct HttpPayClient {
    core: ClientCore,
    routes: HttpRoutes,
    /// One absolute URL per operation, resolved at construction.
    urls: HashMap<Operation, Url>,
    client: Client,
    timeout: Duration,
}

impl HttpPayClient {
    /// Builds a client with the standard routes and the configured HTTP timeout.
    pub fn try_new(config: ClientConfig) -> Result<Self, BuildError> {
        let core = ClientCore::new(config, "HttpClient")?;
        let routes = HttpRoutes::default();
        let urls = routes.resolve(&core.config().api_url)?;
        let timeout = core.config().http_timeout;
        let client = Client::builder().build().map_err(BuildError::HttpClient)?;
        Ok(Self {
            core,
            routes,
            urls,
            client,
            timeout,
        })
    }

    /// Runs every call of this client inside `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.core = self.core.with_span(span);
        self
    }

    /// Sets the deadline of each request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the route table.
    pub fn with_routes(mut self, routes: HttpRoutes) -> Result<Self, BuildError> {
        self.urls = routes.resolve(&self.core.config().api_url)?;
        self.routes = routes;
        Ok(self)
    }

    /// Uses a preconfigured reqwest client (proxies, TLS roots, pooling).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn core(&self) -> &ClientCore {
        &self.core
    }

    pub fn routes(&self) -> &HttpRoutes {
        &self.routes
    }

    pub fn url(&self, operation: Operation) -> &Url {
        &self.urls[&operation]
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn execute<T, R>(&self, operation: Operation, request: Option<&T>) -> Result<R, PayError>
    where
        T: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let span = self.core.span().clone();
        async {
            let result = self.call(operation, request).await;
            record_result(&result);
            result
        }
        .instrument(span)
        .await
    }

    async fn call<T, R>(&self, operation: Operation, request: Option<&T>) -> Result<R, PayError>
    where
        T: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let envelope = self.core.envelope().seal(operation, request)?;
        let frame = self.post_envelope(operation, &envelope).await?;
        self.core.envelope().open(operation, frame)
    }

    /// Sends the envelope and parses the outer frame. Nothing is retried.
    async fn post_envelope(
        &self,
        operation: Operation,
        envelope: &PayRpcParam,
    ) -> Result<PayRpcResp, PayError> {
        let url = self.url(operation);
        let http_response = self
            .client
            .post(url.clone())
            .json(envelope)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PayError::transport(operation, self.request_error(e)))?;

        let status = http_response.status();
        if status != StatusCode::OK {
            let body = http_response
                .text()
                .await
                .map_err(|e| PayError::transport(operation, self.body_error(e)))?;
            return Err(PayError::transport(
                operation,
                TransportError::HttpStatus { status, body },
            ));
        }

        let body = http_response
            .text()
            .await
            .map_err(|e| PayError::transport(operation, self.body_error(e)))?;
        tracing::debug!(%operation, %url, body = %body, "raw response body");

        serde_json::from_str(&body).map_err(|source| PayError::Decode {
            operation,
            context: "response frame",
            source,
        })
    }

    fn request_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Http(err)
        }
    }

    fn body_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::BodyRead(err)
        }
    }
}

impl PayClient for HttpPayClient {
    type Error = PayError;

    async fn create_virtual(&self, param: &OrderParam) -> Result<proto::VirtualResp, PayError> {
        let request = self.core.defaults().virtual_request(param);
        self.execute(Operation::CreateVirtual, Some(&request)).await
    }

    async fn create_receive(&self, param: &ReceiveParam) -> Result<proto::ReceiveResp, PayError> {
        let request = self.core.defaults().receive_request(param);
        self.execute(Operation::CreateReceive, Some(&request)).await
    }

    async fn query_receive(
        &self,
        order_no: &str,
        trx_no: &str,
    ) -> Result<proto::OrderQueryResp, PayError> {
        let request = proto::OrderQueryParam::new(order_no, trx_no);
        self.execute(Operation::QueryReceive, Some(&request)).await
    }

    async fn create_out(&self, param: &OutParam) -> Result<proto::OutResp, PayError> {
        let request = self.core.defaults().out_request(param);
        self.execute(Operation::CreateOut, Some(&request)).await
    }

    async fn query_out(
        &self,
        order_no: &str,
        trx_no: &str,
    ) -> Result<proto::OrderQueryResp, PayError> {
        let request = proto::OrderQueryParam::new(order_no, trx_no);
        self.execute(Operation::QueryOut, Some(&request)).await
    }

    async fn channels(
        &self,
        direction: Direction,
    ) -> Result<Vec<proto::ChannelQueryResp>, PayError> {
        let request = proto::ChannelQueryParam {
            order_type: direction,
        };
        self.execute(Operation::ChannelQuery, Some(&request)).await
    }

    async fn balance(&self) -> Result<proto::MerchantBalanceResp, PayError> {
        self.execute::<(), _>(Operation::MerchantBalance, None).await
    }
}
