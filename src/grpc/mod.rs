//! A [`PayClient`] that talks to the gateway over gRPC.
//!
//! The client holds one persistent channel to the `pb.PayService` service and issues
//! one unary call per operation. Requests and responses go through exactly the same
//! envelope sealing and frame decoding as [`crate::http::HttpPayClient`]; only the
//! carrier differs.
//!
//! Each call is wrapped by a [`LoggingInterceptor`] and bounded by the configured RPC
//! deadline. After [`GrpcPayClient::close`] every call fails with
//! [`TransportError::Closed`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{Instrument, Span};
use xmpay_types::client::PayClient;
use xmpay_types::config::ClientConfig;
use xmpay_types::operation::Operation;
use xmpay_types::param::{OrderParam, OutParam, ReceiveParam};
use xmpay_types::proto::{self, Direction};

use crate::core::{ClientCore, record_result};
use crate::error::{BuildError, PayError, TransportError};

pub mod interceptor;
pub mod transport;

pub use interceptor::LoggingInterceptor;
pub use transport::{RpcTransport, TonicTransport, method_path};

/// gRPC client for the gateway.
#[derive(Debug)]
pub struct GrpcPayClient<T = TonicTransport> {
    core: ClientCore,
    /// `None` once closed.
    transport: RwLock<Option<T>>,
    interceptor: LoggingInterceptor,
    timeout: Duration,
}

impl GrpcPayClient<TonicTransport> {
    /// Connects to the configured endpoint.
    ///
    /// Connection failures are returned here rather than on the first call.
    pub async fn connect(config: ClientConfig) -> Result<Self, BuildError> {
        let transport = TonicTransport::connect(&config).await?;
        Self::with_transport(config, transport)
    }
}

impl<T: RpcTransport> GrpcPayClient<T> {
    /// Builds a client over an already established transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, BuildError> {
        let core = ClientCore::new(config, "GrpcClient")?;
        let timeout = core.config().rpc_timeout;
        Ok(Self {
            core,
            transport: RwLock::new(Some(transport)),
            interceptor: LoggingInterceptor,
            timeout,
        })
    }

    /// Runs every call of this client inside `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.core = self.core.with_span(span);
        self
    }

    /// Sets the deadline of each call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn core(&self) -> &ClientCore {
        &self.core
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Releases the connection. Calls already in flight finish on their own handle.
    pub async fn close(&self) {
        if self.transport.write().await.take().is_some() {
            tracing::info!(parent: self.core.span(), "closed gRPC client");
        }
    }

    pub async fn is_closed(&self) -> bool {
        self.transport.read().await.is_none()
    }

    async fn execute<Req, R>(&self, operation: Operation, request: Option<&Req>) -> Result<R, PayError>
    where
        Req: Serialize + Sync + ?Sized,
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

    async fn call<Req, R>(&self, operation: Operation, request: Option<&Req>) -> Result<R, PayError>
    where
        Req: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let envelope = self.core.envelope().seal(operation, request)?;
        let transport = self
            .transport
            .read()
            .await
            .clone()
            .ok_or_else(|| PayError::transport(operation, TransportError::Closed))?;

        let timeout = self.timeout;
        let deadline_bound = async {
            tokio::time::timeout(timeout, transport.unary(operation, envelope, timeout))
                .await
                .unwrap_or_else(|_| {
                    Err(tonic::Status::deadline_exceeded(format!(
                        "no response within {timeout:?}"
                    )))
                })
        };
        let frame = self
            .interceptor
            .intercept(method_path(operation), deadline_bound)
            .await
            .map_err(|status| PayError::transport(operation, self.status_error(status)))?;
        tracing::debug!(%operation, code = frame.code, data = %frame.data, "raw response frame");

        self.core.envelope().open(operation, frame)
    }

    fn status_error(&self, status: tonic::Status) -> TransportError {
        match status.code() {
            tonic::Code::DeadlineExceeded => TransportError::Timeout(self.timeout),
            _ => TransportError::Rpc(status),
        }
    }
}

impl<T: RpcTransport> PayClient for GrpcPayClient<T> {
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
