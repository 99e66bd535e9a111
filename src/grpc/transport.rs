//! The `pb.PayService` unary calls and the channel that carries them.

use http::uri::PathAndQuery;
use std::time::Duration;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use xmpay_types::config::{ClientConfig, TransportSecurity};
use xmpay_types::operation::Operation;
use xmpay_types::proto::{PayRpcParam, PayRpcResp};

use crate::error::BuildError;

pub const SERVICE_NAME: &str = "pb.PayService";

/// Full gRPC method path of `operation`.
pub const fn method_path(operation: Operation) -> &'static str {
    match operation {
        Operation::CreateVirtual => "/pb.PayService/VirtualAccount",
        Operation::CreateReceive => "/pb.PayService/Receive",
        Operation::QueryReceive => "/pb.PayService/ReceiveQuery",
        Operation::CreateOut => "/pb.PayService/Out",
        Operation::QueryOut => "/pb.PayService/OutQuery",
        Operation::ChannelQuery => "/pb.PayService/ChannelQuery",
        Operation::MerchantBalance => "/pb.PayService/MerchantBalance",
    }
}

/// Something that can perform one `pb.PayService` unary call.
///
/// Implementations must allow concurrent calls through shared references.
pub trait RpcTransport: Clone + Send + Sync + 'static {
    fn unary(
        &self,
        operation: Operation,
        request: PayRpcParam,
        timeout: Duration,
    ) -> impl Future<Output = Result<PayRpcResp, tonic::Status>> + Send;
}

/// [`RpcTransport`] over a persistent tonic [`Channel`].
///
/// The channel multiplexes concurrent calls over HTTP/2 and reconnects on its own;
/// clones share it.
#[derive(Clone, Debug)]
pub struct TonicTransport {
    grpc: Grpc<Channel>,
}

impl TonicTransport {
    /// Connects eagerly so that an unreachable gateway fails here, not on the first call.
    pub async fn connect(config: &ClientConfig) -> Result<Self, BuildError> {
        let uri = endpoint_uri(&config.api_url, config.transport_security);
        let mut endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|source| BuildError::InvalidEndpoint {
                endpoint: uri.clone(),
                source,
            })?
            .connect_timeout(config.rpc_timeout);
        if config.transport_security == TransportSecurity::Tls {
            endpoint = endpoint
                .tls_config(ClientTlsConfig::new().with_webpki_roots())
                .map_err(BuildError::Tls)?;
        }
        let channel = endpoint
            .connect()
            .await
            .map_err(|source| BuildError::Connect {
                endpoint: uri,
                source,
            })?;
        tracing::debug!(endpoint = %config.api_url, security = ?config.transport_security, "connected gRPC channel");
        Ok(Self::from_channel(channel))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            grpc: Grpc::new(channel),
        }
    }
}

impl RpcTransport for TonicTransport {
    async fn unary(
        &self,
        operation: Operation,
        request: PayRpcParam,
        timeout: Duration,
    ) -> Result<PayRpcResp, tonic::Status> {
        let mut grpc = self.grpc.clone();
        grpc.ready()
            .await
            .map_err(|e| tonic::Status::unavailable(format!("Service was not ready: {e}")))?;
        let codec: ProstCodec<PayRpcParam, PayRpcResp> = ProstCodec::default();
        let path = PathAndQuery::from_static(method_path(operation));
        let mut request = tonic::Request::new(request);
        request.set_timeout(timeout);
        let response = grpc.unary(request, path, codec).await?;
        Ok(response.into_inner())
    }
}

/// Adds a scheme to bare `host:port` endpoints.
fn endpoint_uri(api_url: &str, security: TransportSecurity) -> String {
    if api_url.contains("://") {
        return api_url.to_string();
    }
    match security {
        TransportSecurity::Plaintext => format!("http://{api_url}"),
        TransportSecurity::Tls => format!("https://{api_url}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_endpoints_get_a_scheme() {
        assert_eq!(
            endpoint_uri("xmpay.example:9201", TransportSecurity::Plaintext),
            "http://xmpay.example:9201"
        );
        assert_eq!(
            endpoint_uri("xmpay.example:9201", TransportSecurity::Tls),
            "https://xmpay.example:9201"
        );
        assert_eq!(
            endpoint_uri("https://xmpay.example", TransportSecurity::Plaintext),
            "https://xmpay.example"
        );
    }

    #[tokio::test]
    async fn malformed_endpoint_is_rejected_before_connecting() {
        let config = ClientConfig::new("xmpay example:9201", "access-id", "access-key");
        let err = TonicTransport::connect(&config).await.unwrap_err();
        assert!(
            matches!(&err, BuildError::InvalidEndpoint { endpoint, .. } if endpoint == "http://xmpay example:9201"),
            "{err}"
        );
    }

    #[test]
    fn every_operation_maps_into_the_service() {
        for operation in Operation::ALL {
            let path = method_path(operation);
            assert!(path.starts_with(&format!("/{SERVICE_NAME}/")), "{path}");
        }
    }
}
