//! Runs one scenario suite against both transports and checks that they agree.
//!
//! The HTTP gateway is a wiremock server and the gRPC gateway a [`MockGateway`];
//! both are scripted with the same frames. Every operation must produce the same
//! typed response or the same error kind, and the decrypted requests the gateways
//! receive must match field for field.

use serde::Serialize;
use std::collections::HashMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xmpay_types::client::PayClient;
use xmpay_types::operation::Operation;
use xmpay_types::proto::{self, Direction, PayRpcParam, PayRpcResp};

use crate::error::{ErrorKind, PayError};
use crate::grpc::GrpcPayClient;
use crate::http::{HttpPayClient, HttpRoutes};
use crate::testing::{self, MockGateway};

type Outcome = Result<serde_json::Value, ErrorKind>;

fn outcome<T: Serialize>(result: Result<T, PayError>) -> Outcome {
    result
        .map(|value| serde_json::to_value(value).unwrap())
        .map_err(|err| err.kind())
}

async fn run_suite<C: PayClient<Error = PayError>>(client: &C) -> Vec<(Operation, Outcome)> {
    vec![
        (
            Operation::CreateVirtual,
            outcome(client.create_virtual(&testing::virtual_param()).await),
        ),
        (
            Operation::CreateReceive,
            outcome(client.create_receive(&testing::receive_param()).await),
        ),
        (
            Operation::QueryReceive,
            outcome(client.query_receive("receive1761709212", "T1").await),
        ),
        (
            Operation::CreateOut,
            outcome(client.create_out(&testing::out_param()).await),
        ),
        (
            Operation::QueryOut,
            outcome(client.query_out("cash1761709212", "").await),
        ),
        (
            Operation::ChannelQuery,
            outcome(client.channels(Direction::Payout).await),
        ),
        (Operation::MerchantBalance, outcome(client.balance().await)),
    ]
}

/// One frame per operation, covering success and every frame-level failure.
fn script() -> HashMap<Operation, PayRpcResp> {
    let mut tampered = testing::success_frame(&proto::OrderQueryResp::default());
    tampered.data = testing::flip_char(&tampered.data, 10);
    let malformed = PayRpcResp::success(testing::gateway_cipher().encode(b"{\"balance\":").unwrap());

    HashMap::from([
        (
            Operation::CreateVirtual,
            testing::success_frame(&proto::VirtualResp {
                order_no: "virtual1761709212".into(),
                trx_no: "V1".into(),
                account_no: "1234567890".into(),
                account_name: "Jack kgj".into(),
                bank_code: "37006".into(),
                bank_name: "test".into(),
            }),
        ),
        (
            Operation::CreateReceive,
            testing::success_frame(&serde_json::json!({ "orderNo": "R1", "trxNo": "T1" })),
        ),
        (
            Operation::QueryReceive,
            testing::success_frame(&proto::OrderQueryResp {
                order_no: "receive1761709212".into(),
                trx_no: "T1".into(),
                amount: 10000,
                status: 2,
                ..Default::default()
            }),
        ),
        (
            Operation::CreateOut,
            PayRpcResp::failure(500, "insufficient balance"),
        ),
        (Operation::QueryOut, tampered),
        (
            Operation::ChannelQuery,
            testing::success_frame(&vec![proto::ChannelQueryResp {
                id: 10002,
                name: "bank transfer".into(),
                min_amount: 100,
                max_amount: 5_000_000,
                rate: 120,
                status: 1,
            }]),
        ),
        (Operation::MerchantBalance, malformed),
    ])
}

async fn http_gateway(script: &HashMap<Operation, PayRpcResp>) -> MockServer {
    let server = MockServer::start().await;
    for (operation, frame) in script {
        Mock::given(method("POST"))
            .and(path(HttpRoutes::standard_path(*operation)))
            .respond_with(ResponseTemplate::new(200).set_body_json(frame))
            .mount(&server)
            .await;
    }
    server
}

fn grpc_gateway(script: &HashMap<Operation, PayRpcResp>) -> MockGateway {
    script
        .iter()
        .fold(MockGateway::default(), |gateway, (operation, frame)| {
            gateway.with_frame(*operation, frame.clone())
        })
}

/// Decrypted request body per operation, `None` when the envelope carried none.
fn plaintexts(envelopes: Vec<(Operation, PayRpcParam)>) -> HashMap<Operation, Option<serde_json::Value>> {
    envelopes
        .into_iter()
        .map(|(operation, envelope)| {
            assert_eq!(envelope.app_key, testing::ACCESS_ID);
            let body = envelope.data.as_ref().map(|_| testing::open_envelope(&envelope));
            (operation, body)
        })
        .collect()
}

#[tokio::test]
async fn transports_are_observably_equivalent() {
    let script = script();

    let server = http_gateway(&script).await;
    let http = HttpPayClient::try_new(testing::config(&server.uri())).unwrap();
    let http_outcomes = run_suite(&http).await;

    let gateway = grpc_gateway(&script);
    let grpc =
        GrpcPayClient::with_transport(testing::config("xmpay.example:9201"), gateway.clone())
            .unwrap();
    let grpc_outcomes = run_suite(&grpc).await;

    assert_eq!(http_outcomes, grpc_outcomes);

    let by_operation: HashMap<_, _> = http_outcomes.into_iter().collect();
    assert_eq!(
        by_operation[&Operation::CreateReceive],
        Ok(serde_json::to_value(proto::ReceiveResp {
            order_no: "R1".into(),
            trx_no: "T1".into(),
            ..Default::default()
        })
        .unwrap())
    );
    assert_eq!(by_operation[&Operation::CreateOut], Err(ErrorKind::Gateway));
    assert_eq!(by_operation[&Operation::QueryOut], Err(ErrorKind::Codec));
    assert_eq!(by_operation[&Operation::MerchantBalance], Err(ErrorKind::Decode));

    let http_requests: Vec<(Operation, PayRpcParam)> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| {
            let operation = Operation::ALL
                .into_iter()
                .find(|op| HttpRoutes::standard_path(*op) == request.url.path())
                .unwrap();
            (operation, serde_json::from_slice(&request.body).unwrap())
        })
        .collect();
    let http_bodies = plaintexts(http_requests);
    let grpc_bodies = plaintexts(gateway.received());
    assert_eq!(http_bodies.len(), Operation::ALL.len());
    assert_eq!(http_bodies, grpc_bodies);
    assert_eq!(http_bodies[&Operation::MerchantBalance], None);
    assert_eq!(
        http_bodies[&Operation::CreateReceive].as_ref().unwrap()["notifyUrl"],
        testing::DEPOSIT_NOTIFY_URL
    );
}

#[tokio::test]
async fn transports_agree_on_gateway_messages() {
    let script = HashMap::from([(
        Operation::QueryReceive,
        PayRpcResp::failure(404, "order not found"),
    )]);

    let server = http_gateway(&script).await;
    let http = HttpPayClient::try_new(testing::config(&server.uri())).unwrap();
    let grpc = GrpcPayClient::with_transport(
        testing::config("xmpay.example:9201"),
        grpc_gateway(&script),
    )
    .unwrap();

    let http_err = http.query_receive("R1", "").await.unwrap_err();
    let grpc_err = grpc.query_receive("R1", "").await.unwrap_err();
    assert_eq!(http_err.to_string(), grpc_err.to_string());
    assert_eq!(
        http_err.to_string(),
        "query_receive: gateway returned code 404: order not found"
    );
}
