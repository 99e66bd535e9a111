//! Fixtures shared by the transport tests: a merchant configuration, sample orders,
//! a scripted in-memory gRPC gateway and helpers to build and inspect payloads.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use xmpay_types::config::ClientConfig;
use xmpay_types::operation::Operation;
use xmpay_types::param::{OrderParam, OutParam, ReceiveParam};
use xmpay_types::proto::{PayRpcParam, PayRpcResp};

use crate::cipher::CipherCodec;
use crate::grpc::RpcTransport;

pub const ACCESS_ID: &str = "pmO14m7sSjHJg7ov";
pub const ACCESS_KEY: &str = "LrJyqOFlkPwYpP";
pub const DEPOSIT_NOTIFY_URL: &str = "https://merchant.example/gateway/notify/receive";
pub const PAYOUT_NOTIFY_URL: &str = "https://merchant.example/gateway/notify/out";

pub fn config(api_url: &str) -> ClientConfig {
    ClientConfig::new(api_url, ACCESS_ID, ACCESS_KEY)
        .with_deposit_defaults("10001", DEPOSIT_NOTIFY_URL)
        .with_payout_defaults("10002", PAYOUT_NOTIFY_URL)
}

/// The gateway side of the credential pair.
pub fn gateway_cipher() -> CipherCodec {
    CipherCodec::new(ACCESS_ID.as_bytes(), ACCESS_KEY.as_bytes()).unwrap()
}

pub fn success_frame<T: Serialize + ?Sized>(value: &T) -> PayRpcResp {
    let plaintext = serde_json::to_vec(value).unwrap();
    PayRpcResp::success(gateway_cipher().encode(&plaintext).unwrap())
}

/// Decrypts and decodes the request carried by an envelope, as the gateway would.
pub fn open_envelope<T: DeserializeOwned>(envelope: &PayRpcParam) -> T {
    let data = envelope.data.as_deref().unwrap();
    serde_json::from_slice(&gateway_cipher().decode(data).unwrap()).unwrap()
}

/// Replaces the character at `index` with a different base64 character.
pub fn flip_char(data: &str, index: usize) -> String {
    let mut chars: Vec<char> = data.chars().collect();
    chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

pub fn virtual_param() -> OrderParam {
    OrderParam {
        order_no: "virtual1761709212".into(),
        ip: "192.168.1.116".into(),
        uid: "1906".into(),
        name: "Jack kgj".into(),
        phone: "9988766754".into(),
        email: "jack@example.com".into(),
        id_num: "2503131209376517".into(),
        pid: 10001,
        notify_url: "https://merchant.example/gateway/notify/virtual".into(),
        ..Default::default()
    }
}

/// Collection order with `amount = 10000`, `pid = 10001` and no notify URL.
pub fn receive_param() -> ReceiveParam {
    ReceiveParam {
        order: OrderParam {
            order_no: "receive1761709212".into(),
            ip: "192.168.1.116".into(),
            uid: "1906".into(),
            name: "Jack".into(),
            phone: "9988776654".into(),
            email: "jack@example.com".into(),
            id_num: "2503131209376517".into(),
            pid: 10001,
            notify_url: String::new(),
            amount: 10000,
            subject: "testReceive".into(),
            body: "testReceive".into(),
        },
        return_url: String::new(),
    }
}

pub fn out_param() -> OutParam {
    OutParam {
        order: OrderParam {
            order_no: "cash1761709212".into(),
            ip: "192.168.1.116".into(),
            uid: "1907".into(),
            name: "Jack kjh".into(),
            phone: "9988776654".into(),
            email: "jack@example.com".into(),
            id_num: "2503131209376517".into(),
            pid: 10002,
            notify_url: "https://merchant.example/gateway/notify/out".into(),
            amount: 10000,
            subject: "testCash".into(),
            body: "testCash".into(),
        },
        bank_no: "8946536458965423".into(),
        bank_code: "37006".into(),
        bank_name: "test".into(),
        mode: String::new(),
    }
}

/// In-memory `pb.PayService` that answers with scripted frames and records requests.
#[derive(Clone, Debug, Default)]
pub struct MockGateway {
    frames: Arc<Mutex<HashMap<Operation, PayRpcResp>>>,
    received: Arc<Mutex<Vec<(Operation, PayRpcParam)>>>,
    delay: Option<Duration>,
    failure: Option<(tonic::Code, String)>,
}

impl MockGateway {
    pub fn with_frame(self, operation: Operation, frame: PayRpcResp) -> Self {
        self.frames.lock().unwrap().insert(operation, frame);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(mut self, code: tonic::Code, message: &str) -> Self {
        self.failure = Some((code, message.to_string()));
        self
    }

    pub fn received(&self) -> Vec<(Operation, PayRpcParam)> {
        self.received.lock().unwrap().clone()
    }
}

impl RpcTransport for MockGateway {
    async fn unary(
        &self,
        operation: Operation,
        request: PayRpcParam,
        _timeout: Duration,
    ) -> Result<PayRpcResp, tonic::Status> {
        self.received.lock().unwrap().push((operation, request));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some((code, message)) = &self.failure {
            return Err(tonic::Status::new(*code, message.clone()));
        }
        let frame = self.frames.lock().unwrap().get(&operation).cloned();
        Ok(frame.unwrap_or_else(|| PayRpcResp::failure(404, "no frame scripted")))
    }
}
