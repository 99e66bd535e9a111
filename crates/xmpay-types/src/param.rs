//! Caller-facing order parameters.
//!
//! These are what a merchant application fills in. Clients convert them into the
//! wire records of [`crate::proto`] after applying the configured defaults; the
//! conversions below copy fields verbatim and leave defaulting to the client.

use serde::{Deserialize, Serialize};

use crate::proto;

/// Fields shared by every order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParam {
    /// Merchant order number. Unique per merchant; the basis for idempotent retries.
    pub order_no: String,
    /// End user IP address.
    pub ip: String,
    pub uid: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// End user identity document number.
    pub id_num: String,
    /// Channel id. Zero or negative selects the configured default.
    pub pid: i32,
    /// Empty selects the configured default.
    pub notify_url: String,
    /// Amount in minor units.
    pub amount: i64,
    pub subject: String,
    pub body: String,
}

/// Parameters of a collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveParam {
    #[serde(flatten)]
    pub order: OrderParam,
    /// Page the payer is sent to after paying.
    #[serde(default)]
    pub return_url: String,
}

/// Parameters of a disbursement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutParam {
    #[serde(flatten)]
    pub order: OrderParam,
    pub bank_no: String,
    pub bank_code: String,
    #[serde(default)]
    pub bank_name: String,
    /// Payout mode understood by the channel.
    #[serde(default)]
    pub mode: String,
}

impl From<&OrderParam> for proto::VirtualParam {
    fn from(param: &OrderParam) -> Self {
        Self {
            order_no: param.order_no.clone(),
            uid: param.uid.clone(),
            ip: param.ip.clone(),
            email: param.email.clone(),
            phone: param.phone.clone(),
            name: param.name.clone(),
            id_num: param.id_num.clone(),
            pid: param.pid,
            notify_url: param.notify_url.clone(),
        }
    }
}

impl From<&ReceiveParam> for proto::ReceiveParam {
    fn from(param: &ReceiveParam) -> Self {
        let order = &param.order;
        Self {
            order_no: order.order_no.clone(),
            amount: order.amount,
            uid: order.uid.clone(),
            ip: order.ip.clone(),
            email: order.email.clone(),
            phone: order.phone.clone(),
            name: order.name.clone(),
            subject: order.subject.clone(),
            body: order.body.clone(),
            id_num: order.id_num.clone(),
            pid: order.pid,
            notify_url: order.notify_url.clone(),
            return_url: param.return_url.clone(),
        }
    }
}

impl From<&OutParam> for proto::OutParam {
    fn from(param: &OutParam) -> Self {
        let order = &param.order;
        Self {
            order_no: order.order_no.clone(),
            amount: order.amount,
            uid: order.uid.clone(),
            ip: order.ip.clone(),
            email: order.email.clone(),
            phone: order.phone.clone(),
            name: order.name.clone(),
            id_num: order.id_num.clone(),
            pid: order.pid,
            bank_no: param.bank_no.clone(),
            bank_code: param.bank_code.clone(),
            bank_name: param.bank_name.clone(),
            mode: param.mode.clone(),
            notify_url: order.notify_url.clone(),
            subject: order.subject.clone(),
            body: order.body.clone(),
        }
    }
}
