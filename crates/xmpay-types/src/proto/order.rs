//! Domain records carried encrypted inside envelopes and frames.
//!
//! Request records are built by the clients from caller parameters after the
//! default-filling rules have run. Response records default every field, so a
//! gateway that omits a value decodes to an empty string or zero rather than an error.
//! Amounts are integer minor units (cents).

use serde::{Deserialize, Serialize};

/// Direction of money flow. Decides which configured defaults apply and is the
/// `orderType` of a channel query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Direction {
    /// Inbound: virtual accounts and collection orders.
    Deposit,
    /// Outbound: disbursement orders.
    Payout,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown order type {0}")]
pub struct UnknownDirection(pub i32);

impl From<Direction> for i32 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Deposit => 1,
            Direction::Payout => 2,
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = UnknownDirection;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Direction::Deposit),
            2 => Ok(Direction::Payout),
            other => Err(UnknownDirection(other)),
        }
    }
}

/// Request to open a deposit virtual account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualParam {
    pub order_no: String,
    pub uid: String,
    pub ip: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub id_num: String,
    pub pid: i32,
    pub notify_url: String,
}

/// Request to create a collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveParam {
    pub order_no: String,
    pub amount: i64,
    pub uid: String,
    pub ip: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub id_num: String,
    pub pid: i32,
    pub notify_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub return_url: String,
}

/// Request to create a disbursement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutParam {
    pub order_no: String,
    pub amount: i64,
    pub uid: String,
    pub ip: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub id_num: String,
    pub pid: i32,
    pub bank_no: String,
    pub bank_code: String,
    pub bank_name: String,
    pub mode: String,
    pub notify_url: String,
    pub subject: String,
    pub body: String,
}

/// Order lookup. `order_no` is the gateway transaction number and `merchant_no`
/// the merchant's own order number; either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQueryParam {
    pub order_no: String,
    pub merchant_no: String,
}

impl OrderQueryParam {
    /// Builds a lookup from the merchant order number and the gateway transaction number.
    pub fn new(order_no: impl Into<String>, trx_no: impl Into<String>) -> Self {
        Self {
            order_no: trx_no.into(),
            merchant_no: order_no.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelQueryParam {
    pub order_type: Direction,
}

/// Virtual account details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualResp {
    pub order_no: String,
    pub trx_no: String,
    pub account_no: String,
    pub account_name: String,
    pub bank_code: String,
    pub bank_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiveResp {
    pub order_no: String,
    pub trx_no: String,
    pub amount: i64,
    pub pay_url: String,
    pub status: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutResp {
    pub order_no: String,
    pub trx_no: String,
    pub amount: i64,
    pub status: i32,
}

/// Unified order-status record returned by both lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderQueryResp {
    pub order_no: String,
    pub trx_no: String,
    pub amount: i64,
    pub fee: i64,
    pub status: i32,
    pub message: String,
    pub pay_time: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelQueryResp {
    pub id: i32,
    pub name: String,
    pub min_amount: i64,
    pub max_amount: i64,
    /// Fee rate in basis points.
    pub rate: i64,
    pub status: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MerchantBalanceResp {
    pub balance: i64,
    pub frozen: i64,
    pub available: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_serializes_as_order_type_number() {
        let query = ChannelQueryParam {
            order_type: Direction::Payout,
        };
        assert_eq!(
            serde_json::to_string(&query).unwrap(),
            r#"{"orderType":2}"#
        );
        let err = serde_json::from_str::<ChannelQueryParam>(r#"{"orderType":7}"#).unwrap_err();
        assert!(err.to_string().contains("unknown order type 7"));
    }

    #[test]
    fn order_query_swaps_numbers_onto_wire_fields() {
        let query = OrderQueryParam::new("R1", "T1");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "orderNo": "T1", "merchantNo": "R1" })
        );
    }

    #[test]
    fn receive_request_omits_empty_return_url() {
        let request = ReceiveParam {
            order_no: "R1".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("returnUrl").is_none());
        assert_eq!(json["orderNo"], "R1");
        assert_eq!(json["notifyUrl"], "");
    }

    #[test]
    fn responses_default_missing_fields() {
        let resp: ReceiveResp = serde_json::from_str(r#"{"orderNo":"R1","trxNo":"T1"}"#).unwrap();
        assert_eq!(
            resp,
            ReceiveResp {
                order_no: "R1".into(),
                trx_no: "T1".into(),
                ..Default::default()
            }
        );
    }
}
