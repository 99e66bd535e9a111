//! Core trait implemented by every gateway transport.
//!
//! The HTTP and gRPC clients expose exactly the same operations with the same
//! semantics: identical inputs against an identical gateway produce identical
//! responses and identically classified errors. Code that talks to the gateway
//! should be generic over [`PayClient`] rather than over a concrete transport.

use std::fmt::{Debug, Display};
use std::sync::Arc;

use crate::param::{OrderParam, OutParam, ReceiveParam};
use crate::proto;

/// Asynchronous interface to the XMPay gateway.
///
/// Every call is a single round trip bounded by the client's deadline. Nothing is
/// retried: on failure the caller decides, keyed on its merchant order number,
/// whether repeating the call is safe.
pub trait PayClient {
    /// The error type returned by this client.
    type Error: Debug + Display;

    /// Opens a deposit virtual account.
    ///
    /// An empty `notify_url` or a non-positive `pid` is replaced with the deposit defaults.
    fn create_virtual(
        &self,
        param: &OrderParam,
    ) -> impl Future<Output = Result<proto::VirtualResp, Self::Error>> + Send;

    /// Creates a collection order. Deposit defaults apply as for [`Self::create_virtual`].
    fn create_receive(
        &self,
        param: &ReceiveParam,
    ) -> impl Future<Output = Result<proto::ReceiveResp, Self::Error>> + Send;

    /// Looks up a collection order by merchant order number and/or gateway transaction number.
    fn query_receive(
        &self,
        order_no: &str,
        trx_no: &str,
    ) -> impl Future<Output = Result<proto::OrderQueryResp, Self::Error>> + Send;

    /// Creates a disbursement order. Payout defaults apply.
    fn create_out(
        &self,
        param: &OutParam,
    ) -> impl Future<Output = Result<proto::OutResp, Self::Error>> + Send;

    /// Looks up a disbursement order.
    fn query_out(
        &self,
        order_no: &str,
        trx_no: &str,
    ) -> impl Future<Output = Result<proto::OrderQueryResp, Self::Error>> + Send;

    /// Lists the channels available for a direction.
    fn channels(
        &self,
        direction: proto::Direction,
    ) -> impl Future<Output = Result<Vec<proto::ChannelQueryResp>, Self::Error>> + Send;

    /// Reads the merchant balance. Sends no request body.
    fn balance(
        &self,
    ) -> impl Future<Output = Result<proto::MerchantBalanceResp, Self::Error>> + Send;
}

impl<T: PayClient> PayClient for Arc<T> {
    type Error = T::Error;

    fn create_virtual(
        &self,
        param: &OrderParam,
    ) -> impl Future<Output = Result<proto::VirtualResp, Self::Error>> + Send {
        self.as_ref().create_virtual(param)
    }

    fn create_receive(
        &self,
        param: &ReceiveParam,
    ) -> impl Future<Output = Result<proto::ReceiveResp, Self::Error>> + Send {
        self.as_ref().create_receive(param)
    }

    fn query_receive(
        &self,
        order_no: &str,
        trx_no: &str,
    ) -> impl Future<Output = Result<proto::OrderQueryResp, Self::Error>> + Send {
        self.as_ref().query_receive(order_no, trx_no)
    }

    fn create_out(
        &self,
        param: &OutParam,
    ) -> impl Future<Output = Result<proto::OutResp, Self::Error>> + Send {
        self.as_ref().create_out(param)
    }

    fn query_out(
        &self,
        order_no: &str,
        trx_no: &str,
    ) -> impl Future<Output = Result<proto::OrderQueryResp, Self::Error>> + Send {
        self.as_ref().query_out(order_no, trx_no)
    }

    fn channels(
        &self,
        direction: proto::Direction,
    ) -> impl Future<Output = Result<Vec<proto::ChannelQueryResp>, Self::Error>> + Send {
        self.as_ref().channels(direction)
    }

    fn balance(
        &self,
    ) -> impl Future<Output = Result<proto::MerchantBalanceResp, Self::Error>> + Send {
        self.as_ref().balance()
    }
}
