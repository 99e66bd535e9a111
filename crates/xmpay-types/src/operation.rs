//! The gateway operations shared by all transports.

use std::fmt::{Display, Formatter};

/// One of the seven operations exposed by the gateway.
///
/// Transports use it to pick the HTTP route or the gRPC method, and errors carry
/// it so a failure can be attributed without extra state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Open a deposit virtual account for a user.
    CreateVirtual,
    /// Create a collection order.
    CreateReceive,
    /// Look up a collection order.
    QueryReceive,
    /// Create a disbursement order.
    CreateOut,
    /// Look up a disbursement order.
    QueryOut,
    /// List channels available for a direction.
    ChannelQuery,
    /// Read the merchant balance.
    MerchantBalance,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 7] = [
        Operation::CreateVirtual,
        Operation::CreateReceive,
        Operation::QueryReceive,
        Operation::CreateOut,
        Operation::QueryOut,
        Operation::ChannelQuery,
        Operation::MerchantBalance,
    ];

    /// Stable name used in logs and error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::CreateVirtual => "create_virtual",
            Operation::CreateReceive => "create_receive",
            Operation::QueryReceive => "query_receive",
            Operation::CreateOut => "create_out",
            Operation::QueryOut => "query_out",
            Operation::ChannelQuery => "channel_query",
            Operation::MerchantBalance => "merchant_balance",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
