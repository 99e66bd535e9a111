//! Default-filling for order-creating operations.
//!
//! Orders that leave `notify_url` empty or `pid` non-positive get the configured
//! value for their direction. Each rule is applied to a freshly built wire record;
//! the caller's parameters are only borrowed.

use xmpay_types::config::ClientConfig;
use xmpay_types::param::{OrderParam, OutParam, ReceiveParam};
use xmpay_types::proto::{self, Direction};

/// Defaults for one direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionDefaults {
    pub channel_id: i32,
    pub notify_url: String,
}

impl DirectionDefaults {
    fn apply(&self, notify_url: &mut String, pid: &mut i32) {
        if notify_url.is_empty() {
            notify_url.clone_from(&self.notify_url);
        }
        if *pid <= 0 {
            *pid = self.channel_id;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    pub deposit: DirectionDefaults,
    pub payout: DirectionDefaults,
}

impl Defaults {
    /// Reads the per-direction defaults from the configuration.
    ///
    /// Channel ids are parsed from their string form. A value that is not an integer
    /// becomes `0` and is logged; the gateway is left to reject it.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            deposit: DirectionDefaults {
                channel_id: parse_channel_id("in_id", &config.in_id),
                notify_url: config.in_notify_url.clone(),
            },
            payout: DirectionDefaults {
                channel_id: parse_channel_id("out_id", &config.out_id),
                notify_url: config.out_notify_url.clone(),
            },
        }
    }

    pub fn for_direction(&self, direction: Direction) -> &DirectionDefaults {
        match direction {
            Direction::Deposit => &self.deposit,
            Direction::Payout => &self.payout,
        }
    }

    pub fn virtual_request(&self, param: &OrderParam) -> proto::VirtualParam {
        let mut request = proto::VirtualParam::from(param);
        self.for_direction(Direction::Deposit)
            .apply(&mut request.notify_url, &mut request.pid);
        request
    }

    pub fn receive_request(&self, param: &ReceiveParam) -> proto::ReceiveParam {
        let mut request = proto::ReceiveParam::from(param);
        self.for_direction(Direction::Deposit)
            .apply(&mut request.notify_url, &mut request.pid);
        request
    }

    pub fn out_request(&self, param: &OutParam) -> proto::OutParam {
        let mut request = proto::OutParam::from(param);
        self.for_direction(Direction::Payout)
            .apply(&mut request.notify_url, &mut request.pid);
        request
    }
}

fn parse_channel_id(field: &'static str, raw: &str) -> i32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<i32>() {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!(field, value = raw, error = %err, "default channel id is not an integer, using 0");
            0
        }
    }
}
