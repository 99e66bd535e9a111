//! State shared by both transport clients.

use tracing::Span;
use xmpay_types::config::ClientConfig;

use crate::cipher::CipherCodec;
use crate::defaults::Defaults;
use crate::envelope::EnvelopeCodec;
use crate::error::BuildError;

/// Configuration, envelope codec, defaults and log span of one client.
///
/// Built once per client and read-only afterwards, so concurrent calls share it
/// without locking.
#[derive(Clone, Debug)]
pub struct ClientCore {
    config: ClientConfig,
    envelope: EnvelopeCodec,
    defaults: Defaults,
    span: Span,
}

impl ClientCore {
    /// Derives the envelope key and reads the defaults.
    ///
    /// `model` names the client kind in the default span.
    pub fn new(config: ClientConfig, model: &'static str) -> Result<Self, BuildError> {
        let cipher = CipherCodec::new(config.access_id.as_bytes(), config.access_key.as_bytes())?;
        let envelope = EnvelopeCodec::new(config.access_id.clone(), cipher);
        let defaults = Defaults::from_config(&config);
        let span = tracing::debug_span!("xmpay", model);
        Ok(Self {
            config,
            envelope,
            defaults,
            span,
        })
    }

    /// Replaces the span every call of this client runs in.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn envelope(&self) -> &EnvelopeCodec {
        &self.envelope
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

/// Logs the outcome of a call. Errors are logged once here, not at each layer.
pub(crate) fn record_result<R, E: std::fmt::Display>(result: &Result<R, E>) {
    if let Err(err) = result {
        tracing::error!(error = %err, "gateway call failed");
    }
}
