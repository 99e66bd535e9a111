//! Sealing requests into envelopes and opening response frames.
//!
//! This is the transport-independent half of every call. Both clients run exactly
//! this code before sending and after receiving, which is what keeps them
//! observably equivalent.

use serde::Serialize;
use serde::de::DeserializeOwned;
use xmpay_types::operation::Operation;
use xmpay_types::proto::{PayRpcParam, PayRpcResp};

use crate::cipher::CipherCodec;
use crate::error::{EncodeError, PayError};

/// Envelope builder and frame decoder bound to one merchant.
#[derive(Clone, Debug)]
pub struct EnvelopeCodec {
    access_id: String,
    cipher: CipherCodec,
}

impl EnvelopeCodec {
    pub fn new(access_id: impl Into<String>, cipher: CipherCodec) -> Self {
        Self {
            access_id: access_id.into(),
            cipher,
        }
    }

    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    pub fn cipher(&self) -> &CipherCodec {
        &self.cipher
    }

    /// Builds the outbound envelope.
    ///
    /// `None` yields an envelope with the merchant identifier only. Otherwise the
    /// request is serialized to JSON and encrypted into `data`.
    pub fn seal<T>(&self, operation: Operation, request: Option<&T>) -> Result<PayRpcParam, PayError>
    where
        T: Serialize + ?Sized,
    {
        let data = match request {
            None => None,
            Some(request) => Some(self.encrypt(request).map_err(|source| PayError::Encode {
                operation,
                source,
            })?),
        };
        tracing::debug!(%operation, has_body = data.is_some(), "sealed request envelope");
        Ok(PayRpcParam {
            app_key: self.access_id.clone(),
            data,
        })
    }

    fn encrypt<T: Serialize + ?Sized>(&self, request: &T) -> Result<String, EncodeError> {
        let plaintext = serde_json::to_vec(request)?;
        Ok(self.cipher.encode(&plaintext)?)
    }

    /// Decodes a response frame into `R`.
    ///
    /// A non-success code wins over whatever `data` holds.
    pub fn open<R>(&self, operation: Operation, frame: PayRpcResp) -> Result<R, PayError>
    where
        R: DeserializeOwned,
    {
        if !frame.is_success() {
            return Err(PayError::Gateway {
                operation,
                code: frame.code,
                message: frame.message,
            });
        }
        let plaintext = self
            .cipher
            .decode(&frame.data)
            .map_err(|source| PayError::Codec { operation, source })?;
        tracing::debug!(
            %operation,
            body = %String::from_utf8_lossy(&plaintext),
            "decrypted response payload"
        );
        serde_json::from_slice(&plaintext).map_err(|source| PayError::Decode {
            operation,
            context: "response payload",
            source,
        })
    }
}
