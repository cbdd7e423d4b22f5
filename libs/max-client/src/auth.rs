use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;
use std::collections::HashMap;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to encode payload: {0}")]
    PayloadError(String),

    #[error("HMAC error: {0}")]
    HmacError(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

/// Payload and signature for one private request
#[derive(Debug, Clone)]
pub struct SignedPayload {
    /// Base64 of the JSON payload, sent as `X-MAX-PAYLOAD`
    pub encoded: String,
    /// Hex HMAC-SHA256 of `encoded`, sent as `X-MAX-SIGNATURE`
    pub signature: String,
}

/// MAX API key pair and request signer
pub struct MaxAuth {
    access_key: String,
    secret_key: String,
}

impl MaxAuth {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Sign the request parameters for `path` with the given nonce
    ///
    /// The payload is the parameters plus `path` and `nonce`.
    pub fn sign(&self, path: &str, params: &Map<String, Value>, nonce: i64) -> Result<SignedPayload> {
        let mut payload = params.clone();
        payload.insert("path".to_string(), Value::String(path.to_string()));
        payload.insert("nonce".to_string(), Value::from(nonce));

        let json = serde_json::to_string(&payload)
            .map_err(|e| AuthError::PayloadError(e.to_string()))?;
        let encoded = BASE64.encode(json.as_bytes());

        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| AuthError::HmacError(e.to_string()))?;
        mac.update(encoded.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(SignedPayload { encoded, signature })
    }

    /// Build authentication headers for a private request
    pub fn headers(&self, path: &str, params: &Map<String, Value>) -> Result<HashMap<String, String>> {
        let signed = self.sign(path, params, Self::current_nonce())?;

        let mut headers = HashMap::new();
        headers.insert("X-MAX-ACCESSKEY".to_string(), self.access_key.clone());
        headers.insert("X-MAX-PAYLOAD".to_string(), signed.encoded);
        headers.insert("X-MAX-SIGNATURE".to_string(), signed.signature);

        Ok(headers)
    }

    /// Current Unix timestamp in milliseconds
    pub fn current_nonce() -> i64 {
        Utc::now().timestamp_millis()
    }
}
