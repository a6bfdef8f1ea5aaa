//! Slack request signature verification (`v0` scheme).
//!
//! # Security
//!
//! - HMAC-SHA256 over `v0:{timestamp}:{body}` with constant-time comparison
//! - Timestamp validation (5-minute window) for replay protection
//! - Signing secret held as `secrecy::SecretString`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the Unix timestamp Slack signed.
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Header carrying `v0=<hex digest>`.
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

const VERSION: &str = "v0";

/// Maximum accepted clock distance either way (5 minutes).
const MAX_TIMESTAMP_SKEW_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),

    #[error("invalid request timestamp")]
    InvalidTimestamp,

    #[error("request timestamp outside the accepted window ({age_secs}s)")]
    StaleTimestamp { age_secs: i64 },

    #[error("malformed signature header")]
    InvalidSignatureFormat,

    #[error("signature mismatch")]
    Mismatch,
}

/// Verifies inbound Slack requests against the app's signing secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    signing_secret: SecretString,
}

impl SignatureVerifier {
    pub fn new(signing_secret: SecretString) -> Self {
        Self { signing_secret }
    }

    /// Verifies against the current wall clock.
    pub fn verify(
        &self,
        timestamp: Option<&str>,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<(), SignatureError> {
        self.verify_at(timestamp, signature, body, chrono::Utc::now().timestamp())
    }

    pub fn verify_at(
        &self,
        timestamp: Option<&str>,
        signature: Option<&str>,
        body: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        let timestamp = timestamp.ok_or(SignatureError::MissingHeader(TIMESTAMP_HEADER))?;
        let signature = signature.ok_or(SignatureError::MissingHeader(SIGNATURE_HEADER))?;

        let ts: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| SignatureError::InvalidTimestamp)?;

        let age = now
            .checked_sub(ts)
            .ok_or(SignatureError::InvalidTimestamp)?;
        if age.unsigned_abs() > MAX_TIMESTAMP_SKEW_SECS.unsigned_abs() {
            tracing::warn!(
                request_timestamp = ts,
                current_time = now,
                age_secs = age,
                "Slack request timestamp outside window - possible replay"
            );
            return Err(SignatureError::StaleTimestamp { age_secs: age });
        }

        let provided = signature
            .trim()
            .strip_prefix("v0=")
            .and_then(hex_decode)
            .ok_or(SignatureError::InvalidSignatureFormat)?;

        let expected = self.sign(ts, body)?;

        if expected.as_slice().ct_eq(&provided).unwrap_u8() != 1 {
            tracing::warn!("Invalid Slack request signature");
            return Err(SignatureError::Mismatch);
        }

        Ok(())
    }

    fn sign(&self, timestamp: i64, body: &[u8]) -> Result<Vec<u8>, SignatureError> {
        let mut mac =
            HmacSha256::new_from_slice(self.signing_secret.expose_secret().as_bytes())
                .map_err(|_| SignatureError::Mismatch)?;
        mac.update(format!("{}:{}:", VERSION, timestamp).as_bytes());
        mac.update(body);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Produces a `v0=` header value for `body`. Used by tests and local tooling.
    pub fn signature_for(&self, timestamp: i64, body: &[u8]) -> Option<String> {
        self.sign(timestamp, body)
            .ok()
            .map(|digest| format!("{}={}", VERSION, hex_encode(&digest)))
    }
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let byte = u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()?;
        bytes.push(byte);
    }
    Some(bytes)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
