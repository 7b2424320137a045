//! Midtrans notification signature verification.
//!
//! Midtrans signs the raw notification body with HMAC-SHA512 keyed by the
//! merchant server key and sends the lowercase hex digest in `x-signature`.

use hmac::{Hmac, Mac};
use http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha512;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Header carrying the notification signature. `HeaderMap` lookups are
/// case-insensitive.
pub const SIGNATURE_HEADER: &str = "x-signature";

type HmacSha512 = Hmac<Sha512>;

/// How to treat a notification that carries no signature header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSignaturePolicy {
    /// Unsigned notifications fail verification.
    #[default]
    Reject,
    /// Unsigned notifications pass with a warning.
    Allow,
}

/// Internal verifier failures. A mismatch is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Signing secret is empty")]
    MissingSecret,

    #[error("Signing secret rejected by HMAC")]
    InvalidKey,
}

/// Verifier for Midtrans notification signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureVerifier {
    missing_policy: MissingSignaturePolicy,
}

impl SignatureVerifier {
    /// Creates a verifier with the given policy for unsigned notifications.
    pub fn new(missing_policy: MissingSignaturePolicy) -> Self {
        Self { missing_policy }
    }

    /// Returns the configured policy for unsigned notifications.
    pub fn missing_policy(&self) -> MissingSignaturePolicy {
        self.missing_policy
    }

    /// Checks the `x-signature` header against the raw body.
    ///
    /// Must be called on the exact bytes received, before any parsing.
    ///
    /// # Errors
    ///
    /// - `MissingSecret` - the secret is empty
    /// - `InvalidKey` - the MAC refused the key
    pub fn verify(
        &self,
        body: &[u8],
        headers: &HeaderMap,
        secret: &SecretString,
    ) -> Result<bool, SignatureError> {
        let expected = sign(secret.expose_secret(), body)?;

        let Some(value) = headers.get(SIGNATURE_HEADER) else {
            return Ok(match self.missing_policy {
                MissingSignaturePolicy::Allow => {
                    tracing::warn!("notification has no signature header, accepting unsigned");
                    true
                }
                MissingSignaturePolicy::Reject => {
                    tracing::warn!("notification has no signature header, rejecting");
                    false
                }
            });
        };

        let Ok(received) = value.to_str() else {
            tracing::warn!("signature header is not valid text");
            return Ok(false);
        };

        let matches = constant_time_compare(expected.as_bytes(), received.as_bytes());
        if !matches {
            tracing::warn!("notification signature mismatch");
            tracing::debug!(received_signature = %received, "rejected signature");
        }
        Ok(matches)
    }
}

/// Computes the lowercase hex HMAC-SHA512 of `body` under `secret`.
///
/// # Errors
///
/// Returns `SignatureError::MissingSecret` for an empty secret.
pub fn sign(secret: &str, body: &[u8]) -> Result<String, SignatureError> {
    if secret.is_empty() {
        return Err(SignatureError::MissingSecret);
    }
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::InvalidKey)?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "SB-Mid-server-test-key";
    const BODY: &[u8] = br#"{"order_id":"NEXUS-PRO-1","transaction_status":"settlement"}"#;

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string())
    }

    fn headers_with(signature: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(signature).unwrap());
        headers
    }

    // ══════════════════════════════════════════════════════════════
    // Signing
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn sign_produces_lowercase_hex_sha512() {
        let signature = sign(TEST_SECRET, BODY).unwrap();

        assert_eq!(signature.len(), 128);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn sign_matches_known_vector() {
        // RFC 4231 test case 2
        let signature = sign("Jefe", b"what do ya want for nothing?").unwrap();

        assert_eq!(
            signature,
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn sign_rejects_empty_secret() {
        assert_eq!(sign("", BODY), Err(SignatureError::MissingSecret));
    }

    // ══════════════════════════════════════════════════════════════
    // Verification
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let verifier = SignatureVerifier::default();
        let headers = headers_with(&sign(TEST_SECRET, BODY).unwrap());

        assert_eq!(verifier.verify(BODY, &headers, &secret(TEST_SECRET)), Ok(true));
    }

    #[test]
    fn verify_header_name_is_case_insensitive() {
        let verifier = SignatureVerifier::default();
        let mut headers = HeaderMap::new();
        headers.insert(
            http::HeaderName::from_static("x-signature"),
            HeaderValue::from_str(&sign(TEST_SECRET, BODY).unwrap()).unwrap(),
        );
        let from_wire = http::HeaderName::from_bytes(b"X-Signature").unwrap();

        assert!(headers.contains_key(from_wire));
        assert_eq!(verifier.verify(BODY, &headers, &secret(TEST_SECRET)), Ok(true));
    }

    #[test]
    fn verify_uppercase_hex_fails() {
        let verifier = SignatureVerifier::default();
        let headers = headers_with(&sign(TEST_SECRET, BODY).unwrap().to_uppercase());

        assert_eq!(verifier.verify(BODY, &headers, &secret(TEST_SECRET)), Ok(false));
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let verifier = SignatureVerifier::default();
        let headers = headers_with(&sign("another-key", BODY).unwrap());

        assert_eq!(verifier.verify(BODY, &headers, &secret(TEST_SECRET)), Ok(false));
    }

    #[test]
    fn verify_tampered_body_fails() {
        let verifier = SignatureVerifier::default();
        let headers = headers_with(&sign(TEST_SECRET, BODY).unwrap());
        let tampered = br#"{"order_id":"NEXUS-PRO-1","transaction_status":"capture"}"#;

        assert_eq!(
            verifier.verify(tampered, &headers, &secret(TEST_SECRET)),
            Ok(false)
        );
    }

    #[test]
    fn verify_non_text_header_fails() {
        let verifier = SignatureVerifier::default();
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_bytes(&[0xfe, 0xff]).unwrap());

        assert_eq!(verifier.verify(BODY, &headers, &secret(TEST_SECRET)), Ok(false));
    }

    #[test]
    fn verify_empty_secret_is_an_error() {
        let verifier = SignatureVerifier::default();
        let headers = headers_with("abc");

        assert_eq!(
            verifier.verify(BODY, &headers, &secret("")),
            Err(SignatureError::MissingSecret)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Missing Header Policy
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn missing_header_rejected_by_default() {
        let verifier = SignatureVerifier::default();

        assert_eq!(verifier.missing_policy(), MissingSignaturePolicy::Reject);
        assert_eq!(
            verifier.verify(BODY, &HeaderMap::new(), &secret(TEST_SECRET)),
            Ok(false)
        );
    }

    #[test]
    fn missing_header_accepted_under_allow_policy() {
        let verifier = SignatureVerifier::new(MissingSignaturePolicy::Allow);

        assert_eq!(
            verifier.verify(BODY, &HeaderMap::new(), &secret(TEST_SECRET)),
            Ok(true)
        );
    }

    #[test]
    fn allow_policy_still_rejects_bad_signature() {
        let verifier = SignatureVerifier::new(MissingSignaturePolicy::Allow);
        let headers = headers_with("deadbeef");

        assert_eq!(verifier.verify(BODY, &headers, &secret(TEST_SECRET)), Ok(false));
    }

    #[test]
    fn policy_deserializes_from_lowercase() {
        let policy: MissingSignaturePolicy = serde_json::from_str("\"allow\"").unwrap();
        assert_eq!(policy, MissingSignaturePolicy::Allow);
    }

    // ══════════════════════════════════════════════════════════════
    // Properties
    // ══════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn correctly_signed_body_always_verifies(
            body in proptest::collection::vec(any::<u8>(), 0..512),
            key in "[ -~]{1,64}",
        ) {
            let verifier = SignatureVerifier::default();
            let headers = headers_with(&sign(&key, &body).unwrap());

            prop_assert_eq!(verifier.verify(&body, &headers, &secret(&key)), Ok(true));
        }

        #[test]
        fn any_other_signature_never_verifies(
            body in proptest::collection::vec(any::<u8>(), 0..512),
            key in "[ -~]{1,64}",
            forged in "[0-9a-f]{0,130}",
        ) {
            let expected = sign(&key, &body).unwrap();
            prop_assume!(forged != expected);
            let verifier = SignatureVerifier::new(MissingSignaturePolicy::Allow);
            let headers = headers_with(&forged);

            prop_assert_eq!(verifier.verify(&body, &headers, &secret(&key)), Ok(false));
        }
    }
}
