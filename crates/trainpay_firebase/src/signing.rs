//! V4 signed URLs for Cloud Storage objects.
//!
//! Implements the `GOOG4-RSA-SHA256` scheme: build a canonical request for a
//! `GET` of the object, hash it into a string-to-sign and sign that with the
//! service account's RSA key. Only the `host` header is signed and the payload
//! is `UNSIGNED-PAYLOAD`, which is what a plain browser download needs.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use ring::rand::SystemRandom;
use ring::signature::{RsaKeyPair, RSA_PKCS1_SHA256};
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::error::StorageError;

pub const SIGNING_ALGORITHM: &str = "GOOG4-RSA-SHA256";

/// Longest expiry Cloud Storage accepts for a V4 signature (7 days).
pub const MAX_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// Signs read URLs on behalf of one service account.
pub struct UrlSigner {
    client_email: String,
    key_pair: RsaKeyPair,
    host: String,
    rng: SystemRandom,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("client_email", &self.client_email)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl UrlSigner {
    /// `private_key_pem` is the PKCS#8 PEM block from the service account JSON.
    ///
    /// Only an unencrypted `PRIVATE KEY` block is accepted. Encrypted PKCS#8
    /// and PKCS#1 `RSA PRIVATE KEY` blocks fail with [`StorageError::Credentials`].
    pub fn new(
        client_email: impl Into<String>,
        private_key_pem: &str,
        host: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let der = pem_to_der(private_key_pem)?;
        let key_pair = RsaKeyPair::from_pkcs8(&der)
            .map_err(|e| StorageError::Credentials(format!("invalid private key: {e}")))?;

        Ok(Self {
            client_email: client_email.into(),
            key_pair,
            host: host.into(),
            rng: SystemRandom::new(),
        })
    }

    /// A URL that allows `GET` of `object` in `bucket` from `issued_at` until `issued_at + ttl`.
    pub fn signed_get_url(
        &self,
        bucket: &str,
        object: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, StorageError> {
        let expires = ttl.as_secs();
        if expires == 0 || expires > MAX_EXPIRY_SECS {
            return Err(StorageError::SigningError(format!(
                "expiry of {expires}s is outside 1..={MAX_EXPIRY_SECS}"
            )));
        }

        let datestamp = issued_at.format("%Y%m%d").to_string();
        let timestamp = issued_at.format("%Y%m%dT%H%M%SZ").to_string();
        let credential_scope = format!("{datestamp}/auto/storage/goog4_request");
        let credential = format!("{}/{}", self.client_email, credential_scope);

        let resource = format!("/{}/{}", bucket, encode_object_path(object));

        // Already sorted by parameter name, as the canonical form requires.
        let query = [
            ("X-Goog-Algorithm", SIGNING_ALGORITHM.to_string()),
            ("X-Goog-Credential", credential),
            ("X-Goog-Date", timestamp.clone()),
            ("X-Goog-Expires", expires.to_string()),
            ("X-Goog-SignedHeaders", "host".to_string()),
        ]
        .iter()
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

        let canonical_request = format!(
            "GET\n{resource}\n{query}\nhost:{host}\n\nhost\nUNSIGNED-PAYLOAD",
            host = self.host
        );
        let string_to_sign = format!(
            "{SIGNING_ALGORITHM}\n{timestamp}\n{credential_scope}\n{}",
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let signature = self.sign(string_to_sign.as_bytes())?;

        Ok(format!(
            "https://{}{}?{}&X-Goog-Signature={}",
            self.host, resource, query, signature
        ))
    }

    fn sign(&self, message: &[u8]) -> Result<String, StorageError> {
        let mut signature = vec![0; self.key_pair.public().modulus_len()];
        self.key_pair
            .sign(&RSA_PKCS1_SHA256, &self.rng, message, &mut signature)
            .map_err(|_| StorageError::SigningError("RSA signing failed".to_string()))?;
        Ok(hex::encode(signature))
    }
}

/// Percent-encodes each path segment, keeping the `/` separators.
pub fn encode_object_path(object: &str) -> String {
    object
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub(crate) fn pem_to_der(pem: &str) -> Result<Vec<u8>, StorageError> {
    let body: String = pem
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("-----"))
        .collect();

    STANDARD
        .decode(body)
        .map_err(|e| StorageError::Credentials(format!("private key is not valid PEM: {e}")))
}
