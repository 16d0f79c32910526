use crate::config::SignerConfig;
use crate::encoding::{decode_base64url, decode_hex, encode_base64url};
use crate::SignError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of an untruncated HMAC-SHA256 digest.
pub const MAX_SIGNATURE_SIZE: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("missing signature")] Missing,
    #[error("the signature appears to be a processing option")] Malformed,
    #[error("invalid signature encoding")] InvalidEncoding,
    #[error("invalid signature")] Invalid,
    #[error("invalid path: {0}")] InvalidPath(String),
}

fn check_inputs(key: &[u8], path: &str) -> Result<(), SignError> {
    if key.is_empty() {
        return Err(SignError::InvalidArgument("HMAC key must not be empty".into()));
    }
    if !path.starts_with('/') {
        return Err(SignError::InvalidArgument(format!("path must start with '/': {}", path)));
    }
    Ok(())
}

// HMAC-SHA256 over `salt || path`
fn keyed_mac(key: &[u8], salt: &[u8], path: &str) -> Result<HmacSha256, SignError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| SignError::CryptoUnavailable(e.to_string()))?;
    mac.update(salt);
    mac.update(path.as_bytes());
    Ok(mac)
}

/// Signs an image path with a full-length digest.
///
/// Returns `"/" + base64url_nopad(HMAC-SHA256(key, salt || path)) + path`.
/// The digest segment is always 43 characters.
///
/// # Errors
/// - `SignError::InvalidArgument` for an empty key or a path without a
///   leading `/`
/// - `SignError::CryptoUnavailable` if the HMAC primitive rejects the key
pub fn sign_path(key: &[u8], salt: &[u8], path: &str) -> Result<String, SignError> {
    check_inputs(key, path)?;
    let digest = keyed_mac(key, salt, path)?.finalize().into_bytes();
    let encoded = encode_base64url(&digest);
    tracing::debug!("Signed image path: path_len={}, signature_size={}", path.len(), MAX_SIGNATURE_SIZE);
    Ok(format!("/{}{}", encoded, path))
}

/// Splits a request path into its signature segment and the signed path.
///
/// Any query string is dropped and `prefix` (when given) is stripped first.
/// The returned path keeps its leading `/`, exactly as it was signed, and
/// has collapsed `scheme:/` sequences in plain source URLs restored.
pub fn split_signed_path(
    request_path: &str,
    prefix: Option<&str>,
) -> Result<(String, String), SignatureError> {
    let path = match request_path.split_once('?') {
        Some((p, _)) => p,
        None => request_path,
    };
    let path = match prefix {
        Some(prefix) => path.strip_prefix(prefix).unwrap_or(path),
        None => path,
    };
    let path = path.strip_prefix('/').unwrap_or(path);

    match path.find('/') {
        Some(end) if end > 0 => Ok((path[..end].to_string(), redenormalize_path(&path[end..]))),
        _ => Err(SignatureError::InvalidPath(request_path.to_string())),
    }
}

/// Restores `scheme://` inside a `/plain/` source URL after an HTTP layer
/// merged the double slash (`http:/host` becomes `http://host`,
/// `local:/file` becomes `local:///file`).
pub fn redenormalize_path(path: &str) -> String {
    const PLAIN: &str = "/plain/";

    let Some(idx) = path.find(PLAIN) else { return path.to_string() };
    let start = idx + PLAIN.len();
    let source = &path[start..];

    let Some(colon) = source.find(':') else { return path.to_string() };
    let scheme = &source[..colon];
    if !is_scheme(scheme) {
        return path.to_string();
    }

    let Some(rest) = source[colon + 1..].strip_prefix('/') else { return path.to_string() };
    if rest.is_empty() || rest.starts_with('/') {
        return path.to_string();
    }

    let fixed = if scheme == "local" {
        format!("{}:///{}", scheme, rest)
    } else {
        format!("{}://{}", scheme, rest)
    };
    format!("{}{}", &path[..start], fixed)
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Key material plus signing policy for one proxy deployment.
#[derive(Clone)]
pub struct Signer {
    key: Vec<u8>,
    salt: Vec<u8>,
    signature_size: usize,
    trusted_signatures: Vec<String>,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("key", &"<redacted>")
            .field("salt", &"<redacted>")
            .field("signature_size", &self.signature_size)
            .field("trusted_signatures", &self.trusted_signatures.len())
            .finish()
    }
}

impl Signer {
    pub fn new(key: impl Into<Vec<u8>>, salt: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            salt: salt.into(),
            signature_size: MAX_SIGNATURE_SIZE,
            trusted_signatures: Vec::new(),
        }
    }

    /// Builds a signer from hex-encoded key and salt.
    pub fn from_hex(key: &str, salt: &str) -> Result<Self, SignError> {
        Ok(Self::new(decode_hex(key)?, decode_hex(salt)?))
    }

    /// Builds a signer from a configuration, validating it first.
    ///
    /// # Errors
    /// Returns `SignError::Config` when the key and salt are not both set
    /// (or both unset), or when the signature size is outside 1..=32.
    pub fn from_config(config: &SignerConfig) -> Result<Self, SignError> {
        config.validate()?;
        Ok(Self {
            key: config.key.clone(),
            salt: config.salt.clone(),
            signature_size: config.signature_size,
            trusted_signatures: config.trusted_signatures.clone(),
        })
    }

    /// Truncates produced and expected signatures to `size` bytes (1..=32).
    pub fn with_signature_size(mut self, size: usize) -> Result<Self, SignError> {
        if size == 0 || size > MAX_SIGNATURE_SIZE {
            return Err(SignError::InvalidArgument(format!(
                "signature size must be within 1 and {}, got {}",
                MAX_SIGNATURE_SIZE, size
            )));
        }
        self.signature_size = size;
        Ok(self)
    }

    /// Signatures accepted verbatim by [`Signer::verify`].
    pub fn with_trusted_signatures(mut self, signatures: Vec<String>) -> Self {
        self.trusted_signatures = signatures;
        self
    }

    pub fn signature_size(&self) -> usize {
        self.signature_size
    }

    /// Verification is skipped entirely when no key is configured.
    ///
    /// Only the key decides this. A signer built with [`Signer::new`] may
    /// carry an empty salt and still enforces signatures, since
    /// `salt || path` with an empty salt is a valid message. Configuration
    /// loaded through [`Signer::from_config`] never reaches that state:
    /// validation rejects a key without a salt.
    pub fn is_enabled(&self) -> bool {
        !self.key.is_empty()
    }

    /// The encoded signature segment for `path`, without the path itself.
    pub fn signature(&self, path: &str) -> Result<String, SignError> {
        check_inputs(&self.key, path)?;
        let digest = keyed_mac(&self.key, &self.salt, path)?.finalize().into_bytes();
        Ok(encode_base64url(&digest[..self.signature_size]))
    }

    /// Signs `path`, producing `"/" + signature + path`.
    pub fn sign(&self, path: &str) -> Result<String, SignError> {
        let signature = self.signature(path)?;
        tracing::debug!("Signed image path: path_len={}, signature_size={}", path.len(), self.signature_size);
        Ok(format!("/{}{}", signature, path))
    }

    /// Checks `signature` against the digest of `path` in constant time.
    pub fn verify(&self, signature: &str, path: &str) -> Result<(), SignatureError> {
        if !self.is_enabled() {
            return Ok(());
        }
        if signature.is_empty() {
            tracing::warn!("Signature verification failed for path={}: missing signature", path);
            return Err(SignatureError::Missing);
        }
        if self.trusted_signatures.iter().any(|s| s == signature) {
            tracing::debug!("Accepted trusted signature for path={}", path);
            return Ok(());
        }

        let tag = match decode_base64url(signature) {
            Ok(tag) => tag,
            Err(_) => {
                let err = if signature.contains(':') {
                    SignatureError::Malformed
                } else {
                    SignatureError::InvalidEncoding
                };
                tracing::warn!("Signature verification failed for path={}: {}", path, err);
                return Err(err);
            }
        };

        if tag.len() != self.signature_size {
            tracing::warn!(
                "Signature verification failed for path={}: expected {} bytes, got {}",
                path,
                self.signature_size,
                tag.len()
            );
            return Err(SignatureError::Invalid);
        }

        let mac = keyed_mac(&self.key, &self.salt, path).map_err(|_| SignatureError::Invalid)?;
        mac.verify_truncated_left(&tag).map_err(|_| {
            tracing::warn!("Signature verification failed for path={}: digest mismatch", path);
            SignatureError::Invalid
        })
    }

    /// Splits a full request path and verifies it, returning the signed path.
    pub fn verify_signed_path(
        &self,
        request_path: &str,
        prefix: Option<&str>,
    ) -> Result<String, SignatureError> {
        let (signature, path) = split_signed_path(request_path, prefix)?;
        self.verify(&signature, &path)?;
        Ok(path)
    }
}
