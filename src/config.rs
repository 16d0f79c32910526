use crate::encoding::decode_hex;
use crate::signature::MAX_SIGNATURE_SIZE;
use thiserror::Error;

pub const KEY_VAR: &str = "IMGPROXY_KEY";
pub const SALT_VAR: &str = "IMGPROXY_SALT";
pub const SIGNATURE_SIZE_VAR: &str = "IMGPROXY_SIGNATURE_SIZE";
pub const TRUSTED_SIGNATURES_VAR: &str = "IMGPROXY_TRUSTED_SIGNATURES";

#[derive(Debug, Clone)]
pub struct SignerConfig {
    pub key: Vec<u8>,
    pub salt: Vec<u8>,
    pub signature_size: usize, // bytes of digest kept, 1..=32
    pub trusted_signatures: Vec<String>,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            key: Vec::new(),
            salt: Vec::new(),
            signature_size: MAX_SIGNATURE_SIZE,
            trusted_signatures: Vec::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Key is set but salt is empty")] MissingSalt,
    #[error("Salt is set but key is empty")] MissingKey,
    #[error("Signature size should be within 1 and 32, got {0}")] InvalidSignatureSize(usize),
    #[error("{var} is not a valid hex string: {reason}")]
    InvalidHex { var: &'static str, reason: String },
    #[error("{var} is not a valid number: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

impl SignerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.key.is_empty(), self.salt.is_empty()) {
            (false, true) => return Err(ConfigError::MissingSalt),
            (true, false) => return Err(ConfigError::MissingKey),
            (true, true) => tracing::warn!("No key and salt defined, signature checking is disabled"),
            (false, false) => {}
        }
        if self.signature_size == 0 || self.signature_size > MAX_SIGNATURE_SIZE {
            return Err(ConfigError::InvalidSignatureSize(self.signature_size));
        }
        Ok(())
    }

    pub fn is_signing_enabled(&self) -> bool {
        !self.key.is_empty() && !self.salt.is_empty()
    }

    /// Loads configuration from the process environment.
    ///
    /// # Environment
    /// - `IMGPROXY_KEY`: hex-encoded HMAC key
    /// - `IMGPROXY_SALT`: hex-encoded salt
    /// - `IMGPROXY_SIGNATURE_SIZE`: digest bytes kept in signatures (default: 32)
    /// - `IMGPROXY_TRUSTED_SIGNATURES`: comma-separated signatures accepted as-is
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`SignerConfig::from_env`] over an explicit set of variables.
    /// Unknown names are ignored, missing ones keep their defaults.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut cfg = Self::default();
        for (name, value) in vars {
            let value = value.as_ref();
            match name.as_ref() {
                KEY_VAR => cfg.key = parse_hex(KEY_VAR, value)?,
                SALT_VAR => cfg.salt = parse_hex(SALT_VAR, value)?,
                SIGNATURE_SIZE_VAR => {
                    cfg.signature_size = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                        var: SIGNATURE_SIZE_VAR,
                        value: value.to_string(),
                    })?
                }
                TRUSTED_SIGNATURES_VAR => {
                    cfg.trusted_signatures = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                }
                _ => {}
            }
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_hex(var: &'static str, value: &str) -> Result<Vec<u8>, ConfigError> {
    decode_hex(value.trim()).map_err(|e| ConfigError::InvalidHex { var, reason: e.to_string() })
}
