//! Signed image-proxy URL paths.
//!
//! A signed path is `"/" + base64url(HMAC-SHA256(key, salt || path)) + path`.
//! The proxy recomputes the digest on its side and refuses requests whose
//! leading segment does not match.
//!
//! ```
//! use imgsign::signature::sign_path;
//! use imgsign::encoding::decode_hex;
//!
//! let key = decode_hex("943b421c9eb07c830af81030552c86009268de4e532ba2ee2eab8247c6da0881").unwrap();
//! let salt = decode_hex("520f986b998545b4785e0defbc4f3c1203f22de2374a3d53cb7a7fe9fea309c5").unwrap();
//! let signed = sign_path(&key, &salt, "/rs:fit:300:300/plain/http://img.example.com/pretty/image.jpg").unwrap();
//! assert!(signed.starts_with("/m3k5QADfcKPDj-SDI2AIogZbC3FlAXszuwhtWXYqavc/"));
//! ```

use thiserror::Error;

pub mod config;
pub mod encoding;
pub mod path;
pub mod signature;

pub use crate::config::{ConfigError, SignerConfig};
pub use crate::path::{Gravity, ImagePath, ResizeType, SourceUrl};
pub use crate::signature::{sign_path, split_signed_path, SignatureError, Signer};

#[derive(Error, Debug)]
pub enum SignError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Crypto unavailable: {0}")]
    CryptoUnavailable(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, SignError>;
