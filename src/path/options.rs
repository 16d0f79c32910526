use crate::encoding::encode_base64url;
use crate::path::encryption::encrypt_source_url;
use crate::SignError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the proxy fits the source into the requested box
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeType {
    Fit,
    Fill,
    FillDown,
    Force,
    Auto,
}

impl fmt::Display for ResizeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeType::Fit => write!(f, "fit"),
            ResizeType::Fill => write!(f, "fill"),
            ResizeType::FillDown => write!(f, "fill-down"),
            ResizeType::Force => write!(f, "force"),
            ResizeType::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for ResizeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fit" => Ok(ResizeType::Fit),
            "fill" => Ok(ResizeType::Fill),
            "fill-down" => Ok(ResizeType::FillDown),
            "force" => Ok(ResizeType::Force),
            "auto" => Ok(ResizeType::Auto),
            _ => Err(format!("Invalid resize type: {}", s)),
        }
    }
}

/// Anchor used when cropping
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum Gravity {
    #[serde(rename = "no")]
    North,
    #[serde(rename = "so")]
    South,
    #[serde(rename = "ea")]
    East,
    #[serde(rename = "we")]
    West,
    #[serde(rename = "noea")]
    NorthEast,
    #[serde(rename = "nowe")]
    NorthWest,
    #[serde(rename = "soea")]
    SouthEast,
    #[serde(rename = "sowe")]
    SouthWest,
    #[serde(rename = "ce")]
    Center,
    #[serde(rename = "sm")]
    Smart,
}

impl Gravity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gravity::North => "no",
            Gravity::South => "so",
            Gravity::East => "ea",
            Gravity::West => "we",
            Gravity::NorthEast => "noea",
            Gravity::NorthWest => "nowe",
            Gravity::SouthEast => "soea",
            Gravity::SouthWest => "sowe",
            Gravity::Center => "ce",
            Gravity::Smart => "sm",
        }
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gravity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no" => Ok(Gravity::North),
            "so" => Ok(Gravity::South),
            "ea" => Ok(Gravity::East),
            "we" => Ok(Gravity::West),
            "noea" => Ok(Gravity::NorthEast),
            "nowe" => Ok(Gravity::NorthWest),
            "soea" => Ok(Gravity::SouthEast),
            "sowe" => Ok(Gravity::SouthWest),
            "ce" => Ok(Gravity::Center),
            "sm" => Ok(Gravity::Smart),
            _ => Err(format!("Invalid gravity: {}", s)),
        }
    }
}

/// The source image reference at the end of a path.
///
/// `Encoded` renders as `{base64url(url)}.{ext}`, `Plain` as
/// `plain/{url}@{ext}` and `Encrypted` as `enc/{base64url(iv || ciphertext)}.{ext}`.
/// The extension selects the output format.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SourceUrl {
    Encoded { url: String, extension: Option<String> },
    Plain { url: String, extension: Option<String> },
    Encrypted { url: String, payload: Vec<u8>, extension: Option<String> },
}

impl SourceUrl {
    pub fn encoded(url: impl Into<String>) -> Self {
        SourceUrl::Encoded { url: url.into(), extension: None }
    }

    pub fn plain(url: impl Into<String>) -> Self {
        SourceUrl::Plain { url: url.into(), extension: None }
    }

    /// AES-CBC encrypts `url` under `key` with the given 16-byte IV.
    /// Encrypted sources should always be signed.
    pub fn encrypted(url: impl Into<String>, key: &[u8], iv: &[u8]) -> Result<Self, SignError> {
        let url = url.into();
        let payload = encrypt_source_url(key, iv, &url)?;
        Ok(SourceUrl::Encrypted { url, payload, extension: None })
    }

    pub fn with_extension(self, ext: impl Into<String>) -> Self {
        let ext = Some(ext.into());
        match self {
            SourceUrl::Encoded { url, .. } => SourceUrl::Encoded { url, extension: ext },
            SourceUrl::Plain { url, .. } => SourceUrl::Plain { url, extension: ext },
            SourceUrl::Encrypted { url, payload, .. } => SourceUrl::Encrypted { url, payload, extension: ext },
        }
    }

    pub fn url(&self) -> &str {
        match self {
            SourceUrl::Encoded { url, .. }
            | SourceUrl::Plain { url, .. }
            | SourceUrl::Encrypted { url, .. } => url,
        }
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceUrl::Encoded { url, extension } => {
                write!(f, "{}", encode_base64url(url.as_bytes()))?;
                if let Some(ext) = extension {
                    write!(f, ".{}", ext)?;
                }
            }
            SourceUrl::Plain { url, extension } => {
                write!(f, "plain/{}", url)?;
                if let Some(ext) = extension {
                    write!(f, "@{}", ext)?;
                }
            }
            SourceUrl::Encrypted { payload, extension, .. } => {
                write!(f, "enc/{}", encode_base64url(payload))?;
                if let Some(ext) = extension {
                    write!(f, ".{}", ext)?;
                }
            }
        }
        Ok(())
    }
}
