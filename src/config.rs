use crate::error::QuoteError;
use quotedoc_types::{IssuerProfile, NumberFormat};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_HEADER_LOGO: &str = "public/logo.png";
pub const DEFAULT_WATERMARK: &str = "public/logo_union.png";

/// Everything an assembler needs besides the request itself.
///
/// Every field is optional in JSON; omitted fields take the defaults, which
/// reproduce the stock issuer and asset names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssemblerConfig {
    pub issuer: IssuerProfile,
    pub number_format: NumberFormat,
    /// Resource name of the header logo; `None` disables it.
    pub header_logo: Option<String>,
    /// Resource name of the page watermark; `None` disables it.
    pub watermark: Option<String>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            issuer: IssuerProfile::default(),
            number_format: NumberFormat::default(),
            header_logo: Some(DEFAULT_HEADER_LOGO.to_string()),
            watermark: Some(DEFAULT_WATERMARK.to_string()),
        }
    }
}

impl AssemblerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, QuoteError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, QuoteError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            QuoteError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    pub fn with_issuer(mut self, issuer: IssuerProfile) -> Self {
        self.issuer = issuer;
        self
    }
}

/// Reads a standalone issuer profile, as passed to the CLI with `--issuer`.
pub fn load_issuer<P: AsRef<Path>>(path: P) -> Result<IssuerProfile, QuoteError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .map_err(|e| QuoteError::Config(format!("failed to read '{}': {}", path.display(), e)))?;
    Ok(serde_json::from_str(&json)?)
}
