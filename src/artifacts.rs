use crate::error::QuoteError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The two documents produced for one quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteArtifacts {
    /// XLSX workbook bytes.
    pub sheet: Vec<u8>,
    /// PDF bytes.
    pub document: Vec<u8>,
}

impl QuoteArtifacts {
    /// Base64 transport form, `{ "excel": ..., "pdf": ... }`.
    pub fn to_envelope(&self) -> QuoteEnvelope {
        QuoteEnvelope {
            excel: STANDARD.encode(&self.sheet),
            pdf: STANDARD.encode(&self.document),
        }
    }

    /// Writes `<stem>.xlsx` and `<stem>.pdf` into `dir`, creating it if needed.
    pub fn write_to_dir(&self, dir: &Path, stem: &str) -> Result<(PathBuf, PathBuf), QuoteError> {
        fs::create_dir_all(dir)?;
        let sheet_path = dir.join(format!("{}.xlsx", stem));
        let document_path = dir.join(format!("{}.pdf", stem));
        fs::write(&sheet_path, &self.sheet)?;
        fs::write(&document_path, &self.document)?;
        Ok((sheet_path, document_path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteEnvelope {
    pub excel: String,
    pub pdf: String,
}
