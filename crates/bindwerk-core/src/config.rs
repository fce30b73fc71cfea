// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Booklet build configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PaperSize;

/// Settings for the compression and assembly stages.
///
/// Page dimensions and the JPEG quality level are explicit named fields
/// handed to the compressor and assembler, not constants buried in either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookletConfig {
    /// Page size of the output document.
    pub paper_size: PaperSize,
    /// JPEG re-encode quality (1–100).
    pub jpeg_quality: u8,
}

impl Default for BookletConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter,
            jpeg_quality: 85,
        }
    }
}

impl BookletConfig {
    /// Load configuration from a JSON file, falling back to the defaults
    /// when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
