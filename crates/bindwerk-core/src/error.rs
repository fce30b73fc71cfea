// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bindwerk.
//
// Only a missing scan root is fatal to a run. Anything narrower — a single
// copy, decode, or encode going wrong — is recorded per item in a
// `StageReport` and never escalated here.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Bindwerk operations.
#[derive(Debug, Error)]
pub enum BindwerkError {
    /// The configured scan root does not exist. Aborts the run before any
    /// processing starts.
    #[error("scan root folder does not exist: {}", .0.display())]
    MissingRoot(PathBuf),

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BindwerkError>;
