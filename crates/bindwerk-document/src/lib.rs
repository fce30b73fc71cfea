// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bindwerk-document — Scan ordering and booklet rendering for Bindwerk.
//
// Provides the duplex scan pipeline (filename ordering, front/back pairing,
// ordered-file materialization, cross-set merging) and the rendering stages
// (JPEG compression, PDF assembly), plus the end-to-end pipeline runner.

pub mod booklet;
pub mod compress;
pub mod pdf;
pub mod pipeline;
pub mod scan;

// Re-export the primary entry points so callers can use
// `bindwerk_document::BookletPipeline` etc.
pub use compress::PageCompressor;
pub use pdf::assemble::BookletAssembler;
pub use pipeline::{BookletPipeline, RunSummary};
