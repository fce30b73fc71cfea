// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bindwerk — Core types, configuration, errors, and stage reports shared
// across all crates.

pub mod config;
pub mod error;
pub mod report;
pub mod types;

pub use config::BookletConfig;
pub use error::BindwerkError;
pub use report::{ItemReport, StageReport};
pub use types::*;
