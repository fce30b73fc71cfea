// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-item stage reporting.
//
// Every pipeline stage records the outcome of each item it attempts instead
// of failing wholesale. The caller inspects the report afterwards and
// decides whether any failure should escalate.

use serde::{Deserialize, Serialize};

/// Outcome of one attempted item within a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReport {
    /// Human-readable item label, typically a filename.
    pub label: String,
    /// `None` on success, the failure cause otherwise.
    pub failure: Option<String>,
}

/// Collected per-item outcomes for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: String,
    pub items: Vec<ItemReport>,
}

impl StageReport {
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            items: Vec::new(),
        }
    }

    pub fn record_ok(&mut self, label: impl Into<String>) {
        self.items.push(ItemReport {
            label: label.into(),
            failure: None,
        });
    }

    pub fn record_failure(&mut self, label: impl Into<String>, cause: impl Into<String>) {
        self.items.push(ItemReport {
            label: label.into(),
            failure: Some(cause.into()),
        });
    }

    pub fn ok_count(&self) -> usize {
        self.items.iter().filter(|item| item.failure.is_none()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.items.len() - self.ok_count()
    }

    pub fn has_failures(&self) -> bool {
        self.items.iter().any(|item| item.failure.is_some())
    }

    /// Iterate over the failed items only.
    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(|item| item.failure.is_some())
    }
}
