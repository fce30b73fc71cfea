// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Front/back pairing.
//
// Fronts are scanned in reading order. Automatic duplex scanning captures
// the backs in physically reversed order, so the back listing is consumed
// from its tail backward: pair N joins the N-th front with the N-th back
// counted from the end.

use bindwerk_core::types::{ScanFile, SheetPair};
use tracing::info;

/// Join two index-sorted side listings into positional sheet pairs.
///
/// Produces exactly `max(front.len(), back.len())` pairs. Every input file
/// lands in exactly one pair; a missing counterpart stays `None`.
pub fn build_pairs(front: &[ScanFile], back: &[ScanFile]) -> Vec<SheetPair> {
    let count = front.len().max(back.len());
    (0..count)
        .map(|i| SheetPair {
            number: (i + 1) as u32,
            front: front.get(i).cloned(),
            back: back.len().checked_sub(i + 1).map(|j| back[j].clone()),
        })
        .collect()
}

/// Report the full pairing plan before any file is copied.
pub fn log_pairing_plan(pairs: &[SheetPair]) {
    for pair in pairs {
        let front = pair.front.as_ref().map_or("no front scan", |f| f.name.as_str());
        let back = pair.back.as_ref().map_or("no back scan", |f| f.name.as_str());
        info!(pair = pair.number, front, back, "pairing");
    }
}
