// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan-set discovery and per-set processing.
//
// A scan set is a folder named "Set <N>" directly under the root, holding a
// front/ and a back/ subfolder of captures from one physical stack.

use std::path::Path;

use bindwerk_core::error::Result;
use bindwerk_core::report::StageReport;
use bindwerk_core::types::{OrderedFileSet, ScanSet, Side};
use tracing::{debug, info, instrument};

use crate::scan::materialize::materialize;
use crate::scan::order::list_side;
use crate::scan::pairing::{build_pairs, log_pairing_plan};

/// Folder name prefix identifying a scan set.
const SET_PREFIX: &str = "Set ";
/// Subfolder receiving the materialized sheet images.
pub const ORDERED_DIR: &str = "ordered_files";
/// Subfolder holding front-side captures.
pub const FRONT_DIR: &str = "front";
/// Subfolder holding back-side captures.
pub const BACK_DIR: &str = "back";

/// Parse the set index out of a folder name ("Set 3" → 3).
pub fn set_index(name: &str) -> Option<u32> {
    name.strip_prefix(SET_PREFIX)?.parse().ok()
}

/// Enumerate the scan-set folders directly under `root`, ascending by index.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn discover_sets(root: &Path) -> Result<Vec<ScanSet>> {
    let mut sets = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        match set_index(&name) {
            Some(index) => {
                info!(set = index, "scan set found");
                sets.push(ScanSet { index, path });
            }
            None => debug!(folder = %name, "not a scan set, skipping"),
        }
    }
    sets.sort_by_key(|set| set.index);
    Ok(sets)
}

/// Run the ordering half of the pipeline for one scan set: list both sides,
/// pair them, and materialize the ordered files.
#[instrument(skip_all, fields(set = set.index))]
pub fn process_set(set: &ScanSet) -> Result<(OrderedFileSet, StageReport)> {
    let front = list_side(&set.path.join(FRONT_DIR), Side::Front)?;
    let back = list_side(&set.path.join(BACK_DIR), Side::Back)?;
    info!(front = front.len(), back = back.len(), "side folders listed");

    let pairs = build_pairs(&front, &back);
    log_pairing_plan(&pairs);

    let mut report = StageReport::new(format!("Set {}", set.index));
    let ordered = materialize(&pairs, &set.path.join(ORDERED_DIR), &mut report)?;
    Ok((ordered, report))
}
