// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ordered-file materialization.
//
// Writes each pair's scans under the canonical "{n}.png" / "{n}b.png" names.
// The destination is cleared first so a rerun cannot leave stale sheets from
// an earlier, larger batch behind.

use std::path::Path;

use bindwerk_core::error::Result;
use bindwerk_core::report::StageReport;
use bindwerk_core::types::{OrderedFile, OrderedFileSet, SheetPair, Side};
use tracing::{debug, instrument, warn};

/// Copy a pairing sequence into `dest` under the canonical naming scheme.
///
/// Each file copy is attempted independently; a failure is recorded against
/// that file alone and the remaining copies still run. The returned set
/// lists the files actually written, in final within-set order (ascending
/// pair number, front before back).
#[instrument(skip_all, fields(dest = %dest.display(), pairs = pairs.len()))]
pub fn materialize(
    pairs: &[SheetPair],
    dest: &Path,
    report: &mut StageReport,
) -> Result<OrderedFileSet> {
    reset_dir(dest)?;

    let mut files = Vec::new();
    for pair in pairs {
        for scan in [pair.front.as_ref(), pair.back.as_ref()].into_iter().flatten() {
            let target = dest.join(OrderedFile::file_name(pair.number, scan.side));
            match std::fs::copy(&scan.path, &target) {
                Ok(_) => {
                    debug!(
                        source = %scan.path.display(),
                        target = %target.display(),
                        "sheet image copied"
                    );
                    report.record_ok(scan.name.as_str());
                    files.push(OrderedFile {
                        pair_number: pair.number,
                        side: scan.side,
                        path: target,
                    });
                }
                Err(err) => {
                    warn!(
                        source = %scan.path.display(),
                        error = %err,
                        "sheet image copy failed"
                    );
                    report.record_failure(scan.name.as_str(), err.to_string());
                }
            }
        }
    }

    Ok(OrderedFileSet {
        dir: dest.to_path_buf(),
        files,
    })
}

/// Parse an ordered-file name back into its (pair number, side) identity.
///
/// Inverse of [`OrderedFile::file_name`]; the original scan filename is not
/// recoverable.
pub fn parse_ordered_name(name: &str) -> Option<(u32, Side)> {
    let stem = name.strip_suffix(".png")?;
    match stem.strip_suffix('b') {
        Some(number) => Some((number.parse().ok()?, Side::Back)),
        None => Some((stem.parse().ok()?, Side::Front)),
    }
}

/// Remove and recreate a destination directory so reruns are idempotent.
pub(crate) fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}
