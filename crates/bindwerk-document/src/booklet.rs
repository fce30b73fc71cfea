// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cross-set merging.
//
// Concatenates every set's ordered files (sets ascending by index, pairs
// ascending, front before back) into one global page sequence numbered 1..N
// and copies each image into the booklet folder as "Page {n}.png".

use std::path::Path;

use bindwerk_core::error::Result;
use bindwerk_core::report::StageReport;
use bindwerk_core::types::{BookletPage, ProcessedSet};
use tracing::{debug, info, instrument, warn};

use crate::scan::materialize::reset_dir;

/// Booklet page filename for a global page number.
pub fn page_file_name(number: u32) -> String {
    format!("Page {}.png", number)
}

/// Merge all processed sets into the booklet folder.
///
/// Global page numbers are assigned contiguously across sets even when an
/// individual copy fails; the failure is recorded and the page keeps its
/// slot so later stages can still account for it. A set with nothing
/// materialized is skipped.
#[instrument(skip_all, fields(booklet = %booklet_dir.display(), sets = sets.len()))]
pub fn merge_sets(
    sets: &[ProcessedSet],
    booklet_dir: &Path,
) -> Result<(Vec<BookletPage>, StageReport)> {
    reset_dir(booklet_dir)?;

    let mut ordered: Vec<&ProcessedSet> = sets.iter().collect();
    ordered.sort_by_key(|processed| processed.set.index);

    let mut report = StageReport::new("merge");
    let mut pages = Vec::new();
    let mut next_page: u32 = 1;

    for processed in ordered {
        if processed.ordered.files.is_empty() {
            warn!(set = processed.set.index, "no ordered files, skipping set");
            continue;
        }
        info!(
            set = processed.set.index,
            files = processed.ordered.files.len(),
            "merging set"
        );

        let mut files: Vec<_> = processed.ordered.files.iter().collect();
        files.sort_by_key(|file| (file.pair_number, file.side));

        for file in files {
            let name = page_file_name(next_page);
            let target = booklet_dir.join(&name);
            match std::fs::copy(&file.path, &target) {
                Ok(_) => {
                    debug!(page = next_page, source = %file.path.display(), "page placed");
                    report.record_ok(name);
                }
                Err(err) => {
                    warn!(
                        page = next_page,
                        source = %file.path.display(),
                        error = %err,
                        "page copy failed"
                    );
                    report.record_failure(name, err.to_string());
                }
            }
            pages.push(BookletPage {
                number: next_page,
                path: target,
            });
            next_page += 1;
        }
    }

    info!(pages = pages.len(), "booklet sequence merged");
    Ok((pages, report))
}
