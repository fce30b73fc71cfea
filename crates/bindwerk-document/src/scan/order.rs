// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan filename ordering.
//
// Duplex scanners emit "Scan.png" for the first capture and "Scan <k>.png"
// for every later one. The page index is recovered with an explicit pattern
// capture; a name that does not match sorts after every parsable name.

use std::path::Path;

use bindwerk_core::error::Result;
use bindwerk_core::types::{ScanFile, Side};
use tracing::{debug, instrument, warn};

/// Canonical first-capture filename, carrying index 0.
const CANONICAL_NAME: &str = "Scan.png";
/// Prefix of every subsequent capture.
const SCAN_PREFIX: &str = "Scan ";
/// Extension produced by the scanner.
const SCAN_SUFFIX: &str = ".png";

/// Parse the page index out of a scan filename.
///
/// `"Scan.png"` is index 0; `"Scan 7.png"` is index 7. Anything else yields
/// `None` — never an error; callers sort unparsable names last.
pub fn page_index(name: &str) -> Option<u32> {
    if name == CANONICAL_NAME {
        return Some(0);
    }
    name.strip_prefix(SCAN_PREFIX)?
        .strip_suffix(SCAN_SUFFIX)?
        .parse()
        .ok()
}

/// Sort scans ascending by page index, unparsable names strictly last, with
/// the filename as a deterministic tiebreak.
pub fn sort_scans(files: &mut [ScanFile]) {
    files.sort_by(|a, b| {
        index_rank(a)
            .cmp(&index_rank(b))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn index_rank(file: &ScanFile) -> (bool, u32) {
    match file.index {
        Some(index) => (false, index),
        None => (true, 0),
    }
}

/// List the PNG scans of one side folder, in index order.
///
/// A missing folder yields an empty listing: an uneven duplex batch is a
/// pairing anomaly, not an error.
#[instrument(skip_all, fields(dir = %dir.display(), side = ?side))]
pub fn list_side(dir: &Path, side: Side) -> Result<Vec<ScanFile>> {
    if !dir.is_dir() {
        warn!("side folder missing, treating as empty");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(SCAN_SUFFIX) {
            continue;
        }
        files.push(ScanFile {
            index: page_index(&name),
            path: entry.path(),
            name,
            side,
        });
    }
    sort_scans(&mut files);

    debug!(count = files.len(), "side folder listed");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scan(name: &str) -> ScanFile {
        ScanFile {
            name: name.to_string(),
            path: PathBuf::from(name),
            index: page_index(name),
            side: Side::Front,
        }
    }

    #[test]
    fn canonical_name_is_index_zero() {
        assert_eq!(page_index("Scan.png"), Some(0));
    }

    #[test]
    fn numbered_names_parse() {
        assert_eq!(page_index("Scan 1.png"), Some(1));
        assert_eq!(page_index("Scan 42.png"), Some(42));
    }

    #[test]
    fn non_matching_names_have_no_index() {
        assert_eq!(page_index("Scan2.png"), None);
        assert_eq!(page_index("Scan x.png"), None);
        assert_eq!(page_index("Notes.png"), None);
        assert_eq!(page_index("Scan 3.jpg"), None);
        assert_eq!(page_index(""), None);
    }

    #[test]
    fn unparsable_names_sort_after_parsable_ones() {
        let mut files = vec![
            scan("zzz.png"),
            scan("Scan 10.png"),
            scan("Scan.png"),
            scan("Scan 2.png"),
            scan("aaa.png"),
        ];
        sort_scans(&mut files);

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            ["Scan.png", "Scan 2.png", "Scan 10.png", "aaa.png", "zzz.png"]
        );
    }

    #[test]
    fn missing_folder_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = list_side(&dir.path().join("front"), Side::Front).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn listing_orders_by_index_and_skips_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Scan 2.png", "Scan.png", "Scan 10.png", "thumbs.db"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = list_side(dir.path(), Side::Back).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Scan.png", "Scan 2.png", "Scan 10.png"]);
        assert!(files.iter().all(|f| f.side == Side::Back));
    }
}
