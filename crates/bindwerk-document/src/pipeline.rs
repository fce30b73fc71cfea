// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end booklet pipeline.
//
// Stages hand their results forward in memory; the files written along the
// way are durability, not the inter-stage contract. Only a missing root
// folder is fatal — anything narrower is contained in a stage report and
// the run keeps going.

use std::path::PathBuf;

use bindwerk_core::config::BookletConfig;
use bindwerk_core::error::{BindwerkError, Result};
use bindwerk_core::report::StageReport;
use bindwerk_core::types::ProcessedSet;
use chrono::{DateTime, Utc};
use tracing::{error, info, instrument};

use crate::booklet::merge_sets;
use crate::compress::PageCompressor;
use crate::pdf::assemble::BookletAssembler;
use crate::scan::sets::{discover_sets, process_set};

/// Folder under the root receiving the merged page sequence.
pub const BOOKLET_DIR: &str = "booklet";
/// Folder under the booklet receiving the re-encoded pages.
pub const COMPRESSED_DIR: &str = "compressed";
/// Final document filename.
pub const PDF_NAME: &str = "booklet.pdf";

/// What one full run did, stage by stage.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    /// Scan sets that made it through the ordering stage.
    pub set_count: usize,
    /// Global booklet pages merged across all sets.
    pub page_count: usize,
    pub pdf_path: PathBuf,
    /// Per-stage item reports, in pipeline order.
    pub reports: Vec<StageReport>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.reports.iter().any(StageReport::has_failures)
    }
}

/// Sequential booklet build over a scan root folder.
pub struct BookletPipeline {
    root: PathBuf,
    config: BookletConfig,
}

impl BookletPipeline {
    pub fn new(root: impl Into<PathBuf>, config: BookletConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Run the full pipeline: discover sets, order and materialize each one,
    /// merge into the global page sequence, compress, and assemble the PDF.
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub fn run(&self) -> Result<RunSummary> {
        let started = Utc::now();
        if !self.root.exists() {
            return Err(BindwerkError::MissingRoot(self.root.clone()));
        }
        info!(root = %self.root.display(), "scan root found");

        let mut reports = Vec::new();

        // Ordering: each set is listed, paired, and materialized. A set that
        // fails wholesale is reported and skipped, never fatal.
        let sets = discover_sets(&self.root)?;
        let mut processed = Vec::with_capacity(sets.len());
        for set in sets {
            match process_set(&set) {
                Ok((ordered, report)) => {
                    reports.push(report);
                    processed.push(ProcessedSet { set, ordered });
                }
                Err(err) => {
                    error!(set = set.index, error = %err, "set processing failed, skipping");
                    let mut report = StageReport::new(format!("Set {}", set.index));
                    report.record_failure("ordering", err.to_string());
                    reports.push(report);
                }
            }
        }
        let set_count = processed.len();

        // Merge every set's ordered files into the global page sequence.
        let booklet_dir = self.root.join(BOOKLET_DIR);
        let (pages, merge_report) = merge_sets(&processed, &booklet_dir)?;
        reports.push(merge_report);

        // Re-encode each page at the configured quality.
        let compressor = PageCompressor::new(self.config.jpeg_quality);
        let (rendered, compress_report) =
            compressor.compress_pages(&pages, &booklet_dir.join(COMPRESSED_DIR))?;
        reports.push(compress_report);

        // Assemble and persist the final document.
        let pdf_path = booklet_dir.join(PDF_NAME);
        let assembler = BookletAssembler::new(self.config.paper_size);
        let assemble_report = assembler.write_to_file(&rendered, &pdf_path)?;
        reports.push(assemble_report);

        info!(
            sets = set_count,
            pages = pages.len(),
            pdf = %pdf_path.display(),
            "booklet build complete"
        );

        Ok(RunSummary {
            started,
            finished: Utc::now(),
            set_count,
            page_count: pages.len(),
            pdf_path,
            reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn seed_scan(path: &Path, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    fn seed_set(root: &Path, index: u32, fronts: &[&str], backs: &[&str]) {
        let set_dir = root.join(format!("Set {index}"));
        for (side, names) in [("front", fronts), ("back", backs)] {
            let side_dir = set_dir.join(side);
            std::fs::create_dir_all(&side_dir).unwrap();
            for name in names {
                seed_scan(&side_dir.join(name), 6, 9);
            }
        }
    }

    #[test]
    fn missing_root_is_fatal() {
        let pipeline = BookletPipeline::new("/nonexistent/Scans", BookletConfig::default());
        let err = pipeline.run().unwrap_err();
        assert!(matches!(err, BindwerkError::MissingRoot(_)));
    }

    #[test]
    fn full_run_builds_a_contiguous_booklet() {
        let dir = tempfile::tempdir().unwrap();
        seed_set(
            dir.path(),
            1,
            &["Scan.png", "Scan 2.png"],
            &["Scan.png", "Scan 2.png"],
        );
        seed_set(dir.path(), 2, &["Scan.png"], &[]);

        let pipeline = BookletPipeline::new(dir.path(), BookletConfig::default());
        let summary = pipeline.run().unwrap();

        // Set 1 contributes four pages (two sheets, both sides), Set 2 one.
        assert_eq!(summary.set_count, 2);
        assert_eq!(summary.page_count, 5);
        assert!(!summary.has_failures());

        let booklet = dir.path().join(BOOKLET_DIR);
        for n in 1..=5 {
            assert!(booklet.join(format!("Page {n}.png")).exists());
            assert!(booklet.join(COMPRESSED_DIR).join(format!("Page {n}.jpg")).exists());
        }
        assert!(!booklet.join("Page 6.png").exists());

        let pdf = std::fs::read(&summary.pdf_path).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_root_still_produces_a_document() {
        let dir = tempfile::tempdir().unwrap();

        let pipeline = BookletPipeline::new(dir.path(), BookletConfig::default());
        let summary = pipeline.run().unwrap();

        assert_eq!(summary.set_count, 0);
        assert_eq!(summary.page_count, 0);
        assert!(summary.pdf_path.exists());
    }

    #[test]
    fn rerun_with_fewer_sheets_drops_stale_pages() {
        let dir = tempfile::tempdir().unwrap();
        seed_set(
            dir.path(),
            1,
            &["Scan.png", "Scan 2.png", "Scan 3.png"],
            &[],
        );

        let pipeline = BookletPipeline::new(dir.path(), BookletConfig::default());
        pipeline.run().unwrap();
        assert!(dir.path().join(BOOKLET_DIR).join("Page 3.png").exists());

        // Remove one sheet and rerun: the booklet must shrink with it.
        std::fs::remove_file(dir.path().join("Set 1").join("front").join("Scan 3.png"))
            .unwrap();
        let summary = pipeline.run().unwrap();

        assert_eq!(summary.page_count, 2);
        assert!(!dir.path().join(BOOKLET_DIR).join("Page 3.png").exists());
    }
}
