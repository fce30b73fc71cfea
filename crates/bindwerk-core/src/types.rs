// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bindwerk booklet builder.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which physical side of a sheet a scan captures.
///
/// The ordering matters: for the same pair number, the front page precedes
/// the back page in the final booklet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    /// Filename marker in the ordered-file naming scheme: fronts carry none,
    /// backs carry a trailing `b`.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Front => "",
            Self::Back => "b",
        }
    }
}

/// A scan image discovered in a `front/` or `back/` folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFile {
    /// Bare filename inside the side folder, e.g. "Scan 3.png".
    pub name: String,
    /// Full path to the source image.
    pub path: PathBuf,
    /// Page index parsed from the filename. `None` when the name does not
    /// match the scanner's pattern; such files sort after every parsable one.
    pub index: Option<u32>,
    pub side: Side,
}

/// One physical sheet: a front and/or back scan joined by position.
///
/// A missing counterpart is recorded, not an error — duplex batches are
/// allowed to be uneven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPair {
    /// 1-based position in the longer of the two side listings.
    pub number: u32,
    pub front: Option<ScanFile>,
    pub back: Option<ScanFile>,
}

/// A scan-set folder ("Set 3") found directly under the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSet {
    /// Integer carried in the folder name; sets are totally ordered by it.
    pub index: u32,
    pub path: PathBuf,
}

/// One materialized sheet image inside an `ordered_files/` folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedFile {
    pub pair_number: u32,
    pub side: Side,
    pub path: PathBuf,
}

impl OrderedFile {
    /// Canonical filename: `"{n}.png"` for fronts, `"{n}b.png"` for backs.
    pub fn file_name(pair_number: u32, side: Side) -> String {
        format!("{}{}.png", pair_number, side.marker())
    }
}

/// The materialized output of one scan set, in final within-set order
/// (ascending pair number, front before back).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedFileSet {
    pub dir: PathBuf,
    pub files: Vec<OrderedFile>,
}

/// A scan set together with its materialized output, handed from the
/// ordering stage to the merger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedSet {
    pub set: ScanSet,
    pub ordered: OrderedFileSet,
}

/// A page of the merged booklet, before compression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookletPage {
    /// 1-based global page number across all sets.
    pub number: u32,
    pub path: PathBuf,
}

/// A booklet page after re-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPage {
    pub number: u32,
    pub path: PathBuf,
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    ///
    /// Letter is 215.9 × 279.4 mm, i.e. the 612 × 792 pt page the booklet
    /// output targets by default.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_sorts_before_back() {
        assert!(Side::Front < Side::Back);
    }

    #[test]
    fn ordered_file_names_carry_back_marker() {
        assert_eq!(OrderedFile::file_name(3, Side::Front), "3.png");
        assert_eq!(OrderedFile::file_name(3, Side::Back), "3b.png");
    }

    #[test]
    fn letter_matches_reportlab_points() {
        let (w_mm, h_mm) = PaperSize::Letter.dimensions_mm();
        // 1 mm = 72/25.4 pt
        let to_pt = 72.0 / 25.4;
        assert!((w_mm * to_pt - 612.0).abs() < 0.01);
        assert!((h_mm * to_pt - 792.0).abs() < 0.01);
    }
}
