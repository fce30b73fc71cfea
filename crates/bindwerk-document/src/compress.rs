// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Booklet page compression.
//
// Re-encodes each merged page as JPEG at a configured quality. Color modes
// carrying an alpha channel are flattened to opaque RGB first; the alpha is
// discarded, not composited against a background. Pixel dimensions never
// change.

use std::path::Path;

use bindwerk_core::error::{BindwerkError, Result};
use bindwerk_core::report::StageReport;
use bindwerk_core::types::{BookletPage, RenderedPage};
use image::DynamicImage;
use tracing::{debug, info, instrument, warn};

use crate::scan::materialize::reset_dir;

/// JPEG re-encoder for merged booklet pages.
pub struct PageCompressor {
    /// JPEG quality on the 1–100 scale.
    quality: u8,
}

impl PageCompressor {
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }

    /// Re-encode a single page into `dest_dir` as `"Page {n}.jpg"`.
    #[instrument(skip_all, fields(page = page.number))]
    pub fn compress_page(&self, page: &BookletPage, dest_dir: &Path) -> Result<RenderedPage> {
        let img = image::open(&page.path).map_err(|err| {
            BindwerkError::Image(format!("failed to open {}: {}", page.path.display(), err))
        })?;

        let img = if img.color().has_alpha() {
            debug!("alpha channel present, flattening to RGB");
            DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        };

        let mut buffer = Vec::new();
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, self.quality);
        img.write_with_encoder(encoder).map_err(|err| {
            BindwerkError::Image(format!(
                "JPEG encoding failed for page {}: {}",
                page.number, err
            ))
        })?;

        let target = dest_dir.join(format!("Page {}.jpg", page.number));
        std::fs::write(&target, &buffer)?;

        debug!(target = %target.display(), bytes = buffer.len(), "page compressed");
        Ok(RenderedPage {
            number: page.number,
            path: target,
        })
    }

    /// Compress every page in order.
    ///
    /// A page whose re-encode fails is copied through unchanged as
    /// `"Page {n}.png"` and the failure recorded, so the document never
    /// loses a page.
    #[instrument(skip_all, fields(pages = pages.len(), dest = %dest_dir.display()))]
    pub fn compress_pages(
        &self,
        pages: &[BookletPage],
        dest_dir: &Path,
    ) -> Result<(Vec<RenderedPage>, StageReport)> {
        reset_dir(dest_dir)?;

        let mut report = StageReport::new("compress");
        let mut rendered = Vec::with_capacity(pages.len());

        for page in pages {
            let label = format!("Page {}", page.number);
            match self.compress_page(page, dest_dir) {
                Ok(out) => {
                    report.record_ok(label);
                    rendered.push(out);
                }
                Err(err) => {
                    warn!(page = page.number, error = %err, "compression failed, passing page through");
                    report.record_failure(label, err.to_string());
                    rendered.push(self.pass_through(page, dest_dir));
                }
            }
        }

        info!(
            ok = report.ok_count(),
            failed = report.failure_count(),
            "compression pass complete"
        );
        Ok((rendered, report))
    }

    /// Copy the original PNG into the compressed folder unchanged.
    fn pass_through(&self, page: &BookletPage, dest_dir: &Path) -> RenderedPage {
        let target = dest_dir.join(format!("Page {}.png", page.number));
        if let Err(err) = std::fs::copy(&page.path, &target) {
            warn!(page = page.number, error = %err, "pass-through copy failed");
        }
        RenderedPage {
            number: page.number,
            path: target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn booklet_page(dir: &Path, number: u32, image: impl FnOnce(&Path)) -> BookletPage {
        let path = dir.join(format!("Page {number}.png"));
        image(&path);
        BookletPage { number, path }
    }

    #[test]
    fn alpha_is_flattened_and_dimensions_survive() {
        let dir = tempfile::tempdir().unwrap();
        let page = booklet_page(dir.path(), 1, |path| {
            image::RgbaImage::new(20, 10).save(path).unwrap();
        });

        let out_dir = dir.path().join("compressed");
        std::fs::create_dir_all(&out_dir).unwrap();
        let rendered = PageCompressor::new(85).compress_page(&page, &out_dir).unwrap();

        let reread = image::open(&rendered.path).unwrap();
        assert_eq!((reread.width(), reread.height()), (20, 10));
        assert!(!reread.color().has_alpha());
        assert_eq!(rendered.path.extension().unwrap(), "jpg");
    }

    #[test]
    fn opaque_pages_compress_without_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let page = booklet_page(dir.path(), 2, |path| {
            image::RgbImage::new(8, 8).save(path).unwrap();
        });

        let out_dir = dir.path().join("compressed");
        std::fs::create_dir_all(&out_dir).unwrap();
        let rendered = PageCompressor::new(85).compress_page(&page, &out_dir).unwrap();

        let reread = image::open(&rendered.path).unwrap();
        assert_eq!((reread.width(), reread.height()), (8, 8));
    }

    #[test]
    fn unreadable_page_passes_through_with_failure_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let good = booklet_page(dir.path(), 1, |path| {
            image::RgbImage::new(4, 4).save(path).unwrap();
        });
        let bad = booklet_page(dir.path(), 2, |path| {
            std::fs::write(path, "not a png").unwrap();
        });

        let out_dir = dir.path().join("compressed");
        let (rendered, report) = PageCompressor::new(85)
            .compress_pages(&[good, bad], &out_dir)
            .unwrap();

        assert_eq!(rendered.len(), 2);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(rendered[0].path, out_dir.join("Page 1.jpg"));
        assert_eq!(rendered[1].path, out_dir.join("Page 2.png"));
        assert!(rendered[1].path.exists());
    }

    #[test]
    fn rerun_clears_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let page = booklet_page(dir.path(), 1, |path| {
            image::RgbImage::new(4, 4).save(path).unwrap();
        });

        let out_dir = dir.path().join("compressed");
        std::fs::create_dir_all(&out_dir).unwrap();
        std::fs::write(out_dir.join("Page 9.jpg"), "stale").unwrap();

        PageCompressor::new(85)
            .compress_pages(std::slice::from_ref(&page), &out_dir)
            .unwrap();

        assert!(out_dir.join("Page 1.jpg").exists());
        assert!(!out_dir.join("Page 9.jpg").exists());
    }

    #[test]
    fn pass_through_target_is_png_named() {
        let dir = tempfile::tempdir().unwrap();
        let page = BookletPage {
            number: 3,
            path: PathBuf::from("/nonexistent/Page 3.png"),
        };

        let out_dir = dir.path().join("compressed");
        let (rendered, report) = PageCompressor::new(85)
            .compress_pages(std::slice::from_ref(&page), &out_dir)
            .unwrap();

        assert_eq!(report.failure_count(), 1);
        assert_eq!(rendered[0].path, out_dir.join("Page 3.png"));
    }
}
