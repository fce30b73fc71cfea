// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Booklet PDF assembly — one document page per rendered page, each image
// scaled isotropically to fit the page and exactly centered.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised
// via `PdfDocument::save()`.

use std::path::Path;

use bindwerk_core::error::{BindwerkError, Result};
use bindwerk_core::report::StageReport;
use bindwerk_core::types::{PaperSize, RenderedPage};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

/// Pixels are mapped 1:1 to points before fitting, so the fit math runs
/// directly on pixel dimensions.
const RENDER_DPI: f32 = 72.0;

/// Placement of an image on a page: one uniform scale and a centered origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    /// Uniform scale factor applied to both dimensions.
    pub scale: f32,
    /// Left edge of the drawn image, in page units.
    pub x: f32,
    /// Bottom edge of the drawn image, in page units.
    pub y: f32,
    /// Drawn width.
    pub width: f32,
    /// Drawn height.
    pub height: f32,
}

/// Fit an image into a page: `scale = min(W/w, H/h)`, centered.
///
/// Images smaller than the page scale up; aspect ratio is always preserved.
pub fn fit_page(img_w: f32, img_h: f32, page_w: f32, page_h: f32) -> FitTransform {
    let scale = (page_w / img_w).min(page_h / img_h);
    let width = img_w * scale;
    let height = img_h * scale;
    FitTransform {
        scale,
        x: (page_w - width) / 2.0,
        y: (page_h - height) / 2.0,
        width,
        height,
    }
}

/// Multi-page PDF builder for the compressed booklet sequence.
pub struct BookletAssembler {
    /// Paper size for every page of the document.
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

impl BookletAssembler {
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: "Booklet".into(),
        }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm), Mm(h_mm))
    }

    /// Assemble one PDF page per rendered page, in order.
    ///
    /// A page whose image cannot be decoded is recorded in the report and
    /// skipped; every readable page keeps its position.
    #[instrument(skip_all, fields(pages = pages.len()))]
    pub fn assemble(&self, pages: &[RenderedPage]) -> Result<(Vec<u8>, StageReport)> {
        let (page_w, page_h) = self.page_dimensions();
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;

        let mut doc = PdfDocument::new(self.title.as_str());
        let mut pdf_pages: Vec<PdfPage> = Vec::with_capacity(pages.len());
        let mut report = StageReport::new("assemble");

        for page in pages {
            let label = format!("Page {}", page.number);
            match place_page(&mut doc, page, page_w_pt, page_h_pt) {
                Ok(ops) => {
                    pdf_pages.push(PdfPage::new(page_w, page_h, ops));
                    report.record_ok(label);
                }
                Err(err) => {
                    warn!(page = page.number, error = %err, "page skipped");
                    report.record_failure(label, err.to_string());
                }
            }
        }

        // An empty sequence still serialises as a valid single-page document.
        if pdf_pages.is_empty() {
            pdf_pages.push(PdfPage::new(page_w, page_h, Vec::new()));
        }

        doc.with_pages(pdf_pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

        info!(
            pages = report.ok_count(),
            bytes = bytes.len(),
            "booklet PDF serialised"
        );
        Ok((bytes, report))
    }

    /// Assemble and write the document to `path`.
    pub fn write_to_file(
        &self,
        pages: &[RenderedPage],
        path: impl AsRef<Path>,
    ) -> Result<StageReport> {
        let (bytes, report) = self.assemble(pages)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote booklet PDF to {}", path.as_ref().display());
        Ok(report)
    }
}

/// Decode one page image and build the ops that draw it centered on a page
/// of the given point dimensions.
fn place_page(
    doc: &mut PdfDocument,
    page: &RenderedPage,
    page_w_pt: f32,
    page_h_pt: f32,
) -> Result<Vec<Op>> {
    let img = image::open(&page.path).map_err(|err| {
        BindwerkError::Pdf(format!("failed to decode {}: {}", page.path.display(), err))
    })?;

    let (img_w, img_h) = (img.width(), img.height());
    let rgb = img.to_rgb8();
    let raw = RawImage {
        pixels: RawImageData::U8(rgb.into_raw()),
        width: img_w as usize,
        height: img_h as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    let image_id = doc.add_image(&raw);

    // At 72 dpi one pixel is one point, so the fit runs on pixel sizes.
    let fit = fit_page(img_w as f32, img_h as f32, page_w_pt, page_h_pt);
    debug!(
        page = page.number,
        scale = fit.scale,
        x = fit.x,
        y = fit.y,
        "page placed"
    );

    Ok(vec![Op::UseXobject {
        id: image_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(fit.x)),
            translate_y: Some(Pt(fit.y)),
            scale_x: Some(fit.scale),
            scale_y: Some(fit.scale),
            dpi: Some(RENDER_DPI),
            rotate: None,
        },
    }])
}
