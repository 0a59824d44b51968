//! Visit-history PDF rendering.
//!
//! Lays out an animal's profile and its visits on A4 pages. Text is set in
//! embedded DejaVu Sans so Cyrillic names and notes survive. Images (clinic
//! logo, animal photo) are referenced by URI and resolved through an
//! [`AssetLocator`]; only files inside the asset roots are ever opened, and
//! an image that does not resolve or cannot be decoded is left out.

use chrono::NaiveDate;
use printpdf::image_crate::GenericImageView;
use printpdf::{
    Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};
use vetrecords_core::assets::AssetLocator;
use vetrecords_db::models::animal::Animal;
use vetrecords_db::models::visit::Visit;

use super::layout::{chars_per_line, line_height_mm, wrap_text};
use super::ExportError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
/// Space reserved at the bottom of each page for the footer.
const FOOTER_MM: f32 = 10.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const LOGO_WIDTH_MM: f32 = 30.0;
const PHOTO_WIDTH_MM: f32 = 40.0;

const FONT_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const FONT_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

const TITLE_PT: f32 = 18.0;
const HEADING_PT: f32 = 13.0;
const BODY_PT: f32 = 10.5;
const FOOTER_PT: f32 = 8.0;

/// Everything needed to render one visit-history document.
#[derive(Debug, Clone)]
pub struct VisitHistory {
    pub animal: Animal,
    /// Display name of the animal's owner.
    pub owner_name: String,
    /// Visits, already ordered the way they should be printed.
    pub visits: Vec<Visit>,
    pub generated_on: NaiveDate,
    /// Static URI of the clinic logo, if any.
    pub logo_uri: Option<String>,
}

/// Render `history` to PDF bytes.
pub fn render_visit_history(
    history: &VisitHistory,
    locator: &impl AssetLocator,
) -> Result<Vec<u8>, ExportError> {
    let title = format!("Visit history - {}", history.animal.name);
    let mut writer = PageWriter::new(&title)?;

    // Header: logo, then title with the animal photo to the right.
    if let Some(uri) = history.logo_uri.as_deref() {
        if let Some(height) = writer.image(locator, uri, MARGIN_MM, LOGO_WIDTH_MM) {
            writer.skip(height + 4.0);
        }
    }

    let header_top = writer.y;
    let photo_bottom = history.animal.photo.as_deref().and_then(|uri| {
        let x = PAGE_WIDTH_MM - MARGIN_MM - PHOTO_WIDTH_MM;
        writer
            .image(locator, uri, x, PHOTO_WIDTH_MM)
            .map(|height| header_top - height)
    });

    writer.text_line("Visit history", TITLE_PT, true);
    writer.text_line(&history.animal.name, HEADING_PT, true);
    writer.skip(2.0);

    let profile_width = if photo_bottom.is_some() {
        CONTENT_WIDTH_MM - PHOTO_WIDTH_MM - 5.0
    } else {
        CONTENT_WIDTH_MM
    };
    for (label, value) in profile_fields(history) {
        writer.labelled(label, &value, profile_width);
    }

    // Keep the visit list clear of the photo.
    if let Some(bottom) = photo_bottom {
        if writer.y > bottom - 4.0 {
            writer.y = bottom - 4.0;
        }
    }

    writer.skip(4.0);
    writer.text_line(
        &format!("Visits ({})", history.visits.len()),
        HEADING_PT,
        true,
    );
    writer.skip(1.0);

    if history.visits.is_empty() {
        writer.text_line("No visits recorded.", BODY_PT, false);
    }

    for visit in &history.visits {
        // Keep a visit header together with at least one body line.
        writer.ensure_space(line_height_mm(BODY_PT) * 3.0);
        writer.text_line(
            &format!("{}  |  {}", visit.visit_date.format("%Y-%m-%d"), visit.doctor_name),
            BODY_PT,
            true,
        );
        writer.labelled("Reason", &visit.reason, CONTENT_WIDTH_MM);
        for (label, value) in [
            ("Diagnosis", &visit.diagnosis),
            ("Treatment", &visit.treatment),
            ("Notes", &visit.notes),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                writer.labelled(label, value, CONTENT_WIDTH_MM);
            }
        }
        writer.skip(3.0);
    }

    writer.finish(history.generated_on)
}

/// Profile rows printed under the title. Missing values print as "-".
fn profile_fields(history: &VisitHistory) -> Vec<(&'static str, String)> {
    let animal = &history.animal;
    let or_dash = |v: &Option<String>| {
        v.as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("-")
            .to_string()
    };
    vec![
        ("Species", animal.species.clone()),
        ("Breed", or_dash(&animal.breed)),
        ("Sex", or_dash(&animal.sex)),
        (
            "Date of birth",
            animal
                .date_of_birth
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Owner", history.owner_name.clone()),
    ]
}

/// Top-down text cursor over a growing list of pages.
struct PageWriter {
    doc: PdfDocumentReference,
    pages: Vec<PdfLayerReference>,
    /// Layer of the page currently being written.
    current: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Baseline of the next line, measured from the bottom edge.
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Page 1");
        let regular = doc.add_external_font(FONT_REGULAR)?;
        let bold = doc.add_external_font(FONT_BOLD)?;
        let first = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            pages: vec![first.clone()],
            current: first,
            regular,
            bold,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn new_page(&mut self) {
        let name = format!("Page {}", self.pages.len() + 1);
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), name);
        self.current = self.doc.get_page(page).get_layer(layer);
        self.pages.push(self.current.clone());
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    /// Start a new page unless `height` millimetres still fit on this one.
    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN_MM + FOOTER_MM {
            self.new_page();
        }
    }

    fn skip(&mut self, height: f32) {
        self.y -= height;
    }

    fn text_line(&mut self, text: &str, size: f32, bold: bool) {
        let height = line_height_mm(size);
        self.ensure_space(height);
        self.y -= height;
        let font = if bold { &self.bold } else { &self.regular };
        self.current
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
    }

    /// "Label: value", wrapped to `width_mm`, continuation lines indented.
    fn labelled(&mut self, label: &str, value: &str, width_mm: f32) {
        let text = format!("{label}: {value}");
        let max_chars = chars_per_line(width_mm, BODY_PT);
        for (i, line) in wrap_text(&text, max_chars).into_iter().enumerate() {
            if i == 0 {
                self.text_line(&line, BODY_PT, false);
            } else {
                self.text_line(&format!("    {line}"), BODY_PT, false);
            }
        }
    }

    /// Place the image behind `uri` with its top-left corner at `(x, self.y)`
    /// scaled to `width_mm`. Returns the rendered height, or `None` when the
    /// image was skipped.
    fn image(
        &mut self,
        locator: &impl AssetLocator,
        uri: &str,
        x: f32,
        width_mm: f32,
    ) -> Option<f32> {
        let Some(path) = locator.locate(uri) else {
            tracing::warn!(%uri, "Report image not found under the asset roots; leaving it out");
            return None;
        };
        let decoded = match printpdf::image_crate::open(&path) {
            Ok(img) => img,
            Err(e) => {
                tracing::warn!(%uri, path = %path.display(), error = %e, "Report image unreadable; leaving it out");
                return None;
            }
        };

        let (px_width, px_height) = decoded.dimensions();
        if px_width == 0 || px_height == 0 {
            return None;
        }
        let dpi = px_width as f32 * 25.4 / width_mm;
        let height_mm = px_height as f32 * 25.4 / dpi;

        self.ensure_space(height_mm);
        Image::from_dynamic_image(&decoded).add_to_layer(
            self.current.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(self.y - height_mm)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        Some(height_mm)
    }

    /// Stamp footers on every page and serialize the document.
    fn finish(self, generated_on: NaiveDate) -> Result<Vec<u8>, ExportError> {
        let total = self.pages.len();
        let generated = format!("Generated {}", generated_on.format("%Y-%m-%d"));
        for (i, layer) in self.pages.iter().enumerate() {
            let y = Mm(MARGIN_MM / 2.0);
            layer.use_text(generated.as_str(), FOOTER_PT, Mm(MARGIN_MM), y, &self.regular);
            layer.use_text(
                format!("Page {} of {}", i + 1, total),
                FOOTER_PT,
                Mm(PAGE_WIDTH_MM - MARGIN_MM - 22.0),
                y,
                &self.regular,
            );
        }

        Ok(self.doc.save_to_bytes()?)
    }
}
