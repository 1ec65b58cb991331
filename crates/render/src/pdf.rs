//! PDF export with the standard Helvetica fonts.
//!
//! One 720x540 pt landscape page per slide. When speaker notes are
//! included, one notes page per annotated slide follows the slides.

use crate::theme::Palette;
use deck_core::export::{check_extension, ensure_parent_dir, placements};
use deck_core::{Error, ExportFormat, ExportRequest, Exporter, LayoutKind, Result, Slide};
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb};

const PAGE_WIDTH: f32 = 720.0;
const PAGE_HEIGHT: f32 = 540.0;
const MARGIN: f32 = 36.0;

/// Helvetica's average glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// Text drawn on a page.
#[derive(Debug, Clone, PartialEq)]
struct TextRun {
    x: f32,
    /// Baseline, from the bottom of the page.
    y: f32,
    size: f32,
    bold: bool,
    accent: bool,
    text: String,
}

/// Greedy word wrap to at most `max_chars` characters per line.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out a block of lines inside a box, top-down, clipped at its bottom.
fn layout_block(
    runs: &mut Vec<TextRun>,
    (x, y, w, h): (f64, f64, f64, f64),
    lines: &[String],
    size: f32,
    bullet: bool,
    bold: bool,
    accent: bool,
) {
    let left = (x as f32 * PAGE_WIDTH).max(MARGIN / 2.0);
    let top = PAGE_HEIGHT - y as f32 * PAGE_HEIGHT;
    let bottom = top - h as f32 * PAGE_HEIGHT;
    let leading = size * 1.3;
    let max_chars = ((w as f32 * PAGE_WIDTH) / (size * AVG_GLYPH_WIDTH)) as usize;

    let mut baseline = top - size;
    for line in lines {
        let wrapped = if bullet {
            wrap(line, max_chars.saturating_sub(2))
        } else {
            wrap(line, max_chars)
        };
        for (i, part) in wrapped.into_iter().enumerate() {
            if baseline < bottom {
                return;
            }
            let text = match (bullet, i) {
                (true, 0) => format!("\u{2022} {}", part),
                (true, _) => format!("  {}", part),
                (false, _) => part,
            };
            runs.push(TextRun {
                x: left,
                y: baseline,
                size,
                bold,
                accent,
                text,
            });
            baseline -= leading;
        }
    }
}

fn slide_runs(slide: &Slide) -> Vec<TextRun> {
    let layout = slide.layout.unwrap_or_else(|| slide.slide_type.default_layout());
    let title_slide = layout == LayoutKind::TitleSlide;
    let mut runs = Vec::new();
    for placement in placements(slide) {
        let (size, bold, accent) = match placement.zone {
            "title" if title_slide => (40.0, true, true),
            "title" => (28.0, true, true),
            "subtitle" => (22.0, false, false),
            _ => (16.0, false, false),
        };
        layout_block(
            &mut runs,
            placement.bounds,
            &placement.lines,
            size,
            placement.bulleted,
            bold,
            accent,
        );
    }
    runs
}

fn notes_runs(slide: &Slide, notes: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let heading = vec![format!("Notes: {}", slide.title)];
    layout_block(&mut runs, (0.05, 0.05, 0.90, 0.10), &heading, 24.0, false, true, true);
    let lines: Vec<String> = notes.lines().map(str::to_string).collect();
    layout_block(&mut runs, (0.05, 0.18, 0.90, 0.77), &lines, 14.0, false, false, false);
    runs
}

/// Text runs of every page: slides first, then notes pages when enabled.
fn page_runs(request: &ExportRequest<'_>) -> Vec<Vec<TextRun>> {
    let mut pages: Vec<Vec<TextRun>> = request.slides.iter().map(slide_runs).collect();
    if request.options.include_notes() {
        for slide in request.slides {
            if let Some(notes) = &slide.speaker_notes {
                pages.push(notes_runs(slide, notes));
            }
        }
    }
    pages
}

/// Fonts and colours shared by every page.
struct PageStyle {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    accent: Color,
    text: Color,
}

impl PageStyle {
    fn draw(&self, layer: &PdfLayerReference, runs: &[TextRun]) {
        for run in runs {
            let font = if run.bold { &self.bold } else { &self.regular };
            let color = if run.accent { &self.accent } else { &self.text };
            layer.set_fill_color(color.clone());
            layer.use_text(run.text.as_str(), run.size, mm(run.x), mm(run.y), font);
        }
    }
}

fn pdf_error(e: printpdf::Error) -> Error {
    Error::ExportError(format!("PDF generation failed: {}", e))
}

/// Exports decks as PDF documents.
#[derive(Debug, Default, Clone)]
pub struct PdfExporter;

impl PdfExporter {
    pub fn new() -> Self {
        Self
    }

    /// Render the whole document.
    pub fn render(&self, request: &ExportRequest<'_>) -> Result<Vec<u8>> {
        let palette = Palette::for_theme(request.theme);
        let (r, g, b) = palette.accent_rgb();
        let title = request.title().unwrap_or("Presentation");

        let (doc, first_page, first_layer) =
            PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Slide 1");
        let style = PageStyle {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
            accent: Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None)),
            text: Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)),
        };

        let mut pages = page_runs(request).into_iter();
        if let Some(runs) = pages.next() {
            style.draw(&doc.get_page(first_page).get_layer(first_layer), &runs);
        }
        for (i, runs) in pages.enumerate() {
            let (page, layer) =
                doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), format!("Slide {}", i + 2));
            style.draw(&doc.get_page(page).get_layer(layer), &runs);
        }

        doc.save_to_bytes().map_err(pdf_error)
    }
}

impl Exporter for PdfExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn export(&self, request: &ExportRequest<'_>) -> Result<()> {
        let path = request.output_path;
        check_extension(path, ExportFormat::Pdf);
        ensure_parent_dir(path)?;

        let bytes = self.render(request)?;
        std::fs::write(path, bytes).map_err(|e| {
            Error::ExportError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        log::info!(
            "Exported {} slides to PDF: {}",
            request.slides.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{ExportOptions, Metadata, SlideContent, SlideType};
    use serde_json::json;
    use std::path::Path;

    fn deck() -> Vec<Slide> {
        let title = Slide::new(
            0,
            "Revenue \u{20ac}12M",
            SlideType::Title,
            SlideContent::title("Revenue \u{20ac}12M", "Auto-generated Presentation"),
        );
        let mut body = Slide::new(
            1,
            "Highlights",
            SlideType::Content,
            SlideContent::bullets("Highlights", vec!["Revenue (net) up".into()]),
        );
        body.speaker_notes = Some("Slide: Highlights\n\nRevenue (net) up".to_string());
        vec![title, body]
    }

    fn with_request<T>(options: &ExportOptions, f: impl FnOnce(&ExportRequest<'_>) -> T) -> T {
        let slides = deck();
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!("Q1 Review"));
        let request = ExportRequest {
            slides: &slides,
            metadata: &metadata,
            output_path: Path::new("deck.pdf"),
            theme: "default",
            options,
        };
        f(&request)
    }

    fn texts(runs: &[TextRun]) -> Vec<&str> {
        runs.iter().map(|run| run.text.as_str()).collect()
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("supercalifragilistic", 5), vec!["supercalifragilistic"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn test_layout_block_clips_at_bottom() {
        let mut runs = Vec::new();
        let lines: Vec<String> = (0..50).map(|i| format!("line {}", i)).collect();
        layout_block(&mut runs, (0.1, 0.1, 0.8, 0.2), &lines, 16.0, false, false, false);

        assert!(!runs.is_empty());
        assert!(runs.len() < 50);
        let bottom = PAGE_HEIGHT - 0.3 * PAGE_HEIGHT;
        assert!(runs.iter().all(|run| run.y >= bottom - 0.01));
    }

    #[test]
    fn test_page_runs_with_notes() {
        let pages = with_request(&ExportOptions::new(), page_runs);

        // two slides plus one notes page
        assert_eq!(pages.len(), 3);
        assert_eq!(texts(&pages[0])[0], "Revenue \u{20ac}12M");
        assert_eq!(pages[0][0].size, 40.0);
        assert!(pages[0][0].bold && pages[0][0].accent);
        assert!(texts(&pages[1]).contains(&"\u{2022} Revenue (net) up"));
        assert_eq!(texts(&pages[2])[0], "Notes: Highlights");
    }

    #[test]
    fn test_notes_excluded() {
        let pages = with_request(&ExportOptions::new().with("include_notes", false), page_runs);
        assert_eq!(pages.len(), 2);
        assert!(pages
            .iter()
            .flatten()
            .all(|run| !run.text.starts_with("Notes:")));
    }

    #[test]
    fn test_render_document() {
        let bytes = with_request(&ExportOptions::new(), |request| {
            PdfExporter::new().render(request)
        })
        .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deck.pdf");
        let slides = deck();
        let metadata = Metadata::new();
        let options = ExportOptions::new();
        let request = ExportRequest {
            slides: &slides,
            metadata: &metadata,
            output_path: &path,
            theme: "minimal",
            options: &options,
        };
        PdfExporter::new().export(&request).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
    }
}
