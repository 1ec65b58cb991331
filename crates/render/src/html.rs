//! Single-page HTML export.

use crate::theme::Palette;
use askama::Template;
use deck_core::export::{check_extension, ensure_parent_dir, placements};
use deck_core::{
    ChartData, ChartDescriptor, Error, ExportFormat, ExportRequest, Exporter, LayoutKind,
    Placement, Result, Slide,
};

#[derive(Template)]
#[template(path = "deck.html")]
struct DeckPage<'a> {
    title: &'a str,
    author: Option<&'a str>,
    palette: Palette,
    slides: Vec<SlideView>,
}

/// Lines of one zone.
struct TextBlock {
    bulleted: bool,
    lines: Vec<String>,
}

impl From<&Placement> for TextBlock {
    fn from(placement: &Placement) -> Self {
        Self {
            bulleted: placement.bulleted,
            lines: placement.lines.clone(),
        }
    }
}

struct ColumnView {
    zone: &'static str,
    image: Option<String>,
    block: TextBlock,
}

/// Chart title followed by its data as a two-column table.
struct ChartView {
    kind: String,
    title: String,
    label_header: &'static str,
    value_header: &'static str,
    rows: Vec<(String, String)>,
}

struct SlideView {
    id: usize,
    layout: &'static str,
    title_slide: bool,
    alt: String,
    heading: Option<String>,
    subtitles: Vec<String>,
    content: Option<TextBlock>,
    chart: Option<ChartView>,
    columns: Vec<ColumnView>,
    notes: Option<String>,
}

impl SlideView {
    fn new(slide: &Slide, include_notes: bool) -> Self {
        let layout = slide.layout.unwrap_or_else(|| slide.slide_type.default_layout());
        let mut view = Self {
            id: slide.id,
            layout: layout.name(),
            title_slide: layout == LayoutKind::TitleSlide,
            alt: slide.title.clone(),
            heading: None,
            subtitles: Vec::new(),
            content: None,
            chart: None,
            columns: Vec::new(),
            notes: if include_notes {
                slide.speaker_notes.clone()
            } else {
                None
            },
        };

        for placement in placements(slide) {
            match placement.zone {
                "title" => view.heading = Some(placement.lines.join(" ")),
                "subtitle" => view.subtitles = placement.lines,
                "content" => view.content = Some(TextBlock::from(&placement)),
                "chart" => view.chart = slide.chart.as_ref().map(ChartView::new),
                zone @ ("left" | "right" | "image" | "text") => view.columns.push(ColumnView {
                    zone,
                    image: match zone {
                        "image" => slide.content.image.clone(),
                        _ => None,
                    },
                    block: TextBlock::from(&placement),
                }),
                _ => {}
            }
        }
        view
    }
}

impl ChartView {
    fn new(chart: &ChartDescriptor) -> Self {
        let ((label_header, value_header), rows): ((&'static str, &'static str), Vec<(String, String)>) =
            match &chart.data {
                Some(ChartData::Categories { categories, values }) => (
                    ("Category", "Value"),
                    categories
                        .iter()
                        .zip(values)
                        .map(|(c, v)| (c.clone(), v.to_string()))
                        .collect(),
                ),
                Some(ChartData::Labels { labels, values }) => (
                    ("Label", "Value"),
                    labels
                        .iter()
                        .zip(values)
                        .map(|(l, v)| (l.clone(), v.to_string()))
                        .collect(),
                ),
                Some(ChartData::Series { x_data, y_data }) => (
                    ("X", "Y"),
                    x_data
                        .iter()
                        .zip(y_data)
                        .map(|(x, y)| {
                            let x = x.as_str().map_or_else(|| x.to_string(), str::to_string);
                            (x, y.to_string())
                        })
                        .collect(),
                ),
                Some(raw @ ChartData::Raw(_)) => (
                    ("Item", "Value"),
                    raw.summary_lines()
                        .into_iter()
                        .map(|line| match line.split_once(": ") {
                            Some((k, v)) => (k.to_string(), v.to_string()),
                            None => (line, String::new()),
                        })
                        .collect(),
                ),
                None => (("", ""), Vec::new()),
            };

        Self {
            kind: chart.kind.to_string(),
            title: chart.title.clone(),
            label_header,
            value_header,
            rows,
        }
    }
}

/// Exports decks as one self-contained HTML page.
#[derive(Debug, Default, Clone)]
pub struct HtmlExporter;

impl HtmlExporter {
    pub fn new() -> Self {
        Self
    }

    /// Render the whole page.
    pub fn render(&self, request: &ExportRequest<'_>) -> Result<String> {
        let include_notes = request.options.include_notes();
        let page = DeckPage {
            title: request.title().unwrap_or("Presentation"),
            author: request.author(),
            palette: Palette::for_theme(request.theme),
            slides: request
                .slides
                .iter()
                .map(|slide| SlideView::new(slide, include_notes))
                .collect(),
        };
        page.render()
            .map_err(|e| Error::ExportError(format!("HTML rendering failed: {}", e)))
    }
}

impl Exporter for HtmlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn export(&self, request: &ExportRequest<'_>) -> Result<()> {
        let path = request.output_path;
        check_extension(path, ExportFormat::Html);
        ensure_parent_dir(path)?;

        let html = self.render(request)?;
        std::fs::write(path, html).map_err(|e| {
            Error::ExportError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        log::info!(
            "Exported {} slides to HTML: {}",
            request.slides.len(),
            path.display()
        );
        Ok(())
    }
}
