//! Exporter seam and shared export helpers.

use crate::chart::ChartDescriptor;
use crate::error::{Error, Result};
use crate::types::{Metadata, Slide};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Output document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    PowerPoint,
    Pdf,
    GoogleSlides,
    Html,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        Self::PowerPoint,
        Self::Pdf,
        Self::GoogleSlides,
        Self::Html,
    ];

    /// Format name as accepted by [`ExportFormat::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::PowerPoint => "powerpoint",
            Self::Pdf => "pdf",
            Self::GoogleSlides => "google_slides",
            Self::Html => "html",
        }
    }

    /// Case-insensitive lookup by format name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|format| format.name() == name)
    }

    /// Detect format from an output file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::PowerPoint),
            "pdf" => Some(Self::Pdf),
            "json" => Some(Self::GoogleSlides),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    /// Conventional file extension for output in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::PowerPoint => "pptx",
            Self::Pdf => "pdf",
            Self::GoogleSlides => "json",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exporter-specific options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    params: BTreeMap<String, Value>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }

    /// Boolean option with a default for when it is unset or not a bool.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.params
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Whether speaker notes should be rendered (default: yes).
    pub fn include_notes(&self) -> bool {
        self.get_bool("include_notes", true)
    }
}

/// Everything an exporter receives for one export.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub slides: &'a [Slide],
    pub metadata: &'a Metadata,
    pub output_path: &'a Path,
    pub theme: &'a str,
    pub options: &'a ExportOptions,
}

impl<'a> ExportRequest<'a> {
    /// Deck title from metadata, if set.
    pub fn title(&self) -> Option<&'a str> {
        self.metadata.get("title").and_then(Value::as_str)
    }

    /// Author from the options, falling back to metadata.
    pub fn author(&self) -> Option<&'a str> {
        self.options
            .get_str("author")
            .or_else(|| self.metadata.get("author").and_then(Value::as_str))
    }
}

/// Renders a deck to one output format.
///
/// Implementations create missing output directories and report every
/// failure through the returned `Result`.
pub trait Exporter {
    fn format(&self) -> ExportFormat;

    fn export(&self, request: &ExportRequest<'_>) -> Result<()>;
}

/// Text placed into one layout zone of a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub zone: &'static str,
    /// (x, y, width, height) as fractions of the slide.
    pub bounds: (f64, f64, f64, f64),
    pub lines: Vec<String>,
    /// Whether the lines render as a bullet list.
    pub bulleted: bool,
}

/// Title line, when set, followed by one "label: value" line per data point.
pub fn chart_lines(chart: &ChartDescriptor) -> Vec<String> {
    let mut lines = Vec::new();
    if !chart.title.is_empty() {
        lines.push(chart.title.clone());
    }
    if let Some(data) = &chart.data {
        lines.extend(data.summary_lines());
    }
    lines
}

/// Fill the zones of a slide's layout with its content.
///
/// Slides without a layout use the default for their type. Zones with
/// nothing to show are skipped. A chart on a layout without a chart zone is
/// appended to the content zone.
pub fn placements(slide: &Slide) -> Vec<Placement> {
    let layout = slide.layout.unwrap_or_else(|| slide.slide_type.default_layout());
    let entry = layout.entry();
    let has_chart_zone = entry.zone("chart").is_some();
    let content = &slide.content;

    let text = |value: &Option<String>| value.iter().cloned().collect::<Vec<_>>();

    entry
        .zones
        .iter()
        .filter_map(|&(zone, placement)| {
            let (lines, bulleted) = match zone {
                "title" => (vec![slide.title.clone()], false),
                "subtitle" => (text(&content.subheading), false),
                "content" => {
                    let bulleted = !content.bullet_points().is_empty();
                    let mut lines = if bulleted {
                        content.bullet_points().to_vec()
                    } else {
                        text(&content.text)
                    };
                    if !has_chart_zone {
                        if let Some(chart) = &slide.chart {
                            lines.extend(chart_lines(chart));
                        }
                    }
                    (lines, bulleted)
                }
                "chart" => (slide.chart.as_ref().map(chart_lines).unwrap_or_default(), false),
                "left" => (text(&content.left_column), false),
                "right" => (text(&content.right_column), false),
                "image" => (
                    content
                        .image
                        .iter()
                        .map(|image| format!("[image: {}]", image))
                        .collect(),
                    false,
                ),
                "text" => (text(&content.text), false),
                _ => (Vec::new(), false),
            };
            if lines.is_empty() {
                None
            } else {
                Some(Placement {
                    zone,
                    bounds: placement.bounds(),
                    lines,
                    bulleted,
                })
            }
        })
        .collect()
}

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::ExportError(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// Warn when the output path's extension does not match the format.
pub fn check_extension(path: &Path, format: ExportFormat) {
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ExportFormat::from_extension)
        == Some(format);

    if !matches {
        log::warn!(
            "Output path should end with .{}: {}",
            format.extension(),
            path.display()
        );
    }
}
