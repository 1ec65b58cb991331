//! Deck lifecycle: build slides, attach charts, export.
//!
//! The orchestrator owns one [`Deck`] for a build session. Collaborator
//! failures (data fetches, exporters) are logged and turned into return
//! values; they never leave the deck half-modified.

use crate::advisor::LayoutAdvisor;
use crate::builder::{DeckModelBuilder, DeckStatistics};
use crate::chart::{ChartBuilder, ChartData, ChartParams};
use crate::data::{DataSet, DataSource};
use crate::error::{Error, Result};
use crate::export::{ExportFormat, ExportOptions, ExportRequest, Exporter};
use crate::types::{Deck, Metadata, Slide};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Builds one deck and dispatches it to exporters.
pub struct DeckOrchestrator {
    theme: String,
    deck: Deck,
    builder: DeckModelBuilder,
    advisor: LayoutAdvisor,
    charts: ChartBuilder,
    data_source: Option<Box<dyn DataSource>>,
    dataset: Option<DataSet>,
    exporters: HashMap<ExportFormat, Box<dyn Exporter>>,
}

impl DeckOrchestrator {
    /// Create an orchestrator with the given theme and no collaborators.
    pub fn new(theme: impl Into<String>) -> Self {
        let theme = theme.into();
        log::info!("DeckOrchestrator initialized with theme: {}", theme);
        Self {
            theme,
            deck: Deck::default(),
            builder: DeckModelBuilder::new(),
            advisor: LayoutAdvisor::new(),
            charts: ChartBuilder::new(),
            data_source: None,
            dataset: None,
            exporters: HashMap::new(),
        }
    }

    /// Use `source` for data fetches.
    pub fn with_data_source(mut self, source: Box<dyn DataSource>) -> Self {
        self.data_source = Some(source);
        self
    }

    /// Register an exporter for its format, replacing any previous one.
    pub fn with_exporter(mut self, exporter: Box<dyn Exporter>) -> Self {
        self.exporters.insert(exporter.format(), exporter);
        self
    }

    /// Build the deck from a title and section texts.
    ///
    /// Replaces any previous slides. When `data_source` is given the data is
    /// fetched and kept for [`DeckOrchestrator::add_chart_from_dataset`], but
    /// not merged into slide content.
    pub fn create_from_text<S: AsRef<str>>(
        &mut self,
        title: &str,
        sections: &[S],
        data_source: Option<&str>,
        speaker_notes: bool,
    ) -> &mut Self {
        log::info!("Creating presentation: {}", title);

        self.deck.title = title.to_string();
        self.deck
            .metadata
            .insert("title".to_string(), Value::from(title));
        self.deck.slides = self.builder.build_from_sections(title, sections);

        if let Some(source) = data_source {
            self.deck
                .metadata
                .insert("data_source".to_string(), Value::from(source));
            self.dataset = self.load_data(source);
        }

        self.suggest_layouts();

        if speaker_notes {
            self.generate_speaker_notes();
        }

        log::info!("Created {} slides", self.deck.len());
        self
    }

    fn load_data(&mut self, source: &str) -> Option<DataSet> {
        let Some(fetcher) = self.data_source.as_mut() else {
            log::warn!("No data source configured, skipping {}", source);
            return None;
        };

        match fetcher.fetch(source) {
            Ok(data) => {
                log::info!(
                    "Loaded data from {}: {} rows, {} columns",
                    source,
                    data.row_count(),
                    data.columns.len()
                );
                Some(data)
            }
            Err(e) => {
                log::error!("Error fetching data from {}: {}", source, e);
                None
            }
        }
    }

    /// Re-run layout suggestion over every slide.
    pub fn suggest_layouts(&mut self) -> &mut Self {
        for slide in &mut self.deck.slides {
            slide.layout = Some(self.advisor.suggest(slide));
        }
        self
    }

    /// Attach an untitled chart to the slide at `slide_index`.
    ///
    /// The slide's layout is left as it is; call
    /// [`DeckOrchestrator::suggest_layouts`] to move it to `chart_slide`.
    /// On error the deck is unchanged.
    pub fn add_chart(
        &mut self,
        slide_index: usize,
        chart_type: &str,
        data: Option<ChartData>,
    ) -> Result<&mut Self> {
        let len = self.deck.len();
        if slide_index >= len {
            log::error!("Slide index {} out of range", slide_index);
            return Err(Error::SlideIndexOutOfRange {
                index: slide_index,
                len,
            });
        }

        let chart = self
            .charts
            .build(chart_type, data, &self.theme, "", ChartParams::new())?;

        self.deck.slides[slide_index].chart = Some(chart);
        log::info!("Added {} chart to slide {}", chart_type, slide_index);
        Ok(self)
    }

    /// Attach a chart built from two columns of the loaded data set.
    pub fn add_chart_from_dataset(
        &mut self,
        slide_index: usize,
        chart_type: &str,
        label_column: &str,
        value_column: &str,
    ) -> Result<&mut Self> {
        let data = {
            let dataset = self.dataset.as_ref().ok_or_else(|| {
                Error::DataSourceError("No data set loaded for chart".to_string())
            })?;
            for column in [label_column, value_column] {
                if !dataset.has_column(column) {
                    log::error!("Column '{}' not found in {}", column, dataset.source);
                    return Err(Error::DataSourceError(format!(
                        "Column '{}' not found in {}",
                        column, dataset.source
                    )));
                }
            }
            let (labels, values) = dataset.label_value_pairs(label_column, value_column);
            ChartData::Labels { labels, values }
        };

        self.add_chart(slide_index, chart_type, Some(data))
    }

    /// Generate speaker notes for all slides.
    pub fn generate_speaker_notes(&mut self) -> &mut Self {
        self.builder.add_speaker_notes(&mut self.deck.slides);
        log::info!("Generated speaker notes for all slides");
        self
    }

    /// Set a metadata entry handed to exporters.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.deck.metadata.insert(key.into(), value.into());
        self
    }

    /// Export the deck.
    ///
    /// `format_name` is matched case-insensitively against the known formats.
    /// Unknown formats, missing exporters, incomplete slides and exporter
    /// failures are logged and reported as `false`; nothing is written for
    /// an unknown format.
    pub fn export(&self, format_name: &str, output_path: &Path, options: &ExportOptions) -> bool {
        match self.try_export(format_name, output_path, options) {
            Ok(()) => {
                log::info!("Successfully exported to {}", output_path.display());
                true
            }
            Err(e) => {
                log::error!("Export to {} failed: {}", output_path.display(), e);
                false
            }
        }
    }

    fn try_export(&self, format_name: &str, output_path: &Path, options: &ExportOptions) -> Result<()> {
        let format = ExportFormat::from_name(format_name)
            .ok_or_else(|| Error::UnsupportedExportFormat(format_name.to_string()))?;

        let exporter = self
            .exporters
            .get(&format)
            .ok_or_else(|| Error::ExporterNotFound(format.to_string()))?;

        let invalid = self.deck.invalid_slide_ids();
        if !invalid.is_empty() {
            return Err(Error::InvalidDeck(format!(
                "slides without a layout: {:?}",
                invalid
            )));
        }

        let request = ExportRequest {
            slides: &self.deck.slides,
            metadata: &self.deck.metadata,
            output_path,
            theme: &self.theme,
            options,
        };
        exporter.export(&request)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.deck.slides
    }

    pub fn metadata(&self) -> &Metadata {
        &self.deck.metadata
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Last data set fetched by [`DeckOrchestrator::create_from_text`].
    pub fn dataset(&self) -> Option<&DataSet> {
        self.dataset.as_ref()
    }

    pub fn statistics(&self) -> DeckStatistics {
        self.builder.statistics(&self.deck.slides)
    }
}
