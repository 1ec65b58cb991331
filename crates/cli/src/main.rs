//! CLI tool for assembling slide decks from text sections and data.

use anyhow::{bail, Context, Result};
use clap::Parser;
use deck_core::{DeckOrchestrator, ExportFormat, ExportOptions};
use deck_data::FileDataSource;
use deck_pptx::PowerPointExporter;
use deck_render::{GoogleSlidesExporter, HtmlExporter, PdfExporter};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Lines consisting of `---` separate sections in a sections file.
static SECTION_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*---[ \t]*\r?$").unwrap());

/// Runs of characters that cannot appear in an output file name.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Assemble a presentation from text sections and export it.
#[derive(Parser, Debug)]
#[command(name = "deck-build")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Presentation title
    #[arg(short, long)]
    title: String,

    /// Section text; first line is the slide title, the rest are bullets
    #[arg(short, long)]
    section: Vec<String>,

    /// File with sections separated by `---` lines
    #[arg(long)]
    sections_file: Option<PathBuf>,

    /// Data source: CSV, Excel (.xlsx/.xls) or JSON file, or an HTTP(S) URL
    #[arg(short, long)]
    data: Option<String>,

    /// Chart to attach: INDEX:TYPE[:LABEL_COL:VALUE_COL]
    #[arg(short, long)]
    chart: Vec<String>,

    /// Export format (powerpoint, pdf, google_slides, html); repeatable
    #[arg(short, long, default_value = "powerpoint")]
    format: Vec<String>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Theme (default, business, minimal)
    #[arg(long, default_value = "default")]
    theme: String,

    /// Author recorded in the exported documents
    #[arg(long)]
    author: Option<String>,

    /// Skip speaker notes
    #[arg(long)]
    no_notes: bool,

    /// Print deck statistics as JSON
    #[arg(long)]
    stats: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// A parsed `--chart` argument.
#[derive(Debug, Clone, PartialEq)]
struct ChartSpec {
    slide_index: usize,
    chart_type: String,
    /// Label and value columns of the loaded data set.
    columns: Option<(String, String)>,
}

impl ChartSpec {
    fn parse(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
        let (index, chart_type, columns) = match parts.as_slice() {
            [index, chart_type] => (index, chart_type, None),
            [index, chart_type, label, value] => (
                index,
                chart_type,
                Some((label.to_string(), value.to_string())),
            ),
            _ => bail!(
                "Invalid chart '{}': expected INDEX:TYPE or INDEX:TYPE:LABEL_COL:VALUE_COL",
                spec
            ),
        };

        let slide_index = index
            .parse()
            .with_context(|| format!("Invalid slide index in chart '{}'", spec))?;

        Ok(Self {
            slide_index,
            chart_type: chart_type.to_string(),
            columns,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let sections = collect_sections(&args)?;
    if sections.is_empty() {
        bail!("No sections given; use --section or --sections-file");
    }
    let charts = args
        .chart
        .iter()
        .map(|spec| ChartSpec::parse(spec))
        .collect::<Result<Vec<_>>>()?;

    let mut orchestrator = DeckOrchestrator::new(args.theme.as_str())
        .with_data_source(Box::new(FileDataSource::new()))
        .with_exporter(Box::new(PowerPointExporter::new()))
        .with_exporter(Box::new(PdfExporter::new()))
        .with_exporter(Box::new(GoogleSlidesExporter::new()))
        .with_exporter(Box::new(HtmlExporter::new()));

    orchestrator.create_from_text(
        &args.title,
        sections.as_slice(),
        args.data.as_deref(),
        !args.no_notes,
    );
    if let Some(author) = &args.author {
        orchestrator.set_metadata("author", author.as_str());
    }

    if args.data.is_some() && orchestrator.dataset().is_none() {
        eprintln!("Warning: data could not be loaded; continuing without it");
    }

    for chart in &charts {
        let result = match &chart.columns {
            Some((label, value)) => orchestrator.add_chart_from_dataset(
                chart.slide_index,
                &chart.chart_type,
                label,
                value,
            ),
            None => orchestrator.add_chart(chart.slide_index, &chart.chart_type, None),
        };
        result.map(|_| ()).map_err(|e| {
            anyhow::anyhow!(
                "Failed to add {} chart to slide {}: {}",
                chart.chart_type,
                chart.slide_index,
                e
            )
        })?;
    }
    if !charts.is_empty() {
        orchestrator.suggest_layouts();
        if !args.no_notes {
            orchestrator.generate_speaker_notes();
        }
    }

    if args.verbose {
        eprintln!("Built {} slides", orchestrator.slides().len());
    }

    if args.stats {
        let stats = serde_json::to_string_pretty(&orchestrator.statistics())?;
        println!("{}", stats);
    }

    let options = ExportOptions::new().with("include_notes", !args.no_notes);
    let options = match &args.author {
        Some(author) => options.with("author", author.as_str()),
        None => options,
    };

    let stem = slugify(&args.title);
    let mut failed = Vec::new();
    for format in &args.format {
        let path = output_path(&args.output, &stem, format);
        if orchestrator.export(format, &path, &options) {
            println!("{}", path.display());
        } else {
            eprintln!("Error exporting {} to {}", format, path.display());
            failed.push(format.as_str());
        }
    }

    if !failed.is_empty() {
        bail!("{} of {} exports failed: {}", failed.len(), args.format.len(), failed.join(", "));
    }

    Ok(())
}

/// Sections from `--section` arguments followed by those in `--sections-file`.
fn collect_sections(args: &Args) -> Result<Vec<String>> {
    let mut sections: Vec<String> = args
        .section
        .iter()
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .collect();

    if let Some(path) = &args.sections_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        sections.extend(split_sections(&text));
    }

    Ok(sections)
}

fn split_sections(text: &str) -> Vec<String> {
    SECTION_SEPARATOR_REGEX
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercase file stem with runs of other characters collapsed to `-`.
fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let slug = SLUG_REGEX.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "presentation".to_string()
    } else {
        slug.to_string()
    }
}

/// Output file for a format name; unknown names keep the name as extension.
fn output_path(dir: &Path, stem: &str, format: &str) -> PathBuf {
    let extension = ExportFormat::from_name(format)
        .map(|f| f.extension().to_string())
        .unwrap_or_else(|| format.trim().to_lowercase());
    dir.join(format!("{}.{}", stem, extension))
}
