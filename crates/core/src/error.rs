//! Error types for deck assembly and export.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or exporting a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse or produce JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The chart type name does not match any known chart type.
    #[error("Unsupported chart type: {0}")]
    UnsupportedChartType(String),

    /// The export format name does not match any known format.
    #[error("Unsupported export format: {0}")]
    UnsupportedExportFormat(String),

    /// The format is known but no exporter was registered for it.
    #[error("Exporter not found for format: {0}")]
    ExporterNotFound(String),

    /// A slide index outside the current deck.
    #[error("Slide index {index} out of range (deck has {len} slides)")]
    SlideIndexOutOfRange { index: usize, len: usize },

    /// The deck does not satisfy the export preconditions.
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    /// The data source kind could not be determined or is not supported.
    #[error("Unsupported data source: {0}")]
    UnsupportedSource(String),

    /// The data source could not be read.
    #[error("Data source error: {0}")]
    DataSourceError(String),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    CsvError(String),

    /// ZIP archive error (PPTX output, XLSX input).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML reading or writing error.
    #[error("XML error: {0}")]
    XmlError(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// An exporter failed to render the deck.
    #[error("Export error: {0}")]
    ExportError(String),
}
