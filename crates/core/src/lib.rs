//! Core deck model, layout selection, chart descriptors and export
//! orchestration for generated slide decks.

pub mod advisor;
pub mod builder;
pub mod chart;
pub mod data;
pub mod error;
pub mod export;
pub mod layout;
pub mod orchestrator;
pub mod types;

pub use advisor::LayoutAdvisor;
pub use builder::{DeckModelBuilder, DeckStatistics};
pub use chart::{ChartBuilder, ChartData, ChartDescriptor, ChartKind, ChartParams, ChartStyle};
pub use data::{DataKind, DataSet, DataSource, Record};
pub use error::{Error, Result};
pub use export::{ExportFormat, ExportOptions, ExportRequest, Exporter, Placement};
pub use layout::{LayoutEntry, LayoutKind};
pub use orchestrator::DeckOrchestrator;
pub use types::{Deck, Metadata, Slide, SlideContent, SlideType};
