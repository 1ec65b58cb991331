//! PowerPoint (Office Open XML) export for generated decks.
//!
//! Writes a minimal `.pptx` package: one master, one blank layout, a theme
//! coloured after the deck theme, and one slide part per slide with text
//! boxes placed from the layout zones.

pub mod exporter;
mod package;
mod slide;
mod xml;

pub use exporter::PowerPointExporter;
