//! HTML, PDF and Google Slides exporters.

pub mod gslides;
pub mod html;
pub mod pdf;
pub mod theme;

pub use gslides::GoogleSlidesExporter;
pub use html::HtmlExporter;
pub use pdf::PdfExporter;
