//! Turns raw section text into slides.
//!
//! Each section becomes one content slide: the first non-empty line is the
//! title, the remaining lines become bullet points. A title slide is always
//! placed first.

use crate::types::{Slide, SlideContent, SlideType, GENERATED_SUBHEADING};
use serde::Serialize;
use std::collections::BTreeMap;

/// Prefix marking a markdown-style heading line, skipped when collecting bullets.
const HEADING_MARKER: char = '#';

/// Line introducing the bullet list in speaker notes.
const NOTES_KEY_POINTS: &str = "Key points to discuss:";

/// Reminder appended to the notes of slides carrying a chart.
const NOTES_CHART_REMINDER: &str = "Chart/Visualization: Present and explain the data trends.";

/// Summary figures for a slide sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckStatistics {
    pub total_slides: usize,
    pub slide_types: BTreeMap<SlideType, usize>,
    /// Mean word count of the slides' content.
    pub average_content_length: f64,
}

/// Builds slide sequences and derived text from section descriptions.
#[derive(Debug, Clone, Default)]
pub struct DeckModelBuilder;

impl DeckModelBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the title slide (id 0) followed by one content slide per section.
    pub fn build_from_sections<S: AsRef<str>>(&self, title: &str, sections: &[S]) -> Vec<Slide> {
        let mut slides = Vec::with_capacity(sections.len() + 1);

        slides.push(Slide::new(
            0,
            title,
            SlideType::Title,
            SlideContent::title(title, GENERATED_SUBHEADING),
        ));

        for (i, section) in sections.iter().enumerate() {
            slides.push(self.parse_section(section.as_ref(), i + 1));
        }

        log::info!(
            "Generated {} slides from {} sections",
            slides.len(),
            sections.len()
        );
        slides
    }

    /// Parse one section into a content slide.
    ///
    /// When no bullet lines remain, the whole section text becomes the single
    /// bullet so no content slide is ever empty.
    fn parse_section(&self, section: &str, id: usize) -> Slide {
        let mut lines = section.trim().lines().map(str::trim);
        let title = lines.next().unwrap_or_default().to_string();

        let mut bullet_points: Vec<String> = lines
            .filter(|line| !line.is_empty() && !line.starts_with(HEADING_MARKER))
            .map(str::to_string)
            .collect();

        if bullet_points.is_empty() {
            log::debug!("Section {} has no bullet lines, using full text", id);
            bullet_points.push(section.to_string());
        }

        let content = SlideContent::bullets(title.clone(), bullet_points);
        Slide::new(id, title, SlideType::Content, content)
    }

    /// Speaker notes for a slide.
    ///
    /// Header naming the slide, then the bullet points (if any), then a chart
    /// reminder (if a chart is attached).
    pub fn speaker_notes(&self, slide: &Slide) -> String {
        let mut notes: Vec<String> = Vec::new();

        if !slide.title.is_empty() {
            notes.push(format!("Slide: {}\n", slide.title));
        }

        if let Some(points) = &slide.content.bullet_points {
            notes.push(NOTES_KEY_POINTS.to_string());
            notes.extend(points.iter().map(|point| format!("  - {}", point)));
        }

        if slide.has_chart() {
            notes.push(format!("\n{}", NOTES_CHART_REMINDER));
        }

        notes.join("\n")
    }

    /// Generate and store speaker notes on every slide.
    pub fn add_speaker_notes(&self, slides: &mut [Slide]) {
        for slide in slides.iter_mut() {
            slide.speaker_notes = Some(self.speaker_notes(slide));
        }
    }

    /// Slide count, per-type counts and average content word count.
    pub fn statistics(&self, slides: &[Slide]) -> DeckStatistics {
        let mut slide_types = BTreeMap::new();
        let mut total_words = 0usize;

        for slide in slides {
            *slide_types.entry(slide.slide_type).or_insert(0) += 1;
            total_words += slide.content.word_count();
        }

        let average_content_length = if slides.is_empty() {
            0.0
        } else {
            total_words as f64 / slides.len() as f64
        };

        DeckStatistics {
            total_slides: slides.len(),
            slide_types,
            average_content_length,
        }
    }

    /// Whether the slide has every field needed for export.
    pub fn validate(&self, slide: &Slide) -> bool {
        slide.is_complete()
    }
}
