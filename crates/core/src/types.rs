//! Domain types for representing a deck under construction.

use crate::chart::ChartDescriptor;
use crate::layout::LayoutKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Free-form deck metadata (title, author, data source, ...).
pub type Metadata = BTreeMap<String, Value>;

/// Subheading used on generated title slides.
pub const GENERATED_SUBHEADING: &str = "Auto-generated Presentation";

/// An entire deck with its slides and metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Deck title.
    pub title: String,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,

    /// Free-form metadata handed to exporters.
    pub metadata: Metadata,
}

impl Deck {
    /// Create an empty deck with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slides: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// Number of slides in the deck.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Get a slide by index.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Ids of slides that are missing a required field.
    pub fn invalid_slide_ids(&self) -> Vec<usize> {
        self.slides
            .iter()
            .filter(|s| !s.is_complete())
            .map(|s| s.id)
            .collect()
    }
}

/// The kind of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideType {
    /// Opening slide with heading and subheading.
    Title,
    /// Heading with bullet points.
    Content,
    /// Slide built around a chart.
    Chart,
    /// Side-by-side comparison.
    Comparison,
}

impl SlideType {
    /// Lowercase name of the slide type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Chart => "chart",
            Self::Comparison => "comparison",
        }
    }

    /// Layout assigned when a slide of this type is first created.
    pub fn default_layout(&self) -> LayoutKind {
        match self {
            Self::Title => LayoutKind::TitleSlide,
            Self::Content => LayoutKind::BulletPoints,
            Self::Chart => LayoutKind::ChartSlide,
            Self::Comparison => LayoutKind::TwoColumn,
        }
    }
}

impl fmt::Display for SlideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Stable id; 0 is the title slide, content slides follow from 1.
    pub id: usize,

    /// Slide title.
    pub title: String,

    /// Slide kind.
    #[serde(rename = "type")]
    pub slide_type: SlideType,

    /// Slide content, inspected by key rather than by type.
    pub content: SlideContent,

    /// Layout from the catalog. Reassigned by the layout advisor.
    pub layout: Option<LayoutKind>,

    /// Attached chart, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartDescriptor>,

    /// Generated speaker notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_notes: Option<String>,
}

impl Slide {
    /// Create a slide with the default layout for its type.
    pub fn new(
        id: usize,
        title: impl Into<String>,
        slide_type: SlideType,
        content: SlideContent,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            slide_type,
            content,
            layout: Some(slide_type.default_layout()),
            chart: None,
            speaker_notes: None,
        }
    }

    /// Whether a chart descriptor is attached.
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Whether every field needed for export is present.
    pub fn is_complete(&self) -> bool {
        self.layout.is_some()
    }
}

/// Slide content as a set of optional, named elements.
///
/// Title, bullet, two-column and image+text shapes all live in the same
/// record; consumers probe for keys with [`SlideContent::has`]. Keys outside
/// the known set go to `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_column: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_column: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Any other named element.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SlideContent {
    /// Title-slide content.
    pub fn title(heading: impl Into<String>, subheading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            subheading: Some(subheading.into()),
            ..Self::default()
        }
    }

    /// Heading plus bullet list.
    pub fn bullets(heading: impl Into<String>, points: Vec<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            bullet_points: Some(points),
            ..Self::default()
        }
    }

    /// Two columns of text.
    pub fn two_column(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left_column: Some(left.into()),
            right_column: Some(right.into()),
            ..Self::default()
        }
    }

    /// An image reference next to text.
    pub fn image_and_text(image: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Add an arbitrary named element.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Whether the element named `key` is present.
    pub fn has(&self, key: &str) -> bool {
        let typed = match key {
            "heading" => self.heading.is_some(),
            "subheading" => self.subheading.is_some(),
            "bullet_points" => self.bullet_points.is_some(),
            "left_column" => self.left_column.is_some(),
            "right_column" => self.right_column.is_some(),
            "image" => self.image.is_some(),
            "text" => self.text.is_some(),
            _ => false,
        };
        typed || self.extra.contains_key(key)
    }

    /// Bullet points, or an empty slice when absent.
    pub fn bullet_points(&self) -> &[String] {
        self.bullet_points.as_deref().unwrap_or(&[])
    }

    /// Names and display values of the present elements, in field order.
    fn entries(&self) -> Vec<(&str, String)> {
        let mut entries = Vec::new();
        let scalars = [
            ("heading", &self.heading),
            ("subheading", &self.subheading),
        ];
        for (key, value) in scalars {
            if let Some(v) = value {
                entries.push((key, v.clone()));
            }
        }
        if let Some(points) = &self.bullet_points {
            entries.push(("bullet_points", format!("[{}]", points.join(", "))));
        }
        let scalars = [
            ("left_column", &self.left_column),
            ("right_column", &self.right_column),
            ("image", &self.image),
            ("text", &self.text),
        ];
        for (key, value) in scalars {
            if let Some(v) = value {
                entries.push((key, v.clone()));
            }
        }
        for (key, value) in &self.extra {
            let shown = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            entries.push((key.as_str(), shown));
        }
        entries
    }

    /// Number of whitespace-separated words in the display form.
    pub fn word_count(&self) -> usize {
        self.to_string().split_whitespace().count()
    }
}

impl fmt::Display for SlideContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .entries()
            .into_iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{}}}", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slide_gets_type_default_layout() {
        let slide = Slide::new(0, "Deck", SlideType::Title, SlideContent::default());
        assert_eq!(slide.layout, Some(LayoutKind::TitleSlide));

        let slide = Slide::new(3, "Compare", SlideType::Comparison, SlideContent::default());
        assert_eq!(slide.layout, Some(LayoutKind::TwoColumn));
    }

    #[test]
    fn test_content_has_known_and_extra_keys() {
        let content = SlideContent::bullets("Revenue", vec!["Up".to_string()])
            .with_extra("footer", "Confidential");

        assert!(content.has("heading"));
        assert!(content.has("bullet_points"));
        assert!(content.has("footer"));
        assert!(!content.has("image"));
        assert!(!content.has("title"));
    }

    #[test]
    fn test_content_display_form() {
        let content = SlideContent::bullets(
            "Revenue",
            vec!["Grew 12%".to_string(), "New markets opened".to_string()],
        );
        assert_eq!(
            content.to_string(),
            "{heading: Revenue, bullet_points: [Grew 12%, New markets opened]}"
        );
        assert_eq!(content.word_count(), 8);
    }

    #[test]
    fn test_empty_content_display() {
        assert_eq!(SlideContent::default().to_string(), "{}");
        assert_eq!(SlideContent::default().word_count(), 1);
    }

    #[test]
    fn test_slide_serializes_type_field() {
        let slide = Slide::new(1, "Intro", SlideType::Content, SlideContent::default());
        let json = serde_json::to_value(&slide).unwrap();
        assert_eq!(json["type"], "content");
        assert_eq!(json["layout"], "bullet_points");
        assert!(json.get("chart").is_none());
    }

    #[test]
    fn test_deck_invalid_slide_ids() {
        let mut deck = Deck::new("Deck");
        deck.slides
            .push(Slide::new(0, "Deck", SlideType::Title, SlideContent::default()));
        let mut loose = Slide::new(1, "Loose", SlideType::Content, SlideContent::default());
        loose.layout = None;
        deck.slides.push(loose);

        assert_eq!(deck.invalid_slide_ids(), vec![1]);
    }
}
