//! Rule-based layout selection.

use crate::layout::{self, LayoutKind};
use crate::types::{Slide, SlideType};

/// Picks catalog layouts for slides based on their type and content.
#[derive(Debug, Clone, Default)]
pub struct LayoutAdvisor;

impl LayoutAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Suggest a layout for a slide. The first matching rule wins:
    ///
    /// 1. title slides use `title_slide`
    /// 2. slides with a chart use `chart_slide`
    /// 3. left and right columns use `two_column`
    /// 4. image and text use `image_and_text`
    /// 5. everything else, bullets or not, uses `bullet_points`
    pub fn suggest(&self, slide: &Slide) -> LayoutKind {
        let content = &slide.content;

        if slide.slide_type == SlideType::Title {
            return LayoutKind::TitleSlide;
        }
        if slide.has_chart() {
            return LayoutKind::ChartSlide;
        }
        if content.has("left_column") && content.has("right_column") {
            return LayoutKind::TwoColumn;
        }
        if content.has("image") && content.has("text") {
            return LayoutKind::ImageAndText;
        }
        if content.has("bullet_points") {
            return LayoutKind::BulletPoints;
        }

        LayoutKind::BulletPoints
    }

    /// One "Add <element> to content" hint per element the target layout
    /// needs but the slide's content lacks. Unknown layouts yield nothing.
    pub fn recommend_modifications(&self, slide: &Slide, layout_name: &str) -> Vec<String> {
        let Some(entry) = layout::get(layout_name) else {
            return Vec::new();
        };

        entry
            .elements
            .iter()
            .filter(|element| !slide.content.has(element))
            .map(|element| format!("Add {} to content", element))
            .collect()
    }

    /// Layout for a broad content type; unknown types get `bullet_points`.
    pub fn content_type_to_layout(&self, content_type: &str) -> LayoutKind {
        match content_type {
            "text" => LayoutKind::BulletPoints,
            "chart" => LayoutKind::ChartSlide,
            "comparison" => LayoutKind::TwoColumn,
            "image" => LayoutKind::ImageAndText,
            "title" => LayoutKind::TitleSlide,
            _ => LayoutKind::BulletPoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartBuilder, ChartParams};
    use crate::types::SlideContent;

    fn content_slide(content: SlideContent) -> Slide {
        Slide::new(1, "Slide", SlideType::Content, content)
    }

    fn pie_chart() -> crate::chart::ChartDescriptor {
        ChartBuilder::new()
            .pie(
                vec!["A".to_string()],
                vec![1.0],
                None,
                "default",
                ChartParams::new(),
            )
            .unwrap()
    }

    #[test]
    fn test_title_rule_dominates() {
        let mut slide = Slide::new(
            0,
            "Deck",
            SlideType::Title,
            SlideContent::two_column("L", "R").with_extra("image", "x.png"),
        );
        slide.chart = Some(pie_chart());

        assert_eq!(LayoutAdvisor::new().suggest(&slide), LayoutKind::TitleSlide);
    }

    #[test]
    fn test_chart_beats_columns() {
        let mut slide = content_slide(SlideContent::two_column("L", "R"));
        assert_eq!(LayoutAdvisor::new().suggest(&slide), LayoutKind::TwoColumn);

        slide.chart = Some(pie_chart());
        assert_eq!(LayoutAdvisor::new().suggest(&slide), LayoutKind::ChartSlide);
    }

    #[test]
    fn test_columns_need_both_sides() {
        let mut content = SlideContent::two_column("L", "R");
        content.right_column = None;
        let slide = content_slide(content);
        assert_eq!(LayoutAdvisor::new().suggest(&slide), LayoutKind::BulletPoints);
    }

    #[test]
    fn test_columns_beat_image_and_text() {
        let mut content = SlideContent::image_and_text("chart.png", "Caption");
        content.left_column = Some("L".to_string());
        content.right_column = Some("R".to_string());
        let slide = content_slide(content);
        assert_eq!(LayoutAdvisor::new().suggest(&slide), LayoutKind::TwoColumn);
    }

    #[test]
    fn test_image_and_text() {
        let slide = content_slide(SlideContent::image_and_text("map.png", "Our regions"));
        assert_eq!(LayoutAdvisor::new().suggest(&slide), LayoutKind::ImageAndText);
    }

    #[test]
    fn test_bullets_and_fallback() {
        let advisor = LayoutAdvisor::new();
        let slide = content_slide(SlideContent::bullets("H", vec!["a".to_string()]));
        assert_eq!(advisor.suggest(&slide), LayoutKind::BulletPoints);

        let slide = content_slide(SlideContent::default());
        assert_eq!(advisor.suggest(&slide), LayoutKind::BulletPoints);
    }

    #[test]
    fn test_suggest_is_idempotent() {
        let advisor = LayoutAdvisor::new();
        let mut slide = content_slide(SlideContent::image_and_text("a.png", "b"));
        let first = advisor.suggest(&slide);
        slide.layout = Some(first);
        assert_eq!(advisor.suggest(&slide), first);
    }

    #[test]
    fn test_recommend_modifications() {
        let advisor = LayoutAdvisor::new();
        let slide = content_slide(SlideContent::bullets("H", vec![]));

        assert_eq!(
            advisor.recommend_modifications(&slide, "two_column"),
            vec![
                "Add title to content",
                "Add left_column to content",
                "Add right_column to content"
            ]
        );
        assert!(advisor.recommend_modifications(&slide, "blank").is_empty());
        assert!(advisor.recommend_modifications(&slide, "unknown").is_empty());
    }

    #[test]
    fn test_recommend_does_not_mutate() {
        let advisor = LayoutAdvisor::new();
        let slide = content_slide(SlideContent::default());
        let before = slide.clone();
        let _ = advisor.recommend_modifications(&slide, "image_and_text");
        assert_eq!(slide, before);
    }

    #[test]
    fn test_content_type_to_layout() {
        let advisor = LayoutAdvisor::new();
        assert_eq!(advisor.content_type_to_layout("text"), LayoutKind::BulletPoints);
        assert_eq!(advisor.content_type_to_layout("chart"), LayoutKind::ChartSlide);
        assert_eq!(advisor.content_type_to_layout("comparison"), LayoutKind::TwoColumn);
        assert_eq!(advisor.content_type_to_layout("image"), LayoutKind::ImageAndText);
        assert_eq!(advisor.content_type_to_layout("title"), LayoutKind::TitleSlide);
        assert_eq!(advisor.content_type_to_layout("video"), LayoutKind::BulletPoints);
    }
}
