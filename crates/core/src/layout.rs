//! Static catalog of slide layouts.
//!
//! Six fixed layouts, each listing the content elements it needs and the
//! zones it places them in. The catalog is compiled in and never changes
//! at runtime.

use crate::types::SlideContent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The layouts known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    TitleSlide,
    BulletPoints,
    ChartSlide,
    TwoColumn,
    ImageAndText,
    Blank,
}

impl LayoutKind {
    /// All layouts in catalog order.
    pub const ALL: [LayoutKind; 6] = [
        Self::TitleSlide,
        Self::BulletPoints,
        Self::ChartSlide,
        Self::TwoColumn,
        Self::ImageAndText,
        Self::Blank,
    ];

    /// Catalog name of the layout.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TitleSlide => "title_slide",
            Self::BulletPoints => "bullet_points",
            Self::ChartSlide => "chart_slide",
            Self::TwoColumn => "two_column",
            Self::ImageAndText => "image_and_text",
            Self::Blank => "blank",
        }
    }

    /// Look up a layout by its catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The catalog entry for this layout.
    pub fn entry(&self) -> &'static LayoutEntry {
        match self {
            Self::TitleSlide => &CATALOG[0],
            Self::BulletPoints => &CATALOG[1],
            Self::ChartSlide => &CATALOG[2],
            Self::TwoColumn => &CATALOG[3],
            Self::ImageAndText => &CATALOG[4],
            Self::Blank => &CATALOG[5],
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a zone sits on the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZonePosition {
    Top,
    Center,
    Left,
    Right,
}

/// Relative size of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSize {
    Small,
    Medium,
    Large,
}

/// Placement of one named zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub position: ZonePosition,
    pub size: ZoneSize,
}

impl Zone {
    const fn new(position: ZonePosition, size: ZoneSize) -> Self {
        Self { position, size }
    }

    /// Bounds of the zone as fractions of the slide: (x, y, width, height).
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let side_height = match self.size {
            ZoneSize::Small => 0.40,
            ZoneSize::Medium => 0.60,
            ZoneSize::Large => 0.72,
        };
        match (self.position, self.size) {
            (ZonePosition::Top, ZoneSize::Small) => (0.05, 0.05, 0.90, 0.12),
            (ZonePosition::Top, ZoneSize::Medium) => (0.05, 0.05, 0.90, 0.16),
            // a large title sits lower, above a centered subtitle
            (ZonePosition::Top, ZoneSize::Large) => (0.05, 0.20, 0.90, 0.30),
            (ZonePosition::Center, ZoneSize::Large) => (0.05, 0.22, 0.90, 0.72),
            (ZonePosition::Center, _) => (0.05, 0.55, 0.90, 0.30),
            (ZonePosition::Left, _) => (0.05, 0.22, 0.43, side_height),
            (ZonePosition::Right, _) => (0.52, 0.22, 0.43, side_height),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEntry {
    pub kind: LayoutKind,
    /// Human-readable label.
    pub label: &'static str,
    pub description: &'static str,
    /// Content elements the layout needs.
    pub elements: &'static [&'static str],
    /// Zone name to placement, in drawing order.
    pub zones: &'static [(&'static str, Zone)],
}

impl LayoutEntry {
    /// Placement of the named zone.
    pub fn zone(&self, name: &str) -> Option<Zone> {
        self.zones
            .iter()
            .find(|(zone_name, _)| *zone_name == name)
            .map(|(_, zone)| *zone)
    }
}

use ZonePosition::{Center, Left, Right, Top};
use ZoneSize::{Large, Medium, Small};

static CATALOG: [LayoutEntry; 6] = [
    LayoutEntry {
        kind: LayoutKind::TitleSlide,
        label: "Title Slide",
        description: "Large title and subtitle",
        elements: &["title", "subtitle"],
        zones: &[
            ("title", Zone::new(Top, Large)),
            ("subtitle", Zone::new(Center, Medium)),
        ],
    },
    LayoutEntry {
        kind: LayoutKind::BulletPoints,
        label: "Bullet Points",
        description: "Title with bullet points",
        elements: &["title", "bullet_points"],
        zones: &[
            ("title", Zone::new(Top, Medium)),
            ("content", Zone::new(Center, Large)),
        ],
    },
    LayoutEntry {
        kind: LayoutKind::ChartSlide,
        label: "Chart/Visualization",
        description: "Title with chart or image",
        elements: &["title", "chart"],
        zones: &[
            ("title", Zone::new(Top, Small)),
            ("chart", Zone::new(Center, Large)),
        ],
    },
    LayoutEntry {
        kind: LayoutKind::TwoColumn,
        label: "Two Column",
        description: "Title with two columns of content",
        elements: &["title", "left_column", "right_column"],
        zones: &[
            ("title", Zone::new(Top, Small)),
            ("left", Zone::new(Left, Medium)),
            ("right", Zone::new(Right, Medium)),
        ],
    },
    LayoutEntry {
        kind: LayoutKind::ImageAndText,
        label: "Image and Text",
        description: "Image on one side, text on the other",
        elements: &["title", "image", "text"],
        zones: &[
            ("title", Zone::new(Top, Small)),
            ("image", Zone::new(Left, Large)),
            ("text", Zone::new(Right, Large)),
        ],
    },
    LayoutEntry {
        kind: LayoutKind::Blank,
        label: "Blank",
        description: "Completely blank slide",
        elements: &[],
        zones: &[],
    },
];

/// Look up a layout entry by name.
pub fn get(name: &str) -> Option<&'static LayoutEntry> {
    LayoutKind::from_name(name).map(|kind| kind.entry())
}

/// Names of all layouts, in catalog order.
pub fn list_names() -> Vec<&'static str> {
    CATALOG.iter().map(|entry| entry.kind.name()).collect()
}

/// Whether `content` carries every element the named layout requires.
///
/// Unknown layout names never validate.
pub fn validate(content: &SlideContent, name: &str) -> bool {
    match get(name) {
        Some(entry) => entry.elements.iter().all(|element| content.has(element)),
        None => false,
    }
}

/// Theme-specific overrides applied on top of a layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeOverrides {
    pub colors: &'static [&'static str],
    pub font: &'static str,
}

static THEME_OVERRIDES: [(&str, ThemeOverrides); 3] = [
    (
        "default",
        ThemeOverrides {
            colors: &["#1f77b4", "#ff7f0e"],
            font: "Arial",
        },
    ),
    (
        "business",
        ThemeOverrides {
            colors: &["#003366", "#006699"],
            font: "Calibri",
        },
    ),
    (
        "minimal",
        ThemeOverrides {
            colors: &["#000000", "#ffffff"],
            font: "Helvetica",
        },
    ),
];

/// Overrides for a theme name, if the theme is known.
pub fn theme_overrides(theme: &str) -> Option<&'static ThemeOverrides> {
    THEME_OVERRIDES
        .iter()
        .find(|(name, _)| *name == theme)
        .map(|(_, overrides)| overrides)
}

/// A layout entry combined with a theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemedLayout {
    pub layout: &'static LayoutEntry,
    /// Set only when the theme is known.
    pub theme: Option<String>,
    pub overrides: Option<&'static ThemeOverrides>,
}

/// Combine a layout with a theme.
///
/// Returns `None` for an unknown layout. An unknown theme yields the bare
/// layout without overrides.
pub fn themed(name: &str, theme: &str) -> Option<ThemedLayout> {
    let layout = get(name)?;
    let overrides = theme_overrides(theme);
    Some(ThemedLayout {
        layout,
        theme: overrides.map(|_| theme.to_string()),
        overrides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_names_in_catalog_order() {
        assert_eq!(
            list_names(),
            vec![
                "title_slide",
                "bullet_points",
                "chart_slide",
                "two_column",
                "image_and_text",
                "blank"
            ]
        );
    }

    #[test]
    fn test_entry_matches_kind() {
        for kind in LayoutKind::ALL {
            assert_eq!(kind.entry().kind, kind);
            assert_eq!(LayoutKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_get_unknown_is_none() {
        assert!(get("three_column").is_none());
        assert!(get("").is_none());
    }

    #[test]
    fn test_get_two_column_zones() {
        let entry = get("two_column").unwrap();
        assert_eq!(entry.label, "Two Column");
        assert_eq!(entry.elements, &["title", "left_column", "right_column"]);
        assert_eq!(
            entry.zone("left"),
            Some(Zone::new(ZonePosition::Left, ZoneSize::Medium))
        );
        assert_eq!(entry.zone("missing"), None);
    }

    #[test]
    fn test_validate_requires_every_element() {
        let content = SlideContent::two_column("Before", "After");
        assert!(!validate(&content, "two_column"));

        let content = content.with_extra("title", "Comparison");
        assert!(validate(&content, "two_column"));
    }

    #[test]
    fn test_validate_blank_and_unknown() {
        let content = SlideContent::default();
        assert!(validate(&content, "blank"));
        assert!(!validate(&content, "nonexistent"));
    }

    #[test]
    fn test_themed_layout() {
        let themed_layout = themed("bullet_points", "business").unwrap();
        assert_eq!(themed_layout.layout.kind, LayoutKind::BulletPoints);
        assert_eq!(themed_layout.theme.as_deref(), Some("business"));
        assert_eq!(themed_layout.overrides.unwrap().font, "Calibri");

        let plain = themed("bullet_points", "neon").unwrap();
        assert!(plain.theme.is_none());
        assert!(plain.overrides.is_none());

        assert!(themed("nope", "default").is_none());
    }

    #[test]
    fn test_zone_bounds_stay_on_slide() {
        for kind in LayoutKind::ALL {
            for (_, zone) in kind.entry().zones {
                let (x, y, w, h) = zone.bounds();
                assert!(x + w <= 1.0);
                assert!(y + h <= 1.0);
            }
        }
    }
}
