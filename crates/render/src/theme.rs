//! Colours and fonts shared by the renderers.

use deck_core::chart::style_for;
use deck_core::layout::theme_overrides;

/// Resolved colours and font for one deck theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Title colour as `#rrggbb`.
    pub accent: String,
    /// Secondary colour as `#rrggbb`.
    pub secondary: String,
    pub font: &'static str,
}

impl Palette {
    pub fn for_theme(theme: &str) -> Self {
        let colors = &style_for(theme).colors;
        let pick = |i: usize| {
            colors
                .get(i)
                .or_else(|| colors.first())
                .cloned()
                .unwrap_or_else(|| "#000000".to_string())
        };
        Self {
            accent: pick(0),
            secondary: pick(1),
            font: theme_overrides(theme).map_or("Arial", |o| o.font),
        }
    }

    /// Accent as RGB components in 0.0..=1.0.
    pub fn accent_rgb(&self) -> (f64, f64, f64) {
        hex_to_rgb(&self.accent).unwrap_or((0.0, 0.0, 0.0))
    }
}

fn hex_to_rgb(hex: &str) -> Option<(f64, f64, f64)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(hex.get(range)?, 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
