//! Chart descriptors.
//!
//! A descriptor records what to draw (type, data, title) and how to style it.
//! Drawing itself is left to whichever renderer consumes the descriptor.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Renderer-specific chart parameters.
pub type ChartParams = BTreeMap<String, Value>;

/// Theme used when a requested theme is not in the style table.
pub const DEFAULT_THEME: &str = "default";

/// Supported chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Histogram,
    Box,
    Area,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        Self::Bar,
        Self::Line,
        Self::Pie,
        Self::Scatter,
        Self::Histogram,
        Self::Box,
        Self::Area,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Histogram => "histogram",
            Self::Box => "box",
            Self::Area => "area",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chart data payload. The shape depends on the chart type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartData {
    /// Bar-style data.
    Categories {
        categories: Vec<String>,
        values: Vec<f64>,
    },
    /// Pie-style data.
    Labels { labels: Vec<String>, values: Vec<f64> },
    /// Line and scatter data.
    Series { x_data: Vec<Value>, y_data: Vec<f64> },
    /// Anything else, passed through to the renderer untouched.
    Raw(Value),
}

impl ChartData {
    /// One "label: value" line per data point, for text-only renderers.
    pub fn summary_lines(&self) -> Vec<String> {
        match self {
            Self::Categories {
                categories: names,
                values,
            }
            | Self::Labels {
                labels: names,
                values,
            } => names
                .iter()
                .zip(values)
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect(),
            Self::Series { x_data, y_data } => x_data
                .iter()
                .zip(y_data)
                .map(|(x, y)| format!("{}: {}", display_value(x), y))
                .collect(),
            Self::Raw(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| format!("{}: {}", key, display_value(value)))
                .collect(),
            Self::Raw(Value::Null) => Vec::new(),
            Self::Raw(other) => vec![display_value(other)],
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolved visual style for a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub colors: Vec<String>,
    pub font_size: u32,
    pub dpi: u32,
    /// Figure size in inches (width, height).
    pub figsize: (f64, f64),
}

impl ChartStyle {
    fn new(colors: &[&str], font_size: u32, dpi: u32, figsize: (f64, f64)) -> Self {
        Self {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            font_size,
            dpi,
            figsize,
        }
    }
}

static CHART_STYLES: LazyLock<BTreeMap<&'static str, ChartStyle>> = LazyLock::new(|| {
    BTreeMap::from([
        (
            "default",
            ChartStyle::new(
                &["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"],
                12,
                100,
                (10.0, 6.0),
            ),
        ),
        (
            "business",
            ChartStyle::new(
                &["#003366", "#006699", "#0099cc", "#00ccff", "#ccffff"],
                14,
                150,
                (12.0, 7.0),
            ),
        ),
        (
            "minimal",
            ChartStyle::new(
                &["#000000", "#404040", "#808080", "#c0c0c0", "#ffffff"],
                11,
                100,
                (10.0, 6.0),
            ),
        ),
    ])
});

/// Style for a theme, falling back to the default style.
pub fn style_for(theme: &str) -> &'static ChartStyle {
    match CHART_STYLES.get(theme) {
        Some(style) => style,
        None => {
            log::warn!("Unknown chart theme '{}', using '{}'", theme, DEFAULT_THEME);
            &CHART_STYLES[DEFAULT_THEME]
        }
    }
}

/// A chart ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub data: Option<ChartData>,
    /// Theme as requested, even when the style fell back to the default.
    pub theme: String,
    pub style: ChartStyle,
    #[serde(default)]
    pub params: ChartParams,
}

impl ChartDescriptor {
    /// Merge extra renderer parameters into the descriptor.
    pub fn customize(&mut self, params: ChartParams) -> &mut Self {
        self.params.extend(params);
        log::info!("Customized chart: {}", self.title);
        self
    }
}

/// Builds chart descriptors from a type name, data and theme.
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder;

impl ChartBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a descriptor.
    ///
    /// Fails with [`Error::UnsupportedChartType`] when `chart_type` is not one
    /// of the known types. An unknown theme falls back to the default style.
    pub fn build(
        &self,
        chart_type: &str,
        data: Option<ChartData>,
        theme: &str,
        title: &str,
        params: ChartParams,
    ) -> Result<ChartDescriptor> {
        let kind = ChartKind::from_name(chart_type).ok_or_else(|| {
            log::error!("Unsupported chart type: {}", chart_type);
            Error::UnsupportedChartType(chart_type.to_string())
        })?;

        let style = style_for(theme).clone();
        log::info!("Generated {} chart with theme {}", kind, theme);

        Ok(ChartDescriptor {
            kind,
            title: title.to_string(),
            data,
            theme: theme.to_string(),
            style,
            params,
        })
    }

    /// Bar chart from categories and values.
    pub fn bar(
        &self,
        categories: Vec<String>,
        values: Vec<f64>,
        title: Option<&str>,
        theme: &str,
        params: ChartParams,
    ) -> Result<ChartDescriptor> {
        let data = ChartData::Categories { categories, values };
        self.build("bar", Some(data), theme, title.unwrap_or("Bar Chart"), params)
    }

    /// Line chart from x and y series.
    pub fn line(
        &self,
        x_data: Vec<Value>,
        y_data: Vec<f64>,
        title: Option<&str>,
        theme: &str,
        params: ChartParams,
    ) -> Result<ChartDescriptor> {
        let data = ChartData::Series { x_data, y_data };
        self.build("line", Some(data), theme, title.unwrap_or("Line Chart"), params)
    }

    /// Pie chart from slice labels and values.
    pub fn pie(
        &self,
        labels: Vec<String>,
        values: Vec<f64>,
        title: Option<&str>,
        theme: &str,
        params: ChartParams,
    ) -> Result<ChartDescriptor> {
        let data = ChartData::Labels { labels, values };
        self.build("pie", Some(data), theme, title.unwrap_or("Pie Chart"), params)
    }

    /// Scatter chart from x and y series.
    pub fn scatter(
        &self,
        x_data: Vec<f64>,
        y_data: Vec<f64>,
        title: Option<&str>,
        theme: &str,
        params: ChartParams,
    ) -> Result<ChartDescriptor> {
        let data = ChartData::Series {
            x_data: x_data.into_iter().map(Value::from).collect(),
            y_data,
        };
        self.build(
            "scatter",
            Some(data),
            theme,
            title.unwrap_or("Scatter Chart"),
            params,
        )
    }

    /// Names of all supported chart types.
    pub fn supported_chart_types(&self) -> Vec<&'static str> {
        ChartKind::ALL.iter().map(|kind| kind.name()).collect()
    }

    /// Names of all themes in the style table.
    pub fn available_themes(&self) -> Vec<&'static str> {
        CHART_STYLES.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels_data() -> ChartData {
        serde_json::from_value(json!({"labels": ["A", "B"], "values": [1, 2]})).unwrap()
    }

    #[test]
    fn test_chart_kind_case_insensitive() {
        assert_eq!(ChartKind::from_name("PIE"), Some(ChartKind::Pie));
        assert_eq!(ChartKind::from_name("Histogram"), Some(ChartKind::Histogram));
        assert_eq!(ChartKind::from_name("donut"), None);
    }

    #[test]
    fn test_untagged_data_shapes() {
        assert_eq!(
            labels_data(),
            ChartData::Labels {
                labels: vec!["A".to_string(), "B".to_string()],
                values: vec![1.0, 2.0],
            }
        );

        let series: ChartData =
            serde_json::from_value(json!({"x_data": ["Q1", "Q2"], "y_data": [3.5, 4]})).unwrap();
        assert!(matches!(series, ChartData::Series { .. }));

        let raw: ChartData = serde_json::from_value(json!({"rows": 3})).unwrap();
        assert!(matches!(raw, ChartData::Raw(_)));
    }

    #[test]
    fn test_unknown_theme_uses_default_style() {
        let builder = ChartBuilder::new();
        let chart = builder
            .build(
                "PIE",
                Some(labels_data()),
                "unknown_theme",
                "",
                ChartParams::new(),
            )
            .unwrap();

        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.theme, "unknown_theme");
        assert_eq!(chart.style, *style_for("default"));
        assert_eq!(chart.style.font_size, 12);
    }

    #[test]
    fn test_business_style() {
        let style = style_for("business");
        assert_eq!(style.dpi, 150);
        assert_eq!(style.figsize, (12.0, 7.0));
        assert_eq!(style.colors[0], "#003366");
    }

    #[test]
    fn test_unsupported_chart_type() {
        let builder = ChartBuilder::new();
        let result = builder.build("radar", None, "default", "", ChartParams::new());
        assert!(matches!(result, Err(Error::UnsupportedChartType(name)) if name == "radar"));
    }

    #[test]
    fn test_specialised_constructors() {
        let builder = ChartBuilder::new();

        let bar = builder
            .bar(
                vec!["North".to_string(), "South".to_string()],
                vec![10.0, 20.0],
                None,
                "default",
                ChartParams::new(),
            )
            .unwrap();
        assert_eq!(bar.kind, ChartKind::Bar);
        assert_eq!(bar.title, "Bar Chart");

        let scatter = builder
            .scatter(vec![1.0, 2.0], vec![3.0, 4.0], Some("Spread"), "minimal", ChartParams::new())
            .unwrap();
        assert_eq!(scatter.title, "Spread");
        assert_eq!(
            scatter.data,
            Some(ChartData::Series {
                x_data: vec![json!(1.0), json!(2.0)],
                y_data: vec![3.0, 4.0],
            })
        );
    }

    #[test]
    fn test_summary_lines() {
        assert_eq!(labels_data().summary_lines(), vec!["A: 1", "B: 2"]);

        let series = ChartData::Series {
            x_data: vec![json!("Jan"), json!(2)],
            y_data: vec![1.5, 2.5],
        };
        assert_eq!(series.summary_lines(), vec!["Jan: 1.5", "2: 2.5"]);

        assert!(ChartData::Raw(Value::Null).summary_lines().is_empty());
    }

    #[test]
    fn test_customize_merges_params() {
        let builder = ChartBuilder::new();
        let mut chart = builder
            .build("line", None, "default", "Trend", ChartParams::new())
            .unwrap();
        chart.customize(ChartParams::from([("legend".to_string(), json!(false))]));
        assert_eq!(chart.params["legend"], json!(false));
    }

    #[test]
    fn test_catalog_lists() {
        let builder = ChartBuilder::new();
        assert_eq!(builder.supported_chart_types().len(), 7);
        assert_eq!(
            builder.available_themes(),
            vec!["business", "default", "minimal"]
        );
    }
}
