//! Benchmark colors and the label styles derived from them

use serde::Serialize;
use std::collections::BTreeMap;

/// Line colors cycled over the selected benchmarks
pub const CHART_COLORS: &[&str] = &[
    "#58a6ff", "#3fb950", "#f85149", "#a371f7", "#d29922", "#79c0ff", "#56d364", "#ff7b72",
    "#bc8cff", "#e3b341",
];

/// Label color for benchmarks that are not drawn
pub const DEFAULT_LABEL_COLOR: &str = "#000000";

/// Benchmark name to display color
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColorAssignment(BTreeMap<String, String>);

impl ColorAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle [`CHART_COLORS`] over `names`, letting `overrides` win.
    pub fn from_palette<'a, I>(names: I, overrides: &BTreeMap<String, String>) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let colors = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let color = overrides
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| CHART_COLORS[idx % CHART_COLORS.len()].to_string());
                (name.to_string(), color)
            })
            .collect();
        Self(colors)
    }

    pub fn insert(&mut self, name: impl Into<String>, color: impl Into<String>) {
        self.0.insert(name.into(), color.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Style for the label of `name`: bold in its color when it has one
    pub fn label_style(&self, name: &str) -> LabelStyle {
        match self.get(name) {
            Some(color) => LabelStyle {
                color: color.to_string(),
                bold: true,
            },
            None => LabelStyle::default(),
        }
    }
}

/// Appearance of a benchmark's selector label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelStyle {
    pub color: String,
    pub bold: bool,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_LABEL_COLOR.to_string(),
            bold: false,
        }
    }
}

impl LabelStyle {
    pub fn font_weight(&self) -> &'static str {
        if self.bold {
            "bold"
        } else {
            "normal"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_palette_cycles() {
        let names: Vec<String> = (0..12).map(|i| format!("b{i:02}")).collect();
        let colors = ColorAssignment::from_palette(names.iter().map(String::as_str), &BTreeMap::new());

        assert_eq!(colors.len(), 12);
        assert_eq!(colors.get("b00"), Some(CHART_COLORS[0]));
        assert_eq!(colors.get("b10"), Some(CHART_COLORS[0]));
        assert_eq!(colors.get("b11"), Some(CHART_COLORS[1]));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = BTreeMap::from([("B".to_string(), "#123456".to_string())]);
        let colors = ColorAssignment::from_palette(["A", "B"], &overrides);

        assert_eq!(colors.get("A"), Some(CHART_COLORS[0]));
        assert_eq!(colors.get("B"), Some("#123456"));
    }

    #[test]
    fn test_label_style() {
        let mut colors = ColorAssignment::new();
        colors.insert("A", "#ff0000");

        assert_eq!(
            colors.label_style("A"),
            LabelStyle {
                color: "#ff0000".to_string(),
                bold: true
            }
        );
        assert_eq!(colors.label_style("B"), LabelStyle::default());
        assert_eq!(colors.label_style("B").font_weight(), "normal");
        assert_eq!(colors.label_style("B").color, DEFAULT_LABEL_COLOR);
    }
}
