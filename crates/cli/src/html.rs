//! SVG chart and HTML page rendering

use chrono::Utc;
use commit_bench_core::{
    ChartAdapter, ChartFrame, Dashboard, Navigator, PointHit, PointerEvent, RedrawMode,
};
use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::terminal::TerminalUi;

/// SVG line chart for one frame
const CHART_TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {{ width }} {{ height }}" preserveAspectRatio="xMidYMid meet">
  <rect x="0" y="0" width="{{ width }}" height="{{ height }}" fill="#0d1117"/>
  {% for tick in y_ticks %}
  <line x1="{{ padding }}" y1="{{ tick.y }}" x2="{{ width - padding }}" y2="{{ tick.y }}" stroke="#30363d" stroke-width="1"/>
  <text x="{{ padding - 4 }}" y="{{ tick.y + 3 }}" fill="#8b949e" font-size="12" text-anchor="end">{{ tick.label }}</text>
  {% endfor %}
  {% for label in x_labels %}
  <text x="{{ label.x }}" y="{{ height - padding + 18 }}" fill="#8b949e" font-size="12" text-anchor="{{ label.anchor }}">{{ label.text }}</text>
  {% endfor %}
  {% for line in lines %}
  <path d="{{ line.path }}" fill="none" stroke="{{ line.color }}" stroke-width="2"/>
  {% for point in line.points %}
  <circle cx="{{ point.x }}" cy="{{ point.y }}" r="{{ point_radius }}" fill="{{ line.color }}"><title>{{ line.name }} @ {{ point.commit }}: {{ point.value }}</title></circle>
  {% endfor %}
  {% endfor %}
  {% if not lines %}
  <text x="{{ width / 2 }}" y="{{ height / 2 }}" fill="#6e7681" font-size="14" text-anchor="middle">No benchmark selected</text>
  {% endif %}
</svg>
"##;

/// Dashboard page around the chart
const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; background: #f6f8fa; margin: 0; }
        .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }
        #benchmark-selectors { display: flex; flex-wrap: wrap; gap: 0.25rem 1rem; margin-bottom: 1rem; }
        #benchmark-selectors label { font-family: 'SF Mono', 'Fira Code', monospace; font-size: 0.85rem; }
        .navigation { display: flex; justify-content: space-between; margin: 0.5rem 0; }
        .window { color: #6e7681; font-size: 0.9rem; }
        footer { color: #6e7681; font-size: 0.8rem; margin-top: 2rem; }
    </style>
</head>
<body>
    <div class="container">
        <h1>{{ title }}</h1>
        <p class="window">{{ metric }} &middot; commits {{ window.left }}..{{ window.right }} of {{ window.commit_count }}</p>

        <div id="benchmark-selectors">
            {% for selector in selectors %}
            <span>
                <input type="checkbox" name="benchmark" id="{{ selector.name }}" value="{{ selector.name }}"{% if selector.checked %} checked{% endif %}>
                <label id="{{ selector.name }}Label" for="{{ selector.name }}" style="color: {{ selector.color }}; font-weight: {{ selector.font_weight }};">{{ selector.name }}</label>
            </span>
            {% endfor %}
        </div>

        <div class="navigation">
            <span>
                {% for button in left_buttons %}
                <button id="{{ button.id }}"{% if button.disabled %} disabled{% endif %}>{{ button.text }}</button>
                {% endfor %}
            </span>
            <span>
                {% for button in right_buttons %}
                <button id="{{ button.id }}"{% if button.disabled %} disabled{% endif %}>{{ button.text }}</button>
                {% endfor %}
            </span>
        </div>

        <div id="chart">
            {{ chart | safe }}
        </div>

        <footer>Generated {{ generated }}</footer>
    </div>
</body>
</html>
"##;

pub const CHART_WIDTH: f64 = 800.0;
pub const CHART_HEIGHT: f64 = 400.0;
pub const CHART_PADDING: f64 = 60.0;
pub const POINT_RADIUS: f64 = 4.0;
/// Extra distance around a point that still counts as a hit
pub const HIT_TOLERANCE: f64 = 2.0;

/// A point drawn in the last frame, in viewBox coordinates
#[derive(Debug, Clone, PartialEq)]
struct RenderedPoint {
    benchmark: String,
    point_index: usize,
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct PointData {
    x: String,
    y: String,
    value: String,
    commit: String,
}

#[derive(Debug, Serialize)]
struct LineData {
    name: String,
    color: String,
    path: String,
    points: Vec<PointData>,
}

#[derive(Debug, Serialize)]
struct TickData {
    y: f64,
    label: String,
}

#[derive(Debug, Serialize)]
struct AxisLabel {
    x: f64,
    text: String,
    anchor: &'static str,
}

/// Chart drawn as an SVG document.
///
/// Each redraw replaces the SVG and the point positions used for hit testing.
pub struct SvgChart {
    env: Environment<'static>,
    svg: String,
    points: Vec<RenderedPoint>,
    redraws: usize,
}

impl SvgChart {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template("chart.svg", CHART_TEMPLATE)?;
        Ok(Self {
            env,
            svg: String::new(),
            points: Vec::new(),
            redraws: 0,
        })
    }

    /// The most recently rendered SVG
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    fn render(&mut self, frame: &ChartFrame<'_>) -> Result<()> {
        let max_value = frame.max_value();
        let count = frame.commits.len();
        let mut points = Vec::new();

        let lines: Vec<LineData> = frame
            .series
            .iter()
            .map(|series| {
                let mut coords = Vec::new();
                let mut data = Vec::new();
                for (idx, value) in series.values.iter().enumerate() {
                    let Some(value) = value else {
                        coords.push(None);
                        continue;
                    };
                    let (x, y) = point_position(idx, count, *value, max_value);
                    coords.push(Some((x, y)));
                    data.push(PointData {
                        x: format!("{:.1}", x),
                        y: format!("{:.1}", y),
                        value: format_value(*value),
                        commit: frame.commits[idx].short_hash().to_string(),
                    });
                    points.push(RenderedPoint {
                        benchmark: series.name.clone(),
                        point_index: idx,
                        x,
                        y,
                    });
                }
                LineData {
                    name: series.name.clone(),
                    color: series.color.clone(),
                    path: generate_line_path(&coords),
                    points: data,
                }
            })
            .collect();

        let y_ticks: Vec<TickData> = (0..5)
            .map(|i| {
                let fraction = i as f64 / 4.0;
                TickData {
                    y: CHART_PADDING + (CHART_HEIGHT - 2.0 * CHART_PADDING) * fraction,
                    label: format_value(max_value * (1.0 - fraction)),
                }
            })
            .collect();

        let mut x_labels = Vec::new();
        if let Some(first) = frame.commits.first() {
            x_labels.push(AxisLabel {
                x: CHART_PADDING,
                text: format!("{} {}", first.short_hash(), first.submitted.format("%Y-%m-%d")),
                anchor: "start",
            });
        }
        if let Some(last) = frame.commits.last().filter(|_| count > 1) {
            x_labels.push(AxisLabel {
                x: CHART_WIDTH - CHART_PADDING,
                text: format!("{} {}", last.short_hash(), last.submitted.format("%Y-%m-%d")),
                anchor: "end",
            });
        }

        let template = self.env.get_template("chart.svg")?;
        self.svg = template.render(context! {
            width => CHART_WIDTH,
            height => CHART_HEIGHT,
            padding => CHART_PADDING,
            point_radius => POINT_RADIUS,
            y_ticks => y_ticks,
            x_labels => x_labels,
            lines => lines,
        })?;
        self.points = points;
        Ok(())
    }
}

impl ChartAdapter for SvgChart {
    fn redraw(&mut self, frame: &ChartFrame<'_>, mode: RedrawMode) -> commit_bench_core::Result<()> {
        self.render(frame)
            .map_err(|e| commit_bench_core::Error::RenderError(Box::new(e)))?;
        self.redraws += 1;
        debug!(?mode, points = self.points.len(), "Rendered chart SVG");
        Ok(())
    }

    fn hit_test(&self, event: PointerEvent) -> Option<PointHit> {
        let limit = POINT_RADIUS + HIT_TOLERANCE;
        self.points
            .iter()
            .map(|p| (p, (p.x - event.x).hypot(p.y - event.y)))
            .filter(|(_, distance)| *distance <= limit)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| PointHit {
                benchmark: p.benchmark.clone(),
                point_index: p.point_index,
            })
    }
}

/// Position of point `idx` of `count` with `value`, in viewBox coordinates
pub fn point_position(idx: usize, count: usize, value: f64, max_value: f64) -> (f64, f64) {
    let x = CHART_PADDING
        + (CHART_WIDTH - 2.0 * CHART_PADDING) * (idx as f64 / count.saturating_sub(1).max(1) as f64);
    let y = CHART_PADDING + (CHART_HEIGHT - 2.0 * CHART_PADDING) * (1.0 - value / max_value.max(1.0));
    (x, y)
}

/// SVG path through the points; a gap starts a new subpath.
fn generate_line_path(coords: &[Option<(f64, f64)>]) -> String {
    let mut path = String::new();
    let mut pen_down = false;

    for coord in coords {
        match coord {
            Some((x, y)) => {
                let op = if pen_down { 'L' } else { 'M' };
                if !path.is_empty() {
                    path.push(' ');
                }
                path.push_str(&format!("{} {:.1} {:.1}", op, x, y));
                pen_down = true;
            }
            None => pen_down = false,
        }
    }

    path
}

fn format_value(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("{:.1}G", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value >= 1.0 {
        format!("{:.0}", value)
    } else if value >= 0.001 {
        format!("{:.2}", value)
    } else {
        format!("{:.3}", value)
    }
}

#[derive(Debug, Serialize)]
struct SelectorData {
    name: String,
    checked: bool,
    color: String,
    font_weight: &'static str,
}

#[derive(Debug, Serialize)]
struct ButtonData {
    id: &'static str,
    text: &'static str,
    disabled: bool,
}

/// Writes `index.html` for the current dashboard state
pub struct PageWriter {
    env: Environment<'static>,
    output_dir: PathBuf,
}

impl PageWriter {
    pub fn new(output_dir: &Path) -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template("page.html", PAGE_TEMPLATE)?;
        std::fs::create_dir_all(output_dir).map_err(|e| Error::FileWrite {
            path: output_dir.display().to_string(),
            source: e,
        })?;
        Ok(Self {
            env,
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join("index.html")
    }

    pub fn render<N: Navigator>(&self, dashboard: &Dashboard<SvgChart, TerminalUi, N>) -> Result<String> {
        let ui = dashboard.ui();
        let selectors: Vec<SelectorData> = ui
            .selectors()
            .iter()
            .map(|selector| SelectorData {
                name: selector.name.clone(),
                checked: dashboard.selection().contains(&selector.name),
                color: selector.style.color.clone(),
                font_weight: selector.style.font_weight(),
            })
            .collect();

        let buttons: Vec<ButtonData> = ui
            .buttons()
            .iter()
            .map(|button| ButtonData {
                id: button.action.element_id(),
                text: button.text,
                disabled: button.disabled,
            })
            .collect();
        let (left_buttons, right_buttons) = buttons.split_at(buttons.len() / 2);

        let template = self.env.get_template("page.html")?;
        let html = template.render(context! {
            title => &dashboard.config().title,
            metric => &dashboard.config().metric,
            window => dashboard.window(),
            selectors => selectors,
            left_buttons => left_buttons,
            right_buttons => right_buttons,
            chart => dashboard.chart().svg(),
            generated => Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        })?;
        Ok(html)
    }

    /// Render and write the page, returning its path
    pub fn write<N: Navigator>(&self, dashboard: &Dashboard<SvgChart, TerminalUi, N>) -> Result<PathBuf> {
        let html = self.render(dashboard)?;
        let path = self.index_path();
        std::fs::write(&path, html).map_err(|e| Error::FileWrite {
            path: path.display().to_string(),
            source: e,
        })?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}
