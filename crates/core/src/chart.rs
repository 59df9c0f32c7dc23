//! Contract between the dashboard and whatever draws the chart

use serde::Serialize;

use crate::colors::{ColorAssignment, DEFAULT_LABEL_COLOR};
use crate::error::Result;
use crate::selection::SelectionState;
use crate::store::{Commit, SeriesStore};
use crate::zoom::ZoomWindow;

/// How much of the chart's own view state a redraw may discard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RedrawMode {
    /// Initial draw; the chart may start from its defaults
    Reset,
    /// Keep the current window and selection exactly as given
    Preserve,
}

/// A click on the chart surface, in chart coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

/// A rendered point under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct PointHit {
    /// Benchmark the point belongs to
    pub benchmark: String,
    /// Position within the frame's visible commits
    pub point_index: usize,
}

/// One selected benchmark restricted to the visible window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesView {
    pub name: String,
    pub color: String,
    /// Aligned with [`ChartFrame::commits`]; `None` where nothing was recorded
    pub values: Vec<Option<f64>>,
}

/// Everything a chart needs for one redraw
#[derive(Debug, Clone, Serialize)]
pub struct ChartFrame<'a> {
    pub title: &'a str,
    pub metric: &'a str,
    pub window: ZoomWindow,
    pub commits: &'a [Commit],
    pub series: Vec<SeriesView>,
}

impl<'a> ChartFrame<'a> {
    pub fn build(
        title: &'a str,
        metric: &'a str,
        store: &'a SeriesStore,
        selection: &SelectionState,
        window: ZoomWindow,
        colors: &ColorAssignment,
    ) -> Self {
        let series = selection
            .selected()
            .map(|name| SeriesView {
                name: name.to_string(),
                color: colors.get(name).unwrap_or(DEFAULT_LABEL_COLOR).to_string(),
                values: store.series(name, metric, window.range()),
            })
            .collect();

        Self {
            title,
            metric,
            window,
            commits: store.commits_in(window.range()),
            series,
        }
    }

    /// Largest plotted value, or 0 when nothing is plotted
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .fold(0.0f64, |a, &b| a.max(b))
    }
}

/// Draws frames and maps clicks back to points.
///
/// Implementations only read the frame; they never change the window or the
/// selection themselves.
pub trait ChartAdapter {
    fn redraw(&mut self, frame: &ChartFrame<'_>, mode: RedrawMode) -> Result<()>;

    /// Nearest rendered point that the event intersects, if any
    fn hit_test(&self, event: PointerEvent) -> Option<PointHit>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::make_store;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_frame_is_restricted_to_window() {
        let store = make_store(10, &["A", "B", "C"]);
        let selection = SelectionState::new(store.benchmark_names().clone(), ["A", "C"]);
        let window = ZoomWindow::new(2, 5, 10).unwrap();
        let colors = ColorAssignment::from_palette(selection.selected(), &Default::default());

        let frame = ChartFrame::build("t", "code_size", &store, &selection, window, &colors);

        assert_eq!(frame.commits.len(), 3);
        assert_eq!(frame.commits[0].index, 2);
        let names: Vec<_> = frame.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(frame.series[1].values, vec![Some(2.0), Some(3.0), Some(4.0)]);
        assert_eq!(frame.series[1].color, colors.get("C").unwrap());
        assert_eq!(frame.max_value(), 4.0);
    }

    #[test]
    fn test_empty_selection_has_no_series() {
        let store = make_store(3, &["A"]);
        let selection = SelectionState::new(store.benchmark_names().clone(), Vec::<String>::new());
        let window = ZoomWindow::full(3).unwrap();

        let frame = ChartFrame::build("t", "code_size", &store, &selection, window, &ColorAssignment::new());

        assert!(frame.series.is_empty());
        assert_eq!(frame.max_value(), 0.0);
    }
}
