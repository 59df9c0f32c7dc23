//! commit-bench-core - Viewing state for commit-indexed benchmark history
//!
//! This crate holds everything the dashboard needs that does not depend on
//! how the chart is drawn or where the controls live.
//!
//! # Features
//!
//! - Load the per-commit benchmark history and order it chronologically
//! - Track the selected benchmarks and the visible commit window
//! - Derive which navigation buttons are enabled
//! - Drive a [`ChartAdapter`] and a [`UiSurface`] from user events

pub mod chart;
pub mod colors;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod selection;
pub mod store;
pub mod ui;
pub mod zoom;

pub use chart::{ChartAdapter, ChartFrame, PointHit, PointerEvent, RedrawMode, SeriesView};
pub use colors::{ColorAssignment, LabelStyle, CHART_COLORS};
pub use dashboard::{Dashboard, DashboardConfig, Effect, UiEvent};
pub use data::{BenchmarkHistory, BenchmarkResult, BenchmarkSample, CommitRecord};
pub use error::{Error, Result};
pub use selection::SelectionState;
pub use store::{Commit, SeriesStore};
pub use ui::{Navigator, UiSurface};
pub use zoom::{NavAction, NavigationState, ZoomWindow};
