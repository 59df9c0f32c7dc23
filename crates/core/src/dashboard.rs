//! The dashboard controller: owns the viewing state and keeps the chart and
//! the controls in step with it.
//!
//! Every event that can change the selection or the window goes through
//! [`Dashboard::handle`], which ends in exactly one preserving redraw followed
//! by a refresh of the navigation buttons and the selector labels. Only
//! [`Dashboard::initialize`] issues a [`RedrawMode::Reset`].

use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use url::Url;

use crate::chart::{ChartAdapter, ChartFrame, PointerEvent, RedrawMode};
use crate::colors::ColorAssignment;
use crate::error::{Error, Result};
use crate::selection::SelectionState;
use crate::store::{Commit, SeriesStore};
use crate::ui::{required_element_ids, Navigator, UiSurface};
use crate::zoom::{NavAction, NavigationState, ZoomWindow};

/// Default repository web view commits are opened in
pub const DEFAULT_BROWSE_BASE: &str = "https://r8.googlesource.com/r8/+/";

/// Default metric plotted for each benchmark
pub const DEFAULT_METRIC: &str = "code_size";

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Title shown above the chart
    pub title: String,
    /// Sample field plotted for every benchmark
    pub metric: String,
    /// Commit pages live at `<browse_base>/<hash>`
    pub browse_base: String,
    /// Benchmarks selected at load; all of them when `None`
    pub initial_selection: Option<Vec<String>>,
    /// Window at load as `(left, right)`; the full history when `None`
    pub initial_window: Option<(usize, usize)>,
    /// Fixed colors that win over the palette
    pub colors: BTreeMap<String, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Benchmark Results".to_string(),
            metric: DEFAULT_METRIC.to_string(),
            browse_base: DEFAULT_BROWSE_BASE.to_string(),
            initial_selection: None,
            initial_window: None,
            colors: BTreeMap::new(),
        }
    }
}

/// Parse the browse base so that joining a hash appends a path segment.
pub fn parse_browse_base(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if url.cannot_be_a_base() {
        return Err(Error::ConfigError(format!(
            "browse base '{}' cannot take a commit path",
            base
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Page for `commit` under `base`.
///
/// The hash is appended as a single percent-encoded path segment, so it can
/// never leave the browse base.
pub fn commit_url(base: &Url, commit: &Commit) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::ConfigError(format!("browse base '{}' cannot take a commit path", base)))?
        .pop_if_empty()
        .push(&commit.hash);
    Ok(url)
}

/// User input, as reported by the controls surface
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A benchmark checkbox changed
    ToggleBenchmark { name: String, checked: bool },
    /// A navigation button was clicked
    Navigate(NavAction),
    /// The chart surface was clicked
    ChartClick(PointerEvent),
}

/// What handling an event did
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Redrawn,
    Opened(Url),
    Ignored,
}

pub struct Dashboard<C, U, N> {
    store: SeriesStore,
    config: DashboardConfig,
    browse_base: Url,
    selection: SelectionState,
    window: ZoomWindow,
    colors: ColorAssignment,
    chart: C,
    ui: U,
    navigator: N,
}

impl<C, U, N> Dashboard<C, U, N>
where
    C: ChartAdapter,
    U: UiSurface,
    N: Navigator,
{
    /// Check the surface, build the initial state, wire up the selectors and
    /// draw the first frame.
    ///
    /// Nothing is pushed to the surface until every required element and
    /// setting has been validated.
    pub fn initialize(
        store: SeriesStore,
        config: DashboardConfig,
        chart: C,
        mut ui: U,
        navigator: N,
    ) -> Result<Self> {
        if let Some(missing) = required_element_ids().find(|id| !ui.has_element(id)) {
            return Err(Error::MissingElement(missing.to_string()));
        }
        if config.metric.trim().is_empty() {
            return Err(Error::ConfigError("metric must not be empty".to_string()));
        }
        let browse_base = parse_browse_base(&config.browse_base)?;

        let window = match config.initial_window {
            Some((left, right)) => ZoomWindow::new(left, right, store.commit_count())?,
            None => ZoomWindow::full(store.commit_count())?,
        };

        let known = store.benchmark_names().clone();
        let selection = match &config.initial_selection {
            Some(initial) => SelectionState::new(known, initial),
            None => SelectionState::all(known),
        };

        selection.for_each(|name, selected| ui.add_benchmark_selector(name, selected));

        info!(
            "Initialized dashboard with {} of {} benchmarks over {}",
            selection.len(),
            store.benchmark_names().len(),
            window
        );

        let mut dashboard = Self {
            store,
            config,
            browse_base,
            selection,
            window,
            colors: ColorAssignment::new(),
            chart,
            ui,
            navigator,
        };
        dashboard.redraw(RedrawMode::Reset)?;
        Ok(dashboard)
    }

    /// Apply one user event.
    pub fn handle(&mut self, event: UiEvent) -> Result<Effect> {
        match event {
            UiEvent::ToggleBenchmark { name, checked } => {
                if !self.store.is_known(&name) {
                    warn!("Checkbox for unknown benchmark {}", name);
                }
                self.selection.toggle(&name, checked);
                self.redraw(RedrawMode::Preserve)?;
                Ok(Effect::Redrawn)
            }
            UiEvent::Navigate(action) => {
                self.window.apply(action);
                self.redraw(RedrawMode::Preserve)?;
                Ok(Effect::Redrawn)
            }
            UiEvent::ChartClick(pointer) => self.open_clicked_commit(pointer),
        }
    }

    /// Toggle a benchmark and redraw
    pub fn toggle_benchmark(&mut self, name: &str, checked: bool) -> Result<Effect> {
        self.handle(UiEvent::ToggleBenchmark {
            name: name.to_string(),
            checked,
        })
    }

    /// Run a navigation step and redraw
    pub fn navigate(&mut self, action: NavAction) -> Result<Effect> {
        self.handle(UiEvent::Navigate(action))
    }

    fn open_clicked_commit(&mut self, pointer: PointerEvent) -> Result<Effect> {
        let Some(hit) = self.chart.hit_test(pointer) else {
            debug!("Click at ({}, {}) hit no point", pointer.x, pointer.y);
            return Ok(Effect::Ignored);
        };

        if hit.point_index >= self.window.width() {
            warn!(
                "Hit on {} at point {} is outside the {}-commit window",
                hit.benchmark,
                hit.point_index,
                self.window.width()
            );
            return Ok(Effect::Ignored);
        }

        let index = self.window.left() + hit.point_index;
        let Some(commit) = self.store.commit(index) else {
            warn!("Hit on {} resolved to commit {} outside the history", hit.benchmark, index);
            return Ok(Effect::Ignored);
        };

        let url = commit_url(&self.browse_base, commit)?;
        info!("Opening commit {} ({}): {}", commit.short_hash(), hit.benchmark, url);
        self.navigator.open(&url);
        Ok(Effect::Opened(url))
    }

    fn redraw(&mut self, mode: RedrawMode) -> Result<()> {
        self.colors = ColorAssignment::from_palette(self.selection.selected(), &self.config.colors);

        {
            let frame = ChartFrame::build(
                &self.config.title,
                &self.config.metric,
                &self.store,
                &self.selection,
                self.window,
                &self.colors,
            );
            debug!(
                ?mode,
                window = %self.window,
                series = frame.series.len(),
                "Redrawing chart"
            );
            self.chart.redraw(&frame, mode)?;
        }

        self.update_navigation();
        self.update_label_colors();
        Ok(())
    }

    fn update_navigation(&mut self) {
        let navigation = self.window.navigation();
        for action in NavAction::ALL {
            self.ui
                .set_control_disabled(action, !navigation.is_enabled(action));
        }
    }

    fn update_label_colors(&mut self) {
        let ui = &mut self.ui;
        let colors = &self.colors;
        self.selection
            .for_each(|name, _| ui.set_label_style(name, &colors.label_style(name)));
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn window(&self) -> ZoomWindow {
        self.window
    }

    pub fn navigation(&self) -> NavigationState {
        self.window.navigation()
    }

    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
