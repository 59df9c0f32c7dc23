//! Controls surface and navigation side effects consumed by the dashboard

use url::Url;

use crate::colors::LabelStyle;
use crate::zoom::NavAction;

/// Element holding one checkbox and label per benchmark
pub const SELECTORS_ELEMENT_ID: &str = "benchmark-selectors";

/// Element the chart is drawn into and clicks are read from
pub const CHART_ELEMENT_ID: &str = "chart";

/// Ids of every element the dashboard cannot work without
pub fn required_element_ids() -> impl Iterator<Item = &'static str> {
    [SELECTORS_ELEMENT_ID, CHART_ELEMENT_ID]
        .into_iter()
        .chain(NavAction::ALL.into_iter().map(NavAction::element_id))
}

/// The page the controls live on.
///
/// The dashboard only pushes state into the surface. User input comes back
/// as [`crate::UiEvent`]s handed to [`crate::Dashboard::handle`].
pub trait UiSurface {
    fn has_element(&self, id: &str) -> bool;

    /// Append a checkbox and label for `benchmark` to the selectors element
    fn add_benchmark_selector(&mut self, benchmark: &str, checked: bool);

    fn set_control_disabled(&mut self, action: NavAction, disabled: bool);

    fn set_label_style(&mut self, benchmark: &str, style: &LabelStyle);
}

/// Opens commit pages outside the dashboard
pub trait Navigator {
    fn open(&mut self, url: &Url);
}
