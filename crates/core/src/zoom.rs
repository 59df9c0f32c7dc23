//! Visible commit range and the four navigation steps

use serde::Serialize;
use std::fmt;
use std::ops::Range;
use tracing::debug;

use crate::error::{Error, Result};

/// One of the four navigation buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavAction {
    /// "show more left"
    ExpandLeft,
    /// "show less left"
    ContractLeft,
    /// "show less right"
    ContractRight,
    /// "show more right"
    ExpandRight,
}

impl NavAction {
    pub const ALL: [NavAction; 4] = [
        NavAction::ExpandLeft,
        NavAction::ContractLeft,
        NavAction::ContractRight,
        NavAction::ExpandRight,
    ];

    /// Element id of the button bound to this action
    pub fn element_id(self) -> &'static str {
        match self {
            NavAction::ExpandLeft => "show-more-left",
            NavAction::ContractLeft => "show-less-left",
            NavAction::ContractRight => "show-less-right",
            NavAction::ExpandRight => "show-more-right",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.element_id() == id)
    }
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Half-open window `[left, right)` over the commit sequence.
///
/// `0 <= left < right <= commit_count` holds for every window reachable
/// through the navigation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoomWindow {
    left: usize,
    right: usize,
    commit_count: usize,
}

impl ZoomWindow {
    /// Window covering every commit
    pub fn full(commit_count: usize) -> Result<Self> {
        Self::new(0, commit_count, commit_count)
    }

    pub fn new(left: usize, right: usize, commit_count: usize) -> Result<Self> {
        if left >= right || right > commit_count {
            return Err(Error::InvalidWindow {
                left,
                right,
                commit_count,
            });
        }
        Ok(Self {
            left,
            right,
            commit_count,
        })
    }

    pub fn left(&self) -> usize {
        self.left
    }

    pub fn right(&self) -> usize {
        self.right
    }

    pub fn commit_count(&self) -> usize {
        self.commit_count
    }

    pub fn width(&self) -> usize {
        self.right - self.left
    }

    pub fn range(&self) -> Range<usize> {
        self.left..self.right
    }

    /// Apply one navigation step. Returns whether the window moved.
    pub fn apply(&mut self, action: NavAction) -> bool {
        let before = *self;
        match action {
            NavAction::ExpandLeft => self.expand_left(),
            NavAction::ContractLeft => self.contract_left(),
            NavAction::ContractRight => self.contract_right(),
            NavAction::ExpandRight => self.expand_right(),
        }
        let changed = before != *self;
        debug!(
            %action,
            left = self.left,
            right = self.right,
            changed,
            "Zoom window updated"
        );
        changed
    }

    /// Move `left` back by the current width, stopping at 0.
    pub fn expand_left(&mut self) {
        if self.left == 0 {
            return;
        }
        let width = self.width();
        self.left = self.left.saturating_sub(width);
    }

    /// Move `left` forward by half the width, keeping at least one commit.
    pub fn contract_left(&mut self) {
        let width = self.width();
        self.left += width / 2;
        if self.left >= self.right {
            self.left = self.right - 1;
        }
    }

    /// Move `right` back by half the width.
    pub fn contract_right(&mut self) {
        // Unreachable while right > left >= 0; kept as the boundary guard.
        if self.right == 0 {
            return;
        }
        let width = self.width();
        self.right -= width / 2;
        // right - width / 2 > left for every width >= 1, so this never fires.
        if self.right < self.left {
            self.right = self.left;
        }
    }

    /// Move `right` forward by the current width, stopping at the last commit.
    pub fn expand_right(&mut self) {
        let width = self.width();
        self.right = (self.right + width).min(self.commit_count);
    }

    /// Enabled state of the navigation buttons for this window
    pub fn navigation(&self) -> NavigationState {
        let single = self.left + 1 == self.right;
        NavigationState {
            expand_left: self.left != 0,
            contract_left: !single,
            contract_right: !single,
            expand_right: self.right != self.commit_count,
        }
    }
}

impl fmt::Display for ZoomWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} of {}", self.left, self.right, self.commit_count)
    }
}

/// Which navigation buttons are enabled. Derived from a [`ZoomWindow`],
/// never stored alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub expand_left: bool,
    pub contract_left: bool,
    pub contract_right: bool,
    pub expand_right: bool,
}

impl NavigationState {
    pub fn is_enabled(&self, action: NavAction) -> bool {
        match action {
            NavAction::ExpandLeft => self.expand_left,
            NavAction::ContractLeft => self.contract_left,
            NavAction::ContractRight => self.contract_right,
            NavAction::ExpandRight => self.expand_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn window(left: usize, right: usize, count: usize) -> ZoomWindow {
        ZoomWindow::new(left, right, count).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_windows() {
        assert!(ZoomWindow::new(5, 5, 10).is_err());
        assert!(ZoomWindow::new(6, 5, 10).is_err());
        assert!(ZoomWindow::new(0, 11, 10).is_err());
        assert!(ZoomWindow::full(0).is_err());
        assert!(ZoomWindow::full(1).is_ok());
    }

    #[test]
    fn test_navigation_walkthrough() {
        let mut zoom = window(10, 20, 100);

        zoom.apply(NavAction::ExpandLeft);
        assert_eq!((zoom.left(), zoom.right()), (0, 20));

        zoom.apply(NavAction::ContractLeft);
        assert_eq!((zoom.left(), zoom.right()), (10, 20));

        zoom.apply(NavAction::ContractRight);
        assert_eq!((zoom.left(), zoom.right()), (10, 15));

        zoom.apply(NavAction::ExpandRight);
        assert_eq!((zoom.left(), zoom.right()), (10, 20));
    }

    #[test]
    fn test_expand_left_at_zero_is_noop() {
        let mut zoom = window(0, 5, 10);
        assert!(!zoom.apply(NavAction::ExpandLeft));
        assert_eq!(zoom, window(0, 5, 10));
    }

    #[test]
    fn test_expand_left_shifts_by_width() {
        let mut zoom = window(30, 40, 100);
        zoom.expand_left();
        assert_eq!(zoom, window(20, 40, 100));
    }

    #[test]
    fn test_single_commit_window_cannot_contract() {
        let mut zoom = window(4, 5, 10);
        assert!(!zoom.apply(NavAction::ContractLeft));
        assert_eq!(zoom, window(4, 5, 10));
        assert!(!zoom.apply(NavAction::ContractRight));
        assert_eq!(zoom, window(4, 5, 10));
    }

    #[test]
    fn test_contract_left_on_width_two() {
        let mut zoom = window(4, 6, 10);
        zoom.contract_left();
        assert_eq!(zoom, window(5, 6, 10));
    }

    #[test]
    fn test_contract_right_keeps_at_least_one_commit() {
        let mut zoom = window(4, 6, 10);
        zoom.contract_right();
        assert_eq!(zoom, window(4, 5, 10));

        let mut zoom = window(4, 7, 10);
        zoom.contract_right();
        assert_eq!(zoom, window(4, 6, 10));

        let mut zoom = window(0, 1, 1);
        zoom.contract_right();
        assert_eq!(zoom, window(0, 1, 1));
    }

    #[test]
    fn test_expand_right_at_end_is_noop() {
        let mut zoom = window(3, 10, 10);
        assert!(!zoom.apply(NavAction::ExpandRight));
        assert_eq!(zoom, window(3, 10, 10));
    }

    #[test]
    fn test_expand_right_clamps() {
        let mut zoom = window(2, 8, 10);
        zoom.expand_right();
        assert_eq!(zoom, window(2, 10, 10));
    }

    #[test]
    fn test_navigation_state() {
        let nav = window(0, 10, 10).navigation();
        assert!(!nav.expand_left);
        assert!(nav.contract_left);
        assert!(nav.contract_right);
        assert!(!nav.expand_right);

        let nav = window(4, 5, 10).navigation();
        assert!(nav.expand_left);
        assert!(!nav.contract_left);
        assert!(!nav.contract_right);
        assert!(nav.expand_right);
    }

    #[test]
    fn test_element_ids_round_trip() {
        for action in NavAction::ALL {
            assert_eq!(NavAction::from_element_id(action.element_id()), Some(action));
        }
        assert_eq!(NavAction::from_element_id("show-everything"), None);
    }

    fn arb_window() -> impl Strategy<Value = ZoomWindow> {
        (1usize..200)
            .prop_flat_map(|count| (Just(count), 0..count))
            .prop_flat_map(|(count, left)| (Just(count), Just(left), left + 1..=count))
            .prop_map(|(count, left, right)| window(left, right, count))
    }

    fn arb_action() -> impl Strategy<Value = NavAction> {
        prop::sample::select(NavAction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn every_step_keeps_window_valid(
            start in arb_window(),
            actions in prop::collection::vec(arb_action(), 0..64)
        ) {
            let mut zoom = start;
            for action in actions {
                zoom.apply(action);
                prop_assert!(zoom.left() < zoom.right());
                prop_assert!(zoom.right() <= zoom.commit_count());
            }
        }

        #[test]
        fn disabled_buttons_are_exactly_the_noops(
            start in arb_window(),
            actions in prop::collection::vec(arb_action(), 0..64)
        ) {
            let mut zoom = start;
            for action in actions {
                zoom.apply(action);
                let nav = zoom.navigation();
                prop_assert_eq!(nav.expand_left, zoom.left() != 0);
                prop_assert_eq!(nav.contract_left, zoom.width() != 1);
                prop_assert_eq!(nav.contract_right, zoom.width() != 1);
                prop_assert_eq!(nav.expand_right, zoom.right() != zoom.commit_count());

                for probe in NavAction::ALL {
                    let mut copy = zoom;
                    let moved = copy.apply(probe);
                    prop_assert_eq!(moved, nav.is_enabled(probe));
                }
            }
        }
    }
}
