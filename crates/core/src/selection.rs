//! Which benchmarks are drawn on the chart

use std::collections::BTreeSet;
use tracing::{debug, warn};

/// The selected subset of the known benchmark names
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    known: BTreeSet<String>,
    selected: BTreeSet<String>,
}

impl SelectionState {
    /// Start with `initial` selected; names outside `known` are dropped.
    pub fn new<I, S>(known: BTreeSet<String>, initial: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = BTreeSet::new();
        for name in initial {
            let name = name.as_ref();
            if known.contains(name) {
                selected.insert(name.to_string());
            } else {
                warn!("Ignoring unknown benchmark in initial selection: {}", name);
            }
        }
        Self { known, selected }
    }

    /// Every known benchmark selected
    pub fn all(known: BTreeSet<String>) -> Self {
        let selected = known.clone();
        Self { known, selected }
    }

    /// Include or exclude `name`. Unknown names are left alone.
    ///
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, name: &str, included: bool) -> bool {
        if !self.known.contains(name) {
            debug!("Toggle of unknown benchmark {} ignored", name);
            return false;
        }

        let changed = if included {
            self.selected.insert(name.to_string())
        } else {
            self.selected.remove(name)
        };
        debug!(benchmark = name, included, changed, "Selection toggled");
        changed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    /// Visit every known benchmark with its current membership
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&str, bool),
    {
        for name in &self.known {
            callback(name, self.selected.contains(name));
        }
    }

    /// Selected names in sorted order
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn known(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_new_drops_unknown_names() {
        let selection = SelectionState::new(known(&["A", "B"]), ["A", "Z"]);
        assert!(selection.contains("A"));
        assert!(!selection.contains("Z"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut selection = SelectionState::new(known(&["A", "B"]), Vec::<String>::new());
        assert!(selection.is_empty());

        assert!(selection.toggle("A", true));
        assert!(selection.contains("A"));
        assert!(!selection.toggle("A", true));

        assert!(selection.toggle("A", false));
        assert!(!selection.contains("A"));
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let mut selection = SelectionState::all(known(&["A"]));
        assert!(!selection.toggle("Z", true));
        assert!(!selection.contains("Z"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_for_each_visits_all_known() {
        let selection = SelectionState::new(known(&["A", "B", "C"]), ["B"]);
        let mut visited = Vec::new();
        selection.for_each(|name, selected| visited.push((name.to_string(), selected)));

        assert_eq!(
            visited,
            vec![
                ("A".to_string(), false),
                ("B".to_string(), true),
                ("C".to_string(), false),
            ]
        );
    }

    proptest! {
        #[test]
        fn contains_reflects_latest_toggle(
            toggles in prop::collection::vec((0usize..4, any::<bool>()), 0..200)
        ) {
            let names = ["A", "B", "C", "D"];
            let mut selection = SelectionState::all(known(&names));
            let mut latest: HashMap<&str, bool> = HashMap::new();

            for (idx, included) in toggles {
                selection.toggle(names[idx], included);
                latest.insert(names[idx], included);
            }

            for name in names {
                let expected = latest.get(name).copied().unwrap_or(true);
                prop_assert_eq!(selection.contains(name), expected);
            }
        }
    }
}
