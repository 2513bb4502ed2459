use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::events::{DiagramEvent, EventBus};

/// A named result category with its hit count, as reported by the search
/// backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetCount {
    pub name: String,
    pub count: u64,
}

/// A facet tag as rendered in the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    pub name: String,
    pub count: u64,
    pub selected: bool,
}

/// Selection-set state machine over the available facets.
///
/// The empty selection set is the canonical "no filter" state: every result
/// is visible and every tag renders selected. Facets keep the order in which
/// the backend listed them.
#[derive(Clone)]
pub struct FacetSelection {
    facets: IndexMap<String, Facet>,
    selected: BTreeSet<String>,
    bus: EventBus,
}

impl FacetSelection {
    pub fn new(bus: EventBus) -> Self {
        Self {
            facets: IndexMap::new(),
            selected: BTreeSet::new(),
            bus,
        }
    }

    /// Replace the facet list, re-applying only the names of `previous` that
    /// still exist; unmatched previous selections are silently dropped. With
    /// an empty previous selection all tags render selected (no filter).
    pub fn set_facets(&mut self, facets: &[FacetCount], previous: &BTreeSet<String>) {
        self.facets.clear();
        self.selected.clear();
        for fc in facets {
            let selected = if previous.is_empty() {
                true
            } else if previous.contains(&fc.name) {
                self.selected.insert(fc.name.clone());
                true
            } else {
                false
            };
            self.facets.insert(
                fc.name.clone(),
                Facet {
                    name: fc.name.clone(),
                    count: fc.count,
                    selected,
                },
            );
        }
    }

    /// Apply a toggle transition for the named facet.
    ///
    /// From the canonical "showing all" state the implicit selection is
    /// dropped first, so the clicked tag becomes the only active filter.
    /// When the toggle leaves every facet selected, the set is cleared again:
    /// the user no longer needs a filter. Every applied toggle fires
    /// [`DiagramEvent::FacetsChanged`]; unknown names are ignored.
    pub fn toggle(&mut self, name: &str) -> bool {
        if !self.facets.contains_key(name) {
            return false;
        }
        if self.selected.is_empty() {
            for facet in self.facets.values_mut() {
                facet.selected = false;
            }
        }
        if let Some(facet) = self.facets.get_mut(name) {
            if facet.selected {
                facet.selected = false;
                self.selected.remove(name);
            } else {
                facet.selected = true;
                self.selected.insert(name.to_owned());
            }
        }
        if self.selected.len() == self.facets.len() {
            self.selected.clear();
        }
        self.bus.fire(&DiagramEvent::FacetsChanged {
            selected: self.selected.clone(),
        });
        true
    }

    /// Defensive copy of the current selection set.
    pub fn selected_facets(&self) -> BTreeSet<String> {
        self.selected.clone()
    }

    /// Tags in backend order. Recomputed from the current state on each call;
    /// the panel never patches its tag list incrementally.
    pub fn tags(&self) -> Vec<&Facet> {
        self.facets.values().collect()
    }

    /// Whether a result categorized under `facet_name` passes the filter.
    pub fn is_visible(&self, facet_name: &str) -> bool {
        self.selected.is_empty() || self.selected.contains(facet_name)
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }
}
