//! Cross-component notifications.
//!
//! Viewer components (facets panel, settings tab, loaders) do not hold
//! references to each other; they communicate through a shared [`EventBus`].
//! Handlers run synchronously on the firing thread, matching the
//! single-threaded event-dispatch discipline of the viewer.

use log::debug;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// What a pairwise-overlay request refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairwiseOverlaySource {
    /// A whole complex, addressed by its diagram node id.
    Complex { node_id: u64 },
    /// A single protein, addressed by accession and gene name.
    Protein { uniprot: String, gene_name: String },
}

/// Notifications exchanged between otherwise decoupled viewer components.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramEvent {
    /// The facet selection changed; carries the new canonical selection set.
    FacetsChanged { selected: BTreeSet<String> },
    /// A different interactor resource was chosen in the settings tab.
    InteractorsResourceChanged { resource: String },
    /// A chemical structure depiction finished loading.
    StructureImageLoaded { identifier: String },
    /// The pairwise-overlay button of a search result was pressed.
    PairwiseOverlayRequested(PairwiseOverlaySource),
}

type Handler = Arc<dyn Fn(&DiagramEvent) + Send + Sync>;

/// Synchronous fan-out bus. Cloning yields a handle to the same subscriber
/// list, so components constructed in different places can share one bus.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Arc<Mutex<Vec<Handler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&DiagramEvent) + Send + Sync + 'static,
    {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.push(Arc::new(handler));
        }
    }

    /// Deliver `event` to every subscriber. The lock is released before the
    /// handlers run so a handler may fire follow-up events.
    pub fn fire(&self, event: &DiagramEvent) {
        debug!("event: {event:?}");
        let snapshot: Vec<Handler> = match self.handlers.lock() {
            Ok(handlers) => handlers.clone(),
            Err(_) => return,
        };
        for handler in snapshot {
            handler(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_receive_events() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(move |e| sink.lock().unwrap().push(e.clone()));

        let clone = bus.clone();
        clone.fire(&DiagramEvent::InteractorsResourceChanged {
            resource: "static".into(),
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(matches!(
            &seen[0],
            DiagramEvent::InteractorsResourceChanged { resource } if resource == "static"
        ));
    }

    #[test]
    fn test_handler_may_fire_follow_up_event() {
        let bus = EventBus::new();
        let count = Arc::new(Mutex::new(0usize));

        let relay = bus.clone();
        let sink = Arc::clone(&count);
        bus.subscribe(move |e| {
            *sink.lock().unwrap() += 1;
            if matches!(e, DiagramEvent::StructureImageLoaded { .. }) {
                relay.fire(&DiagramEvent::InteractorsResourceChanged {
                    resource: "follow-up".into(),
                });
            }
        });

        bus.fire(&DiagramEvent::StructureImageLoaded {
            identifier: "CHEBI:15377".into(),
        });
        assert_eq!(*count.lock().unwrap(), 2);
    }
}
