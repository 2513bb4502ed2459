//! Egui-based interactive pathway diagram viewer (feature = "egui").
//!
//! Split into small submodules: geometry transforms, per-kind node
//! renderers, application state and the per-frame UI pass.

#![cfg(feature = "egui")]

mod geometry;
mod render;
mod state;
mod text;
mod ui;

pub use geometry::{to_diagram, to_screen, to_screen_rect};
pub use render::NodeRenderer;
pub use state::{InsertDialog, InsertTab, InteractorsTab, OccurrencesPopup, SearchPanel, SearchResult, ViewerApp};
pub use text::highlight_label_job;
