//! Pathway diagram viewing core.
//!
//! This crate provides the data model, hit-testing, search and
//! content-service plumbing of a biological-pathway diagram viewer. Diagram
//! layouts are loaded from JSON into strongly-typed Rust structures.
//!
//! The binary `pathview` loads a layout file and prints a summary or runs a
//! search over it.

pub mod content;
pub mod events;
pub mod model;
pub mod search;
pub mod validation;

// Optional GUI/egui functionality lives behind the `egui` feature flag.
// This module provides the interactive diagram viewer and is used by the
// demo in demos/viewer.rs.
#[cfg(feature = "egui")]
pub mod egui_app;
