#![cfg(feature = "egui")]

use eframe::egui::{Pos2, Rect, Vec2};

use crate::model::{Bounds, Coordinate};

/// Diagram→screen transform: scale by the zoom factor, then shift by the
/// pixel offset supplied by the viewport.
pub fn to_screen(c: Coordinate, factor: f32, offset: Vec2) -> Pos2 {
    Pos2::new(
        c.x as f32 * factor + offset.x,
        c.y as f32 * factor + offset.y,
    )
}

pub fn to_screen_rect(b: &Bounds, factor: f32, offset: Vec2) -> Rect {
    Rect::from_min_size(
        to_screen(Coordinate::new(b.x, b.y), factor, offset),
        Vec2::new(b.width as f32 * factor, b.height as f32 * factor),
    )
}

/// Screen→diagram inverse, for pointer hit-testing.
pub fn to_diagram(p: Pos2, factor: f32, offset: Vec2) -> Coordinate {
    Coordinate::new(
        ((p.x - offset.x) / factor) as f64,
        ((p.y - offset.y) / factor) as f64,
    )
}
