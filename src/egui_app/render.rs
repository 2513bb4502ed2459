#![cfg(feature = "egui")]

use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Rect, Stroke, StrokeKind, Vec2,
};

use super::geometry::{to_screen, to_screen_rect};
use crate::model::{Coordinate, HoveredItem, Node, NodeAttachment, NodeKind, Shape};

/// Genes and RNA are only drawn at or above this zoom factor.
const GENE_MIN_FACTOR: f32 = 0.4;
/// Attachment icons are too small to be legible below this factor.
const ATTACHMENT_MIN_FACTOR: f32 = 0.6;
/// Node labels disappear below this factor.
const LABEL_MIN_FACTOR: f32 = 0.25;

const PROTEIN_FILL: Color32 = Color32::from_rgb(141, 199, 187);
const CHEMICAL_FILL: Color32 = Color32::from_rgb(165, 215, 145);
const COMPLEX_FILL: Color32 = Color32::from_rgb(171, 209, 227);
const SET_FILL: Color32 = Color32::from_rgb(160, 187, 205);
const GENE_FILL: Color32 = Color32::from_rgb(235, 223, 176);
const RNA_FILL: Color32 = Color32::from_rgb(178, 191, 234);
const BORDER: Color32 = Color32::from_rgb(60, 60, 60);
const TEXT_COLOR: Color32 = Color32::from_rgb(25, 25, 25);
const ATTACHMENT_FILL: Color32 = Color32::WHITE;
const HIGHLIGHT: Color32 = Color32::from_rgb(0, 120, 215);

/// Renderer dispatch keyed by node kind.
///
/// One variant per drawable kind; each implements the draw / highlight /
/// hover contract against the shared painter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRenderer {
    Protein,
    Chemical,
    Complex,
    EntitySet,
    Gene,
    Rna,
}

impl NodeRenderer {
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Protein => NodeRenderer::Protein,
            NodeKind::Chemical => NodeRenderer::Chemical,
            NodeKind::Complex => NodeRenderer::Complex,
            NodeKind::EntitySet => NodeRenderer::EntitySet,
            NodeKind::Gene => NodeRenderer::Gene,
            NodeKind::Rna => NodeRenderer::Rna,
        }
    }

    /// Visibility policy per kind: genes and RNA vanish when zoomed far out,
    /// everything else is always drawn.
    pub fn is_visible(&self, _node: &Node, factor: f32) -> bool {
        match self {
            NodeRenderer::Gene | NodeRenderer::Rna => factor >= GENE_MIN_FACTOR,
            _ => true,
        }
    }

    /// Render the node body, label and (for proteins) attachment icons.
    /// No-op when the node is not visible at this zoom factor.
    pub fn draw(&self, painter: &Painter, node: &Node, factor: f32, offset: Vec2) {
        if !self.is_visible(node, factor) {
            return;
        }
        let rect = to_screen_rect(&node.prop, factor, offset);
        match self {
            NodeRenderer::Protein => {
                painter.rect_filled(rect, 4.0 * factor, PROTEIN_FILL);
                painter.rect_stroke(
                    rect,
                    4.0 * factor,
                    Stroke::new(1.0, BORDER),
                    StrokeKind::Inside,
                );
            }
            NodeRenderer::Chemical => {
                painter.add(egui::Shape::Ellipse(egui::epaint::EllipseShape {
                    center: rect.center(),
                    radius: rect.size() / 2.0,
                    fill: CHEMICAL_FILL,
                    stroke: Stroke::new(1.0, BORDER),
                }));
            }
            NodeRenderer::Complex => {
                // Complexes carry a double border.
                painter.rect_filled(rect, 2.0 * factor, COMPLEX_FILL);
                painter.rect_stroke(
                    rect,
                    2.0 * factor,
                    Stroke::new(1.0, BORDER),
                    StrokeKind::Inside,
                );
                painter.rect_stroke(
                    rect.shrink(3.0 * factor),
                    2.0 * factor,
                    Stroke::new(1.0, BORDER),
                    StrokeKind::Inside,
                );
            }
            NodeRenderer::EntitySet => {
                painter.rect_filled(rect, 6.0 * factor, SET_FILL);
                painter.rect_stroke(
                    rect,
                    6.0 * factor,
                    Stroke::new(1.0, BORDER),
                    StrokeKind::Inside,
                );
                painter.rect_stroke(
                    rect.shrink(3.0 * factor),
                    6.0 * factor,
                    Stroke::new(1.0, BORDER),
                    StrokeKind::Inside,
                );
            }
            NodeRenderer::Gene => {
                // Gene glyph: filled body with the flag line along the top.
                painter.rect_filled(rect, 0.0, GENE_FILL);
                painter.line_segment(
                    [rect.left_top(), rect.right_top()],
                    Stroke::new(2.0, BORDER),
                );
                painter.line_segment(
                    [
                        rect.right_top(),
                        rect.right_top() + Vec2::new(-6.0 * factor, -4.0 * factor),
                    ],
                    Stroke::new(2.0, BORDER),
                );
            }
            NodeRenderer::Rna => {
                painter.rect_filled(rect, 8.0 * factor, RNA_FILL);
                painter.rect_stroke(
                    rect,
                    8.0 * factor,
                    Stroke::new(1.0, BORDER),
                    StrokeKind::Inside,
                );
            }
        }

        if factor >= LABEL_MIN_FACTOR {
            let font = FontId::proportional((11.0 * factor).max(1.0));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &node.display_name,
                font,
                TEXT_COLOR,
            );
        }

        if matches!(self, NodeRenderer::Protein) && factor >= ATTACHMENT_MIN_FACTOR {
            for attachment in &node.attachments {
                draw_attachment(painter, attachment, factor, offset, true);
            }
        }
    }

    /// Selection/hover overlay over the body and attachments. Assumes the
    /// base pass already ran this frame.
    pub fn highlight(&self, painter: &Painter, node: &Node, factor: f32, offset: Vec2) {
        let rect = to_screen_rect(&node.prop, factor, offset).expand(2.0);
        painter.rect_stroke(
            rect,
            4.0 * factor,
            Stroke::new(2.5, HIGHLIGHT),
            StrokeKind::Outside,
        );
        if matches!(self, NodeRenderer::Protein) && factor >= ATTACHMENT_MIN_FACTOR {
            for attachment in &node.attachments {
                draw_attachment(painter, attachment, factor, offset, false);
            }
        }
    }

    /// Hover query in diagram coordinates; attachment priority follows the
    /// layout insertion order.
    pub fn get_hovered(&self, node: &Node, pos: Coordinate) -> Option<HoveredItem> {
        node.hovered_item(pos)
    }
}

/// Draw one attachment icon. `base` draws the filled icon with its label;
/// the highlight pass strokes the outline only.
fn draw_attachment(
    painter: &Painter,
    attachment: &NodeAttachment,
    factor: f32,
    offset: Vec2,
    base: bool,
) {
    let stroke = if base {
        Stroke::new(1.0, BORDER)
    } else {
        Stroke::new(2.0, HIGHLIGHT)
    };
    match &attachment.shape {
        Shape::Box { a, b } | Shape::Stop { a, b } => {
            let rect = Rect::from_min_max(
                to_screen(*a, factor, offset),
                to_screen(*b, factor, offset),
            );
            if base {
                painter.rect_filled(rect, 1.0, ATTACHMENT_FILL);
            }
            painter.rect_stroke(rect, 1.0, stroke, StrokeKind::Inside);
        }
        Shape::Circle { c, r } => {
            let center = to_screen(*c, factor, offset);
            if base {
                painter.circle_filled(center, *r as f32 * factor, ATTACHMENT_FILL);
            }
            painter.circle_stroke(center, *r as f32 * factor, stroke);
        }
        Shape::DoubleCircle { c, r, r1 } => {
            let center = to_screen(*c, factor, offset);
            if base {
                painter.circle_filled(center, *r as f32 * factor, ATTACHMENT_FILL);
            }
            painter.circle_stroke(center, *r as f32 * factor, stroke);
            painter.circle_stroke(center, *r1 as f32 * factor, stroke);
        }
        Shape::Arrow { a, b, c } => {
            let points = vec![
                to_screen(*a, factor, offset),
                to_screen(*b, factor, offset),
                to_screen(*c, factor, offset),
            ];
            let fill = if base {
                ATTACHMENT_FILL
            } else {
                Color32::TRANSPARENT
            };
            painter.add(egui::Shape::convex_polygon(points, fill, stroke));
        }
    }
    if base {
        if let Some(label) = &attachment.label {
            let font = FontId::proportional((7.0 * factor).max(1.0));
            painter.text(
                to_screen(attachment.shape.centre(), factor, offset),
                Align2::CENTER_CENTER,
                label,
                font,
                TEXT_COLOR,
            );
        }
    }
}
