use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ────────────────────────────────────────────────────────────────────────────
// Geometry primitives
// ────────────────────────────────────────────────────────────────────────────

/// A point in diagram (world) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Coordinate) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned node body rectangle, as stored in the layout `prop` block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, p: Coordinate) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && p.x >= self.x
            && p.x <= self.x + self.width
            && p.y >= self.y
            && p.y <= self.y + self.height
    }

    pub fn centre(&self) -> Coordinate {
        Coordinate::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shapes
// ────────────────────────────────────────────────────────────────────────────

/// Geometry of a drawable sub-shape, tagged by kind as in the layout JSON.
///
/// `a` and `b` are opposite corners for box-like shapes; `c` is the centre of
/// circle-like shapes and the third vertex of arrow heads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shape {
    Box { a: Coordinate, b: Coordinate },
    Circle { c: Coordinate, r: f64 },
    DoubleCircle { c: Coordinate, r: f64, r1: f64 },
    Arrow { a: Coordinate, b: Coordinate, c: Coordinate },
    Stop { a: Coordinate, b: Coordinate },
}

impl Shape {
    /// Whether `pos` lies within the visible bounds of this shape.
    ///
    /// Degenerate geometry (inverted corners, non-positive radius, zero-area
    /// triangle) yields `false` rather than an error. Stop bars share the box
    /// containment test.
    pub fn is_hovered(&self, pos: Coordinate) -> bool {
        match self {
            Shape::Box { a, b } | Shape::Stop { a, b } => {
                a.x <= pos.x && pos.x <= b.x && a.y <= pos.y && pos.y <= b.y
            }
            Shape::Circle { c, r } => *r > 0.0 && c.distance_to(pos) <= *r,
            Shape::DoubleCircle { c, r, r1 } => {
                let outer = r.max(*r1);
                outer > 0.0 && c.distance_to(pos) <= outer
            }
            Shape::Arrow { a, b, c } => point_in_triangle(pos, *a, *b, *c),
        }
    }

    /// Centre of the shape, used to anchor labels.
    pub fn centre(&self) -> Coordinate {
        match self {
            Shape::Box { a, b } | Shape::Stop { a, b } => {
                Coordinate::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
            }
            Shape::Circle { c, .. } | Shape::DoubleCircle { c, .. } => *c,
            Shape::Arrow { a, b, c } => {
                Coordinate::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
            }
        }
    }
}

fn edge_sign(p: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    (a.x - p.x) * (b.y - p.y) - (a.y - p.y) * (b.x - p.x)
}

fn point_in_triangle(p: Coordinate, a: Coordinate, b: Coordinate, c: Coordinate) -> bool {
    // Zero-area triangles never register a hit.
    if edge_sign(a, b, c).abs() < f64::EPSILON {
        return false;
    }
    let d1 = edge_sign(p, a, b);
    let d2 = edge_sign(p, b, c);
    let d3 = edge_sign(p, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

// ────────────────────────────────────────────────────────────────────────────
// Nodes
// ────────────────────────────────────────────────────────────────────────────

/// Kind of a positioned diagram entity, from the layout `renderableClass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Protein,
    Chemical,
    Complex,
    EntitySet,
    Gene,
    #[serde(rename = "RNA")]
    Rna,
}

impl NodeKind {
    /// Display name, doubling as the facet name of search results.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Protein => "Protein",
            NodeKind::Chemical => "Chemical",
            NodeKind::Complex => "Complex",
            NodeKind::EntitySet => "EntitySet",
            NodeKind::Gene => "Gene",
            NodeKind::Rna => "RNA",
        }
    }
}

/// A named sub-shape (e.g. a modification icon) attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAttachment {
    #[serde(default)]
    pub reactome_id: Option<u64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub shape: Shape,
}

/// A positioned visual entity in a pathway diagram.
///
/// Immutable once laid out per diagram version; renderers only read it.
/// Attachments keep the insertion order of the layout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: u64,
    #[serde(default)]
    pub reactome_id: Option<u64>,
    #[serde(default)]
    pub st_id: Option<String>,
    pub display_name: String,
    #[serde(rename = "renderableClass")]
    pub kind: NodeKind,
    pub prop: Bounds,
    #[serde(default, rename = "nodeAttachments")]
    pub attachments: Vec<NodeAttachment>,
}

impl Node {
    /// Kind-dependent body containment: chemicals are drawn as the ellipse
    /// inscribed in their bounds, every other kind fills the rectangle.
    pub fn body_contains(&self, pos: Coordinate) -> bool {
        match self.kind {
            NodeKind::Chemical => {
                let rx = self.prop.width / 2.0;
                let ry = self.prop.height / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let c = self.prop.centre();
                let dx = (pos.x - c.x) / rx;
                let dy = (pos.y - c.y) / ry;
                dx * dx + dy * dy <= 1.0
            }
            _ => self.prop.contains(pos),
        }
    }

    /// Hover query: the first attachment (in insertion order) whose shape
    /// contains `pos` wins; otherwise the node body; otherwise no hit.
    pub fn hovered_item(&self, pos: Coordinate) -> Option<HoveredItem> {
        for (index, attachment) in self.attachments.iter().enumerate() {
            if attachment.shape.is_hovered(pos) {
                return Some(HoveredItem::attachment(self.id, index));
            }
        }
        if self.body_contains(pos) {
            Some(HoveredItem::body(self.id))
        } else {
            None
        }
    }
}

/// Transient result of a hover query: the owning node plus the specific
/// attachment under the cursor. `attachment_index == None` means the node
/// body itself was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoveredItem {
    pub node_id: u64,
    pub attachment_index: Option<usize>,
}

impl HoveredItem {
    pub fn body(node_id: u64) -> Self {
        Self {
            node_id,
            attachment_index: None,
        }
    }

    pub fn attachment(node_id: u64, index: usize) -> Self {
        Self {
            node_id,
            attachment_index: Some(index),
        }
    }

    pub fn is_attachment(&self) -> bool {
        self.attachment_index.is_some()
    }

    /// Resolve the hovered attachment against its owning node.
    pub fn resolve<'a>(&self, node: &'a Node) -> Option<&'a NodeAttachment> {
        self.attachment_index.and_then(|i| node.attachments.get(i))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Diagram
// ────────────────────────────────────────────────────────────────────────────

/// A loaded pathway diagram layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub st_id: String,
    pub display_name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Diagram {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let diagram = serde_json::from_str(json).context("Parse diagram layout JSON")?;
        Ok(diagram)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).with_context(|| format!("Read {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to load diagram layout {}", path.display()))
    }

    pub fn node_by_id(&self, id: u64) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// First node whose body or attachments contain `pos`.
    pub fn hovered_item(&self, pos: Coordinate) -> Option<HoveredItem> {
        self.nodes.iter().find_map(|n| n.hovered_item(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_shape(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Box {
            a: Coordinate::new(x0, y0),
            b: Coordinate::new(x1, y1),
        }
    }

    #[test]
    fn test_box_hit_center_and_miss_outside() {
        let s = box_shape(10.0, 10.0, 30.0, 20.0);
        assert!(s.is_hovered(s.centre()));
        assert!(!s.is_hovered(Coordinate::new(31.0, 15.0)));
        assert!(!s.is_hovered(Coordinate::new(20.0, 9.9)));
    }

    #[test]
    fn test_inverted_box_never_hits() {
        let s = box_shape(30.0, 20.0, 10.0, 10.0);
        assert!(!s.is_hovered(Coordinate::new(20.0, 15.0)));
    }

    #[test]
    fn test_circle_hit_and_degenerate() {
        let c = Shape::Circle {
            c: Coordinate::new(5.0, 5.0),
            r: 3.0,
        };
        assert!(c.is_hovered(Coordinate::new(5.0, 5.0)));
        assert!(c.is_hovered(Coordinate::new(8.0, 5.0)));
        assert!(!c.is_hovered(Coordinate::new(8.1, 5.0)));

        let degenerate = Shape::Circle {
            c: Coordinate::new(5.0, 5.0),
            r: 0.0,
        };
        assert!(!degenerate.is_hovered(Coordinate::new(5.0, 5.0)));
    }

    #[test]
    fn test_arrow_hit_and_zero_area() {
        let arrow = Shape::Arrow {
            a: Coordinate::new(0.0, 0.0),
            b: Coordinate::new(10.0, 0.0),
            c: Coordinate::new(5.0, 10.0),
        };
        assert!(arrow.is_hovered(Coordinate::new(5.0, 3.0)));
        assert!(!arrow.is_hovered(Coordinate::new(0.0, 10.0)));

        let flat = Shape::Arrow {
            a: Coordinate::new(0.0, 0.0),
            b: Coordinate::new(5.0, 0.0),
            c: Coordinate::new(10.0, 0.0),
        };
        assert!(!flat.is_hovered(Coordinate::new(5.0, 0.0)));
    }

    #[test]
    fn test_hovered_item_prefers_earliest_attachment() {
        let node = Node {
            id: 7,
            reactome_id: None,
            st_id: None,
            display_name: "EGFR".into(),
            kind: NodeKind::Protein,
            prop: Bounds {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 40.0,
            },
            attachments: vec![
                NodeAttachment {
                    reactome_id: None,
                    label: Some("P".into()),
                    description: None,
                    shape: box_shape(0.0, 0.0, 10.0, 10.0),
                },
                NodeAttachment {
                    reactome_id: None,
                    label: Some("Ub".into()),
                    description: None,
                    shape: box_shape(5.0, 5.0, 15.0, 15.0),
                },
            ],
        };
        // Both attachments overlap at (7, 7): the earliest-added one wins.
        let hit = node.hovered_item(Coordinate::new(7.0, 7.0)).unwrap();
        assert_eq!(hit, HoveredItem::attachment(7, 0));
        // Body hit when no attachment matches.
        let hit = node.hovered_item(Coordinate::new(50.0, 20.0)).unwrap();
        assert_eq!(hit, HoveredItem::body(7));
        assert!(!hit.is_attachment());
        // Complete miss.
        assert!(node.hovered_item(Coordinate::new(200.0, 200.0)).is_none());
    }

    #[test]
    fn test_chemical_body_is_elliptic() {
        let node = Node {
            id: 1,
            reactome_id: None,
            st_id: None,
            display_name: "ATP".into(),
            kind: NodeKind::Chemical,
            prop: Bounds {
                x: 0.0,
                y: 0.0,
                width: 40.0,
                height: 20.0,
            },
            attachments: Vec::new(),
        };
        assert!(node.body_contains(Coordinate::new(20.0, 10.0)));
        // Rectangle corner lies outside the inscribed ellipse.
        assert!(!node.body_contains(Coordinate::new(1.0, 1.0)));
    }

    #[test]
    fn test_shape_tag_round_trip() {
        let json = r#"{"type":"DOUBLE_CIRCLE","c":{"x":1.0,"y":2.0},"r":4.0,"r1":3.0}"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert!(matches!(shape, Shape::DoubleCircle { .. }));
        let back = serde_json::to_string(&shape).unwrap();
        assert!(back.contains("\"DOUBLE_CIRCLE\""));
    }
}
