use pathview::model::{Coordinate, Diagram, NodeKind};
use std::io::Write;

const LAYOUT: &str = r#"{
  "stId": "R-HSA-109581",
  "displayName": "Apoptosis",
  "nodes": [
    {
      "id": 1,
      "reactomeId": 350869,
      "stId": "R-HSA-350869",
      "displayName": "CASP3",
      "renderableClass": "Protein",
      "prop": { "x": 100.0, "y": 80.0, "width": 90.0, "height": 40.0 },
      "nodeAttachments": [
        {
          "label": "P",
          "description": "phosphorylated",
          "shape": {
            "type": "CIRCLE",
            "c": { "x": 100.0, "y": 80.0 },
            "r": 6.0
          }
        }
      ]
    },
    {
      "id": 2,
      "displayName": "ATP",
      "renderableClass": "Chemical",
      "prop": { "x": 300.0, "y": 80.0, "width": 60.0, "height": 30.0 }
    },
    {
      "id": 3,
      "displayName": "pre-mRNA",
      "renderableClass": "RNA",
      "prop": { "x": 420.0, "y": 80.0, "width": 80.0, "height": 30.0 }
    }
  ]
}"#;

#[test]
fn test_layout_parses_from_string() {
    let diagram = Diagram::from_json_str(LAYOUT).unwrap();
    assert_eq!(diagram.st_id, "R-HSA-109581");
    assert_eq!(diagram.nodes.len(), 3);

    let caspase = diagram.node_by_id(1).unwrap();
    assert_eq!(caspase.kind, NodeKind::Protein);
    assert_eq!(caspase.attachments.len(), 1);
    assert_eq!(caspase.attachments[0].label.as_deref(), Some("P"));

    assert_eq!(diagram.node_by_id(3).unwrap().kind, NodeKind::Rna);
}

#[test]
fn test_layout_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LAYOUT.as_bytes()).unwrap();

    let diagram = Diagram::from_json_file(file.path()).unwrap();
    assert_eq!(diagram.display_name, "Apoptosis");

    // The attachment icon wins the hover over the protein body.
    let hit = diagram.hovered_item(Coordinate::new(100.0, 80.0)).unwrap();
    assert_eq!(hit.node_id, 1);
    assert!(hit.is_attachment());
}

#[test]
fn test_missing_file_reports_path() {
    let err = Diagram::from_json_file("/no/such/layout.json").unwrap_err();
    assert!(format!("{err:#}").contains("/no/such/layout.json"));
}

#[test]
fn test_unknown_renderable_class_is_rejected() {
    let json = r#"{
      "stId": "R-HSA-1",
      "displayName": "x",
      "nodes": [{
        "id": 1,
        "displayName": "y",
        "renderableClass": "Martian",
        "prop": { "x": 0.0, "y": 0.0, "width": 1.0, "height": 1.0 }
      }]
    }"#;
    assert!(Diagram::from_json_str(json).is_err());
}
