use prism_data::{DataError, TokenDocument, TokenNode};
use std::path::Path;

#[test]
fn test_parse_foundation() {
    let doc = TokenDocument::from_path(Path::new("tests/fixtures/foundation.json"))
        .expect("Failed to parse foundation.json");
    assert!(doc.issues.is_empty(), "unexpected issues: {:?}", doc.issues);
    assert_eq!(doc.root.leaf_count(), 7);

    match doc.root.get(&["space", "md"]) {
        Some(TokenNode::Leaf(leaf)) => {
            assert_eq!(leaf.value, "16px");
            assert_eq!(leaf.ty.as_deref(), Some("dimension"));
        }
        other => panic!("Expected space.md leaf, got {:?}", other),
    }
}

#[test]
fn test_parse_component_reports_missing_value() {
    let doc = TokenDocument::from_path(Path::new("tests/fixtures/component.json"))
        .expect("Failed to parse component.json");
    assert_eq!(doc.root.leaf_count(), 3);
    assert_eq!(doc.issues.len(), 1);
    assert_eq!(doc.issues[0].path, "button.label");
}

#[test]
fn test_malformed_json_has_location() {
    let err = TokenDocument::from_path(Path::new("tests/fixtures/malformed.json")).unwrap_err();
    match &err {
        DataError::Json { path, line, .. } => {
            assert!(path.ends_with("malformed.json"));
            assert_eq!(*line, 3);
        }
        other => panic!("Expected JSON error, got {:?}", other),
    }
    assert!(err.to_string().contains("malformed.json"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = TokenDocument::from_path(Path::new("tests/fixtures/does-not-exist.json")).unwrap_err();
    assert!(matches!(err, DataError::Io { .. }));
}
