// prism-data: Serde model for design token JSON documents
pub mod document;
pub mod error;
pub mod model;

pub use document::TokenDocument;
pub use error::DataError;
pub use model::{StructuralIssue, TokenLeaf, TokenNode};

#[cfg(test)]
mod tests {
    use super::model::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_leaf_and_groups() {
        let data = json!({
            "$schema": "https://design-tokens.example/schema.json",
            "color": {
                "brand": {
                    "base": { "$value": "#066a8d", "$type": "color", "$description": "Primary" }
                }
            }
        });
        let node: TokenNode = serde_json::from_value(data).unwrap();
        let TokenNode::Group(children) = &node else {
            panic!("Expected group, got {:?}", node);
        };
        assert_eq!(children.len(), 1, "`$schema` must not become a child");

        match node.get(&["color", "brand", "base"]) {
            Some(TokenNode::Leaf(leaf)) => {
                assert_eq!(leaf.value, "#066a8d");
                assert_eq!(leaf.ty.as_deref(), Some("color"));
                assert_eq!(leaf.description.as_deref(), Some("Primary"));
            }
            other => panic!("Expected leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_numbers_are_stringified() {
        let (node, issues) = TokenNode::from_value(&json!({
            "opacity": { "disabled": { "$value": 0.4 } },
            "z": { "modal": { "$value": 100 } }
        }));
        assert!(issues.is_empty());
        assert_eq!(
            node.get(&["opacity", "disabled"]),
            Some(&TokenNode::leaf("0.4"))
        );
        assert_eq!(node.get(&["z", "modal"]), Some(&TokenNode::leaf("100")));
    }

    #[test]
    fn test_group_type_is_inherited() {
        let (node, _) = TokenNode::from_value(&json!({
            "space": {
                "$type": "dimension",
                "sm": { "$value": "4px" },
                "pct": { "$value": "50%", "$type": "percentage" }
            }
        }));
        let Some(TokenNode::Leaf(sm)) = node.get(&["space", "sm"]) else {
            panic!("Expected leaf");
        };
        assert_eq!(sm.ty.as_deref(), Some("dimension"));
        let Some(TokenNode::Leaf(pct)) = node.get(&["space", "pct"]) else {
            panic!("Expected leaf");
        };
        assert_eq!(pct.ty.as_deref(), Some("percentage"));
    }

    #[test]
    fn test_missing_value_is_reported() {
        let (node, issues) = TokenNode::from_value(&json!({
            "color": { "broken": { "$type": "color" } }
        }));
        assert_eq!(node.leaf_count(), 0);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "color.broken");
        assert!(issues[0].message.contains("$value"));
    }

    #[test]
    fn test_non_object_nodes_are_empty() {
        let (node, issues) = TokenNode::from_value(&json!({
            "notes": "free text",
            "list": [1, 2, 3],
            "ok": { "$value": "1px" }
        }));
        assert!(issues.is_empty());
        assert_eq!(node.leaf_count(), 1);
        assert_eq!(node.get(&["notes"]), Some(&TokenNode::default()));
    }

    #[test]
    fn test_composite_value_is_an_issue() {
        let (node, issues) = TokenNode::from_value(&json!({
            "type": { "body": { "$value": { "fontSize": "16px" } } }
        }));
        assert_eq!(node.leaf_count(), 0);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("object"));
    }

    #[test]
    fn test_insert_and_serialize() {
        let mut root = TokenNode::default();
        root.insert(
            &["color", "brand", "700"],
            TokenNode::Leaf(TokenLeaf::new("oklch(45% 0.11 229.5)").with_type("color")),
        );
        root.insert(&["color", "brand", "800"], TokenNode::leaf("oklch(37% 0.1 229)"));

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(
            value,
            json!({
                "color": { "brand": {
                    "700": { "$value": "oklch(45% 0.11 229.5)", "$type": "color" },
                    "800": { "$value": "oklch(37% 0.1 229)" }
                } }
            })
        );

        let back: TokenNode = serde_json::from_value(value).unwrap();
        assert_eq!(back, root);
    }

    #[test]
    fn test_insert_replaces_leaf_with_group() {
        let mut root = TokenNode::default();
        root.insert(&["color", "brand"], TokenNode::leaf("#066a8d"));
        root.insert(&["color", "brand", "500"], TokenNode::leaf("#0a7fa6"));
        assert_eq!(root.leaf_count(), 1);
        assert!(root.get(&["color", "brand", "500"]).unwrap().is_leaf());
    }
}
