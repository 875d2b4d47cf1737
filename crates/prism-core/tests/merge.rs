use prism_core::{merge, resolve, resolve_all};
use prism_data::TokenDocument;
use serde_json::json;

fn doc(name: &str, value: serde_json::Value) -> TokenDocument {
    TokenDocument::from_json_str(name, &value.to_string()).expect("valid JSON")
}

#[test]
fn aliases_cross_documents() {
    let foundation = doc(
        "tokens/foundation.json",
        json!({ "color": { "brand": { "base": { "$value": "#066a8d", "$type": "color" } } } }),
    );
    let semantic = doc(
        "tokens/semantic.json",
        json!({ "surface": { "accent": { "$value": "{color.brand.base}" } } }),
    );
    let component = doc(
        "tokens/component.json",
        json!({ "button": { "bg": { "$value": "{surface.accent}" } } }),
    );

    let merged = merge(&[foundation, semantic, component]);
    assert!(merged.duplicates.is_empty());
    assert_eq!(merged.map.len(), 3);
    assert_eq!(
        resolve("{button.bg}", &merged.map).as_deref(),
        Some("#066a8d")
    );

    let token = merged.map.get("button.bg").unwrap();
    assert_eq!(
        token.source.as_deref(),
        Some(std::path::Path::new("tokens/component.json"))
    );
}

#[test]
fn later_documents_win_and_are_reported() {
    let base = doc(
        "a.json",
        json!({ "space": { "md": { "$value": "16px" } } }),
    );
    let overrides = doc(
        "b.json",
        json!({ "space": { "md": { "$value": "20px" } } }),
    );

    let merged = merge(&[base, overrides]);
    assert_eq!(merged.map.get("space.md").unwrap().value, "20px");
    assert_eq!(merged.duplicates.len(), 1);

    let dup = &merged.duplicates[0];
    assert_eq!(dup.path, "space.md");
    assert_eq!(dup.shadowed.as_deref(), Some(std::path::Path::new("a.json")));
    assert_eq!(dup.winner, std::path::PathBuf::from("b.json"));
}

#[test]
fn resolving_twice_is_stable() {
    let documents = vec![doc(
        "tokens.json",
        json!({
            "a": { "$value": "{b}" },
            "b": { "$value": "{c}" },
            "c": { "$value": "4px" },
            "x": { "$value": "{y}" },
            "y": { "$value": "{x}" }
        }),
    )];
    let merged = merge(&documents);
    let first = resolve_all(&merged.map);
    let second = resolve_all(&merged.map);
    assert_eq!(first, second);
    assert_eq!(first.resolved_count(), 3);
    assert_eq!(first.unresolved_count(), 2);
}
