use medusa_core::{Error, Outline};
use serde_json::{Value, json};
use std::path::PathBuf;

fn fixture(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("outline")
        .join(name);
    let text = std::fs::read_to_string(&path).expect("fixture");
    serde_json::from_str(&text).expect("fixture JSON")
}

#[test]
fn validates_the_seven_node_fixture() {
    let outline = Outline::from_value(&fixture("test_topic.json")).expect("valid");
    assert_eq!(outline.name, "Test Topic");
    assert_eq!(outline.children.len(), 2);
    assert_eq!(outline.children[0].children.len(), 2);
    assert_eq!(outline.node_count(), 7);
}

#[test]
fn preserves_child_order() {
    let outline = Outline::from_value(&fixture("solar_system.json")).expect("valid");
    let names: Vec<&str> = outline.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Inner Planets", "Outer Planets", "Small Bodies"]);
    let inner: Vec<&str> = outline.children[0]
        .children
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(inner, vec!["Mercury", "Venus", "Earth", "Mars"]);
}

#[test]
fn rejects_missing_name() {
    let err = Outline::from_value(&fixture("bad_missing_name.json")).unwrap_err();
    let Error::InvalidData { message } = err else {
        panic!("expected InvalidData, got {err:?}");
    };
    assert!(message.contains("children[0]"), "message: {message}");
    assert!(message.contains("name"), "message: {message}");
}

#[test]
fn rejects_mistyped_name() {
    let err = Outline::from_value(&json!({ "name": 42 })).unwrap_err();
    assert!(matches!(err, Error::InvalidData { .. }));
    assert!(err.to_string().contains("must be a string"));
}

#[test]
fn rejects_empty_name() {
    let err = Outline::from_value(&json!({ "name": "   " })).unwrap_err();
    assert!(err.to_string().contains("must not be empty"));
}

#[test]
fn rejects_non_array_children() {
    let err = Outline::from_value(&json!({ "name": "n", "children": "nope" })).unwrap_err();
    assert!(err.to_string().contains("must be an array"));
}

#[test]
fn rejects_non_object_nodes() {
    let err = Outline::from_value(&json!(["not", "an", "object"])).unwrap_err();
    assert!(err.to_string().contains("must be an object"));

    let err = Outline::from_value(&json!({ "name": "n", "children": [null] })).unwrap_err();
    assert!(err.to_string().contains("children[0]"));
}

#[test]
fn tolerates_null_children_and_extra_keys() {
    let outline = Outline::from_value(&json!({
        "name": "n",
        "children": null,
        "confidence": 0.93
    }))
    .expect("valid");
    assert!(outline.children.is_empty());
}

#[test]
fn enforces_the_depth_guard() {
    let mut value = json!({ "name": "leaf" });
    for level in 0..40 {
        value = json!({ "name": format!("level {level}"), "children": [value] });
    }
    let err = Outline::from_value(&value).unwrap_err();
    assert_eq!(err, Error::DepthExceeded { limit: 32 });

    // A custom bound can admit the same outline.
    assert!(Outline::from_value_bounded(&value, 64).is_ok());
}

#[test]
fn serializes_back_to_the_wire_shape() {
    let outline = Outline::from_value(&fixture("test_topic.json")).expect("valid");
    let value = serde_json::to_value(&outline).expect("serialize");
    assert_eq!(value["children"][1]["children"][0]["name"], "Detail 2.1");
    // Leaves serialize without an empty `children` array.
    assert!(value["children"][0]["children"][0].get("children").is_none());
}
