//! Identity stability of cached child views and its interaction with
//! writes.

use std::rc::Rc;

use serde_json::json;
use use_model_core::{Model, Read, ValueKind};

fn model(data: serde_json::Value) -> Model {
    Model::new(data, None).unwrap()
}

#[test]
fn repeated_reads_return_the_same_child_identity() {
    let model = model(json!({"child": {"a": 1}, "other": {"b": 2}}));
    let view = model.view();
    let first = view.get("child").node().unwrap();
    let second = view.get("child").node().unwrap();
    assert!(Rc::ptr_eq(&first, &second));

    // An unrelated sibling read does not disturb the cache.
    let _ = view.get("other").node().unwrap();
    let third = view.get("child").node().unwrap();
    assert!(Rc::ptr_eq(&first, &third));
}

#[test]
fn writing_a_property_invalidates_its_cached_child() {
    let model = model(json!({"child": {"a": 1}, "other": {"b": 2}}));
    let view = model.view();
    let before = view.get("child").node().unwrap();
    let sibling = view.get("other").node().unwrap();

    view.set("child", json!({"a": 2})).unwrap();

    let after = view.get("child").node().unwrap();
    assert!(!Rc::ptr_eq(&before, &after));
    assert_eq!(after.to_value(), json!({"a": 2}));

    // Only the written key is evicted.
    assert!(Rc::ptr_eq(&sibling, &view.get("other").node().unwrap()));
}

#[test]
fn null_and_absent_properties_pass_through_unwrapped() {
    let model = model(json!({"gone": null}));
    let view = model.view();
    assert!(matches!(view.get("gone"), Read::Null));
    assert_eq!(view.get("gone").scalar(), Some(json!(null)));
    assert!(view.get("missing").is_absent());
}

#[test]
fn kind_reports_the_target_type_and_dangling_paths() {
    let model = model(json!({"child": {"items": [1]}}));
    let view = model.view();
    assert_eq!(view.kind(), ValueKind::Object);

    let child = view.get("child").node().unwrap();
    let items = child.get("items").node().unwrap();
    assert_eq!(items.kind(), ValueKind::Array);

    // Overwriting the parent leaves the old child view dangling.
    view.set("child", 1).unwrap();
    assert_eq!(items.kind(), ValueKind::Absent);
    assert_eq!(view.get("child").scalar(), Some(json!(1)));
}

#[test]
fn scalars_are_read_by_value() {
    let model = model(json!({"name": "Jochen", "age": 7, "tall": false}));
    let view = model.view();
    assert_eq!(view.get("name").scalar(), Some(json!("Jochen")));
    assert_eq!(view.get("age").scalar(), Some(json!(7)));
    assert_eq!(view.get("tall").scalar(), Some(json!(false)));
    assert!(view.get("name").node().is_none());
}

#[test]
fn nested_reads_reach_indexed_elements() {
    let model = model(json!({"children": [{"age": 3}, {"age": 5}]}));
    let view = model.view();
    let children = view.get("children").node().unwrap();
    assert!(children.is_array());
    assert_eq!(children.len(), 2);

    let second = children.at(1).node().unwrap();
    assert!(second.is_object());
    assert_eq!(second.get("age").scalar(), Some(json!(5)));
    assert_eq!(second.path().len(), 2);

    // Indexed children are cached too.
    assert!(Rc::ptr_eq(&second, &children.at(1).node().unwrap()));
}

#[test]
fn same_value_write_is_a_no_op() {
    let model = model(json!({"child": {"a": 1}, "name": "Jochen"}));
    let view = model.view();
    let cached = view.get("child").node().unwrap();

    view.set("name", "Jochen").unwrap();
    view.set("child", json!({"a": 1})).unwrap();

    assert!(!model.is_dirty());
    // No eviction happened either.
    assert!(Rc::ptr_eq(&cached, &view.get("child").node().unwrap()));
}

#[test]
fn written_values_are_stored_as_plain_data() {
    #[derive(serde::Serialize)]
    struct Address {
        city: String,
        zip: u32,
    }

    let model = model(json!({"address": null}));
    let view = model.view();
    view.set(
        "address",
        Address {
            city: "Bonn".to_owned(),
            zip: 53111,
        },
    )
    .unwrap();

    let address = view.get("address").node().unwrap();
    assert_eq!(address.to_value(), json!({"city": "Bonn", "zip": 53111}));
    assert_eq!(address.keys(), vec!["city", "zip"]);
}

#[test]
fn remove_deletes_the_property() {
    let model = model(json!({"a": 1, "b": 2}));
    let view = model.view();
    view.remove("a");
    assert!(view.get("a").is_absent());
    assert!(model.is_dirty());

    // Removing a key that is not there changes nothing.
    let model = Model::new(json!({"a": 1}), None).unwrap();
    model.view().remove("zzz");
    assert!(!model.is_dirty());
}

#[test]
fn sparse_index_writes_extend_with_nulls() {
    let model = model(json!({"items": [1]}));
    let view = model.view();
    let items = view.get("items").node().unwrap();
    items.set_index(3, "x").unwrap();
    assert_eq!(items.to_value(), json!([1, null, null, "x"]));
}
