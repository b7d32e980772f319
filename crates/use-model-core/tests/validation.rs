//! Field-scoped validation through the controller.

use serde_json::json;
use use_model_core::Model;
use use_model_schema::{NumSchema, Schema, SchemaBuilder, StrSchema};

fn person_schema() -> Schema {
    let b = SchemaBuilder::new();
    b.obj(vec![
        b.key(
            "name",
            b.str_of(StrSchema {
                min_length: Some(5),
                ..Default::default()
            }),
        ),
        b.key_opt(
            "children",
            b.arr(b.obj(vec![b.key(
                "age",
                b.num_of(NumSchema {
                    min: Some(0.0),
                    ..Default::default()
                }),
            )])),
        ),
    ])
}

#[test]
fn field_path_filtering_matches_nested_and_indexed_paths() {
    let schema = person_schema();
    let data = json!({"name": "Jo", "children": [{"age": -1}, {"age": -2}]});
    let model = Model::new(data, Some(&schema)).unwrap();

    let all = model.find_errors(None);
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].field, "name");
    assert_eq!(all[1].field, "children[0].age");
    assert_eq!(all[2].field, "children[1].age");

    assert_eq!(model.find_errors(Some("children")).len(), 2);
    assert_eq!(model.find_errors(Some("children[1]")).len(), 1);
    assert_eq!(model.find_errors(Some("name")).len(), 1);
    assert!(model.find_errors(Some("missing")).is_empty());
}

#[test]
fn short_name_scenario() {
    let schema = person_schema();
    let mut model = Model::new(json!({"name": "Jochen"}), Some(&schema)).unwrap();
    assert!(model.find_errors(None).is_empty());

    let view = model.view();
    view.set("name", "Jo").unwrap();

    let errors = model.find_errors(Some("name"));
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("at least 5 characters"));
    assert!(model.is_dirty());

    view.set("name", "Jochen").unwrap();
    assert!(model.find_errors(None).is_empty());
    assert!(!model.is_dirty());

    model.reset();
    assert!(model.find_errors(None).is_empty());
}

#[test]
fn errors_are_recomputed_against_the_live_snapshot() {
    let schema = person_schema();
    let model = Model::new(json!({"name": "Jo"}), Some(&schema)).unwrap();
    assert_eq!(model.find_errors(None).len(), 1);

    model.view().set("name", "Johanna").unwrap();
    assert!(model.find_errors(None).is_empty());
}

#[test]
fn models_without_a_schema_report_no_errors() {
    let model = Model::new(json!({"anything": true}), None).unwrap();
    assert!(model.find_errors(None).is_empty());
    assert!(model.find_errors(Some("anything")).is_empty());
}

#[test]
fn set_schema_swaps_the_validator() {
    let mut model = Model::new(json!({"name": "Jo"}), None).unwrap();
    assert!(model.find_errors(None).is_empty());

    model.set_schema(Some(&person_schema())).unwrap();
    assert_eq!(model.find_errors(Some("name")).len(), 1);

    model.set_schema(None).unwrap();
    assert!(model.find_errors(None).is_empty());
}

#[test]
fn malformed_schemas_fail_at_construction() {
    let b = SchemaBuilder::new();
    let schema = b.obj(vec![b.key(
        "id",
        b.str_of(StrSchema {
            pattern: Some("[broken".to_owned()),
            ..Default::default()
        }),
    )]);
    assert!(Model::new(json!({"id": "x"}), Some(&schema)).is_err());
}
