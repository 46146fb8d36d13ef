use serde_json::json;

use crate::{InputValue, IntoInput, Maybe, Variables};

#[test]
fn strips_unset_at_every_depth_and_keeps_null() {
    let variables: Variables = [
        ("a", InputValue::Unset),
        ("b", InputValue::Null),
        (
            "c",
            InputValue::object([("d", InputValue::Unset), ("e", 1_i32.into_input())]),
        ),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        serde_json::Value::Object(variables.into_json()),
        json!({"b": null, "c": {"e": 1}})
    );
}

#[test]
fn strips_unset_inside_list_elements() {
    let value = InputValue::List(vec![
        InputValue::object([("x", InputValue::Unset), ("y", InputValue::Null)]),
        InputValue::Unset,
        InputValue::List(vec![InputValue::object([("z", InputValue::Unset)])]),
    ]);

    assert_eq!(value.strip_unset(), json!([{"y": null}, [{}]]));
}

#[test]
fn maybe_maps_to_three_states() {
    assert_eq!(Maybe::<i32>::Missing.into_input(), InputValue::Unset);
    assert_eq!(Maybe::<i32>::Null.into_input(), InputValue::Null);
    assert_eq!(Maybe::Value(7_i32).into_input(), 7_i32.into_input());
    assert!(Maybe::<i32>::default().is_missing());
}

#[test]
fn option_none_is_explicit_null() {
    assert_eq!(Maybe::<String>::from(None::<String>), Maybe::Null);
    assert_eq!(None::<String>.into_input(), InputValue::Null);
    assert_eq!(Maybe::from(Some(3)), Maybe::Value(3));
}

#[test]
fn variables_keep_declaration_order() {
    let variables = Variables::new()
        .with("second", "b")
        .with("first", Maybe::Value(vec![1_i32, 2]))
        .with("skipped", Maybe::<bool>::Missing);

    assert_eq!(variables.len(), 3);
    let keys: Vec<_> = variables.into_json().keys().cloned().collect();
    assert_eq!(keys, vec!["second", "first"]);
}

#[test]
fn json_values_convert_without_unset() {
    let value = json!({"nested": [1, null, {"k": "v"}]});
    assert_eq!(value.clone().into_input().strip_unset(), value);
}

#[test]
fn non_finite_floats_become_null() {
    assert_eq!(f64::NAN.into_input(), InputValue::Null);
    assert_eq!(1.5_f64.into_input().strip_unset(), json!(1.5));
}
