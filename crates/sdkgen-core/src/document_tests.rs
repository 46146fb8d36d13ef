use indoc::indoc;

use crate::{Document, FieldSelection, OperationKind, Selection};

#[test]
fn response_key_prefers_alias() {
    let field = FieldSelection::new("name");
    assert_eq!(field.response_key(), "name");
    assert_eq!(field.alias("label").response_key(), "label");
}

#[test]
fn ir_deserializes_from_json() {
    let json = indoc! {r#"
        {
          "operations": [
            {
              "name": "getNode",
              "kind": "query",
              "selection": [
                {
                  "kind": "field",
                  "name": "node",
                  "selection": [
                    { "kind": "field", "name": "id" },
                    { "kind": "inline_fragment", "type_condition": "User",
                      "selection": [{ "kind": "field", "name": "name" }] },
                    { "kind": "fragment_spread", "name": "PostParts" }
                  ]
                }
              ],
              "text": "query getNode { node { id } }"
            }
          ]
        }
    "#};

    let document: Document = serde_json::from_str(json).unwrap();
    let operation = &document.operations[0];
    assert_eq!(operation.kind, OperationKind::Query);
    assert!(operation.variables.is_empty());

    let Selection::Field(node) = &operation.selection[0] else {
        panic!("expected a field");
    };
    assert_eq!(node.selection.len(), 3);
    assert_eq!(node.selection[1], Selection::on("User", vec![Selection::field("name")]));
    assert_eq!(node.selection[2], Selection::spread("PostParts"));
}

#[test]
fn extend_keeps_operation_order() {
    let mut first: Document = serde_json::from_str(
        r#"{"operations": [{"name": "a", "kind": "query", "selection": [], "text": ""}]}"#,
    )
    .unwrap();
    let second: Document = serde_json::from_str(
        r#"{"operations": [{"name": "b", "kind": "mutation", "selection": [], "text": ""}]}"#,
    )
    .unwrap();

    first.extend(second);
    let names: Vec<_> = first.operations.iter().map(|op| op.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(!first.is_empty());
    assert!(Document::default().is_empty());
}
