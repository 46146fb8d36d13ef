use indoc::indoc;
use sdkgen_core::{OperationKind, Selection, TypeRef};

use super::{parse_document, parse_documents, parse_schema, with_typenames};
use crate::Error;

#[test]
fn lowers_operations_in_source_order() {
    let document = parse_document(indoc! {r#"
        mutation createUser($name: String!, $age: Int = 3) {
          createUser(name: $name, age: $age) { id }
        }

        query getUser($id: ID!) {
          user(id: $id) {
            userId: id
            ... on User { name }
            ...UserFields
          }
        }

        fragment UserFields on User { email }
    "#})
    .unwrap();

    let names: Vec<_> = document.operations.iter().map(|op| op.name.as_str()).collect();
    assert_eq!(names, vec!["createUser", "getUser"]);
    assert_eq!(document.operations[0].kind, OperationKind::Mutation);

    let variables = &document.operations[0].variables;
    assert_eq!(variables[0].ty, TypeRef::named("String"));
    assert!(!variables[0].has_default);
    assert_eq!(variables[1].ty, TypeRef::named("Int").nullable());
    assert!(variables[1].has_default);

    let Selection::Field(user) = &document.operations[1].selection[0] else {
        panic!("expected a field");
    };
    assert_eq!(user.selection.len(), 3);
    let Selection::Field(id) = &user.selection[0] else {
        panic!("expected a field");
    };
    assert_eq!(id.response_key(), "userId");
    assert_eq!(user.selection[1], Selection::on("User", vec![Selection::field("name")]));
    assert_eq!(user.selection[2], Selection::spread("UserFields"));
    assert_eq!(document.fragments["UserFields"].type_condition, "User");
}

#[test]
fn operation_text_carries_reached_fragments_only() {
    let document = parse_document(indoc! {r#"
        query getUser {
          user { ...A }
        }

        fragment Unused on User { id }
        fragment B on User { email }
        fragment A on User { name ...B }
    "#})
    .unwrap();

    let text = &document.operations[0].text;
    assert!(text.starts_with("query getUser"));
    assert!(text.contains("fragment A on User"));
    assert!(text.contains("fragment B on User"));
    assert!(!text.contains("Unused"));
    let b = text.find("fragment B").unwrap();
    let a = text.find("fragment A").unwrap();
    assert!(b < a, "fragments follow document order:\n{text}");
}

#[test]
fn fragments_are_shared_across_files() {
    let document = parse_documents(&[
        (
            "a.graphql".to_string(),
            "query one { user { ...Fields } }".to_string(),
        ),
        (
            "b.graphql".to_string(),
            "fragment Fields on User { id }".to_string(),
        ),
    ])
    .unwrap();

    assert_eq!(document.operations.len(), 1);
    assert!(document.operations[0].text.contains("fragment Fields on User"));
}

#[test]
fn subscriptions_are_skipped() {
    let document = parse_document(indoc! {r#"
        subscription onEvent { event { id } }
        query q { a }
    "#})
    .unwrap();

    assert_eq!(document.operations.len(), 1);
    assert_eq!(document.operations[0].name, "q");
}

#[test]
fn anonymous_operations_are_rejected() {
    let err = parse_document("{ a }").unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn parse_errors_name_the_file() {
    let err = parse_documents(&[("broken.graphql".to_string(), "query {".to_string())])
        .unwrap_err();
    assert!(matches!(err, Error::Parse { ref origin, .. } if origin == "broken.graphql"));
}

const NODE_SCHEMA: &str = indoc! {r#"
    interface Node { id: ID! }
    type User implements Node { id: ID! name: String! friends: [Node!]! }
    type Post implements Node { id: ID! title: String! }
    union Entity = User | Post
    type Query { node(id: ID!): Node me: User! entity: Entity }
"#};

fn typenamed(query: &str) -> String {
    let schema = parse_schema(NODE_SCHEMA).unwrap();
    let document = parse_document(query).unwrap();
    with_typenames(&document.operations[0].text, &schema).unwrap()
}

#[test]
fn abstract_selections_gain_typename() {
    let text = typenamed("query getNode($id: ID!) { node(id: $id) { id ... on User { name } } }");
    assert!(
        text.contains("node(id: $id) {\n    __typename\n    id\n"),
        "typename leads the interface selection:\n{text}"
    );
    assert_eq!(text.matches("__typename").count(), 1, "{text}");
}

#[test]
fn object_selections_are_untouched() {
    let text = typenamed("query me { me { id name } }");
    assert!(!text.contains("__typename"), "{text}");
}

#[test]
fn nested_abstract_fields_inside_fragments_gain_typename() {
    let text = typenamed(indoc! {r#"
        query q {
          entity { ... on User { friends { id } } }
          me { ...F }
        }
        fragment F on User { friends { id } }
    "#});
    // `entity`, `friends` under the inline fragment, and `friends` in `F`.
    assert_eq!(text.matches("__typename").count(), 3, "{text}");
    assert!(text.contains("fragment F on User"));
}

#[test]
fn selected_typename_is_kept_as_is() {
    let text = typenamed("query q { entity { kind: __typename ... on Post { title } } }");
    assert_eq!(text.matches("__typename").count(), 1, "{text}");
    assert!(text.contains("kind: __typename"), "{text}");
}

#[test]
fn fragments_on_interfaces_gain_typename() {
    let text = typenamed(indoc! {r#"
        query q { node(id: 1) { __typename ...N } }
        fragment N on Node { id }
    "#});
    assert_eq!(text.matches("__typename").count(), 2, "{text}");
    assert!(text.contains("fragment N on Node {\n  __typename\n"), "{text}");
}
