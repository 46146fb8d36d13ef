use indoc::indoc;
use sdkgen_core::{TypeDef, TypeKind, TypeRef};

use super::parse_schema;
use crate::Error;

#[test]
fn lowers_every_kind_in_declaration_order() {
    let schema = parse_schema(indoc! {r#"
        scalar DateTime

        "Anything with an id"
        interface Node {
          id: ID!
        }

        type User implements Node {
          id: ID!
          "Display name"
          name: String
          tags: [String!]!
        }

        union SearchResult = User

        enum Role {
          ADMIN
          GUEST
        }

        input UserFilter {
          role: Role = GUEST
          ids: [ID!]
        }

        type Query {
          node(id: ID!): Node
          search(text: String!): [SearchResult!]!
        }
    "#})
    .unwrap();

    assert_eq!(schema.kind_of("DateTime"), Some(TypeKind::Scalar));
    assert_eq!(schema.kind_of("Node"), Some(TypeKind::Interface));
    assert_eq!(schema.kind_of("SearchResult"), Some(TypeKind::Union));
    assert_eq!(schema.possible_types("Node"), vec!["User"]);
    assert_eq!(
        schema.get("Node").and_then(TypeDef::description),
        Some("Anything with an id")
    );

    let name = schema.field("User", "name").unwrap();
    assert_eq!(name.ty, TypeRef::named("String").nullable());
    assert_eq!(name.description.as_deref(), Some("Display name"));
    assert_eq!(
        schema.field("User", "tags").unwrap().ty,
        TypeRef::parse("[String!]!").unwrap()
    );

    let Some(TypeDef::InputObject(filter)) = schema.get("UserFilter") else {
        panic!("UserFilter should be an input object");
    };
    assert!(filter.fields["role"].has_default);
    assert!(!filter.fields["ids"].has_default);

    let Some(TypeDef::Enum(role)) = schema.get("Role") else {
        panic!("Role should be an enum");
    };
    let values: Vec<_> = role.values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(values, vec!["ADMIN", "GUEST"]);
}

#[test]
fn schema_definition_sets_root_types() {
    let schema = parse_schema(indoc! {r#"
        schema {
          query: RootQuery
          mutation: RootMutation
        }

        type RootQuery { a: Int }
        type RootMutation { b: Int }
    "#})
    .unwrap();

    assert_eq!(schema.query_type(), "RootQuery");
    assert_eq!(schema.mutation_type(), Some("RootMutation"));
}

#[test]
fn extensions_apply_to_base_type() {
    let schema = parse_schema(indoc! {r#"
        extend type Query { extra: Int }
        type Query { a: Int }
        interface Node { id: ID! }
        type Post { title: String }
        extend type Post implements Node { id: ID! }
        enum Color { RED }
        extend enum Color { BLUE }
    "#})
    .unwrap();

    assert!(schema.field("Query", "extra").is_some());
    assert_eq!(schema.possible_types("Node"), vec!["Post"]);
    let Some(TypeDef::Enum(color)) = schema.get("Color") else {
        panic!("Color should be an enum");
    };
    assert_eq!(color.values.len(), 2);
}

#[test]
fn extension_of_unknown_type_is_an_error() {
    let err = parse_schema("extend type Missing { a: Int }").unwrap_err();
    assert!(matches!(err, Error::Parse { ref message, .. } if message.contains("Missing")));
}

#[test]
fn syntax_errors_are_parse_errors() {
    let err = parse_schema("type {").unwrap_err();
    assert!(matches!(err, Error::Parse { ref origin, .. } if origin == "schema"));
}
