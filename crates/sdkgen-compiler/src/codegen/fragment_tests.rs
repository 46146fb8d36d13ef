use indoc::indoc;

use super::{Item, Module, ModuleGenerator, render_module};
use crate::frontend::{parse_document, parse_schema};
use crate::{Config, Error, Result};

const SCHEMA: &str = indoc! {r#"
    interface Node { id: ID! }

    enum Role { ADMIN MEMBER }

    type User implements Node {
      id: ID!
      name: String!
      role: Role!
      friends: [User!]!
    }

    type Post implements Node {
      id: ID!
      title: String!
    }

    type Query { node(id: ID!): Node me: User! }
"#};

fn fragments(source: &str, config: &Config) -> Result<Option<Module>> {
    let schema = parse_schema(SCHEMA).unwrap();
    let document = parse_document(source).unwrap();
    ModuleGenerator::new(&schema, &document, config).fragments()
}

fn item_names(module: &Module) -> Vec<&str> {
    module
        .items
        .iter()
        .map(|item| match item {
            Item::Struct(decl) => decl.name.as_str(),
            Item::Dispatch(decl) => decl.name.as_str(),
            other => panic!("unexpected item {other:?}"),
        })
        .collect()
}

#[test]
fn no_fragments_no_module() {
    let module = fragments("query me { me { id } }", &Config::new()).unwrap();
    assert!(module.is_none());
}

#[test]
fn one_record_per_fragment_in_document_order() {
    let module = fragments(
        indoc! {r#"
            fragment UserFields on User { id role friends { name } }
            fragment postBits on Post { title }
        "#},
        &Config::new(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(module.name, "fragments");
    assert_eq!(
        item_names(&module),
        vec!["UserFields", "UserFieldsFriends", "PostBits"]
    );
    let imports: Vec<String> = module.imports.iter().map(ToString::to_string).collect();
    assert_eq!(imports, vec!["serde::Deserialize", "super::enums::Role"]);

    let Item::Struct(decl) = &module.items[0] else {
        panic!("expected a record");
    };
    assert_eq!(
        decl.doc.as_deref(),
        Some("Fields of the `UserFields` fragment on `User`.")
    );
}

#[test]
fn fragment_on_an_interface_is_a_dispatch_enum() {
    let config = Config::new().include_comments(false);
    let module = fragments("fragment Item on Node { id ... on User { name } }", &config)
        .unwrap()
        .unwrap();

    assert_eq!(item_names(&module), vec!["Item", "ItemUser", "ItemNode"]);
    let Item::Dispatch(decl) = &module.items[0] else {
        panic!("expected a dispatch enum");
    };
    assert_eq!(decl.discriminator.as_deref(), Some("__typename"));
    assert_eq!(decl.base_types, vec!["Post"]);

    let source = render_module(&module);
    assert!(source.starts_with(indoc! {r#"
        use sdkgen_client::{Branch, Fallback, pick_branch};
        use serde::Deserialize;

        #[derive(Debug, Clone, PartialEq)]
        pub enum Item {
            User(ItemUser),
            Node(ItemNode),
        }
    "#}));
}

#[test]
fn fragment_names_win_over_nested_records() {
    let module = fragments(
        indoc! {r#"
            fragment User on User { friends { id } }
            fragment UserFriends on User { id }
        "#},
        &Config::new(),
    )
    .unwrap()
    .unwrap();
    assert_eq!(
        item_names(&module),
        vec!["User", "UserFriends2", "UserFriends"]
    );
}

#[test]
fn fragment_errors_name_the_fragment() {
    let err = fragments("fragment Broken on User { nope }", &Config::new()).unwrap_err();
    assert!(matches!(err, Error::UnknownField { ref field, .. } if field == "nope"));
    assert_eq!(
        err.to_string(),
        "type `User` has no field `nope` in fragment `Broken`"
    );
}
