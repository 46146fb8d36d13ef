//! Drives a checked-in package exactly as `sdkgen generate` renders it for
//!
//! ```graphql
//! query getNode($id: ID!) { node(id: $id) { id ... on User { name } } }
//! ```
//!
//! against `interface Node`, `type User implements Node`, `type Post
//! implements Node`, with comments off.

#[rustfmt::skip]
#[allow(dead_code, unused_imports)]
mod graphql_client;

use graphql_client::{Client, ClientError, GetNode, GetNodeNode, GetNodeNodeNode, GetNodeNodeUser};
use sdkgen_client::decode;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn decode_data(data: Value) -> Result<GetNode, ClientError> {
    let Value::Object(data) = data else {
        panic!("expected an object");
    };
    decode(data)
}

fn user(id: &str, name: &str) -> GetNode {
    GetNode {
        node: Some(GetNodeNode::User(GetNodeNodeUser {
            typename: "User".to_string(),
            id: id.to_string(),
            name: name.to_string(),
        })),
    }
}

#[test]
fn user_payload_without_type_name_decodes_to_user() {
    let data = decode_data(json!({"node": {"id": "1", "name": "Ann"}})).unwrap();
    assert_eq!(data, user("1", "Ann"));
}

#[test]
fn type_name_picks_the_branch() {
    let data =
        decode_data(json!({"node": {"__typename": "User", "id": "1", "name": "Ann"}})).unwrap();
    assert_eq!(data, user("1", "Ann"));
}

#[test]
fn other_possible_types_decode_to_the_base() {
    let data = decode_data(json!({"node": {"__typename": "Post", "id": "p1"}})).unwrap();
    assert_eq!(
        data,
        GetNode {
            node: Some(GetNodeNode::Node(GetNodeNodeNode {
                typename: "Post".to_string(),
                id: "p1".to_string(),
            })),
        }
    );

    let data = decode_data(json!({"node": {"id": "p1"}})).unwrap();
    assert!(matches!(
        data.node,
        Some(GetNodeNode::Node(ref base)) if base.typename == "Post"
    ));
}

#[test]
fn null_node_decodes_to_none() {
    let data = decode_data(json!({"node": null})).unwrap();
    assert_eq!(data, GetNode { node: None });
}

#[test]
fn impossible_type_name_is_an_invalid_response() {
    let err = decode_data(json!({"node": {"__typename": "Comment", "id": "1"}})).unwrap_err();
    let ClientError::InvalidResponse { ref reason, .. } = err else {
        panic!("expected an invalid response, got {err:?}");
    };
    assert!(reason.contains("type name `Comment`"), "{reason}");
}

#[test]
fn unmatched_shape_is_an_invalid_response() {
    let err = decode_data(json!({"node": {"id": "1", "body": "b"}})).unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse { .. }), "{err:?}");
}

#[tokio::test]
async fn method_sends_the_operation_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "query": graphql_client::GET_NODE_OPERATION,
            "variables": {"id": "1"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"node": {"__typename": "User", "id": "1", "name": "Ann"}},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let data = client.get_node("1".to_string()).await.unwrap();
    assert_eq!(data, user("1", "Ann"));
    assert!(graphql_client::EXPORTS.contains(&"GetNodeNodeUser"));
}
