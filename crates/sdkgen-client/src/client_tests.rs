use indoc::indoc;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{BaseClient, ClientError, InputValue, Maybe, RawResponse, Variables, decode, get_data};

fn ok(body: &str) -> RawResponse {
    RawResponse::new(200, body)
}

#[test]
fn data_is_returned_without_errors() {
    let data = get_data(ok(r#"{"data": {"me": {"id": "1"}}}"#)).unwrap();
    assert_eq!(serde_json::Value::Object(data), json!({"me": {"id": "1"}}));
}

#[test]
fn empty_or_null_errors_are_ignored() {
    assert!(get_data(ok(r#"{"data": {}, "errors": []}"#)).is_ok());
    assert!(get_data(ok(r#"{"data": {}, "errors": null}"#)).is_ok());
}

#[test]
fn errors_win_over_data() {
    let body = indoc! {r#"
        {
          "data": {"me": null},
          "errors": [
            {"message": "denied", "path": ["me", 0], "locations": [{"line": 1, "column": 3}]},
            {"message": "also bad"}
          ]
        }
    "#};

    let err = get_data(ok(body)).unwrap_err();
    let errors = err.graphql_errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].to_string(), "denied (at me.0)");
    assert_eq!(err.to_string(), "denied (at me.0); also bad");
}

#[test]
fn null_data_with_errors_reports_errors() {
    let err = get_data(ok(r#"{"data": null, "errors": [{"message": "boom"}]}"#)).unwrap_err();
    assert!(matches!(err, ClientError::GraphQLMulti(ref errors) if errors.len() == 1));
}

#[test]
fn nonstandard_errors_are_still_graphql_errors() {
    let err = get_data(ok(r#"{"data": {}, "errors": [{"msg": "x"}]}"#)).unwrap_err();
    let messages: Vec<_> = err.graphql_errors().iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec![r#"{"msg":"x"}"#]);

    let err = get_data(ok(r#"{"data": {}, "errors": "boom"}"#)).unwrap_err();
    let messages: Vec<_> = err.graphql_errors().iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["boom"]);

    let body = r#"{"data": null, "errors": [{"message": "bad spot", "locations": "here"}]}"#;
    let err = get_data(ok(body)).unwrap_err();
    assert_eq!(err.graphql_errors()[0].message, "bad spot");
    assert_eq!(err.graphql_errors()[0].locations, None);
}

#[test]
fn malformed_bodies_are_invalid_responses() {
    for body in ["", "not json", r#"{"not_data": ""}"#, "[]", r#"{"data": 3}"#] {
        let err = get_data(ok(body)).unwrap_err();
        assert!(
            matches!(err, ClientError::InvalidResponse { .. }),
            "body {body:?} gave {err:?}"
        );
    }
}

#[test]
fn non_success_status_is_http_error() {
    let err = get_data(RawResponse::new(503, "unavailable")).unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "HTTP error 503: unavailable");
}

#[test]
fn decode_mismatch_is_invalid_response() {
    #[derive(Debug, Deserialize)]
    struct Me {
        #[allow(dead_code)]
        id: i32,
    }

    let data = get_data(ok(r#"{"data": {"id": "abc"}}"#)).unwrap();
    let err = decode::<Me>(data).unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse { .. }));
}

#[tokio::test]
async fn execute_posts_query_and_stripped_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({
            "query": "query Q($a: Int, $b: Int) { f(a: $a, b: $b) }",
            "variables": {"b": null, "c": {"e": 1}},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"f": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = BaseClient::new(format!("{}/graphql", server.uri()));
    let variables = Variables::new()
        .with("a", Maybe::<i32>::Missing)
        .with("b", Maybe::<i32>::Null)
        .with(
            "c",
            InputValue::object([("d", InputValue::Unset), ("e", InputValue::from(json!(1)))]),
        );

    let response = client
        .execute("query Q($a: Int, $b: Int) { f(a: $a, b: $b) }", variables)
        .await
        .unwrap();
    let data = client.get_data(response).unwrap();
    assert_eq!(data.get("f"), Some(&json!(true)));
    client.close();
}

#[tokio::test]
async fn execute_surfaces_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = BaseClient::new(server.uri());
    let response = client.execute("{ f }", Variables::new()).await.unwrap();
    let err = client.get_data(response).unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 500, ref body } if body == "oops"));
}
