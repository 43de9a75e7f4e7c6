//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each case names an operation, its arguments, the request it must build,
//! a simulated response, and either the parsed result or the error it must
//! produce. JSON bodies are compared as parsed values so field order does
//! not matter; raw bodies are compared byte for byte.

use serde_json::Value;
use wit_entities::{
    ApiError, Entities, Entity, EntityApi, EntityValue, HttpMethod, HttpRequest, HttpResponse,
};

const BASE_URL: &str = "https://api.wit.ai";

/// What a successful parse produced, normalised for comparison.
#[derive(Debug, PartialEq)]
enum Outcome {
    Entity(Entity),
    Entities(Entities),
    Raw(Vec<u8>),
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn arg<'a>(case: &'a Value, key: &str) -> &'a str {
    case["args"][key]
        .as_str()
        .unwrap_or_else(|| panic!("missing string arg {key}"))
}

fn build(api: &EntityApi, operation: &str, case: &Value) -> HttpRequest {
    match operation {
        "list_entities" => api.build_list_entities(),
        "get_entity" => api.build_get_entity(arg(case, "id")),
        "create_entity" => {
            let entity: Entity = serde_json::from_value(case["args"]["entity"].clone()).unwrap();
            api.build_create_entity(&entity).unwrap()
        }
        "update_entity" => {
            let entity: Entity = serde_json::from_value(case["args"]["entity"].clone()).unwrap();
            api.build_update_entity(&entity).unwrap()
        }
        "delete_entity" => api.build_delete_entity(arg(case, "id")),
        "create_entity_value" => {
            let value: EntityValue =
                serde_json::from_value(case["args"]["entity_value"].clone()).unwrap();
            api.build_create_entity_value(arg(case, "id"), &value).unwrap()
        }
        "delete_entity_value" => api.build_delete_entity_value(arg(case, "id"), arg(case, "value")),
        "create_entity_value_expression" => api.build_create_entity_value_expression(
            arg(case, "id"),
            arg(case, "value"),
            arg(case, "expression"),
        ),
        "delete_entity_value_expression" => api.build_delete_entity_value_expression(
            arg(case, "id"),
            arg(case, "value"),
            arg(case, "expression"),
        ),
        other => panic!("unknown operation: {other}"),
    }
}

fn parse(api: &EntityApi, operation: &str, response: HttpResponse) -> Result<Outcome, ApiError> {
    match operation {
        "list_entities" => api.parse_list_entities(response).map(Outcome::Entities),
        "get_entity" => api.parse_get_entity(response).map(Outcome::Entity),
        "create_entity" => api.parse_create_entity(response).map(Outcome::Raw),
        "update_entity" => api.parse_update_entity(response).map(Outcome::Raw),
        "delete_entity" => api.parse_delete_entity(response).map(Outcome::Raw),
        "create_entity_value" => api.parse_create_entity_value(response).map(Outcome::Entity),
        "delete_entity_value" => api.parse_delete_entity_value(response).map(Outcome::Raw),
        "create_entity_value_expression" => api
            .parse_create_entity_value_expression(response)
            .map(Outcome::Entity),
        "delete_entity_value_expression" => api
            .parse_delete_entity_value_expression(response)
            .map(Outcome::Raw),
        other => panic!("unknown operation: {other}"),
    }
}

fn expected_outcome(expected: &Value) -> Outcome {
    if let Some(entity) = expected.get("entity") {
        Outcome::Entity(serde_json::from_value(entity.clone()).unwrap())
    } else if let Some(entities) = expected.get("entities") {
        Outcome::Entities(serde_json::from_value(entities.clone()).unwrap())
    } else if let Some(raw) = expected.get("raw") {
        Outcome::Raw(raw.as_str().unwrap().as_bytes().to_vec())
    } else {
        panic!("expected_result has no entity, entities or raw key")
    }
}

fn verify_request(name: &str, req: &HttpRequest, expected: &Value) {
    let method = parse_method(expected["method"].as_str().unwrap());
    assert_eq!(req.method, method, "{name}: method");
    let url = format!("{BASE_URL}{}", expected["path"].as_str().unwrap());
    assert_eq!(req.url, url, "{name}: url");

    match (&req.body, expected.get("content_type")) {
        (None, None) => {}
        (Some(body), Some(content_type)) => {
            assert_eq!(body.content_type, content_type.as_str().unwrap(), "{name}: content type");
            if let Some(json) = expected.get("json_body") {
                let sent: Value = serde_json::from_slice(&body.data).unwrap();
                assert_eq!(&sent, json, "{name}: json body");
            }
            if let Some(raw) = expected.get("raw_body") {
                assert_eq!(body.data, raw.as_str().unwrap().as_bytes(), "{name}: raw body");
            }
        }
        (body, content_type) => {
            panic!("{name}: body {body:?} vs expected content type {content_type:?}")
        }
    }
}

fn verify_parse(name: &str, result: Result<Outcome, ApiError>, case: &Value) {
    match case.get("expected_error") {
        Some(Value::String(kind)) => {
            let err = result.unwrap_err();
            match kind.as_str() {
                "Deserialization" => {
                    assert!(matches!(err, ApiError::Deserialization(_)), "{name}: {err}")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        }
        Some(expected) => {
            let err = result.unwrap_err();
            let status = expected["status"].as_u64().unwrap() as u16;
            assert_eq!(err.status(), Some(status), "{name}: status");
        }
        None => {
            let outcome = result.unwrap();
            let expected = expected_outcome(&case["expected_result"]);
            assert_eq!(outcome, expected, "{name}: parsed result");
        }
    }
}

fn run_vectors(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let api = EntityApi::new(BASE_URL);

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();

        let req = build(&api, operation, case);
        verify_request(name, &req, &case["expected_request"]);

        let sim = &case["simulated_response"];
        let response = HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        );
        verify_parse(name, parse(&api, operation, response), case);
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[test]
fn entity_test_vectors() {
    run_vectors(include_str!("../../test-vectors/entities.json"));
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

#[test]
fn value_test_vectors() {
    run_vectors(include_str!("../../test-vectors/values.json"));
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[test]
fn expression_test_vectors() {
    run_vectors(include_str!("../../test-vectors/expressions.json"));
}
