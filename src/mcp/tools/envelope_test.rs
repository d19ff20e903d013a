//! Tests for the success/failure envelope

use serde::Serialize;
use serde_json::json;

use crate::db::DbError;
use crate::mcp::tools::Envelope;

#[derive(Debug, Serialize)]
struct Payload {
    tables: Vec<String>,
}

#[test]
fn success_flattens_payload() {
    let envelope = Envelope::success(Payload {
        tables: vec!["notes".to_string()],
    });

    assert!(envelope.is_success());
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({"success": true, "tables": ["notes"]})
    );
}

#[test]
fn failure_carries_error_message() {
    let envelope: Envelope<Payload> = Envelope::failure(DbError::NotConnected);

    assert!(!envelope.is_success());
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({"success": false, "error": "Database not connected"})
    );
}

#[test]
fn from_result_picks_variant() {
    let ok: Result<Payload, DbError> = Ok(Payload { tables: vec![] });
    assert!(Envelope::from(ok).is_success());

    let err: Result<Payload, DbError> = Err(DbError::Query {
        message: "boom".to_string(),
    });
    let envelope = Envelope::from(err);
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({"success": false, "error": "Query execution failed: boom"})
    );
}

#[test]
fn into_tool_result_is_never_a_tool_error() {
    let envelope: Envelope<Payload> = Envelope::failure("nope");
    let result = envelope.into_tool_result().unwrap();
    assert_ne!(result.is_error, Some(true));
}
