mod common;

use common::mock_backend::{MockBackend, MockResponse};
use voicemap::config::IntentConfig;
use voicemap::intent::{
    CommandClassifier, IntentAction, IntentDispatcher, ZoomDirection, DEFAULT_UNKNOWN_MESSAGE,
    TRANSPORT_FAILURE_MESSAGE,
};

fn dispatcher(backend: &MockBackend) -> IntentDispatcher {
    IntentDispatcher::new(&IntentConfig {
        endpoint: format!("{}/command", backend.base_url()),
        timeout_seconds: 2,
    })
    .expect("intent client")
}

/// The command is POSTed as `{"command": ...}` to the configured endpoint.
#[tokio::test]
async fn test_posts_command_json() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"{"action": "find_location", "details": {"location": "Paris"}, "message": "ok"}"#,
        ))
        .await;

    let action = dispatcher(&backend).dispatch("where is Paris").await;
    assert_eq!(
        action,
        IntentAction::FindLocation {
            location: "Paris".to_string()
        }
    );

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/command");
    assert_eq!(requests[0].json()["command"], "where is Paris");
}

#[tokio::test]
async fn test_decodes_zoom() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"{"action": "zoom", "details": {"location": "Junagadh", "zoom": "in"}}"#,
        ))
        .await;

    let action = dispatcher(&backend).dispatch("zoom in on Junagadh").await;
    assert_eq!(
        action,
        IntentAction::Zoom {
            location: "Junagadh".to_string(),
            direction: ZoomDirection::In
        }
    );
}

/// Unknown tags carry the backend's message for display.
#[tokio::test]
async fn test_unknown_action_carries_message() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"{"action": "unknown", "message": "Try asking about a place."}"#,
        ))
        .await;

    let action = dispatcher(&backend).dispatch("sing a song").await;
    assert_eq!(action, IntentAction::unknown("Try asking about a place."));
}

#[tokio::test]
async fn test_missing_message_uses_default() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"action": "teleport"}"#))
        .await;

    let action = dispatcher(&backend).dispatch("beam me up").await;
    assert_eq!(action, IntentAction::unknown(DEFAULT_UNKNOWN_MESSAGE));
}

#[tokio::test]
async fn test_error_status_is_transport_failure() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::error(500, "boom"))
        .await;

    let action = dispatcher(&backend).dispatch("where is Paris").await;
    assert_eq!(action, IntentAction::unreachable());
}

#[tokio::test]
async fn test_malformed_body_is_transport_failure() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json("this is not json"))
        .await;

    let action = dispatcher(&backend).dispatch("where is Paris").await;
    assert_eq!(action, IntentAction::unreachable());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let dispatcher = IntentDispatcher::new(&IntentConfig {
        endpoint: "http://127.0.0.1:1/command".to_string(),
        timeout_seconds: 1,
    })
    .expect("intent client");

    assert_eq!(dispatcher.endpoint(), "http://127.0.0.1:1/command");
    let action = dispatcher.dispatch("where is Paris").await;
    assert_eq!(action, IntentAction::unreachable());
    assert_eq!(action.name(), "unknown");
    assert!(matches!(
        action,
        IntentAction::Unknown { ref raw_message, backend_unreachable: true }
            if raw_message.as_str() == TRANSPORT_FAILURE_MESSAGE
    ));
}

/// An unrecognized utterance is not mistaken for an outage.
#[tokio::test]
async fn test_unknown_action_is_not_an_outage() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"{"action": "unknown", "message": "Sorry, I did not get that"}"#,
        ))
        .await;

    let action = dispatcher(&backend).dispatch("sing a song").await;
    assert!(matches!(
        action,
        IntentAction::Unknown { backend_unreachable: false, .. }
    ));
}
