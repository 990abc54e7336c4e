use powergate_core::rpc::{procedure_path, RpcErrorBody, STATUS_PROCEDURE};
use powergate_core::{PowerAction, RpcEnvelope, RpcError, SystemStatus};

#[test]
fn known_statuses_decode_from_kebab_case() {
    let running: SystemStatus = serde_json::from_str(r#""running""#).unwrap();
    let shutting: SystemStatus = serde_json::from_str(r#""shutting-down""#).unwrap();
    let restarting: SystemStatus = serde_json::from_str(r#""restarting""#).unwrap();

    assert_eq!(running, SystemStatus::Running);
    assert_eq!(shutting, SystemStatus::ShuttingDown);
    assert_eq!(restarting, SystemStatus::Restarting);
}

#[test]
fn unknown_status_is_preserved_instead_of_failing() {
    let status: SystemStatus = serde_json::from_str(r#""hibernating""#).unwrap();
    assert_eq!(status, SystemStatus::Unknown("hibernating".into()));
    assert_eq!(status.to_string(), "hibernating");
    assert!(!status.is_running());

    let back = serde_json::to_string(&status).unwrap();
    assert_eq!(back, r#""hibernating""#);
}

#[test]
fn status_envelope_matches_procedure_response_shape() {
    let body = r#"{"result":{"data":"shutting-down"}}"#;
    let envelope: RpcEnvelope<SystemStatus> = serde_json::from_str(body).unwrap();
    assert_eq!(envelope.into_data(), SystemStatus::ShuttingDown);

    let encoded = serde_json::to_string(&RpcEnvelope::new(SystemStatus::Running)).unwrap();
    assert_eq!(encoded, r#"{"result":{"data":"running"}}"#);
}

#[test]
fn error_body_code_is_optional() {
    let body: RpcErrorBody =
        serde_json::from_str(r#"{"error":{"message":"not allowed"}}"#).unwrap();
    assert_eq!(body.error.message, "not allowed");
    assert_eq!(body.error.code, None);
}

#[test]
fn actions_map_to_mutation_procedures() {
    assert_eq!(PowerAction::Restart.procedure(), "system.restart");
    assert_eq!(PowerAction::Shutdown.procedure(), "system.shutdown");
    assert_eq!(procedure_path(STATUS_PROCEDURE), "trpc/system.status");
}

#[test]
fn only_http_refusals_count_as_rejection() {
    let rejected = RpcError::Rejected {
        procedure: "system.restart".into(),
        status: 403,
        message: "forbidden".into(),
    };
    let transport = RpcError::Transport {
        procedure: "system.restart".into(),
        message: "connection reset".into(),
    };
    assert!(rejected.is_rejection());
    assert!(!transport.is_rejection());
}
