use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use powergate_config::AUTH_TOKEN_KEY;
use powergate_core::{RpcError, SystemStatus};
use powergate_infra::{default_http_client, FileKvStore, HttpSystemClient};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

async fn start_server(app: Router) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

#[tokio::test]
async fn status_is_decoded_from_envelope() {
    let app = Router::new().route(
        "/trpc/system.status",
        get(|| async { r#"{"result":{"data":"restarting"}}"# }),
    );
    let (addr, handle) = start_server(app).await;

    let client =
        HttpSystemClient::new(default_http_client().unwrap(), &format!("http://{addr}")).unwrap();
    assert_eq!(client.status().await.unwrap(), SystemStatus::Restarting);

    handle.abort();
}

#[tokio::test]
async fn base_path_is_preserved_for_procedures() {
    let app = Router::new().route(
        "/api/trpc/system.status",
        get(|| async { r#"{"result":{"data":"running"}}"# }),
    );
    let (addr, handle) = start_server(app).await;

    let client = HttpSystemClient::new(
        default_http_client().unwrap(),
        &format!("http://{addr}/api"),
    )
    .unwrap();
    assert_eq!(client.status().await.unwrap(), SystemStatus::Running);

    handle.abort();
}

#[tokio::test]
async fn rejected_mutation_carries_backend_message() {
    let app = Router::new().route(
        "/trpc/system.shutdown",
        post(|| async {
            (
                StatusCode::FORBIDDEN,
                r#"{"error":{"message":"admin only","code":-32003}}"#,
            )
        }),
    );
    let (addr, handle) = start_server(app).await;

    let client =
        HttpSystemClient::new(default_http_client().unwrap(), &format!("http://{addr}")).unwrap();
    let err = client.shutdown().await.unwrap_err();
    match &err {
        RpcError::Rejected {
            procedure,
            status,
            message,
        } => {
            assert_eq!(procedure, "system.shutdown");
            assert_eq!(*status, 403);
            assert_eq!(message, "admin only");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(err.is_rejection());

    handle.abort();
}

#[tokio::test]
async fn malformed_status_body_is_a_decode_error() {
    let app = Router::new().route("/trpc/system.status", get(|| async { "<html>" }));
    let (addr, handle) = start_server(app).await;

    let client =
        HttpSystemClient::new(default_http_client().unwrap(), &format!("http://{addr}")).unwrap();
    let err = client.status().await.unwrap_err();
    assert!(matches!(err, RpcError::Decode { .. }), "got {err:?}");

    handle.abort();
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        HttpSystemClient::new(default_http_client().unwrap(), &format!("http://{addr}")).unwrap();
    let err = client.restart().await.unwrap_err();
    assert!(matches!(err, RpcError::Transport { .. }), "got {err:?}");
    assert!(!err.is_rejection());
}

#[tokio::test]
async fn stored_token_is_sent_as_bearer() {
    let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let app = Router::new().route(
        "/trpc/system.restart",
        post({
            let seen = seen.clone();
            move |headers: HeaderMap| {
                let seen = seen.clone();
                async move {
                    *seen.lock().unwrap() = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned);
                    r#"{"result":{"data":null}}"#
                }
            }
        }),
    );
    let (addr, handle) = start_server(app).await;

    let dir = tempfile::tempdir().unwrap();
    let store = FileKvStore::new(
        camino::Utf8PathBuf::from_path_buf(dir.path().join("state.json")).unwrap(),
    );
    store.set(AUTH_TOKEN_KEY, &"s3cret".to_string()).unwrap();

    let client = HttpSystemClient::new(default_http_client().unwrap(), &format!("http://{addr}"))
        .unwrap()
        .with_token_store(store);
    client.restart().await.unwrap();

    assert_eq!(seen.lock().unwrap().as_deref(), Some("Bearer s3cret"));

    handle.abort();
}
