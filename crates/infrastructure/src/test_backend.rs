use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use url::Url;

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) content_type: String,
    pub(crate) body: String,
}

#[derive(Clone)]
struct TestBackendState {
    status: StatusCode,
    reply: Arc<str>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Local stand-in for the backend script that records what it receives.
pub(crate) struct TestBackend {
    address: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestBackend {
    pub(crate) async fn start(status: u16, reply: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = TestBackendState {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::OK),
            reply: Arc::from(reply),
            requests: requests.clone(),
        };
        let app = Router::new()
            .route("/macros/exec", post(record_request))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await;
        assert!(listener.is_ok());
        let listener = listener.unwrap_or_else(|_| unreachable!());
        let address = listener.local_addr();
        assert!(address.is_ok());
        let address = address.unwrap_or_else(|_| unreachable!());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { address, requests }
    }

    pub(crate) fn url(&self) -> Url {
        let url = Url::parse(&format!("http://{}/macros/exec", self.address));
        assert!(url.is_ok());
        url.unwrap_or_else(|_| unreachable!())
    }

    pub(crate) async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

/// Returns a local URL nothing listens on.
pub(crate) async fn unused_local_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await;
    assert!(listener.is_ok());
    let address = listener
        .and_then(|listener| listener.local_addr())
        .unwrap_or_else(|_| unreachable!());

    let url = Url::parse(&format!("http://{address}/macros/exec"));
    url.unwrap_or_else(|_| unreachable!())
}

async fn record_request(
    State(state): State<TestBackendState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    state
        .requests
        .lock()
        .await
        .push(RecordedRequest { content_type, body });

    (state.status, state.reply.to_string())
}
