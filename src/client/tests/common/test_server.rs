use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

const EXPECTED_AUTHORIZATION: &str = "Bearer abc";

#[derive(Clone, Debug)]
pub struct ReceivedRequest {
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

type Received = Arc<Mutex<Vec<ReceivedRequest>>>;

/// Ingestion endpoint stand-in listening on a random local port
pub struct TestServer {
    addr: SocketAddr,
    received: Received,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn launch() -> anyhow::Result<Self> {
        let received = Received::default();
        let app = Router::new()
            .route("/events", post(ingest))
            .route("/missing", post(missing))
            .with_state(received.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?; // 0: port picked by the OS
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            received,
            handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn ingest(
    State(received): State<Received>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, &'static str) {
    let request = ReceivedRequest {
        content_type: header_string(&headers, header::CONTENT_TYPE),
        authorization: header_string(&headers, header::AUTHORIZATION),
        body,
    };

    let authorized = request.authorization.as_deref() == Some(EXPECTED_AUTHORIZATION);
    received.lock().unwrap().push(request);

    if authorized {
        (StatusCode::ACCEPTED, "accepted")
    } else {
        (StatusCode::UNAUTHORIZED, "invalid token")
    }
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "missing")
}
