use assert_cmd::assert::Assert;
use assert_cmd::Command;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::task::JoinHandle;

type Bodies = Arc<Mutex<Vec<String>>>;

/// Local ingestion endpoint plus a helper to drive the `ingest` binary at it
pub struct TestServer {
    home: TempDir,
    addr: SocketAddr,
    bodies: Bodies,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn launch() -> anyhow::Result<Self> {
        let bodies = Bodies::default();
        let app = Router::new()
            .route("/events", post(ingest))
            .route("/missing", post(missing))
            .with_state(bodies.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?; // 0: port picked by the OS
        let addr = listener.local_addr()?;
        println!("server listening on {}", addr);

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            home: TempDir::new()?,
            addr,
            bodies,
            handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }

    /// Run `ingest` isolated from the caller's config file and `INGEST_*` variables
    pub async fn run(&self, args: &[&str], stdin: Option<&str>) -> Assert {
        let mut cmd = Command::cargo_bin("ingest").unwrap();
        cmd.env("HOME", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path());
        cmd.env_remove("INGEST_ENDPOINT");
        cmd.env_remove("INGEST_TOKEN");
        cmd.env_remove("INGEST_TIMEOUT_MS");
        cmd.env("RUST_BACKTRACE", "1");
        cmd.args(args);
        if let Some(stdin) = stdin {
            cmd.write_stdin(stdin.to_string());
        }
        cmd.timeout(std::time::Duration::from_secs(30));

        tokio::task::spawn_blocking(move || cmd.assert())
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn ingest(State(bodies): State<Bodies>, body: String) -> (StatusCode, &'static str) {
    bodies.lock().unwrap().push(body);
    (StatusCode::ACCEPTED, "accepted")
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "missing")
}
