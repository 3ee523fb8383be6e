//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use faunakey_function::config::FunctionConfig;
use faunakey_function::function::{FaunaKeyFunction, SecretSource, SystemClock};
use faunakey_function::http::FunctionServer;
use faunakey_function::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// A function host running on an ephemeral port.
pub struct TestHost {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestHost {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a host using the wall clock and the given secret source.
pub async fn start_host(config: FunctionConfig, secrets: Arc<dyn SecretSource>) -> TestHost {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let function = FaunaKeyFunction::new(secrets, Arc::new(SystemClock));
    let server = FunctionServer::with_function(config, function);
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    // The listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestHost {
        addr,
        shutdown,
        handle,
    }
}

/// Client that never reuses connections, so shutdown is not held up.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
