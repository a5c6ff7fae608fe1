//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use demo_service::config::ServiceConfig;
use demo_service::http::HttpServer;
use demo_service::lifecycle::Shutdown;
use sdk_rust::MwHeader;

/// Start a mock backend that answers every request with `status` and `body`.
#[allow(dead_code)]
pub async fn start_mock_backend(status: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Config with a cheap busy loop and a short outbound timeout.
pub fn test_config(outbound: SocketAddr) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.service.env = "integration".into();
    config.service.burn_iterations = 200_000;
    config.outbound.url = format!("http://{}/cteam-native/middleware/god", outbound);
    config.outbound.timeout_secs = Some(5);
    config
}

/// A running service instance.
pub struct TestService {
    pub base_url: String,
    pub shutdown: Arc<Shutdown>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

/// Bind to an ephemeral port and run the service in the background.
pub async fn start_service(config: ServiceConfig) -> TestService {
    let shutdown = Arc::new(Shutdown::new());
    let server = HttpServer::new(config, shutdown.clone()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move { server.run(listener).await });
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestService {
        base_url: format!("http://{}", addr),
        shutdown,
        handle,
    }
}

pub fn header() -> MwHeader {
    MwHeader::new("MSG0001", "APP", "20240101000001")
}
