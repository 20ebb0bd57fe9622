//! Adapter tests against a minimal in-process Bolt server.
//!
//! The server speaks just enough Bolt v4 for the adapter's liveness check:
//! it accepts the handshake, answers every request with SUCCESS and answers
//! RUN with a configurable FAILURE.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use connectivity::{ConnectionSettings, Neo4jConnector, ProbeFailure, Prober};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const RUN: u8 = 0x10;
const GOODBYE: u8 = 0x02;
const SUCCESS: u8 = 0x70;
const FAILURE: u8 = 0x7F;

struct FakeBolt {
    uri: String,
    runs: Arc<AtomicUsize>,
}

impl FakeBolt {
    /// Starts a server that fails every RUN with `code`.
    async fn failing_run_with(code: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, code, counter.clone()));
            }
        });

        Self {
            uri: format!("bolt://127.0.0.1:{port}"),
            runs,
        }
    }

    fn run_count(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

async fn serve(mut stream: TcpStream, code: &'static str, runs: Arc<AtomicUsize>) {
    let mut handshake = [0u8; 20];
    if stream.read_exact(&mut handshake).await.is_err() {
        return;
    }
    if stream.write_all(&[0, 0, 0, 4]).await.is_err() {
        return;
    }

    while let Some(message) = read_message(&mut stream).await {
        let signature = message.get(1).copied().unwrap_or_default();
        let reply = match signature {
            GOODBYE => return,
            RUN => {
                runs.fetch_add(1, Ordering::SeqCst);
                failure(code)
            }
            _ => success(),
        };
        if write_message(&mut stream, &reply).await.is_err() {
            return;
        }
    }
}

async fn read_message(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut message = Vec::new();
    loop {
        let len = stream.read_u16().await.ok()? as usize;
        if len == 0 {
            if message.is_empty() {
                continue;
            }
            return Some(message);
        }
        let mut chunk = vec![0u8; len];
        stream.read_exact(&mut chunk).await.ok()?;
        message.extend_from_slice(&chunk);
    }
}

async fn write_message(stream: &mut TcpStream, message: &[u8]) -> std::io::Result<()> {
    stream.write_u16(message.len() as u16).await?;
    stream.write_all(message).await?;
    stream.write_all(&[0, 0]).await
}

fn pack_string(out: &mut Vec<u8>, value: &str) {
    let bytes = value.as_bytes();
    if bytes.len() < 16 {
        out.push(0x80 | bytes.len() as u8);
    } else {
        out.push(0xD0);
        out.push(bytes.len() as u8);
    }
    out.extend_from_slice(bytes);
}

fn success() -> Vec<u8> {
    let mut out = vec![0xB1, SUCCESS, 0xA2];
    pack_string(&mut out, "server");
    pack_string(&mut out, "Neo4j/4.4.0");
    pack_string(&mut out, "connection_id");
    pack_string(&mut out, "bolt-1");
    out
}

fn failure(code: &str) -> Vec<u8> {
    let mut out = vec![0xB1, FAILURE, 0xA2];
    pack_string(&mut out, "code");
    pack_string(&mut out, code);
    pack_string(&mut out, "message");
    pack_string(&mut out, "rejected by test server");
    out
}

fn settings(uri: &str) -> Arc<ConnectionSettings> {
    let uri = uri.to_string();
    Arc::new(
        ConnectionSettings::from_lookup(move |name| match name {
            "NEO4J_URI" => Some(uri.clone()),
            "NEO4J_USERNAME" => Some("neo4j".to_string()),
            "NEO4J_PASSWORD" => Some("password".to_string()),
            _ => None,
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn test_expired_authorization_fails_after_a_single_run() {
    let server = FakeBolt::failing_run_with("Neo.ClientError.Security.AuthorizationExpired").await;
    let prober = Prober::new(Neo4jConnector::new(), settings(&server.uri));

    let outcome = tokio::time::timeout(Duration::from_secs(5), prober.check())
        .await
        .expect("liveness check must not retry inside the driver");

    assert!(
        matches!(outcome, Err(ProbeFailure::SessionExpired(_))),
        "got {outcome:?}"
    );
    assert_eq!(server.run_count(), 1);
}

#[tokio::test]
async fn test_transient_error_is_not_retried() {
    let server = FakeBolt::failing_run_with("Neo.TransientError.General.DatabaseUnavailable").await;
    let prober = Prober::new(Neo4jConnector::new(), settings(&server.uri));

    let result = tokio::time::timeout(Duration::from_secs(5), prober.probe())
        .await
        .expect("liveness check must not retry inside the driver");

    assert!(!result.status);
    assert_eq!(server.run_count(), 1);
}

#[tokio::test]
async fn test_closed_port_is_service_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let prober = Prober::new(
        Neo4jConnector::new(),
        settings(&format!("bolt://127.0.0.1:{port}")),
    );

    let result = tokio::time::timeout(Duration::from_secs(5), prober.probe())
        .await
        .unwrap();
    assert!(!result.status);
    assert_eq!(result.message, "Database service is unavailable");
}
