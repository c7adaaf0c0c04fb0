//! Loopback analysis service for exercising the blocking clients.
//!
//! An axum router on a current-thread tokio runtime, running on its own
//! thread. Requests are answered in arrival order from a queue of canned
//! replies and reported back as they arrive.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;

/// What the server saw.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request line plus `name: value` header lines
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Canned response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn ok(body: &str) -> Self {
        Self::new(200, body)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct Shared {
    replies: Mutex<VecDeque<Reply>>,
    seen: Mutex<mpsc::Sender<CapturedRequest>>,
}

pub struct TestServer {
    pub base: String,
    requests: mpsc::Receiver<CapturedRequest>,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    pub fn start(replies: Vec<Reply>) -> Self {
        let (seen_tx, seen_rx) = mpsc::channel();
        let (addr_tx, addr_rx) = mpsc::channel::<SocketAddr>();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let shared = Arc::new(Shared {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(seen_tx),
        });
        let app = Router::new().fallback(answer).with_state(shared);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        shutdown_rx.await.ok();
                    })
                    .await
                    .unwrap();
            });
        });

        let addr = addr_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        Self {
            base: format!("http://{}", addr),
            requests: seen_rx,
            shutdown: Some(shutdown_tx),
        }
    }

    /// Single reply, answered immediately.
    pub fn once(status: u16, body: &str) -> Self {
        Self::start(vec![Reply::new(status, body)])
    }

    /// Block until the next request reaches the handler.
    pub fn next_request(&self) -> CapturedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("no request reached the test server")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}

async fn answer(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let mut head = format!("{} {} HTTP/1.1\r\n", method, uri);
    for (name, value) in &headers {
        head.push_str(&format!("{}: {}\r\n", name, value.to_str().unwrap_or("")));
    }
    let captured = CapturedRequest {
        head,
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    shared.seen.lock().unwrap().send(captured).ok();

    let reply = shared
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Reply::new(404, "{}"));
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    (
        StatusCode::from_u16(reply.status).unwrap(),
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CONNECTION, "close"),
        ],
        reply.body,
    )
}

/// A loopback port with nothing listening on it.
pub fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
