//! One-shot HTTP responder used by the adapter tests.

use std::convert::Infallible;
use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderMap, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use hyper::{Method, StatusCode};

/// A request as seen by the test server.
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

/// Serve exactly one request with the given status and JSON body.
///
/// Returns the base URL and a handle resolving to the captured request.
pub async fn serve_once(
    status: StatusCode,
    body: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    let (listener, url) = bind().await;

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let service = service_fn(move |req: Request<Incoming>| {
            let tx = tx.clone();
            async move {
                let (parts, incoming) = req.into_parts();
                let captured = CapturedRequest {
                    method: parts.method,
                    path: parts.uri.path().to_string(),
                    headers: parts.headers,
                    body: incoming.collect().await?.to_bytes(),
                };
                let _ = tx.send(captured);

                let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
                *response.status_mut() = status;
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, "application/json".parse().unwrap());
                Ok::<_, hyper::Error>(response)
            }
        });

        http1::Builder::new()
            .keep_alive(false)
            .serve_connection(TokioIo::new(stream), service)
            .await
            .ok();

        rx.recv().await.unwrap()
    });

    (url, handle)
}

/// Accept one request and hold the response back for five seconds.
pub async fn serve_silence() -> (String, JoinHandle<()>) {
    let (listener, url) = bind().await;

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let service = service_fn(|_req: Request<Incoming>| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, Infallible>(Response::new(Full::new(Bytes::new())))
        });

        http1::Builder::new()
            .serve_connection(TokioIo::new(stream), service)
            .await
            .ok();
    });

    (url, handle)
}
