//! Request builders and response readers for `tower::ServiceExt::oneshot` tests.

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, Response, header};

use crate::auth::MockAuth;

/// Build a request, optionally authenticated and with a JSON body.
pub fn request(
    method: Method,
    uri: &str,
    auth: Option<MockAuth>,
    json: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        for (name, value) in &auth.headers() {
            builder = builder.header(name, value);
        }
    }
    let body = match json {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("valid test request")
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("UTF-8 body")
}
