#![deny(clippy::unwrap_used)]

use lambda_http::http::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use vercel_runtime::{Body, Response, StatusCode};

pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod upstream;

pub use config::{Credentials, Flow, ProxyConfig};
pub use error::ProxyError;
pub use handler::handle;

/// Wraps a handler returning `Result<_, ProxyError>` so every failure becomes
/// a JSON error response instead of a failed invocation
#[macro_export]
macro_rules! wrap_error {
    ($handler:expr) => {
        |req: ::vercel_runtime::Request| async move {
            Ok::<_, ::vercel_runtime::Error>($crate::respond($handler(req).await))
        }
    };
}

pub fn respond(result: Result<Response<Body>, ProxyError>) -> Response<Body> {
    match result {
        Ok(resp) => resp,
        Err(err) => {
            tracing::error!(status = err.status().as_u16(), "Error in proxy function: {err}");
            err.into_response()
        }
    }
}

pub fn json_response(status: StatusCode, body: &Value) -> Response<Body> {
    let mut resp = Response::new(Body::Text(body.to_string()));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    resp
}
