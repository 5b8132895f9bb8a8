use slalom::{handle, logging, wrap_error, Flow, ProxyConfig, ProxyError};
use vercel_runtime::{run, Body, Error, Request, Response};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    run(wrap_error!(handler)).await
}

pub async fn handler(req: Request) -> Result<Response<Body>, ProxyError> {
    handle(&ProxyConfig::from_env(Flow::Static), req).await
}
