use vercel_runtime::{Body, Request, Response, StatusCode};

use crate::{
    config::{Credentials, ProxyConfig},
    error::ProxyError,
    json_response,
    upstream::Upstream,
};

/// Proxies one invocation to the results API.
///
/// The inbound request carries nothing the proxy needs; only the configured
/// credentials decide what is sent upstream. The login call, when there is
/// one, always finishes before the data call starts.
pub async fn handle(config: &ProxyConfig, _req: Request) -> Result<Response<Body>, ProxyError> {
    tracing::info!(year = config.year, "Proxying slalom results");
    proxy(&Upstream::new(config)?).await
}

pub async fn proxy(upstream: &Upstream<'_>) -> Result<Response<Body>, ProxyError> {
    let token = match &upstream.config().credentials {
        Credentials::StaticToken(Some(token)) => token.clone(),
        Credentials::StaticToken(None) => return Err(ProxyError::MissingToken),
        Credentials::Login {
            username: Some(username),
            password: Some(password),
        } => {
            tracing::debug!(username, "Logging in for a fresh token");
            upstream.login(username, password).await?
        }
        Credentials::Login { .. } => return Err(ProxyError::MissingCredentials),
    };

    let runs = upstream.fetch_runs(&token).await?;
    Ok(json_response(StatusCode::OK, &runs))
}
