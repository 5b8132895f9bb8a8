use hyper::ext::ReasonPhrase;
use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;

use crate::{config::ProxyConfig, error::ProxyError};

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Client for the race results API
#[derive(Debug, Clone)]
pub struct Upstream<'a> {
    client: Client,
    config: &'a ProxyConfig,
}

impl<'a> Upstream<'a> {
    pub fn new(config: &'a ProxyConfig) -> Result<Self, ProxyError> {
        Ok(Self {
            client: Client::builder().build()?,
            config,
        })
    }

    pub fn config(&self) -> &'a ProxyConfig {
        self.config
    }

    /// Exchanges a username and password for a fresh API token
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ProxyError> {
        let resp = self
            .client
            .post(self.config.login_url()?)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProxyError::LoginFailed(status.as_u16()));
        }

        let body: Value = serde_json::from_slice(&resp.bytes().await?)?;
        match body.get("token") {
            Some(Value::String(token)) if !token.is_empty() => Ok(token.clone()),
            // Numeric tokens are sent as written; zero counts as no token
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Ok(n.to_string()),
            _ => Err(ProxyError::TokenNotFound),
        }
    }

    /// Fetches the year's runs, returning the upstream JSON untouched
    pub async fn fetch_runs(&self, token: &str) -> Result<Value, ProxyError> {
        let resp = self
            .client
            .get(self.config.runs_url()?)
            .header(header::AUTHORIZATION, format!("Token {token}"))
            .send()
            .await?;

        let status = resp.status();
        tracing::info!(status = status.as_u16(), "Upstream responded");

        if !status.is_success() {
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                text: status_text(&resp),
            });
        }

        Ok(serde_json::from_slice(&resp.bytes().await?)?)
    }
}

/// The reason phrase the upstream actually sent, falling back to the
/// standard one for the status code
fn status_text(resp: &reqwest::Response) -> String {
    let status = resp.status();
    resp.extensions()
        .get::<ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).trim().to_owned())
        .filter(|reason| !reason.is_empty())
        .or_else(|| status.canonical_reason().map(str::to_owned))
        .unwrap_or_else(|| status.as_u16().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;

    #[test]
    fn builds_client_without_panicking() {
        let config = ProxyConfig::new("http://localhost", Credentials::StaticToken(None));
        let upstream = Upstream::new(&config).expect("client to build");
        assert_eq!(upstream.config().api_base, "http://localhost");
    }
}
