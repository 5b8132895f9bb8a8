use std::env;

use url::Url;

use crate::error::ProxyError;

pub const DEFAULT_API_BASE: &str = "https://web-production-dc5de.up.railway.app";
pub const DEFAULT_YEAR: u16 = 2025;

/// Which credentials a deployed function reads from its environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// `STATIC_API_TOKEN`
    Static,
    /// `API_TOKEN`, kept for the original deployment
    Legacy,
    /// `API_USERNAME` + `API_PASSWORD`, exchanged for a token on every call
    Login,
}

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    StaticToken(Option<String>),
    Login {
        username: Option<String>,
        password: Option<String>,
    },
}

// Hand-written so secrets never end up in logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::StaticToken(token) => f
                .debug_tuple("StaticToken")
                .field(&token.as_ref().map(|_| "<redacted>"))
                .finish(),
            Credentials::Login { username, password } => f
                .debug_struct("Login")
                .field("username", username)
                .field("password", &password.as_ref().map(|_| "<redacted>"))
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub api_base: String,
    pub year: u16,
    pub credentials: Credentials,
}

impl ProxyConfig {
    pub fn new(api_base: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            api_base: api_base.into(),
            year: DEFAULT_YEAR,
            credentials,
        }
    }

    /// Reads the function's configuration from the process environment.
    ///
    /// Missing secrets are not an error here: they are reported when the
    /// function is invoked so the caller still receives a JSON response.
    pub fn from_env(flow: Flow) -> Self {
        Self::from_lookup(flow, |key| env::var(key).ok())
    }

    fn from_lookup(flow: Flow, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let credentials = match flow {
            Flow::Static => Credentials::StaticToken(var("STATIC_API_TOKEN")),
            Flow::Legacy => Credentials::StaticToken(var("API_TOKEN")),
            Flow::Login => Credentials::Login {
                username: var("API_USERNAME"),
                password: var("API_PASSWORD"),
            },
        };

        let year = match var("SLALOM_YEAR").map(|y| y.parse::<u16>()) {
            Some(Ok(year)) => year,
            Some(Err(e)) => {
                tracing::warn!("Ignoring invalid SLALOM_YEAR ({e}), using {DEFAULT_YEAR}");
                DEFAULT_YEAR
            }
            None => DEFAULT_YEAR,
        };

        Self {
            api_base: var("SLALOM_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_owned()),
            year,
            credentials,
        }
    }

    pub fn runs_url(&self) -> Result<Url, ProxyError> {
        let mut url = self.endpoint("api/runsAUS/")?;
        url.query_pairs_mut()
            .append_pair("year", &self.year.to_string());
        Ok(url)
    }

    pub fn login_url(&self) -> Result<Url, ProxyError> {
        self.endpoint("api/auth/login/")
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProxyError> {
        // A trailing slash keeps any path prefix on the base when joining
        let base = if self.api_base.ends_with('/') {
            Url::parse(&self.api_base)
        } else {
            Url::parse(&format!("{}/", self.api_base))
        }
        .map_err(|e| ProxyError::BaseUrl(format!("{}: {e}", self.api_base)))?;

        base.join(path)
            .map_err(|e| ProxyError::BaseUrl(format!("{}: {e}", self.api_base)))
    }
}
