use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{RequestError, RequestResult};

/// Blocking JSON client bound to one analysis service base URL.
#[derive(Clone)]
pub struct ServiceClient {
    http: reqwest::blocking::Client,
    base: Url,
}

impl ServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> RequestResult<Self> {
        // Trailing slash so `join` appends instead of replacing the last segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&normalized)?;

        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("neural-link/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| RequestError::Client(e.to_string()))?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve a route (`"analyze"`, `"query"`) against the base URL.
    pub fn endpoint(&self, route: &str) -> RequestResult<Url> {
        Ok(self.base.join(route)?)
    }

    /// POST `body` as JSON to `route` and decode the JSON reply.
    ///
    /// Two suspension points: the response head, then the full body. A
    /// non-2xx status fails before the body is read.
    pub fn post_json<B, R>(&self, route: &str, body: &B) -> RequestResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(route)?;
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(url.as_str())
            .json(body)
            .send()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .map_err(|e| RequestError::Transport(format!("Failed to read body: {}", e)))?;

        Ok(serde_json::from_str(&text)?)
    }
}
