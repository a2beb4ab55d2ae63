//! REST client for the daemons running on each node.
//!
//! Every call carries the panel access token as a bearer token and expects the
//! daemon's `{success, data|msg, code}` envelope in return.

use std::collections::HashMap;

use oauth2::AccessToken;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::server::{
    error::daemon::DaemonError,
    model::daemon::{CreateDaemonServer, DaemonEndpoint, DaemonResponse},
};

#[derive(Clone)]
pub struct DaemonClient {
    http: reqwest::Client,
    scheme: &'static str,
}

impl DaemonClient {
    /// Creates a client that talks `https` when `use_tls` is set and `http` otherwise.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client; timeouts and redirect policy are configured on it
    /// - `use_tls` - Whether daemons are reached over TLS
    pub fn new(http: reqwest::Client, use_tls: bool) -> Self {
        Self {
            http,
            scheme: if use_tls { "https" } else { "http" },
        }
    }

    /// Base URL of a daemon, e.g. `https://10.0.0.5:5656/`.
    pub fn base_url(&self, endpoint: &DaemonEndpoint) -> Result<Url, DaemonError> {
        Ok(Url::parse(&format!("{}://{}/", self.scheme, endpoint))?)
    }

    fn url(&self, endpoint: &DaemonEndpoint, path: &str) -> Result<Url, DaemonError> {
        Ok(self.base_url(endpoint)?.join(path)?)
    }

    /// Fetches live network status for the given server hashes.
    ///
    /// # Arguments
    /// - `endpoint` - Daemon to query
    /// - `bearer` - Panel access token
    /// - `hashes` - Hashes of servers hosted on that daemon
    ///
    /// # Returns
    /// - `Ok(HashMap)` - Status object per server hash
    /// - `Err(DaemonError)` - Unreachable daemon, unreadable body or `success: false`
    pub async fn network_status(
        &self,
        endpoint: &DaemonEndpoint,
        bearer: &AccessToken,
        hashes: &[String],
    ) -> Result<HashMap<String, Value>, DaemonError> {
        let mut url = self.url(endpoint, "network")?;
        url.query_pairs_mut().append_pair("ids", &hashes.join(","));

        let data: Option<HashMap<String, Value>> =
            self.send(self.request(Method::GET, url, bearer)).await?;

        Ok(data.unwrap_or_default())
    }

    /// Creates a server object on the daemon with `PUT /server/{hash}`.
    pub async fn create_server(
        &self,
        endpoint: &DaemonEndpoint,
        bearer: &AccessToken,
        hash: &str,
        payload: &CreateDaemonServer,
    ) -> Result<(), DaemonError> {
        let url = self.url(endpoint, &format!("server/{hash}"))?;

        self.send::<Value>(self.request(Method::PUT, url, bearer).json(payload))
            .await
            .map(|_| ())
    }

    /// Removes a server object from the daemon with `DELETE /server/{hash}`.
    pub async fn delete_server(
        &self,
        endpoint: &DaemonEndpoint,
        bearer: &AccessToken,
        hash: &str,
    ) -> Result<(), DaemonError> {
        let url = self.url(endpoint, &format!("server/{hash}"))?;

        self.send::<Value>(self.request(Method::DELETE, url, bearer))
            .await
            .map(|_| ())
    }

    /// Starts the install of a freshly created server with `POST /server/{hash}/install`.
    ///
    /// The request has no body; the daemon installs from the definition sent at creation.
    pub async fn install_server(
        &self,
        endpoint: &DaemonEndpoint,
        bearer: &AccessToken,
        hash: &str,
    ) -> Result<(), DaemonError> {
        let url = self.url(endpoint, &format!("server/{hash}/install"))?;

        self.send::<Value>(self.request(Method::POST, url, bearer))
            .await
            .map(|_| ())
    }

    /// Fetches the daemon's plugin templates and returns the JSON body untouched.
    pub async fn templates(
        &self,
        endpoint: &DaemonEndpoint,
        bearer: &AccessToken,
    ) -> Result<Value, DaemonError> {
        let url = self.url(endpoint, "_templates")?;

        let body = self
            .request(Method::GET, url, bearer)
            .send()
            .await?
            .json::<Value>()
            .await?;

        Ok(body)
    }

    fn request(&self, method: Method, url: Url, bearer: &AccessToken) -> RequestBuilder {
        tracing::debug!("Daemon request {} {}", method, url);

        self.http.request(method, url).bearer_auth(bearer.secret())
    }

    /// Sends one request and unwraps the daemon envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, DaemonError> {
        let response = request.send().await?.json::<DaemonResponse<T>>().await?;

        if !response.success {
            return Err(DaemonError::rejected(response.msg, response.code));
        }

        Ok(response.data)
    }
}
