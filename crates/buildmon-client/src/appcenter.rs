//! App Center build API client.

use async_trait::async_trait;
use buildmon_config::MonitorConfig;
use buildmon_core::{BranchConfiguration, Build, BuildId, BuildService, Error, Result};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

const TOKEN_HEADER: &str = "x-api-token";

/// Body of a build-creation request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBuildRequest<'a> {
    source_version: &'a str,
}

/// Client for one application's build endpoints.
///
/// Holds only read-only configuration, so a single instance can serve any
/// number of concurrent requests.
pub struct AppCenterClient {
    client: reqwest::Client,
    base_url: String,
}

impl AppCenterClient {
    pub fn new(config: &MonitorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(config.token())
            .map_err(|e| Error::InvalidInput(format!("API token is not a valid header: {}", e)))?;
        headers.insert(TOKEN_HEADER, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent("buildmon")
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and read the whole body.
    async fn send(
        &self,
        method: &str,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, String)> {
        debug!(method, path, "Sending build service request");

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        debug!(method, path, status = status.as_u16(), "Received response");
        Ok((status, body))
    }
}

fn service_error(status: StatusCode, body: String) -> Error {
    Error::Service {
        status: status.as_u16(),
        message: if body.is_empty() {
            status.to_string()
        } else {
            body
        },
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))
}

#[async_trait]
impl BuildService for AppCenterClient {
    async fn fetch_build(&self, id: BuildId) -> Result<Build> {
        let path = format!("/builds/{}", id);
        let (status, body) = self
            .send("GET", &path, self.client.get(self.url(&path)))
            .await?;

        match status {
            s if s.is_success() => decode(&body),
            StatusCode::NOT_FOUND => Err(Error::NotFound(format!("build {}", id))),
            s => Err(service_error(s, body)),
        }
    }

    async fn fetch_branches(&self) -> Result<Vec<BranchConfiguration>> {
        let path = "/branches";
        let (status, body) = self
            .send("GET", path, self.client.get(self.url(path)))
            .await?;

        if !status.is_success() {
            return Err(service_error(status, body));
        }

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let branches: Option<Vec<BranchConfiguration>> = decode(&body)?;
        Ok(branches.unwrap_or_default())
    }

    async fn create_build(&self, branch: &str, source_version: &str) -> Result<Build> {
        let path = format!("/branches/{}/builds", urlencoding::encode(branch));
        let request = self
            .client
            .post(self.url(&path))
            .json(&CreateBuildRequest { source_version });
        let (status, body) = self.send("POST", &path, request).await?;

        match status {
            s if s.is_success() => decode(&body),
            StatusCode::NOT_FOUND => Err(Error::InvalidBranch(branch.to_string())),
            s => Err(service_error(s, body)),
        }
    }
}
