//! Monitor settings and their validation.

use buildmon_core::BuildId;
use std::time::Duration;
use url::Url;

use crate::{ConfigError, ConfigResult};

/// Build service API host.
pub const DEFAULT_API_URL: &str = "https://api.appcenter.ms";
/// Web portal host used for links to build logs.
pub const DEFAULT_PORTAL_URL: &str = "https://appcenter.ms";
pub const DEFAULT_UPDATE_STATUS_INTERVAL_MS: i64 = 10 * 1000;
pub const MAX_UPDATE_STATUS_INTERVAL_MS: i64 = 10 * 60 * 1000;

/// Validated settings for monitoring one application.
///
/// Only obtainable through [`MonitorConfigBuilder::build`], so every instance
/// carries an interval inside `(0, MAX_UPDATE_STATUS_INTERVAL_MS]`.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    app_name: String,
    owner_name: String,
    token: String,
    update_status_interval: Duration,
    api_url: Url,
    portal_url: Url,
}

impl MonitorConfig {
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::new()
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// API token, sent verbatim on every request.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn update_status_interval(&self) -> Duration {
        self.update_status_interval
    }

    /// Base URL every API path of this application hangs off.
    pub fn api_base_url(&self) -> String {
        format!(
            "{}/v0.1/apps/{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            urlencoding::encode(&self.owner_name),
            urlencoding::encode(&self.app_name)
        )
    }

    /// Link to the logs of a build in the web portal.
    pub fn logs_url(&self, branch: &str, build_id: BuildId) -> String {
        format!(
            "{}/users/{}/apps/{}/build/branches/{}/builds/{}",
            self.portal_url.as_str().trim_end_matches('/'),
            urlencoding::encode(&self.owner_name),
            urlencoding::encode(&self.app_name),
            urlencoding::encode(branch),
            build_id
        )
    }
}

/// Builder for [`MonitorConfig`].
///
/// Later `with_*` calls override earlier ones, so a file-based builder can be
/// layered under command-line values.
#[derive(Debug, Clone)]
pub struct MonitorConfigBuilder {
    app_name: Option<String>,
    owner_name: Option<String>,
    token: Option<String>,
    update_status_interval_ms: i64,
    api_url: String,
    portal_url: String,
}

impl MonitorConfigBuilder {
    pub fn new() -> Self {
        Self {
            app_name: None,
            owner_name: None,
            token: None,
            update_status_interval_ms: DEFAULT_UPDATE_STATUS_INTERVAL_MS,
            api_url: DEFAULT_API_URL.to_string(),
            portal_url: DEFAULT_PORTAL_URL.to_string(),
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_owner_name(mut self, owner_name: impl Into<String>) -> Self {
        self.owner_name = Some(owner_name.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Delay between poll cycles in milliseconds. Checked in `build()`.
    pub fn with_update_status_interval_ms(mut self, interval_ms: i64) -> Self {
        self.update_status_interval_ms = interval_ms;
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_portal_url(mut self, portal_url: impl Into<String>) -> Self {
        self.portal_url = portal_url.into();
        self
    }

    pub fn build(self) -> ConfigResult<MonitorConfig> {
        let app_name = required("app name", self.app_name)?;
        let owner_name = required("owner name", self.owner_name)?;
        let token = required("token", self.token)?;

        let interval_ms = self.update_status_interval_ms;
        if interval_ms <= 0 || interval_ms > MAX_UPDATE_STATUS_INTERVAL_MS {
            return Err(ConfigError::InvalidValue {
                field: "update status interval".to_string(),
                message: format!(
                    "{} ms is out of range; value should be between 0 and {}",
                    interval_ms, MAX_UPDATE_STATUS_INTERVAL_MS
                ),
            });
        }

        Ok(MonitorConfig {
            app_name,
            owner_name,
            token,
            update_status_interval: Duration::from_millis(interval_ms as u64),
            api_url: parse_url("api url", &self.api_url)?,
            portal_url: parse_url("portal url", &self.portal_url)?,
        })
    }
}

impl Default for MonitorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn required(field: &str, value: Option<String>) -> ConfigResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField(field.to_string())),
    }
}

fn parse_url(field: &str, value: &str) -> ConfigResult<Url> {
    Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("{}: {}", value, e),
    })
}
