//! `buildmon.kdl` configuration files.
//!
//! ```kdl
//! app "my-app"
//! owner "my-org"
//! update-status-interval 15000
//! ```

use kdl::{KdlDocument, KdlNode};
use std::path::Path;

use crate::{ConfigError, ConfigResult, MonitorConfigBuilder};

pub const DEFAULT_CONFIG_FILE: &str = "buildmon.kdl";

/// Parse monitor settings from KDL text into a builder.
///
/// Fields not present keep their builder defaults; nothing is validated until
/// the builder is built.
pub fn parse_config(kdl: &str) -> ConfigResult<MonitorConfigBuilder> {
    let doc: KdlDocument = kdl.parse()?;
    let mut builder = MonitorConfigBuilder::new();

    for node in doc.nodes() {
        match node.name().value() {
            "app" => builder = builder.with_app_name(string_arg(node, "app")?),
            "owner" => builder = builder.with_owner_name(string_arg(node, "owner")?),
            "token" => builder = builder.with_token(string_arg(node, "token")?),
            "update-status-interval" => {
                builder = builder.with_update_status_interval_ms(integer_arg(
                    node,
                    "update-status-interval",
                )?)
            }
            "api-url" => builder = builder.with_api_url(string_arg(node, "api-url")?),
            "portal-url" => builder = builder.with_portal_url(string_arg(node, "portal-url")?),
            _ => {} // Ignore unknown nodes
        }
    }

    Ok(builder)
}

/// Read and parse a configuration file.
pub fn load_config_file(path: impl AsRef<Path>) -> ConfigResult<MonitorConfigBuilder> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

fn string_arg(node: &KdlNode, field: &str) -> ConfigResult<String> {
    let value = first_arg(node, field)?;
    value
        .as_string()
        .map(|s| s.to_string())
        .ok_or_else(|| ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("expected a string, found {}", value),
        })
}

fn integer_arg(node: &KdlNode, field: &str) -> ConfigResult<i64> {
    let value = first_arg(node, field)?;
    value
        .as_integer()
        .and_then(|i| i64::try_from(i).ok())
        .ok_or_else(|| ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("expected an integer, found {}", value),
        })
}

fn first_arg<'a>(node: &'a KdlNode, field: &str) -> ConfigResult<&'a kdl::KdlValue> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .map(|e| e.value())
        .ok_or_else(|| ConfigError::MissingField(field.to_string()))
}
