//! # Configuration du client SOAP
//!
//! The configuration is built from:
//! - an embedded default YAML document,
//! - an optional external YAML file merged over it,
//! - environment variables prefixed with `ADSOAP_CONFIG__` (`__` separates
//!   path segments, values are parsed as YAML scalars).
//!
//! Keys are case-insensitive.
//!
//! ```no_run
//! use adsoap::ClientConfig;
//!
//! let config = ClientConfig::load(Some("adsoap.yaml".as_ref()))?;
//! println!("endpoint: {}", config.endpoint);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::{env, fs, path::Path, time::Duration};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::info;

use crate::client::BasicAuth;

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("adsoap.yaml");

const ENV_PREFIX: &str = "ADSOAP_CONFIG__";

const DEFAULT_DIAL_TIMEOUT_SECS: u64 = 30;

/// Typed client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API host, without the service path
    pub endpoint: String,

    #[serde(default)]
    pub insecure_skip_verify: bool,

    #[serde(default = "default_dial_timeout_secs")]
    pub dial_timeout_secs: u64,

    #[serde(default)]
    pub auth: Option<BasicAuth>,

    /// WS-Security credentials attached to every service client
    #[serde(default)]
    pub security: Option<SecurityConfig>,

    /// Values of the per-service `RequestHeader`
    #[serde(default)]
    pub request_header: Option<RequestHeaderConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub must_understand: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestHeaderConfig {
    pub client_customer_id: Option<String>,
    pub developer_token: Option<String>,
    pub user_agent: Option<String>,
    pub validate_only: Option<bool>,
    pub partial_failure: Option<bool>,
}

fn default_dial_timeout_secs() -> u64 {
    DEFAULT_DIAL_TIMEOUT_SECS
}

impl ClientConfig {
    /// Loads the configuration, merging `path` over the embedded defaults
    /// and applying environment overrides.
    ///
    /// A missing file is not an error: the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let yaml = match path {
            Some(path) if path.exists() => {
                info!(config_file = %path.display(), "Loaded config file");
                fs::read_to_string(path)
                    .with_context(|| format!("Cannot read config file {}", path.display()))?
            }
            Some(path) => {
                info!(config_file = %path.display(), "Config file not found, using default embedded config");
                String::new()
            }
            None => String::new(),
        };

        Self::from_yaml_str(&yaml, env::vars())
    }

    /// Builds the configuration from a YAML document and a set of
    /// `(name, value)` overrides shaped like environment variables.
    pub fn from_yaml_str<I>(yaml: &str, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let default_value: Value =
            serde_yaml::from_str(DEFAULT_CONFIG).context("Invalid embedded configuration")?;
        let mut value = lower_keys_value(default_value);

        if !yaml.trim().is_empty() {
            let external: Value = serde_yaml::from_str(yaml).context("Invalid configuration")?;
            merge_yaml(&mut value, &lower_keys_value(external));
        }

        apply_overrides(&mut value, overrides);

        serde_yaml::from_value(value).context("Invalid configuration values")
    }

    pub fn dial_timeout(&self) -> Duration {
        Duration::from_secs(self.dial_timeout_secs)
    }

    /// Joins the endpoint with a service path.
    pub fn service_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Merges `other` into `base`, recursively for mappings.
fn merge_yaml(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Mapping(base_map), Value::Mapping(other_map)) => {
            for (key, other_value) in other_map {
                match base_map.get_mut(key) {
                    Some(base_value) => merge_yaml(base_value, other_value),
                    None => {
                        base_map.insert(key.clone(), other_value.clone());
                    }
                }
            }
        }
        (base, other) => *base = other.clone(),
    }
}

fn apply_overrides<I>(config: &mut Value, overrides: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in overrides {
        if let Some(path) = key.strip_prefix(ENV_PREFIX) {
            let key_path = path.split("__").collect::<Vec<_>>();
            let yaml_value = convert_env_value(&value);
            let _ = set_value(config, &key_path, yaml_value);
        }
    }
}

fn set_value(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
    if path.is_empty() {
        *data = value;
        return Ok(());
    }
    if data.is_null() {
        *data = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = data {
        let key = Value::String(path[0].to_lowercase());
        if path.len() == 1 {
            map.insert(key, value);
        } else {
            let entry = map.entry(key).or_insert(Value::Mapping(Mapping::new()));
            set_value(entry, &path[1..], value)?;
        }
        Ok(())
    } else {
        Err(anyhow!("Current node is not a map"))
    }
}

fn convert_env_value(value: &str) -> Value {
    serde_yaml::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut new_map = Mapping::new();
            for (k, v) in map {
                let key = match k {
                    Value::String(s) => Value::String(s.to_lowercase()),
                    other => other,
                };
                new_map.insert(key, lower_keys_value(v));
            }
            Value::Mapping(new_map)
        }
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys_value).collect()),
        _ => value,
    }
}
