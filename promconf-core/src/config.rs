use std::{fs::File, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    DEFAULT_ADDRESS_PLACEHOLDER, DEFAULT_NAMESPACE, DEFAULT_ROUTE_NAME, DEFAULT_TEMPLATE_SUFFIX,
    DEFAULT_TOKEN_KEY, DEFAULT_TOKEN_PLACEHOLDER, DEFAULT_TOKEN_PREFIX,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Io error: {}", .0)]
    IoError(std::io::Error),
    #[error("Deserialization error: {}", .0)]
    DeserializationError(serde_yaml::Error),
    #[error("Configuration value '{}' can't be empty!", .0)]
    EmptyValue(&'static str),
}

/// Where the Prometheus route and its token secret live
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PrometheusTarget {
    pub namespace: String,
    pub route_name: String,
    pub token_prefix: String,
    pub token_key: String,
}

impl Default for PrometheusTarget {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            route_name: DEFAULT_ROUTE_NAME.to_owned(),
            token_prefix: DEFAULT_TOKEN_PREFIX.to_owned(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Placeholders {
    pub address: String,
    pub token: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS_PLACEHOLDER.to_owned(),
            token: DEFAULT_TOKEN_PLACEHOLDER.to_owned(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterializerConfig {
    pub target: PrometheusTarget,
    pub placeholders: Placeholders,
    pub template_suffix: String,
}

impl Default for MaterializerConfig {
    fn default() -> Self {
        Self {
            target: PrometheusTarget::default(),
            placeholders: Placeholders::default(),
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_owned(),
        }
    }
}

impl MaterializerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Used config path: {path:?}");

        let file = File::open(path).map_err(ConfigError::IoError)?;
        let config: MaterializerConfig =
            serde_yaml::from_reader(file).map_err(ConfigError::DeserializationError)?;

        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("namespace", &self.target.namespace),
            ("routeName", &self.target.route_name),
            ("tokenPrefix", &self.target.token_prefix),
            ("tokenKey", &self.target.token_key),
            ("placeholders.address", &self.placeholders.address),
            ("placeholders.token", &self.placeholders.token),
            ("templateSuffix", &self.template_suffix),
        ];

        match required.into_iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(ConfigError::EmptyValue(field)),
            None => Ok(()),
        }
    }
}
