use std::{ffi::OsStr, path::Path};

use anyhow::anyhow;
use const_format::concatcp;
use serde::{Deserialize, Serialize};
use serde_json as json;

const ENV_VAR_PREFIX: &str = "PONG_RESPONDER";

pub const CONFIG_PATH_ENV_VAR: &str = concatcp!(ENV_VAR_PREFIX, "_CONFIG");
pub const VERBOSE_ENV_VAR: &str = concatcp!(ENV_VAR_PREFIX, "_VERBOSE");

pub struct Package {
    pub name: &'static str,
    pub version: &'static str,
}

pub const PACKAGE: Package = Package {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

/// Reads the value of `VERBOSE_ENV_VAR`. Unset, empty or `0` means quiet.
pub fn is_verbose(value: Option<&OsStr>) -> bool {
    value.map_or(false, |value| !value.is_empty() && value != "0")
}

/// Host-provided configuration. Opaque to responders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(json::Value);

impl Config {
    pub fn new(value: json::Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &json::Value {
        &self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_null()
    }

    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path).await.map_err(|err| {
            anyhow!(
                "failed to read config file '{}'. err: '{err}'",
                path.display()
            )
        })?;

        json::from_str(&content).map_err(|err| {
            anyhow!(
                "failed to parse config file '{}'. err: '{err}'",
                path.display()
            )
        })
    }
}
