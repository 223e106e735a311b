use serde::Deserialize;
use sqltpl::{Dialect, TemplateConfig};
use std::path::Path;

/// Contents of `sqltpl.toml`.
///
/// ```toml
/// dialect = "postgres"
///
/// [template]
/// skip_outside_block = "error"
/// log_sql_max_length = 500
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default)]
    pub template: TemplateConfig,
}

impl ConfigFile {
    /// Load the config file at `path`.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(path: &Path, explicit: bool) -> anyhow::Result<Self> {
        if !path.exists() && !explicit {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;
        Self::parse(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
