//! Templater configuration.

use serde::{Deserialize, Serialize};

/// What to do when a placeholder outside of any `{}` block receives the
/// skip sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipPolicy {
    /// Drop the top-level text segment the placeholder is in.
    #[default]
    DropSegment,
    /// Fail with [`TemplateError::SkipOutsideBlock`](crate::TemplateError::SkipOutsideBlock).
    Error,
}

/// Configuration for a [`Templater`](crate::Templater).
///
/// Deserializable so it can live in an application's config file:
///
/// ```toml
/// skip_outside_block = "error"
/// log_sql_max_length = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Handling of skip sentinels outside of blocks.
    pub skip_outside_block: SkipPolicy,
    /// Truncate SQL in log events (in bytes). `None` means no truncation.
    /// Only used with the `tracing` feature.
    pub log_sql_max_length: Option<usize>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            skip_outside_block: SkipPolicy::DropSegment,
            log_sql_max_length: Some(200),
        }
    }
}

impl TemplateConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the handling of skip sentinels outside of blocks.
    pub fn with_skip_outside_block(mut self, policy: SkipPolicy) -> Self {
        self.skip_outside_block = policy;
        self
    }

    /// Set maximum SQL length in log events.
    pub fn with_log_sql_max_length(mut self, len: usize) -> Self {
        self.log_sql_max_length = Some(len);
        self
    }

    /// Disable SQL truncation in log events.
    pub fn no_log_truncate(mut self) -> Self {
        self.log_sql_max_length = None;
        self
    }
}
