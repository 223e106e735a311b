//! The [`Templater`] entry point.

use crate::config::TemplateConfig;
use crate::error::{BuildError, BuildResult};
use crate::escape::{Dialect, Escaper};
use crate::substitute::Substituter;
use crate::template::Template;
use crate::value::Value;

/// Builds SQL from templates with typed placeholders and `{}` blocks.
///
/// Holds the target database's [`Escaper`] and a [`TemplateConfig`]. Each
/// call is independent; a `Templater` can be shared between threads when
/// its escaper can.
///
/// # Example
/// ```
/// use sqltpl::{Templater, Value};
///
/// let templater = Templater::mysql();
/// let sql = templater.build_query(
///     "UPDATE users SET ?a WHERE user_id = -1",
///     &[Value::map([("name", Value::from("Jack")), ("email", Value::Null)])],
/// )?;
/// assert_eq!(sql, "UPDATE users SET `name` = 'Jack', `email` = NULL WHERE user_id = -1");
/// # Ok::<(), sqltpl::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Templater<E = Dialect> {
    escaper: E,
    config: TemplateConfig,
}

impl Templater<Dialect> {
    /// Create a templater for one of the built-in dialects.
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self::new(dialect)
    }

    pub fn mysql() -> Self {
        Self::new(Dialect::MySql)
    }

    pub fn postgres() -> Self {
        Self::new(Dialect::Postgres)
    }
}

impl Default for Templater<Dialect> {
    fn default() -> Self {
        Self::mysql()
    }
}

impl<E: Escaper> Templater<E> {
    /// Create a templater escaping through `escaper`, with default config.
    pub fn new(escaper: E) -> Self {
        Self {
            escaper,
            config: TemplateConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: TemplateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    pub fn escaper(&self) -> &E {
        &self.escaper
    }

    /// The sentinel that suppresses the `{}` block it is substituted into.
    pub fn skip(&self) -> Value {
        Value::Skip
    }

    /// Substitute `args` into `template`.
    ///
    /// Arguments are consumed left to right, one per placeholder; their
    /// count must match the number of placeholders exactly.
    pub fn build_query(&self, template: &str, args: &[Value]) -> BuildResult<String> {
        Template::parse(template)
            .inspect_err(|e| self.log_failed(e))?
            .render(self, args)
    }

    pub(crate) fn render(&self, template: &Template<'_>, args: &[Value]) -> BuildResult<String> {
        let result = Substituter::new(&self.escaper, args, self.config.skip_outside_block)
            .run(template.segments())
            .map_err(|e| BuildError::new(template.source(), e));

        match &result {
            Ok(sql) => self.log_built(template, args.len(), sql),
            Err(e) => self.log_failed(e),
        }
        result
    }

    #[cfg(feature = "tracing")]
    fn log_built(&self, template: &Template<'_>, arg_count: usize, sql: &str) {
        tracing::debug!(
            target: "sqltpl.build",
            segments = template.segments().len(),
            arg_count,
            sql = %self.truncate_sql(sql),
            "built query"
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn log_built(&self, _template: &Template<'_>, _arg_count: usize, _sql: &str) {}

    #[cfg(feature = "tracing")]
    fn log_failed(&self, err: &BuildError) {
        tracing::debug!(
            target: "sqltpl.build",
            template = %self.truncate_sql(err.template()),
            error = %err.kind(),
            "failed to build query"
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn log_failed(&self, _err: &BuildError) {}

    #[cfg(feature = "tracing")]
    fn truncate_sql(&self, sql: &str) -> String {
        match self.config.log_sql_max_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

#[cfg(feature = "tracing")]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
