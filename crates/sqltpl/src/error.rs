//! Error types for sqltpl

use thiserror::Error;

/// Result type alias for building queries.
pub type BuildResult<T> = Result<T, BuildError>;

/// Numeric type a placeholder coerces its argument to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Int,
    Float,
}

impl std::fmt::Display for NumericKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericKind::Int => f.write_str("int"),
            NumericKind::Float => f.write_str("float"),
        }
    }
}

/// Cause of a failed template build.
///
/// Positions are byte offsets into the template; argument indices are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    /// `{` found while a block is already open.
    #[error("unexpected block start at position {position}")]
    UnexpectedBlockStart { position: usize },

    /// `}` found outside of any block.
    #[error("unexpected block end at position {position}")]
    UnexpectedBlockEnd { position: usize },

    /// Template ended inside a block.
    #[error("unclosed block in template")]
    UnclosedBlock,

    /// Unknown character after `?`.
    #[error("unsupported specifier ?{0}")]
    UnsupportedSpecifier(char),

    /// Argument type cannot be used with its placeholder.
    #[error("invalid type of argument #{index}: {type_name}")]
    InvalidArgumentType {
        index: usize,
        type_name: &'static str,
    },

    /// Argument cannot be converted to the placeholder's numeric type.
    #[error("value of argument #{index} cannot be converted to {target}: {value}")]
    InvalidNumericArgument {
        index: usize,
        target: NumericKind,
        value: String,
    },

    /// More arguments than placeholders.
    #[error("extra arguments: {consumed} placeholder(s) consumed, {given} argument(s) given")]
    ExtraArguments { consumed: usize, given: usize },

    /// Placeholder found with no argument left for it.
    #[error("missing argument #{index}")]
    MissingArgument { index: usize },

    /// Skip sentinel consumed by a placeholder outside of any `{}` block,
    /// under [`SkipPolicy::Error`](crate::SkipPolicy::Error).
    #[error("argument #{index} is a skip outside of a conditional block")]
    SkipOutsideBlock { index: usize },
}

impl TemplateError {
    pub(crate) fn invalid_type(index: usize, type_name: &'static str) -> Self {
        Self::InvalidArgumentType { index, type_name }
    }

    pub(crate) fn invalid_numeric(index: usize, target: NumericKind, value: impl ToString) -> Self {
        Self::InvalidNumericArgument {
            index,
            target,
            value: value.to_string(),
        }
    }

    /// Check if the error comes from malformed `{}` block syntax.
    pub fn is_block_error(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedBlockStart { .. } | Self::UnexpectedBlockEnd { .. } | Self::UnclosedBlock
        )
    }

    /// Check if the error is about the number of arguments.
    pub fn is_arity_error(&self) -> bool {
        matches!(
            self,
            Self::ExtraArguments { .. } | Self::MissingArgument { .. }
        )
    }
}

/// A failed `build_query` call, carrying the template it failed on.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to build query: {template}\n{source}")]
pub struct BuildError {
    template: String,
    #[source]
    source: TemplateError,
}

impl BuildError {
    pub fn new(template: impl Into<String>, source: TemplateError) -> Self {
        Self {
            template: template.into(),
            source,
        }
    }

    /// The template that failed to build.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The underlying cause.
    pub fn kind(&self) -> &TemplateError {
        &self.source
    }

    pub fn into_kind(self) -> TemplateError {
        self.source
    }
}
