//! Parsed templates.

use crate::block::{self, Segment};
use crate::engine::Templater;
use crate::error::{BuildError, BuildResult};
use crate::escape::Escaper;
use crate::substitute::{Specifier, next_placeholder};
use crate::value::Value;

/// A placeholder found in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// Index of the segment holding the placeholder.
    pub segment: usize,
    /// Byte offset of the `?` in the template.
    pub offset: usize,
    pub specifier: Specifier,
    /// Whether the placeholder sits inside a `{}` block.
    pub in_block: bool,
}

/// A template split into segments, ready to be rendered many times.
///
/// # Example
/// ```
/// use sqltpl::{Template, Templater, args};
///
/// let template = Template::parse("SELECT * FROM users WHERE id = ?d{ AND block = ?d}")?;
/// assert_eq!(template.placeholder_count()?, 2);
///
/// let templater = Templater::mysql();
/// let sql = template.render(&templater, &args![1, templater.skip()])?;
/// assert_eq!(sql, "SELECT * FROM users WHERE id = 1");
/// # Ok::<(), sqltpl::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Template<'a> {
    source: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    /// Split `source` into segments, validating `{}` blocks.
    pub fn parse(source: &'a str) -> BuildResult<Self> {
        let segments = block::split(source).map_err(|e| BuildError::new(source, e))?;
        Ok(Self { source, segments })
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// All placeholders in order. Fails on the first unsupported specifier.
    pub fn placeholders(&self) -> BuildResult<Vec<Placeholder>> {
        let mut found = Vec::new();
        for (i, segment) in self.segments.iter().enumerate() {
            let mut consumed = 0;
            while let Some((pos, specifier)) = next_placeholder(&segment.text[consumed..]) {
                let specifier = specifier.map_err(|e| BuildError::new(self.source, e))?;
                found.push(Placeholder {
                    segment: i,
                    offset: segment.offset + consumed + pos,
                    specifier,
                    in_block: segment.is_block(),
                });
                consumed += pos + specifier.token_len();
            }
        }
        Ok(found)
    }

    /// Number of arguments a render call must supply.
    pub fn placeholder_count(&self) -> BuildResult<usize> {
        self.placeholders().map(|p| p.len())
    }

    /// Substitute `args` into the template.
    pub fn render<E: Escaper>(&self, templater: &Templater<E>, args: &[Value]) -> BuildResult<String> {
        templater.render(self, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;

    #[test]
    fn lists_placeholders_with_offsets() {
        let t = Template::parse("SELECT ?# FROM t WHERE id IN (?a){ AND b = ?d}").unwrap();
        let found = t.placeholders().unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].offset, 7);
        assert_eq!(found[0].specifier, Specifier::Column);
        assert!(!found[0].in_block);
        assert_eq!(found[1].specifier, Specifier::Array);
        assert_eq!(&t.source()[found[2].offset..found[2].offset + 2], "?d");
        assert!(found[2].in_block);
        assert_eq!(found[2].segment, 1);
    }

    #[test]
    fn parse_reports_block_errors_with_template() {
        let err = Template::parse("SELECT {{").unwrap_err();
        assert_eq!(err.template(), "SELECT {{");
        assert_eq!(
            err.kind(),
            &TemplateError::UnexpectedBlockStart { position: 8 }
        );
    }

    #[test]
    fn placeholders_reject_unknown_specifier() {
        let t = Template::parse("SELECT ?q").unwrap();
        assert_eq!(
            t.placeholders().unwrap_err().kind(),
            &TemplateError::UnsupportedSpecifier('q')
        );
    }

    #[test]
    fn renders_repeatedly() {
        let t = Template::parse("SELECT ?d").unwrap();
        let templater = Templater::mysql();
        assert_eq!(t.render(&templater, &[Value::Int(1)]).unwrap(), "SELECT 1");
        assert_eq!(t.render(&templater, &[Value::Int(2)]).unwrap(), "SELECT 2");
    }
}
