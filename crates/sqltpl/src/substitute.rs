//! Placeholder scanning and substitution.

use crate::block::{Segment, SegmentKind};
use crate::config::SkipPolicy;
use crate::convert::{self, Converted, Halt};
use crate::error::TemplateError;
use crate::escape::Escaper;
use crate::value::Value;

/// The conversion selected by the character after `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier {
    /// `?`: generic scalar escape.
    Escaped,
    /// `?d`: integer.
    Int,
    /// `?f`: float.
    Float,
    /// `?a`: list of values or `name = value` pairs.
    Array,
    /// `?#`: column name or list of column names.
    Column,
}

impl Specifier {
    /// Resolve the specifier from the character following `?`.
    ///
    /// Space, `,` and the end of the segment select [`Specifier::Escaped`]
    /// without consuming the character.
    pub fn parse(next: Option<char>) -> Result<Self, TemplateError> {
        match next {
            Some('d') => Ok(Specifier::Int),
            Some('f') => Ok(Specifier::Float),
            Some('a') => Ok(Specifier::Array),
            Some('#') => Ok(Specifier::Column),
            Some(' ') | Some(',') | None => Ok(Specifier::Escaped),
            Some(other) => Err(TemplateError::UnsupportedSpecifier(other)),
        }
    }

    /// Bytes of template text the placeholder occupies.
    pub fn token_len(self) -> usize {
        match self {
            Specifier::Escaped => 1,
            _ => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Specifier::Escaped => "?",
            Specifier::Int => "?d",
            Specifier::Float => "?f",
            Specifier::Array => "?a",
            Specifier::Column => "?#",
        }
    }
}

impl std::fmt::Display for Specifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Find the next placeholder in `text`: its byte offset and specifier.
pub(crate) fn next_placeholder(text: &str) -> Option<(usize, Result<Specifier, TemplateError>)> {
    let pos = text.find('?')?;
    let next = text[pos + 1..].chars().next();
    Some((pos, Specifier::parse(next)))
}

/// Walks segments, consuming one argument per placeholder.
///
/// The argument cursor is shared across segments, so placeholders inside a
/// dropped block still consume their arguments.
pub(crate) struct Substituter<'a, E: ?Sized> {
    escaper: &'a E,
    args: &'a [Value],
    skip_policy: SkipPolicy,
    cursor: usize,
}

impl<'a, E: Escaper + ?Sized> Substituter<'a, E> {
    pub(crate) fn new(escaper: &'a E, args: &'a [Value], skip_policy: SkipPolicy) -> Self {
        Self {
            escaper,
            args,
            skip_policy,
            cursor: 0,
        }
    }

    /// Substitute every segment and join the ones that are kept.
    pub(crate) fn run(mut self, segments: &[Segment<'_>]) -> Result<String, TemplateError> {
        let mut kept = Vec::with_capacity(segments.len());
        for segment in segments {
            if let Some(text) = self.segment(segment)? {
                kept.push(text);
            }
        }

        if self.cursor < self.args.len() {
            return Err(TemplateError::ExtraArguments {
                consumed: self.cursor,
                given: self.args.len(),
            });
        }
        Ok(kept.concat())
    }

    /// Returns `None` when the segment is dropped.
    fn segment(&mut self, segment: &Segment<'_>) -> Result<Option<String>, TemplateError> {
        let mut out = String::with_capacity(segment.text.len());
        let mut rest = segment.text;
        let mut dropped = false;

        while let Some((pos, specifier)) = next_placeholder(rest) {
            let specifier = specifier?;
            out.push_str(&rest[..pos]);

            let index = self.cursor + 1;
            let args = self.args;
            let arg = args
                .get(self.cursor)
                .ok_or(TemplateError::MissingArgument { index })?;
            self.cursor += 1;

            match self.render(specifier, arg, index) {
                Ok(text) => out.push_str(&text),
                Err(Halt::Skip) => {
                    if segment.kind == SegmentKind::Always
                        && self.skip_policy == SkipPolicy::Error
                    {
                        return Err(TemplateError::SkipOutsideBlock { index });
                    }
                    dropped = true;
                }
                Err(Halt::Fail(err)) => return Err(err),
            }

            rest = &rest[pos + specifier.token_len()..];
        }
        out.push_str(rest);

        Ok((!dropped).then_some(out))
    }

    fn render(&self, specifier: Specifier, arg: &Value, index: usize) -> Converted {
        match specifier {
            Specifier::Int => convert::to_int(arg, index),
            Specifier::Float => convert::to_float(arg, index),
            Specifier::Array => convert::flatten(self.escaper, arg, index, convert::escaped),
            Specifier::Column => convert::flatten(self.escaper, arg, index, convert::column),
            Specifier::Escaped => convert::escaped(self.escaper, arg, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::split;
    use crate::escape::MySqlEscaper;

    fn run(template: &str, args: &[Value]) -> Result<String, TemplateError> {
        run_with(template, args, SkipPolicy::default())
    }

    fn run_with(
        template: &str,
        args: &[Value],
        policy: SkipPolicy,
    ) -> Result<String, TemplateError> {
        let segments = split(template)?;
        Substituter::new(&MySqlEscaper, args, policy).run(&segments)
    }

    #[test]
    fn specifier_parsing() {
        assert_eq!(Specifier::parse(Some('d')), Ok(Specifier::Int));
        assert_eq!(Specifier::parse(Some(',')), Ok(Specifier::Escaped));
        assert_eq!(Specifier::parse(None), Ok(Specifier::Escaped));
        assert_eq!(
            Specifier::parse(Some(')')),
            Err(TemplateError::UnsupportedSpecifier(')'))
        );
    }

    #[test]
    fn default_specifier_keeps_following_char() {
        assert_eq!(
            run("VALUES (?, ?d)", &[Value::from("a"), Value::Int(1)]).unwrap(),
            "VALUES ('a', 1)"
        );
        assert_eq!(run("x = ?", &[Value::Int(5)]).unwrap(), "x = 5");
    }

    #[test]
    fn inserted_text_is_not_rescanned() {
        assert_eq!(
            run("a = ? AND b = ?d", &[Value::from("why?"), Value::Int(2)]).unwrap(),
            "a = 'why?' AND b = 2"
        );
    }

    #[test]
    fn placeholder_at_block_end_uses_default() {
        assert_eq!(
            run("SELECT 1{ AND a = ?}", &[Value::from("x")]).unwrap(),
            "SELECT 1 AND a = 'x'"
        );
    }

    #[test]
    fn skip_drops_whole_block_but_consumes_all_its_args() {
        let args = [Value::Skip, Value::Int(7), Value::Int(3)];
        assert_eq!(
            run("SELECT 1{ AND a = ?d AND b = ?d} LIMIT ?d", &args).unwrap(),
            "SELECT 1 LIMIT 3"
        );
    }

    #[test]
    fn skip_outside_block_drops_segment_by_default() {
        assert_eq!(run("SELECT ?d{ x}", &[Value::Skip]).unwrap(), " x");
    }

    #[test]
    fn skip_outside_block_can_be_an_error() {
        assert_eq!(
            run_with("SELECT ?d", &[Value::Skip], SkipPolicy::Error),
            Err(TemplateError::SkipOutsideBlock { index: 1 })
        );
    }

    #[test]
    fn arity_is_checked() {
        assert_eq!(
            run("SELECT 1", &[Value::Int(1)]),
            Err(TemplateError::ExtraArguments {
                consumed: 0,
                given: 1
            })
        );
        assert_eq!(
            run("SELECT ?d, ?d", &[Value::Int(1)]),
            Err(TemplateError::MissingArgument { index: 2 })
        );
    }

    #[test]
    fn unsupported_specifier_is_reported() {
        assert_eq!(
            run("SELECT ?x", &[Value::Int(1)]),
            Err(TemplateError::UnsupportedSpecifier('x'))
        );
    }

    #[test]
    fn non_ascii_text_around_placeholders() {
        assert_eq!(
            run("SELECT 'ё' = ?, 'ж'", &[Value::from("ё")]).unwrap(),
            "SELECT 'ё' = 'ё', 'ж'"
        );
    }
}
