//! Splitting a template into top-level text and `{}` conditional blocks.

use crate::error::TemplateError;

/// Whether a segment is always part of the output or may be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Text outside of any `{}` block.
    Always,
    /// Interior of a `{}` block; dropped when one of its placeholders gets a skip.
    Block,
}

/// A contiguous piece of the template. Block delimiters are not included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub kind: SegmentKind,
    /// Byte offset of `text` in the template.
    pub offset: usize,
}

impl<'a> Segment<'a> {
    fn always(template: &'a str, start: usize, end: usize) -> Self {
        Self {
            text: &template[start..end],
            kind: SegmentKind::Always,
            offset: start,
        }
    }

    fn block(template: &'a str, start: usize, end: usize) -> Self {
        Self {
            text: &template[start..end],
            kind: SegmentKind::Block,
            offset: start,
        }
    }

    pub fn is_block(&self) -> bool {
        self.kind == SegmentKind::Block
    }
}

/// Split `template` into ordered segments.
///
/// Empty top-level segments are omitted; empty blocks (`{}`) are kept.
/// Blocks do not nest.
pub fn split(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_block = false;

    for (pos, byte) in template.bytes().enumerate() {
        match byte {
            b'{' => {
                if in_block {
                    return Err(TemplateError::UnexpectedBlockStart { position: pos });
                }
                if start < pos {
                    segments.push(Segment::always(template, start, pos));
                }
                in_block = true;
                start = pos + 1;
            }
            b'}' => {
                if !in_block {
                    return Err(TemplateError::UnexpectedBlockEnd { position: pos });
                }
                segments.push(Segment::block(template, start, pos));
                in_block = false;
                start = pos + 1;
            }
            _ => {}
        }
    }

    if in_block {
        return Err(TemplateError::UnclosedBlock);
    }
    if start < template.len() {
        segments.push(Segment::always(template, start, template.len()));
    }

    Ok(segments)
}
