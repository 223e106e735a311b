use crate::cli::InspectArgs;
use crate::render::read_template;
use sqltpl::{SegmentKind, Template};

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let source = read_template(&args.template)?;
    print!("{}", describe(&source)?);
    Ok(())
}

pub(crate) fn describe(source: &str) -> anyhow::Result<String> {
    let template = Template::parse(source)?;
    let placeholders = template.placeholders()?;

    let mut out = String::new();
    out.push_str(&format!("segments: {}\n", template.segments().len()));
    for (i, segment) in template.segments().iter().enumerate() {
        let kind = match segment.kind {
            SegmentKind::Always => "text ",
            SegmentKind::Block => "block",
        };
        out.push_str(&format!("  [{i}] {kind} @{}: {:?}\n", segment.offset, segment.text));
    }

    out.push_str(&format!("placeholders: {}\n", placeholders.len()));
    for (n, p) in placeholders.iter().enumerate() {
        let scope = if p.in_block { " (in block)" } else { "" };
        out.push_str(&format!(
            "  #{} {} @{} in segment {}{scope}\n",
            n + 1,
            p.specifier,
            p.offset,
            p.segment
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_segments_and_placeholders() {
        let out = describe("SELECT ?# FROM t{ WHERE a = ?d}").unwrap();
        assert_eq!(
            out,
            "segments: 2\n  [0] text  @0: \"SELECT ?# FROM t\"\n  [1] block @17: \" WHERE a = ?d\"\nplaceholders: 2\n  #1 ?# @7 in segment 0\n  #2 ?d @28 in segment 1 (in block)\n"
        );
    }

    #[test]
    fn reports_syntax_errors() {
        assert!(describe("SELECT {").is_err());
        assert!(describe("SELECT ?z").is_err());
    }
}
