use crate::cli::{ArgsSource, DEFAULT_CONFIG, RenderArgs, TemplateSource};
use crate::config::ConfigFile;
use sqltpl::{Templater, Value};
use std::path::Path;

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let sql = render(&args)?;
    println!("{sql}");
    Ok(())
}

pub(crate) fn render(args: &RenderArgs) -> anyhow::Result<String> {
    let config = match &args.config {
        Some(path) => ConfigFile::load(path, true)?,
        None => ConfigFile::load(Path::new(DEFAULT_CONFIG), false)?,
    };
    let dialect = args.dialect.unwrap_or(config.dialect);

    let template = read_template(&args.template)?;
    let values = insert_skips(read_args(&args.args)?, &args.skips)?;

    tracing::debug!(?dialect, arg_count = values.len(), "rendering template");

    let templater = Templater::with_dialect(dialect).with_config(config.template);
    Ok(templater.build_query(&template, &values)?)
}

pub(crate) fn read_template(source: &TemplateSource) -> anyhow::Result<String> {
    match source {
        TemplateSource::Inline(sql) => Ok(sql.clone()),
        TemplateSource::File(path) => std::fs::read_to_string(path)
            .map(|s| s.trim_end_matches(['\n', '\r']).to_string())
            .map_err(|e| anyhow::anyhow!("failed to read template {}: {e}", path.display())),
    }
}

fn read_args(source: &ArgsSource) -> anyhow::Result<Vec<Value>> {
    let raw = match source {
        ArgsSource::Empty => return Ok(Vec::new()),
        ArgsSource::Inline(json) => json.clone(),
        ArgsSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read arguments {}: {e}", path.display()))?,
    };
    parse_args_json(&raw)
}

pub(crate) fn parse_args_json(raw: &str) -> anyhow::Result<Vec<Value>> {
    let json: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("invalid arguments JSON: {e}"))?;
    let serde_json::Value::Array(items) = json else {
        anyhow::bail!("arguments must be a JSON array");
    };
    Ok(items.into_iter().map(Value::from).collect())
}

/// Insert `Value::Skip` at each 1-based position, lowest first.
pub(crate) fn insert_skips(mut values: Vec<Value>, positions: &[usize]) -> anyhow::Result<Vec<Value>> {
    let mut positions = positions.to_vec();
    positions.sort_unstable();
    positions.dedup();

    for pos in positions {
        if pos > values.len() + 1 {
            anyhow::bail!(
                "--skip {pos} is past the end of the argument list ({} argument(s))",
                values.len()
            );
        }
        values.insert(pos - 1, Value::Skip);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqltpl::Dialect;

    fn inline(template: &str, json: &str, skips: Vec<usize>) -> RenderArgs {
        RenderArgs {
            config: None,
            template: TemplateSource::Inline(template.to_string()),
            args: ArgsSource::Inline(json.to_string()),
            skips,
            dialect: Some(Dialect::MySql),
            verbose: false,
        }
    }

    #[test]
    fn json_args_keep_object_order() {
        let values = parse_args_json(r#"[{"name": "Jack", "email": null}]"#).unwrap();
        assert_eq!(
            values,
            vec![Value::map([("name", Value::from("Jack")), ("email", Value::Null)])]
        );
    }

    #[test]
    fn args_must_be_array() {
        assert!(parse_args_json(r#"{"a": 1}"#).is_err());
        assert!(parse_args_json("[1,").is_err());
    }

    #[test]
    fn skips_are_inserted_in_order() {
        let values = insert_skips(vec![Value::Int(1), Value::Int(2)], &[3, 1]).unwrap();
        assert_eq!(
            values,
            vec![Value::Skip, Value::Int(1), Value::Skip, Value::Int(2)]
        );
        assert!(insert_skips(vec![], &[2]).is_err());
    }

    #[test]
    fn renders_with_skip() {
        let args = inline(
            "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}",
            r#"["user_id", [1, 2, 3]]"#,
            vec![3],
        );
        assert_eq!(
            render(&args).unwrap(),
            "SELECT name FROM users WHERE `user_id` IN (1, 2, 3)"
        );
    }

    #[test]
    fn postgres_dialect_override() {
        let mut args = inline("SELECT ?# FROM t WHERE a = ?", r#"["id", "it's"]"#, vec![]);
        args.dialect = Some(Dialect::Postgres);
        assert_eq!(
            render(&args).unwrap(),
            "SELECT \"id\" FROM t WHERE a = 'it''s'"
        );
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let mut args = inline("SELECT 1", "[]", vec![]);
        args.config = Some(Path::new("does-not-exist").join(DEFAULT_CONFIG));
        let err = render(&args).unwrap_err();
        assert!(err.to_string().starts_with("failed to read config file"));
    }

    #[test]
    fn build_errors_surface() {
        let args = inline("SELECT ?d", "[1, 2]", vec![]);
        let err = render(&args).unwrap_err();
        assert!(err.to_string().starts_with("failed to build query: SELECT ?d"));
    }
}
