use sqltpl::Dialect;
use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "sqltpl.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Render,
    Inspect,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
    Inspect(InspectArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Inline(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsSource {
    Empty,
    Inline(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Config file passed with `--config`; `None` falls back to [`DEFAULT_CONFIG`].
    pub config: Option<PathBuf>,
    pub template: TemplateSource,
    pub args: ArgsSource,
    /// 1-based positions where the skip sentinel is inserted into the arguments.
    pub skips: Vec<usize>,
    pub dialect: Option<Dialect>,
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct InspectArgs {
    pub template: TemplateSource,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "render" => parse_render(it.map(|s| s.as_str())),
        "inspect" => parse_inspect(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_render<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config: Option<PathBuf> = None;
    let mut file: Option<PathBuf> = None;
    let mut inline: Option<String> = None;
    let mut args = ArgsSource::Empty;
    let mut skips: Vec<usize> = Vec::new();
    let mut dialect: Option<Dialect> = None;
    let mut verbose = false;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Render)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--config=") => {
                config = Some(PathBuf::from(token.trim_start_matches("--config=")));
            }
            "--file" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--file requires a value");
                };
                file = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--file=") => {
                file = Some(PathBuf::from(token.trim_start_matches("--file=")));
            }
            "--args" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--args requires a value");
                };
                args = ArgsSource::Inline(v.to_string());
            }
            _ if token.starts_with("--args=") => {
                args = ArgsSource::Inline(token.trim_start_matches("--args=").to_string());
            }
            "--args-file" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--args-file requires a value");
                };
                args = ArgsSource::File(PathBuf::from(v));
            }
            _ if token.starts_with("--args-file=") => {
                args = ArgsSource::File(PathBuf::from(token.trim_start_matches("--args-file=")));
            }
            "--skip" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--skip requires a value");
                };
                skips.push(parse_position(v)?);
            }
            _ if token.starts_with("--skip=") => {
                skips.push(parse_position(token.trim_start_matches("--skip="))?);
            }
            "--dialect" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--dialect requires a value");
                };
                dialect = Some(v.parse::<Dialect>().map_err(anyhow::Error::msg)?);
            }
            _ if token.starts_with("--dialect=") => {
                dialect = Some(
                    token
                        .trim_start_matches("--dialect=")
                        .parse::<Dialect>()
                        .map_err(anyhow::Error::msg)?,
                );
            }
            "-v" | "--verbose" => verbose = true,
            other if other.starts_with('-') && other.len() > 1 => {
                anyhow::bail!("unknown argument: {other}")
            }
            other => {
                if inline.is_some() {
                    anyhow::bail!("unexpected argument: {other}");
                }
                inline = Some(other.to_string());
            }
        }
    }

    let template = template_source(inline, file)?;
    Ok(Command::Render(RenderArgs {
        config,
        template,
        args,
        skips,
        dialect,
        verbose,
    }))
}

fn parse_inspect<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut file: Option<PathBuf> = None;
    let mut inline: Option<String> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Inspect)),
            "--file" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--file requires a value");
                };
                file = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--file=") => {
                file = Some(PathBuf::from(token.trim_start_matches("--file=")));
            }
            other if other.starts_with('-') && other.len() > 1 => {
                anyhow::bail!("unknown argument: {other}")
            }
            other => {
                if inline.is_some() {
                    anyhow::bail!("unexpected argument: {other}");
                }
                inline = Some(other.to_string());
            }
        }
    }

    Ok(Command::Inspect(InspectArgs {
        template: template_source(inline, file)?,
    }))
}

fn template_source(inline: Option<String>, file: Option<PathBuf>) -> anyhow::Result<TemplateSource> {
    match (inline, file) {
        (Some(_), Some(_)) => anyhow::bail!("pass either a template or --file, not both"),
        (Some(sql), None) => Ok(TemplateSource::Inline(sql)),
        (None, Some(path)) => Ok(TemplateSource::File(path)),
        (None, None) => anyhow::bail!("missing template: pass it inline or with --file"),
    }
}

fn parse_position(v: &str) -> anyhow::Result<usize> {
    match v.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => anyhow::bail!("--skip expects a 1-based argument position, got: {v}"),
    }
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
sqltpl - render SQL query templates

USAGE:
  sqltpl <COMMAND> [OPTIONS]

COMMANDS:
  render        Substitute arguments into a template
  inspect       List the segments and placeholders of a template

Run `sqltpl <command> --help` for more."
            );
        }
        HelpTopic::Render => {
            println!(
                "\
USAGE:
  sqltpl render [OPTIONS] <TEMPLATE>
  sqltpl render [OPTIONS] --file <FILE>

OPTIONS:
  --file <FILE>         Read the template from a file
  --args <JSON>         JSON array of arguments (default: [])
  --args-file <FILE>    Read the JSON array of arguments from a file
  --skip <N>            Insert the skip sentinel as argument N (repeatable)
  --dialect <NAME>      mysql or postgres (overrides config)
  --config <FILE>       Config file path (default: sqltpl.toml, optional)
  -v, --verbose         Log to stderr (RUST_LOG also enables logging)
  -h, --help            Print help"
            );
        }
        HelpTopic::Inspect => {
            println!(
                "\
USAGE:
  sqltpl inspect <TEMPLATE>
  sqltpl inspect --file <FILE>

OPTIONS:
  --file <FILE>         Read the template from a file
  -h, --help            Print help"
            );
        }
    }
}
