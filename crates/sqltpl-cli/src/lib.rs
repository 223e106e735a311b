mod cli;
mod config;
mod inspect;
mod render;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Render(args) => {
            install_subscriber(args.verbose);
            render::run(args)
        }
        cli::Command::Inspect(args) => inspect::run(args),
    }
}

/// Log to stderr when `--verbose` is given or `RUST_LOG` is set.
fn install_subscriber(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => return,
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
