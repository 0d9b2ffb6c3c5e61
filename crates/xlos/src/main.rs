use tracing_subscriber::EnvFilter;
use xlos_core::logging::DEFAULT_DIRECTIVE;

mod cli;
mod commands;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("xlos=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli::build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    commands::run_command(&matches)?;

    Ok(())
}
