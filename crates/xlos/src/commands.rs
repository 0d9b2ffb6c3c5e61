use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};
use xlos::apps::builtin_registry;
use xlos::config::DesktopConfig;
use xlos::session::{CaptureOptions, Session, SessionScript};
use xlos_core::logging::targets;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("run", sub_matches)) => handle_run_command(sub_matches),
        Some(("apps", _)) => handle_apps_command(),
        _ => {
            error!("unknown command");
            Err("Unknown command".into())
        }
    }
}

fn handle_run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let script_path = matches
        .get_one::<PathBuf>("script")
        .ok_or("Script path is required")?;
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => DesktopConfig::load(path)?,
        None => DesktopConfig::default(),
    };
    let capture = CaptureOptions {
        out_dir: matches.get_one::<PathBuf>("out").cloned(),
        every: matches.get_one::<u32>("every").copied().unwrap_or(1),
    };

    let script = SessionScript::load(script_path)?;
    info!(
        target: targets::SESSION,
        script = %script_path.display(),
        ticks = script.tick_count(),
        "running session"
    );

    let mut session = Session::new(config, builtin_registry())?
        .with_start_time(chrono::Local::now().time());
    let report = session.run(&script, &capture)?;

    println!("Session ended ({:?}) after {} ticks", report.end, report.ticks);
    if let Some(dir) = &capture.out_dir
        && !report.frames.is_empty()
    {
        println!("{} frame(s) written to {}", report.frames.len(), dir.display());
    }
    Ok(())
}

fn handle_apps_command() -> Result<(), Box<dyn std::error::Error>> {
    let registry = builtin_registry();
    for name in registry.names() {
        println!("{name}");
    }
    Ok(())
}
