use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("xlos")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simulated multi-window desktop")
        .long_about(
            "xlos runs scripted desktop sessions: a TOML script feeds raw input events to the \
             window manager tick by tick, and the resulting frames are rendered in software \
             and optionally written out as PNG files.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging (overrides RUST_LOG)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        // Run subcommand
        .subcommand(
            Command::new("run")
                .about("Play a session script")
                .arg(
                    Arg::new("script")
                        .help("Path to the session script (TOML)")
                        .required(true)
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Desktop configuration file (TOML)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Directory to write frame_NNNN.png captures into")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    Arg::new("every")
                        .long("every")
                        .help("Capture every n-th tick (the last frame is always captured)")
                        .value_parser(clap::value_parser!(u32).range(1..))
                        .default_value("1")
                        .requires("out"),
                ),
        )
        // Apps subcommand
        .subcommand(Command::new("apps").about("List the bundled apps in start menu order"))
}
