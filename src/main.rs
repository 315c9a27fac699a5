//! Kitforge CLI - asset pipeline tools for a drum-sampler front-end.

use clap::Parser;
use env_logger::Env;
use log::info;

use kitforge::cli::{commands, Cli, Commands};
use kitforge::Result;

fn main() -> Result<()> {
    // Initialize logger
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Kitforge v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Kitforge v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Waveform {
            input,
            output,
            window,
        } => commands::waveform(&input, &output, window),
        Commands::Waveforms {
            root,
            overwrite,
            window,
        } => commands::waveforms(root.as_deref(), window, overwrite),
        Commands::NewKit { name, folder, root } => {
            commands::new_kit(name.as_deref(), folder.as_deref(), root.as_deref())
        }
    }
}
