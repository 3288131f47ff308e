//! palmpad - Hands-free directional keyboard control
//!
//! Reads hand landmarks from a tracker and holds the matching arrow key.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use palmpad::keys::{DryRunInjector, KeyInjector};
use palmpad::render::{HeadlessRenderer, HudRenderer, TerminalHud};
use palmpad::tracking::{HandTracker, LineTracker};
use palmpad::{Application, Config};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("palmpad")
        .version(palmpad::VERSION)
        .about("Hands-free arrow keys driven by camera hand tracking")
        .long_about(
            "palmpad reads hand landmarks from an external tracker and holds the arrow key \
             matching the palm position: move the hand left, right, up or down past the \
             grid lines to press, return to the centre to release. Press ESC to exit.",
        )
        .arg(
            Arg::new("replay")
                .long("replay")
                .value_name("FILE")
                .help("Replay recorded tracker output (JSON lines) instead of starting the tracker"),
        )
        .arg(
            Arg::new("tracker")
                .long("tracker")
                .value_name("PROGRAM")
                .help("Tracker executable to start")
                .conflicts_with("replay"),
        )
        .arg(
            Arg::new("headless")
                .long("headless")
                .action(ArgAction::SetTrue)
                .help("Log command changes instead of drawing the HUD"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Log key presses instead of injecting them"),
        )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG selects the level
    env_logger::init();

    let matches = cli().get_matches();

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(program) = matches.get_one::<String>("tracker") {
        config.tracker.program = program.clone();
    }
    config.validate()?;

    if matches.get_flag("dry-run") {
        run(config, &matches, DryRunInjector::new()).await
    } else {
        run_with_system_keyboard(config, &matches).await
    }
}

#[cfg(target_os = "linux")]
async fn run_with_system_keyboard(config: Config, matches: &ArgMatches) -> Result<()> {
    let keyboard = palmpad::keys::UinputKeyboard::create()
        .context("cannot create virtual keyboard (is /dev/uinput writable?)")?;
    run(config, matches, keyboard).await
}

#[cfg(not(target_os = "linux"))]
async fn run_with_system_keyboard(_config: Config, _matches: &ArgMatches) -> Result<()> {
    anyhow::bail!("key injection is only supported on Linux; use --dry-run")
}

async fn run<I: KeyInjector>(config: Config, matches: &ArgMatches, injector: I) -> Result<()> {
    let tracker: Box<dyn HandTracker> = match matches.get_one::<String>("replay") {
        Some(path) => Box::new(LineTracker::open_replay(&PathBuf::from(path), &config).await?),
        None => Box::new(LineTracker::spawn(&config)?),
    };

    let renderer: Box<dyn HudRenderer> = if matches.get_flag("headless") {
        Box::new(HeadlessRenderer::new())
    } else {
        Box::new(TerminalHud::new()?)
    };

    let mut app = Application::new(config, tracker, injector, renderer);
    app.run().await?;

    Ok(())
}
