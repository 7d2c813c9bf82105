use clap::{Parser, Subcommand};

use self::{
    check_settings::CheckSettingsArg, default_settings::DefaultSettingsArg, play::PlayArg,
    simulate::SimulateArg,
};

mod check_settings;
mod default_settings;
mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively over stdin/stdout
    Play(#[clap(flatten)] PlayArg),
    /// Run automated games and write a JSON summary
    Simulate(#[clap(flatten)] SimulateArg),
    /// Load and validate a settings file
    CheckSettings(#[clap(flatten)] CheckSettingsArg),
    /// Write the built-in settings as JSON
    DefaultSettings(#[clap(flatten)] DefaultSettingsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::CheckSettings(arg) => check_settings::run(&arg)?,
        Mode::DefaultSettings(arg) => default_settings::run(&arg)?,
    }
    Ok(())
}
