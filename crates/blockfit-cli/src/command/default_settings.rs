use std::path::PathBuf;

use blockfit_engine::GameSettings;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DefaultSettingsArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DefaultSettingsArg) -> anyhow::Result<()> {
    let DefaultSettingsArg { output } = arg;

    Output::save_json(&GameSettings::default(), output.clone())?;
    if let Some(path) = output {
        eprintln!("Default settings written to {}", path.display());
    }

    Ok(())
}
