use std::path::PathBuf;

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CheckSettingsArg {
    /// Settings file to check (JSON)
    settings: PathBuf,
}

pub(crate) fn run(arg: &CheckSettingsArg) -> anyhow::Result<()> {
    let CheckSettingsArg { settings: path } = arg;

    let settings = util::read_settings_file(Some(path.as_path()))?;

    println!("Settings OK: {}", path.display());
    println!(
        "  Board: {}x{}",
        settings.grid_width, settings.grid_height
    );
    println!("  Spawn points: {}", settings.spawn_points);
    println!(
        "  Spawn rotation: {}",
        if settings.rotate_spawned_blocks { "on" } else { "off" }
    );
    println!(
        "  Points per clear: {:?}",
        settings.score_per_line_cleared.points()
    );
    println!("  Shapes: {}", settings.shapes.len());
    for (id, shape) in settings.shapes.iter() {
        let (width, height) = shape.size();
        println!(
            "    {id}: {} cells, {width}x{height}, {}",
            shape.len(),
            shape.color()
        );
    }

    Ok(())
}
