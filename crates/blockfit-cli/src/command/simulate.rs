use std::path::PathBuf;

use blockfit_engine::{BlockId, Cell, GameSettings, RoundController, SpawnSeed, placement};
use rand::{Rng, SeedableRng as _, rngs::StdRng, seq::IndexedRandom as _};

use crate::{
    schema::simulation::{GameSummary, Placer, SimulationSummary},
    util::{self, Output},
};

/// Placements after which a game is cut short.
const MAX_PLACEMENTS: usize = 10_000;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Settings file (JSON); built-in settings when omitted
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Seed of the first game as 32 hex digits; random when omitted
    #[arg(long)]
    seed: Option<SpawnSeed>,
    /// Placement strategy (first or random)
    #[arg(long, default_value = "first")]
    placer: Placer,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        settings,
        games,
        seed,
        placer,
        output,
    } = arg;

    let settings = util::read_settings_file(settings.as_deref())?;
    let base_seed = seed.unwrap_or_else(|| rand::rng().random()).to_u128();

    eprintln!("Simulating {games} games with the {placer:?} placer...");
    let mut results = Vec::with_capacity(*games);
    for game in 0..*games {
        let seed = SpawnSeed::from_u128(base_seed.wrapping_add(game as u128));
        let result = play_game(&settings, seed, *placer)?;
        eprintln!(
            "  Game #{game}: score {} ({} placements, {} lines)",
            result.score, result.blocks_placed, result.lines_cleared
        );
        results.push(result);
    }

    let summary =
        SimulationSummary::new(*placer, settings.grid_width, settings.grid_height, results);
    Output::save_json(&summary, output.clone())?;

    eprintln!();
    eprintln!("Simulation completed");
    if let Some(path) = output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Games: {}", summary.games.len());
    eprintln!("  Mean score: {:.1}", summary.mean_score);
    eprintln!("  Max score: {}", summary.max_score);

    Ok(())
}

fn play_game(
    settings: &GameSettings,
    seed: SpawnSeed,
    placer: Placer,
) -> anyhow::Result<GameSummary> {
    let mut round = RoundController::new(settings.clone(), seed, None)?;
    let mut rng = placer_rng(seed);
    round.start();

    let mut truncated = false;
    while !round.state().is_game_over() {
        if round.stats().blocks_placed >= MAX_PLACEMENTS {
            truncated = true;
            break;
        }
        let Some((block, origin)) = choose_placement(&round, placer, &mut rng) else {
            break;
        };
        round.attempt_placement(block, origin)?;
    }

    let stats = round.stats();
    Ok(GameSummary {
        seed,
        score: round.score().score(),
        blocks_placed: stats.blocks_placed,
        lines_cleared: stats.total_lines_cleared,
        batches_spawned: stats.batches_spawned,
        truncated,
    })
}

fn placer_rng(seed: SpawnSeed) -> StdRng {
    let mut bytes = [0; 32];
    bytes[..16].copy_from_slice(&seed.to_u128().to_le_bytes());
    StdRng::from_seed(bytes)
}

fn choose_placement<R>(
    round: &RoundController,
    placer: Placer,
    rng: &mut R,
) -> Option<(BlockId, Cell)>
where
    R: Rng + ?Sized,
{
    let board = round.board();
    match placer {
        Placer::First => round.active_blocks().find_map(|block| {
            let origin = placement::first_legal_placement(board, block.shape())?;
            Some((block.id(), origin))
        }),
        Placer::Random => {
            let candidates: Vec<(BlockId, Cell)> = round
                .active_blocks()
                .flat_map(|block| {
                    let id = block.id();
                    placement::legal_placements(board, block.shape())
                        .map(move |origin| (id, origin))
                })
                .collect();
            candidates.choose(rng).copied()
        }
    }
}
