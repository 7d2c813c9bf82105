use std::{
    io::{self, BufRead as _, Write},
    path::PathBuf,
    str::FromStr,
};

use anyhow::Context as _;
use blockfit_engine::{Cell, GameEvent, GameSettings, Offset, RoundController, Shape, SpawnSeed};
use rand::Rng as _;

use crate::{schema::high_score::HighScoreRecord, util};

const DEFAULT_HIGH_SCORE_FILE: &str = "blockfit-high-score.json";
const DEFAULT_PLAYER: &str = "player";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Settings file (JSON); built-in settings when omitted
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Spawn seed as 32 hex digits; random when omitted
    #[arg(long)]
    seed: Option<SpawnSeed>,
    /// File holding the best score so far
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,
    /// Name recorded with a new high score
    #[arg(long, default_value = DEFAULT_PLAYER)]
    player: String,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            settings: None,
            seed: None,
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            player: DEFAULT_PLAYER.to_owned(),
        }
    }
}

const HELP: &str = "\
Commands:
  place <slot> <x> <y>  place the block in <slot> with its origin at (x, y)
  hint                  show a legal origin for every staged block
  restart               start a new game
  help                  show this message
  quit                  leave the game";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayCommand {
    Place { slot: usize, origin: Cell },
    Hint,
    Restart,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unrecognized command {input:?} (type `help` for a list of commands)")]
struct ParseCommandError {
    input: String,
}

impl FromStr for PlayCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCommandError {
            input: s.to_owned(),
        };
        let words: Vec<&str> = s.split_whitespace().collect();
        let command = match words.as_slice() {
            ["place" | "p", slot, x, y] => {
                let slot = slot.parse().map_err(|_| err())?;
                let x = x.parse().map_err(|_| err())?;
                let y = y.parse().map_err(|_| err())?;
                Self::Place {
                    slot,
                    origin: Cell::new(x, y),
                }
            }
            ["hint" | "h"] => Self::Hint,
            ["restart" | "r"] => Self::Restart,
            ["help" | "?"] => Self::Help,
            ["quit" | "q"] => Self::Quit,
            _ => return Err(err()),
        };
        Ok(command)
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        settings,
        seed,
        high_score_file,
        player,
    } = arg;

    let settings = util::read_settings_file(settings.as_deref())?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Spawn seed: {seed}");

    let mut session = PlaySession::new(settings, seed, player, high_score_file.clone())?;
    if let Some(record) = &session.high_score {
        eprintln!("High score: {} by {}", record.score, record.player_name);
    }
    session.round.subscribe(log_event);

    let mut stdout = io::stdout().lock();
    session.start(&mut stdout)?;
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read command from stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let command = match line.parse::<PlayCommand>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if !session.execute(command, &mut stdout)? {
            break;
        }
    }
    Ok(())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LinesCleared { lines } => eprintln!("Cleared {lines} line(s)"),
        GameEvent::ScoreChanged { score } => eprintln!("Score: {score}"),
        GameEvent::GameOver => eprintln!("Game over"),
        GameEvent::BlockSpawned { .. } => {}
    }
}

struct PlaySession {
    round: RoundController,
    player: String,
    high_score_file: PathBuf,
    high_score: Option<HighScoreRecord>,
}

impl PlaySession {
    fn new(
        settings: GameSettings,
        seed: SpawnSeed,
        player: &str,
        high_score_file: PathBuf,
    ) -> anyhow::Result<Self> {
        let high_score = HighScoreRecord::load(&high_score_file)?;
        let round = RoundController::new(
            settings,
            seed,
            high_score.as_ref().map(HighScoreRecord::entry),
        )
        .context("Failed to set up the game")?;
        Ok(Self {
            round,
            player: player.to_owned(),
            high_score_file,
            high_score,
        })
    }

    fn start(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        self.round.start();
        if self.round.state().is_game_over() {
            self.record_game_over()?;
        }
        self.render(out)?;
        Ok(())
    }

    /// Runs one command. Returns `false` when the session should end.
    fn execute(&mut self, command: PlayCommand, out: &mut impl Write) -> anyhow::Result<bool> {
        match command {
            PlayCommand::Place { slot, origin } => {
                let Some(block) = self.round.active_slots().get(slot).copied().flatten() else {
                    eprintln!("Slot {slot} holds no block");
                    return Ok(true);
                };
                match self.round.attempt_placement(block, origin) {
                    Ok(outcome) if outcome.state.is_game_over() => self.record_game_over()?,
                    Ok(_) => {}
                    Err(e) => eprintln!("Placement rejected: {e}"),
                }
            }
            PlayCommand::Hint => {
                for (slot, block) in self.round.active_slots().iter().enumerate() {
                    let Some(block) = block else { continue };
                    match self.round.hint(*block) {
                        Some(Cell { x, y }) => writeln!(out, "slot {slot}: place {slot} {x} {y}")?,
                        None => writeln!(out, "slot {slot}: does not fit")?,
                    }
                }
                return Ok(true);
            }
            PlayCommand::Restart => {
                let seeded = self.high_score.as_ref().map(HighScoreRecord::entry);
                self.round.restart(seeded);
                if self.round.state().is_game_over() {
                    self.record_game_over()?;
                }
            }
            PlayCommand::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(true);
            }
            PlayCommand::Quit => return Ok(false),
        }
        self.render(out)?;
        Ok(true)
    }

    fn record_game_over(&mut self) -> anyhow::Result<()> {
        let report = self.round.score_report();
        eprintln!("Final score: {}", report.score);
        if !report.achieved {
            return Ok(());
        }
        let record = HighScoreRecord::new(&self.player, report.score);
        record.save(&self.high_score_file)?;
        eprintln!("New high score saved to {}", self.high_score_file.display());
        self.high_score = Some(record);
        Ok(())
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let score = self.round.score();
        writeln!(
            out,
            "Score: {} (high score: {})",
            score.score(),
            score.high_score()
        )?;
        write_board(out, &self.round)?;
        for (slot, block) in self.round.active_slots().iter().enumerate() {
            match block.and_then(|id| self.round.block(id)) {
                Some(block) => {
                    writeln!(out, "slot {slot}:")?;
                    write_shape(out, block.shape())?;
                }
                None => writeln!(out, "slot {slot}: placed")?,
            }
        }
        if self.round.state().is_game_over() {
            writeln!(out, "GAME OVER: type `restart` or `quit`")?;
        }
        out.flush()
    }
}

fn write_board(out: &mut impl Write, round: &RoundController) -> io::Result<()> {
    let board = round.board();
    let width = board.width();
    let header: String = (0..width).map(|x| (x % 10).to_string()).collect();
    writeln!(out, "   {header}")?;
    for (i, cell) in board.all_cells().enumerate() {
        if i % width == 0 {
            write!(out, "{:>2} ", cell.y)?;
        }
        out.write_all(if board.is_occupied(cell) { b"#" } else { b"." })?;
        if i % width == width - 1 {
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_shape(out: &mut impl Write, shape: &Shape) -> io::Result<()> {
    let (min, max) = shape.bounds();
    for dy in min.dy..=max.dy {
        let row: String = (min.dx..=max.dx)
            .map(|dx| {
                if shape.offsets().contains(&Offset::new(dx, dy)) {
                    '#'
                } else {
                    '.'
                }
            })
            .collect();
        writeln!(out, "  {row}")?;
    }
    Ok(())
}
