use std::mem;

use arrayvec::ArrayVec;

use crate::core::{BlockId, Board, Cell, Shape, ShapeCatalog};

use super::{
    block_pool::{Block, BlockPool, BlockState},
    observer::{GameEvent, GameObserver, Observers, Subscription},
    placement,
    score::{HighScoreEntry, ScoreKeeper, ScoreReport},
    settings::{GameSettings, MAX_SPAWN_POINTS, SettingsError},
    spawner::{ShapeSpawner, SpawnSeed},
};

/// Phase of the round state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum RoundState {
    /// No blocks in play; the next step draws a spawn batch.
    #[display("awaiting spawn")]
    AwaitingSpawn,
    /// Blocks are staged and placement attempts are accepted.
    #[display("in an active round")]
    ActiveRound,
    /// A placement cleared `lines` lines and its notifications are held back
    /// until the presentation of the clear completes.
    #[display("resolving a {lines}-line clear")]
    Resolving { lines: usize },
    /// No staged block fits anywhere. Terminal until restart.
    #[display("game over")]
    GameOver,
}

/// Why a placement attempt was rejected.
///
/// Every variant leaves the board and the active set untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("block {block} is not in play")]
    UnknownBlock { block: BlockId },
    #[display("block {block} has already been placed")]
    NotStaged { block: BlockId },
    #[display("placement attempts are not accepted while {state}")]
    NotAccepting { state: RoundState },
    #[display("block {block} does not fit at {origin}")]
    Collision { block: BlockId, origin: Cell },
}

/// Effects of an accepted placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Full rows plus full columns cleared by this placement.
    pub lines_cleared: usize,
    /// Points awarded for the clear.
    pub points: usize,
    /// Blocks whose last cell was cleared and that went back to the pool.
    pub released: Vec<BlockId>,
    /// State after the placement was processed.
    pub state: RoundState,
}

/// Orchestrates one game session.
///
/// The controller owns the board, score, shape catalog, block pool, spawner,
/// and observer list, and is the only component that mutates them.
///
/// # State machine
///
/// ```text
/// AwaitingSpawn ──spawn──▶ ActiveRound ──place──▶ Resolving ─┬─▶ ActiveRound
///       ▲                                                    ├─▶ AwaitingSpawn (active set empty)
///       └──────────────────────── restart ◀── GameOver ◀─────┘
/// ```
///
/// A fresh controller waits in `AwaitingSpawn` until [`start`](Self::start)
/// so observers can subscribe before the first batch is announced. After
/// every spawn batch the new blocks are checked for a legal placement, and
/// the game ends right away if none fits.
///
/// # Deferred clear notifications
///
/// With [`set_deferred_clear_notifications`](Self::set_deferred_clear_notifications)
/// enabled, a placement that clears lines leaves the controller in
/// `Resolving`. The board is already cleared and the score already updated,
/// but notifications are held until
/// [`signal_clear_presentation_complete`](Self::signal_clear_presentation_complete),
/// and placement attempts are rejected in the meantime.
///
/// # Example
///
/// ```
/// use blockfit_engine::{GameSettings, RoundController, SpawnSeed};
///
/// let mut round =
///     RoundController::new(GameSettings::default(), SpawnSeed::from_u128(1), None).unwrap();
/// round.start();
/// assert!(round.state().is_active_round());
///
/// let block = round.active_blocks().next().unwrap().id();
/// let origin = round.hint(block).unwrap();
/// let outcome = round.attempt_placement(block, origin).unwrap();
/// assert_eq!(outcome.lines_cleared, 0);
/// ```
#[derive(Debug)]
pub struct RoundController {
    catalog: ShapeCatalog,
    spawn_points: usize,
    board: Board,
    score: ScoreKeeper,
    pool: BlockPool,
    active: ArrayVec<Option<BlockId>, MAX_SPAWN_POINTS>,
    spawner: ShapeSpawner,
    state: RoundState,
    observers: Observers,
    defer_clear_notifications: bool,
    pending: Vec<GameEvent>,
    stats: RoundStats,
}

/// Counters for the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundStats {
    pub batches_spawned: usize,
    pub blocks_placed: usize,
    pub total_lines_cleared: usize,
}

impl RoundController {
    pub fn new(
        settings: GameSettings,
        seed: SpawnSeed,
        high_score: Option<HighScoreEntry>,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let board = settings.new_board()?;
        Ok(Self {
            spawn_points: settings.spawn_points,
            board,
            score: ScoreKeeper::new(settings.score_per_line_cleared, high_score),
            pool: BlockPool::new(),
            active: ArrayVec::new(),
            spawner: ShapeSpawner::new(seed, settings.rotate_spawned_blocks),
            catalog: settings.shapes,
            state: RoundState::AwaitingSpawn,
            observers: Observers::new(),
            defer_clear_notifications: false,
            pending: vec![],
            stats: RoundStats::default(),
        })
    }

    /// Holds clear notifications until the caller signals that the clear
    /// presentation is complete.
    pub fn set_deferred_clear_notifications(&mut self, defer: bool) {
        self.defer_clear_notifications = defer;
    }

    #[must_use]
    pub fn state(&self) -> RoundState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> &ScoreKeeper {
        &self.score
    }

    /// Current `(score, achieved)` for the high-score storage collaborator.
    #[must_use]
    pub fn score_report(&self) -> ScoreReport {
        self.score.report()
    }

    #[must_use]
    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn stats(&self) -> RoundStats {
        self.stats
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.pool.get(id)
    }

    /// Spawn slots of the current batch; `None` marks a slot already placed.
    #[must_use]
    pub fn active_slots(&self) -> &[Option<BlockId>] {
        &self.active
    }

    /// Blocks still waiting to be placed, in slot order.
    pub fn active_blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.active.iter().flatten().filter_map(|&id| self.pool.get(id))
    }

    /// Shapes of the staged blocks, in slot order.
    pub fn active_shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.active_blocks().map(Block::shape)
    }

    /// A legal origin for a staged block, if it fits anywhere.
    #[must_use]
    pub fn hint(&self, block: BlockId) -> Option<Cell> {
        let block = self.pool.get(block).filter(|b| b.state().is_staged())?;
        placement::first_legal_placement(&self.board, block.shape())
    }

    pub fn subscribe<O>(&mut self, observer: O) -> Subscription
    where
        O: GameObserver + 'static,
    {
        self.observers.subscribe(observer)
    }

    /// Subscribes until `block` is released back to the pool.
    ///
    /// Returns `None` if `block` is not in play.
    pub fn subscribe_for_block<O>(&mut self, block: BlockId, observer: O) -> Option<Subscription>
    where
        O: GameObserver + 'static,
    {
        self.pool.get(block)?;
        Some(self.observers.subscribe_for_block(block, observer))
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.observers.unsubscribe(subscription)
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// Draws the first spawn batch.
    ///
    /// Returns `false` without doing anything unless the controller is
    /// waiting for a spawn.
    pub fn start(&mut self) -> bool {
        if !self.state.is_awaiting_spawn() {
            return false;
        }
        self.spawn_batch();
        self.flush_notifications();
        true
    }

    /// Ends the current game and starts a new one.
    ///
    /// The board, running score, and block pool are reset and a new batch is
    /// spawned at once. The high score is kept. `high_score` replaces the
    /// baseline that [`score_report`](Self::score_report) compares against,
    /// for example with the entry just persisted for the finished game.
    pub fn restart(&mut self, high_score: Option<HighScoreEntry>) {
        self.observers.revoke_all_blocks();
        self.pool.release_all();
        self.active.clear();
        self.pending.clear();
        self.board = Board::new(self.board.width(), self.board.height())
            .expect("existing board dimensions are valid");
        self.score.reset(high_score);
        self.stats = RoundStats::default();
        self.state = RoundState::AwaitingSpawn;
        self.pending.push(GameEvent::ScoreChanged { score: 0 });
        self.spawn_batch();
        self.flush_notifications();
    }

    /// Tries to commit a staged block at `origin`.
    ///
    /// On success the block is placed, full lines are cleared and scored,
    /// and the round advances. Any error leaves every piece of state
    /// unchanged.
    pub fn attempt_placement(
        &mut self,
        block: BlockId,
        origin: Cell,
    ) -> Result<PlacementOutcome, PlacementError> {
        if !self.state.is_active_round() {
            return Err(PlacementError::NotAccepting { state: self.state });
        }
        let entry = self
            .pool
            .get(block)
            .ok_or(PlacementError::UnknownBlock { block })?;
        let BlockState::Staged { slot } = entry.state() else {
            return Err(PlacementError::NotStaged { block });
        };
        if !self.board.can_place(entry.shape(), origin) {
            return Err(PlacementError::Collision { block, origin });
        }

        self.board.place(entry.shape(), origin, block);
        self.pool.mark_placed(block, origin);
        self.active[slot] = None;
        self.stats.blocks_placed += 1;
        self.state = RoundState::Resolving { lines: 0 };

        let (lines_cleared, points, released) = self.clear_full_lines();
        if lines_cleared > 0 && self.defer_clear_notifications {
            return Ok(PlacementOutcome {
                lines_cleared,
                points,
                released,
                state: self.state,
            });
        }

        self.finish_resolution();
        self.flush_notifications();
        Ok(PlacementOutcome {
            lines_cleared,
            points,
            released,
            state: self.state,
        })
    }

    /// Completes a deferred clear: emits the held notifications and moves
    /// the round on.
    ///
    /// Returns `false` if no clear was waiting.
    pub fn signal_clear_presentation_complete(&mut self) -> bool {
        if !self.state.is_resolving() {
            return false;
        }
        self.finish_resolution();
        self.flush_notifications();
        true
    }

    fn clear_full_lines(&mut self) -> (usize, usize, Vec<BlockId>) {
        let lines = self.board.detect_full_lines();
        let count = lines.lines_cleared();
        if count == 0 {
            return (0, 0, vec![]);
        }

        let mut released = vec![];
        for occupant in self.board.clear(&lines.cells) {
            if occupant.remaining_cells == 0 {
                self.pool.release(occupant.block);
                self.observers.revoke_block(occupant.block);
                released.push(occupant.block);
            }
        }
        let points = self.score.add_score(count);
        self.stats.total_lines_cleared += count;
        self.state = RoundState::Resolving { lines: count };
        self.pending.push(GameEvent::LinesCleared { lines: count });
        self.pending.push(GameEvent::ScoreChanged {
            score: self.score.score(),
        });
        (count, points, released)
    }

    fn finish_resolution(&mut self) {
        if self.active.iter().all(Option::is_none) {
            self.active.clear();
            self.state = RoundState::AwaitingSpawn;
            self.spawn_batch();
            return;
        }
        self.check_game_over();
    }

    fn spawn_batch(&mut self) {
        debug_assert!(self.active.iter().all(Option::is_none));
        self.active.clear();
        for slot in 0..self.spawn_points {
            let (shape_id, shape) = self.spawner.draw(&self.catalog);
            let block = self.pool.spawn(shape_id, shape.clone(), slot);
            self.active.push(Some(block));
            self.pending.push(GameEvent::BlockSpawned { block, shape });
        }
        self.stats.batches_spawned += 1;
        self.check_game_over();
    }

    fn check_game_over(&mut self) {
        let shapes = self
            .active
            .iter()
            .flatten()
            .filter_map(|&id| self.pool.get(id))
            .map(Block::shape);
        if placement::any_block_placeable(&self.board, shapes) {
            self.state = RoundState::ActiveRound;
        } else {
            self.state = RoundState::GameOver;
            self.pending.push(GameEvent::GameOver);
        }
    }

    fn flush_notifications(&mut self) {
        for event in mem::take(&mut self.pending) {
            self.observers.emit(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::core::Color;

    fn settings(art: &str, width: usize, height: usize, spawn_points: usize) -> GameSettings {
        GameSettings {
            grid_width: width,
            grid_height: height,
            spawn_points,
            rotate_spawned_blocks: false,
            shapes: ShapeCatalog::new(vec![Shape::from_ascii(art, Color::WHITE).unwrap()])
                .unwrap(),
            ..GameSettings::default()
        }
    }

    fn controller(settings: GameSettings) -> (RoundController, Rc<RefCell<Vec<GameEvent>>>) {
        let mut round = RoundController::new(settings, SpawnSeed::from_u128(99), None).unwrap();
        let log = Rc::new(RefCell::new(vec![]));
        let sink = Rc::clone(&log);
        round.subscribe(move |event: &GameEvent| sink.borrow_mut().push(event.clone()));
        (round, log)
    }

    fn staged(round: &RoundController) -> Vec<BlockId> {
        round.active_blocks().map(Block::id).collect()
    }

    fn spawned_count(log: &[GameEvent]) -> usize {
        log.iter().filter(|e| e.is_block_spawned()).count()
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let mut bad = settings("#", 0, 3, 3);
        assert!(RoundController::new(bad.clone(), SpawnSeed::from_u128(0), None).is_err());
        bad.grid_width = 3;
        bad.spawn_points = 0;
        assert!(RoundController::new(bad, SpawnSeed::from_u128(0), None).is_err());
    }

    #[test]
    fn test_start_spawns_one_block_per_spawn_point() {
        let (mut round, log) = controller(settings("#", 3, 3, 3));
        assert_eq!(round.state(), RoundState::AwaitingSpawn);
        assert!(log.borrow().is_empty());

        assert!(round.start());
        assert_eq!(round.state(), RoundState::ActiveRound);
        assert_eq!(staged(&round).len(), 3);
        assert_eq!(spawned_count(&log.borrow()), 3);
        assert!(!round.start());
    }

    #[test]
    fn test_all_blocks_placed_triggers_new_spawn() {
        let (mut round, log) = controller(settings("#", 4, 4, 3));
        round.start();

        for (i, block) in staged(&round).into_iter().enumerate() {
            let x = i32::try_from(i).unwrap();
            let outcome = round.attempt_placement(block, Cell::new(x, 1)).unwrap();
            assert_eq!(outcome.lines_cleared, 0);
        }

        assert_eq!(round.state(), RoundState::ActiveRound);
        assert_eq!(round.stats().batches_spawned, 2);
        assert_eq!(staged(&round).len(), 3);
        let log = log.borrow();
        assert_eq!(spawned_count(&log), 6);
        assert!(!log.iter().any(GameEvent::is_game_over));
    }

    #[test]
    fn test_line_clear_scores_and_releases_blocks() {
        let (mut round, log) = controller(settings("#", 3, 3, 3));
        round.start();
        let blocks = staged(&round);

        round.attempt_placement(blocks[0], Cell::new(0, 2)).unwrap();
        round.attempt_placement(blocks[1], Cell::new(1, 2)).unwrap();
        let outcome = round.attempt_placement(blocks[2], Cell::new(2, 2)).unwrap();

        assert_eq!(outcome.lines_cleared, 1);
        assert_eq!(outcome.points, 10);
        assert_eq!(outcome.released, blocks);
        assert_eq!(round.score().score(), 10);
        assert_eq!(round.board().occupied_count(), 0);
        for block in &blocks {
            assert!(round.block(*block).is_none());
        }

        let log = log.borrow();
        let tail: Vec<_> = log[3..5].to_vec();
        assert_eq!(
            tail,
            vec![
                GameEvent::LinesCleared { lines: 1 },
                GameEvent::ScoreChanged { score: 10 },
            ]
        );
        assert_eq!(spawned_count(&log), 6);
    }

    #[test]
    fn test_rejected_placement_changes_nothing() {
        let (mut round, _log) = controller(settings("##", 3, 3, 2));
        round.start();
        let blocks = staged(&round);
        round.attempt_placement(blocks[0], Cell::new(0, 0)).unwrap();

        let board = round.board().clone();
        let slots = round.active_slots().to_vec();

        assert_eq!(
            round.attempt_placement(blocks[1], Cell::new(1, 0)),
            Err(PlacementError::Collision {
                block: blocks[1],
                origin: Cell::new(1, 0)
            })
        );
        assert_eq!(
            round.attempt_placement(blocks[1], Cell::new(2, 0)),
            Err(PlacementError::Collision {
                block: blocks[1],
                origin: Cell::new(2, 0)
            })
        );
        assert_eq!(
            round.attempt_placement(blocks[0], Cell::new(0, 2)),
            Err(PlacementError::NotStaged { block: blocks[0] })
        );
        let stranger = BlockId::new(40, 0);
        assert_eq!(
            round.attempt_placement(stranger, Cell::new(0, 2)),
            Err(PlacementError::UnknownBlock { block: stranger })
        );

        assert_eq!(round.board(), &board);
        assert_eq!(round.active_slots(), slots.as_slice());
        assert_eq!(round.state(), RoundState::ActiveRound);
    }

    #[test]
    fn test_game_over_when_remaining_block_cannot_fit() {
        let (mut round, log) = controller(settings("##\n##", 3, 3, 2));
        round.start();
        let blocks = staged(&round);

        let outcome = round.attempt_placement(blocks[0], Cell::new(0, 0)).unwrap();
        assert_eq!(outcome.state, RoundState::GameOver);
        assert!(log.borrow().last().unwrap().is_game_over());

        assert_eq!(
            round.attempt_placement(blocks[1], Cell::new(1, 1)),
            Err(PlacementError::NotAccepting {
                state: RoundState::GameOver
            })
        );
    }

    #[test]
    fn test_game_over_right_after_spawn() {
        let (mut round, log) = controller(settings("##", 1, 1, 1));
        round.start();
        assert_eq!(round.state(), RoundState::GameOver);
        assert!(log.borrow().iter().any(GameEvent::is_game_over));
    }

    #[test]
    fn test_deferred_clear_notifications() {
        let (mut round, log) = controller(settings("#", 3, 3, 3));
        round.set_deferred_clear_notifications(true);
        round.start();
        let blocks = staged(&round);
        round.attempt_placement(blocks[0], Cell::new(0, 0)).unwrap();
        round.attempt_placement(blocks[1], Cell::new(1, 0)).unwrap();
        let outcome = round.attempt_placement(blocks[2], Cell::new(2, 0)).unwrap();

        assert_eq!(outcome.state, RoundState::Resolving { lines: 1 });
        assert_eq!(round.board().occupied_count(), 0);
        assert_eq!(round.score().score(), 10);
        assert_eq!(log.borrow().len(), 3);

        assert_eq!(
            round.attempt_placement(blocks[0], Cell::new(0, 0)),
            Err(PlacementError::NotAccepting {
                state: RoundState::Resolving { lines: 1 }
            })
        );

        assert!(round.signal_clear_presentation_complete());
        assert!(!round.signal_clear_presentation_complete());
        assert_eq!(round.state(), RoundState::ActiveRound);
        let log = log.borrow();
        assert_eq!(log[3], GameEvent::LinesCleared { lines: 1 });
        assert_eq!(log[4], GameEvent::ScoreChanged { score: 10 });
        assert_eq!(spawned_count(&log), 6);
    }

    #[test]
    fn test_block_subscription_revoked_on_release() {
        let (mut round, _log) = controller(settings("##", 3, 3, 3));
        round.start();
        let blocks = staged(&round);

        let seen = Rc::new(RefCell::new(vec![]));
        let sink = Rc::clone(&seen);
        round
            .subscribe_for_block(blocks[0], move |event: &GameEvent| {
                sink.borrow_mut().push(event.clone());
            })
            .unwrap();
        assert!(round
            .subscribe_for_block(BlockId::new(9, 9), |_: &GameEvent| {})
            .is_none());

        // column 1 fills up and takes one cell of the watched block
        round.attempt_placement(blocks[0], Cell::new(0, 0)).unwrap();
        round.attempt_placement(blocks[1], Cell::new(1, 1)).unwrap();
        let outcome = round.attempt_placement(blocks[2], Cell::new(1, 2)).unwrap();
        assert_eq!(outcome.lines_cleared, 1);
        assert!(!outcome.released.contains(&blocks[0]));
        assert!(round.block(blocks[0]).is_some());
        {
            let seen = seen.borrow();
            assert_eq!(
                seen[..2],
                [
                    GameEvent::LinesCleared { lines: 1 },
                    GameEvent::ScoreChanged { score: 10 },
                ]
            );
            assert_eq!(spawned_count(&seen), 3);
        }
        let delivered = seen.borrow().len();

        // row 0 and column 2 clear the rest of it
        let next = staged(&round);
        let outcome = round.attempt_placement(next[0], Cell::new(1, 0)).unwrap();
        assert_eq!(outcome.lines_cleared, 2);
        assert!(outcome.released.contains(&blocks[0]));
        assert!(round.block(blocks[0]).is_none());
        assert_eq!(seen.borrow().len(), delivered);
    }

    #[test]
    fn test_filling_bottom_row_of_standard_board() {
        let (mut round, log) = controller(settings("#", 9, 9, 3));
        round.start();

        let mut x = 0;
        let mut last = None;
        for _ in 0..3 {
            for block in staged(&round) {
                last = Some(round.attempt_placement(block, Cell::new(x, 8)).unwrap());
                x += 1;
            }
        }
        let last = last.unwrap();

        assert_eq!(x, 9);
        assert_eq!(last.lines_cleared, 1);
        assert_eq!(last.points, 10);
        assert_eq!(last.released.len(), 3);
        assert_eq!(round.score().score(), 10);
        assert_eq!(round.board().occupied_count(), 0);
        assert_eq!(round.stats().total_lines_cleared, 1);
        assert_eq!(round.stats().batches_spawned, 4);
        assert!(log.borrow().contains(&GameEvent::ScoreChanged { score: 10 }));
    }

    #[test]
    fn test_far_origin_is_a_collision() {
        let (mut round, _log) = controller(settings(".#.\n###", 9, 9, 3));
        round.start();
        let blocks = staged(&round);
        let board = round.board().clone();

        for origin in [Cell::new(i32::MAX, 0), Cell::new(i32::MIN, 0)] {
            assert_eq!(
                round.attempt_placement(blocks[0], origin),
                Err(PlacementError::Collision {
                    block: blocks[0],
                    origin
                })
            );
        }
        assert_eq!(round.board(), &board);
        assert_eq!(round.state(), RoundState::ActiveRound);
        assert!(round.attempt_placement(blocks[0], Cell::new(0, 0)).is_ok());
    }

    #[test]
    fn test_restart_resets_board_and_score() {
        let (mut round, log) = controller(settings("##\n##", 3, 3, 2));
        round.start();
        let blocks = staged(&round);
        round.attempt_placement(blocks[0], Cell::new(0, 0)).unwrap();
        assert!(round.state().is_game_over());

        round.restart(None);
        assert_eq!(round.state(), RoundState::ActiveRound);
        assert_eq!(round.board().occupied_count(), 0);
        assert_eq!(round.score().score(), 0);
        assert_eq!(staged(&round).len(), 2);
        assert!(round.block(blocks[1]).is_none());
        assert_eq!(round.stats().batches_spawned, 1);
        assert!(log.borrow().contains(&GameEvent::ScoreChanged { score: 0 }));
    }

    #[test]
    fn test_score_report_against_seeded_high_score() {
        let seeded = HighScoreEntry {
            player_name: "bo".to_owned(),
            score: 5,
        };
        let mut round =
            RoundController::new(settings("#", 2, 2, 2), SpawnSeed::from_u128(3), Some(seeded))
                .unwrap();
        round.start();
        assert!(!round.score_report().achieved);
        let blocks = staged(&round);
        round.attempt_placement(blocks[0], Cell::new(0, 1)).unwrap();
        round.attempt_placement(blocks[1], Cell::new(1, 1)).unwrap();
        assert_eq!(
            round.score_report(),
            ScoreReport {
                score: 10,
                achieved: true
            }
        );
        assert_eq!(round.score().high_score(), 10);
    }

    #[test]
    fn test_hint_points_to_legal_origin() {
        let (mut round, _log) = controller(settings("###", 3, 2, 1));
        round.start();
        let block = staged(&round)[0];
        let origin = round.hint(block).unwrap();
        assert!(round.board().can_place(round.block(block).unwrap().shape(), origin));
        round.attempt_placement(block, origin).unwrap();
        assert_eq!(round.hint(block), None);
    }
}
