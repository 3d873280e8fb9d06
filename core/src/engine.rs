use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Player input, already resolved by the UI to a tile handle and, for drops, a target cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Tile dropped onto a specific cell.
    Drop { cell: CellIndex, tile: TileId },
    /// Tile clicked, it goes to the lowest-index empty cell.
    Click { tile: TileId },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationPhase {
    /// Tile is travelling towards the cell, which is still empty.
    Flying,
    /// First half of the flip, the cell still looks empty.
    Flipping,
    /// Second half of the flip, the letter is on the board but not yet evaluated.
    Revealed,
}

/// Tile that has left the supply but is still being animated into its cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPlacement {
    pub cell: CellIndex,
    pub tile: Tile,
    pub phase: AnimationPhase,
}

/// One game at a time: board, pending tiles, status, and the running statistics.
///
/// Timed work (animated placements and auto-play pacing) never blocks. Operations that start it return an
/// [`Advance`] telling the caller when to call [`GameSession::advance`] next.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    supply: TileSupply,
    status: GameStatus,
    matched: Option<PatternMatch>,
    stats: Statistics,
    auto_play: Option<AutoPlay>,
    pending: Option<PendingPlacement>,
}

impl GameSession {
    pub fn new(config: GameConfig, supply: TileSupply, stats: Statistics) -> Self {
        check_supply_size(&config, &supply);
        Self {
            board: Board::new(config.size),
            config,
            supply,
            status: Default::default(),
            matched: None,
            stats,
            auto_play: None,
            pending: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<Cell> {
        self.board.cell_at(index)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// The word that ended the game, if it was lost.
    pub fn matched(&self) -> Option<&PatternMatch> {
        self.matched.as_ref()
    }

    pub fn matched_cells(&self) -> &[CellIndex] {
        self.matched
            .as_ref()
            .map(|found| found.cells.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_matched(&self, index: CellIndex) -> bool {
        self.matched_cells().contains(&index)
    }

    pub fn supply(&self) -> &TileSupply {
        &self.supply
    }

    pub fn pending(&self) -> Option<&PendingPlacement> {
        self.pending.as_ref()
    }

    pub fn stats(&self) -> Statistics {
        self.stats
    }

    pub fn auto_play(&self) -> Option<&AutoPlay> {
        self.auto_play.as_ref()
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play.is_some()
    }

    pub fn can_place(&self) -> bool {
        !self.status.is_finished() && self.pending.is_none() && !self.supply.is_empty()
    }

    pub fn can_auto_play(&self) -> bool {
        self.auto_play.is_none() && self.can_place() && !self.board.is_full()
    }

    pub fn can_speed_up(&self) -> bool {
        !self.status.is_finished()
            && self
                .auto_play
                .as_ref()
                .is_some_and(|auto_play| !auto_play.is_sped_up())
    }

    pub fn can_restart(&self) -> bool {
        self.auto_play.is_none()
    }

    pub fn controls(&self) -> Controls {
        let mut controls = Controls::empty();
        controls.set(Controls::PLACE, self.can_place());
        controls.set(Controls::AUTO_PLAY, self.can_auto_play());
        controls.set(Controls::SPEED_UP, self.can_speed_up());
        controls.set(Controls::RESTART, self.can_restart());
        controls
    }

    /// Writes a letter straight onto the board, bypassing the tile supply, and evaluates the result.
    pub fn place_letter(&mut self, index: CellIndex, letter: Letter) -> Result<PlacementOutcome> {
        self.check_in_progress()?;
        self.check_nothing_pending()?;
        self.board.place_letter(index, letter)?;
        log::debug!("placed {} at {}", letter, index);
        Ok(self.evaluate())
    }

    /// Places a tile from the supply according to `event`. A rejected event leaves the tile in the supply.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<PlacementOutcome> {
        self.check_in_progress()?;
        self.check_nothing_pending()?;

        let (cell, tile) = match event {
            InputEvent::Drop { cell, tile } => (cell, self.supply.get(tile)?),
            InputEvent::Click { tile } => {
                let tile = self.supply.get(tile)?;
                let cell = self.board.first_empty().ok_or(GameError::CellOccupied)?;
                (cell, tile)
            }
        };

        self.board.place_letter(cell, tile.letter)?;
        self.supply.take(tile.id)?;
        log::debug!("placed tile {:?} ({}) at {}", tile.id, tile.letter, cell);
        Ok(self.evaluate())
    }

    /// Starts placing tiles automatically. Does nothing if auto-play is already running or the game is over.
    ///
    /// An idle result means nothing new was scheduled; any wake-up requested earlier still stands.
    pub fn start_auto_play(&mut self) -> Advance {
        if self.auto_play.is_some() || self.status.is_finished() || self.pending.is_some() {
            return Advance::IDLE;
        }

        log::debug!("auto-play started");
        self.auto_play = Some(AutoPlay::new(&self.config.auto_play));
        self.auto_play_step()
    }

    /// Shortens the step delay and the animations of the current auto-play run. Works once per run.
    pub fn speed_up(&mut self) -> bool {
        if self.status.is_finished() {
            return false;
        }
        let Some(auto_play) = self.auto_play.as_mut() else {
            return false;
        };

        let changed = auto_play.speed_up(&self.config.auto_play);
        if changed {
            log::debug!(
                "auto-play sped up: step delay {:?}, speed x{}",
                auto_play.step_delay(),
                auto_play.speed_multiplier()
            );
        }
        changed
    }

    /// Moves timed work one step forward. Call it when the delay of the previous [`Advance`] has elapsed.
    pub fn advance(&mut self) -> Advance {
        let Some(pending) = self.pending else {
            return if self.auto_play.is_some() {
                self.auto_play_step()
            } else {
                Advance::IDLE
            };
        };

        match pending.phase {
            AnimationPhase::Flying => {
                self.set_pending_phase(AnimationPhase::Flipping);
                Advance::wake(self.flip_half_duration())
            }
            AnimationPhase::Flipping => self.commit_pending(pending),
            AnimationPhase::Revealed => {
                self.pending = None;
                let outcome = self.evaluate();
                let wake_after = match &self.auto_play {
                    Some(auto_play) if !outcome.is_finished() => Some(auto_play.step_delay()),
                    _ => None,
                };
                Advance {
                    outcome: Some(outcome),
                    wake_after,
                }
            }
        }
    }

    /// Starts a new game with `supply`. Not allowed while auto-play is running.
    pub fn restart(&mut self, supply: TileSupply) -> Result<()> {
        if self.auto_play.is_some() {
            return Err(GameError::AutoPlayRunning);
        }

        check_supply_size(&self.config, &supply);
        self.board.reset();
        self.supply = supply;
        self.status = GameStatus::InProgress;
        self.matched = None;
        self.pending = None;
        log::debug!("game restarted");
        Ok(())
    }

    fn auto_play_step(&mut self) -> Advance {
        let Some(next_index) = self.auto_play.as_ref().map(AutoPlay::next_index) else {
            return Advance::IDLE;
        };

        if self.status.is_finished() {
            self.stop_auto_play();
            return Advance::IDLE;
        }

        let Some(cell) = self.board.first_empty_from(next_index) else {
            log::debug!("auto-play has no empty cell left");
            self.stop_auto_play();
            return Advance::IDLE;
        };

        let tile = match self.supply.take_first() {
            Ok(tile) => tile,
            Err(err) => {
                log::debug!("auto-play cannot continue: {}", err);
                self.stop_auto_play();
                return Advance::IDLE;
            }
        };

        if let Some(auto_play) = self.auto_play.as_mut() {
            auto_play.placed_at(cell);
        }
        log::trace!("auto-play moving tile {:?} ({}) to {}", tile.id, tile.letter, cell);
        self.pending = Some(PendingPlacement {
            cell,
            tile,
            phase: AnimationPhase::Flying,
        });
        Advance::wake(self.fly_duration())
    }

    fn commit_pending(&mut self, pending: PendingPlacement) -> Advance {
        if self.status.is_finished() {
            log::debug!(
                "dropping late placement of {} at {}, game already ended",
                pending.tile.letter,
                pending.cell
            );
            self.pending = None;
            self.stop_auto_play();
            return Advance::IDLE;
        }

        if let Err(err) = self.board.place_letter(pending.cell, pending.tile.letter) {
            log::warn!(
                "dropping placement of {} at {}: {}",
                pending.tile.letter,
                pending.cell,
                err
            );
            self.pending = None;
            self.stop_auto_play();
            return Advance::IDLE;
        }

        self.set_pending_phase(AnimationPhase::Revealed);
        Advance::wake(self.flip_half_duration())
    }

    fn evaluate(&mut self) -> PlacementOutcome {
        if let Some(found) = find_pattern(&self.board, &self.config.target_word) {
            log::debug!("word formed at {:?} going {:?}", found.cells, found.direction);
            self.matched = Some(found);
            self.end_game(false);
            PlacementOutcome::Lost
        } else if self.board.is_full() {
            self.end_game(true);
            PlacementOutcome::Won
        } else {
            PlacementOutcome::Placed
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        self.stats.record(won);
        self.stop_auto_play();
        log::debug!("game ended: {:?}, stats: {:?}", self.status, self.stats);
    }

    fn stop_auto_play(&mut self) {
        if self.auto_play.take().is_some() {
            log::debug!("auto-play stopped");
        }
    }

    fn set_pending_phase(&mut self, phase: AnimationPhase) {
        if let Some(pending) = self.pending.as_mut() {
            pending.phase = phase;
        }
    }

    fn fly_duration(&self) -> Duration {
        let config = &self.config.auto_play;
        self.auto_play
            .as_ref()
            .map_or(config.fly_duration, |auto_play| auto_play.fly_duration(config))
    }

    fn flip_half_duration(&self) -> Duration {
        let config = &self.config.auto_play;
        self.auto_play
            .as_ref()
            .map_or(config.flip_duration / 2, |auto_play| {
                auto_play.flip_half_duration(config)
            })
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::GameAlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn check_nothing_pending(&self) -> Result<()> {
        if self.pending.is_some() {
            Err(GameError::PlacementInFlight)
        } else {
            Ok(())
        }
    }
}

fn check_supply_size(config: &GameConfig, supply: &TileSupply) {
    let cells = usize::from(config.total_cells());
    if supply.len() != cells {
        log::warn!(
            "Tile supply size mismatch, tiles: {}, cells: {}",
            supply.len(),
            cells
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, tiles: &str) -> GameSession {
        let config = GameConfig::new(size, "FOX").unwrap();
        GameSession::new(config, TileSupply::parse(tiles).unwrap(), Statistics::default())
    }

    fn ms(millis: u64) -> Option<Duration> {
        Some(Duration::from_millis(millis))
    }

    #[test]
    fn drop_onto_occupied_cell_keeps_the_tile() {
        let mut game = session((3, 3), "FFFFFFFFF");
        game.handle_input(InputEvent::Drop { cell: 4, tile: TileId(0) }).unwrap();

        let err = game
            .handle_input(InputEvent::Drop { cell: 4, tile: TileId(1) })
            .unwrap_err();

        assert_eq!(err, GameError::CellOccupied);
        assert_eq!(game.supply().len(), 8);
        assert!(game.supply().get(TileId(1)).is_ok());
    }

    #[test]
    fn click_fills_the_lowest_empty_cell() {
        let mut game = session((3, 3), "FOXFOXFOX");
        game.handle_input(InputEvent::Drop { cell: 0, tile: TileId(3) }).unwrap();

        let outcome = game.handle_input(InputEvent::Click { tile: TileId(2) }).unwrap();

        assert_eq!(outcome, PlacementOutcome::Placed);
        assert_eq!(game.cell_at(1).unwrap(), Cell::Filled(Letter::X));
        assert_eq!(game.supply().get(TileId(2)).unwrap_err(), GameError::UnknownTile);
    }

    #[test]
    fn unknown_tile_is_rejected() {
        let mut game = session((3, 3), "FOXFOXFOX");

        let err = game.handle_input(InputEvent::Click { tile: TileId(42) }).unwrap_err();

        assert_eq!(err, GameError::UnknownTile);
        assert_eq!(game.board().filled_count(), 0);
    }

    #[test]
    fn finished_game_rejects_every_placement() {
        let mut game = session((3, 3), "FOXFOXFOX");
        for tile in 0..3 {
            game.handle_input(InputEvent::Click { tile: TileId(tile) }).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Lost);

        assert_eq!(
            game.handle_input(InputEvent::Click { tile: TileId(3) }).unwrap_err(),
            GameError::GameAlreadyEnded
        );
        assert_eq!(
            game.place_letter(8, Letter::F).unwrap_err(),
            GameError::GameAlreadyEnded
        );
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.stats().attempts, 1);
        assert_eq!(game.stats().losses, 1);
        assert_eq!(game.matched_cells(), &[0, 1, 2]);
        assert!(game.is_matched(1));
        assert!(!game.is_matched(3));
    }

    #[test]
    fn auto_play_walks_through_animation_phases() {
        let mut game = session((2, 2), "FFXX");

        assert_eq!(game.start_auto_play().wake_after, ms(400));
        let pending = *game.pending().unwrap();
        assert_eq!(pending.cell, 0);
        assert_eq!(pending.phase, AnimationPhase::Flying);
        assert_eq!(game.supply().len(), 3);

        assert_eq!(game.advance().wake_after, ms(200));
        assert_eq!(game.pending().unwrap().phase, AnimationPhase::Flipping);
        assert_eq!(game.cell_at(0).unwrap(), Cell::Empty);

        assert_eq!(game.advance().wake_after, ms(200));
        assert_eq!(game.pending().unwrap().phase, AnimationPhase::Revealed);
        assert_eq!(game.cell_at(0).unwrap(), Cell::Filled(Letter::F));

        let step = game.advance();
        assert_eq!(step.outcome, Some(PlacementOutcome::Placed));
        assert_eq!(step.wake_after, ms(200));
        assert!(game.pending().is_none());

        assert_eq!(game.advance().wake_after, ms(400));
        assert_eq!(game.pending().unwrap().cell, 1);
    }

    #[test]
    fn manual_input_between_auto_play_steps_is_accepted() {
        let mut game = session((2, 4), "FFXXFFXX");
        game.start_auto_play();
        for _ in 0..3 {
            game.advance();
        }
        assert_eq!(game.cell_at(0).unwrap(), Cell::Filled(Letter::F));
        assert!(game.pending().is_none());
        assert!(game.can_place());

        let outcome = game.handle_input(InputEvent::Drop { cell: 1, tile: TileId(1) }).unwrap();
        assert_eq!(outcome, PlacementOutcome::Placed);
        assert!(game.is_auto_playing());

        assert_eq!(game.advance().wake_after, ms(400));
        assert_eq!(game.pending().unwrap().cell, 2);
        assert_eq!(game.pending().unwrap().tile.id, TileId(2));
    }

    #[test]
    fn drop_outside_the_board_keeps_the_tile() {
        let mut game = session((2, 4), "FFXXFFXX");

        let err = game
            .handle_input(InputEvent::Drop { cell: 99, tile: TileId(2) })
            .unwrap_err();

        assert_eq!(err, GameError::IndexOutOfRange);
        assert_eq!(game.supply().len(), 8);
        assert!(game.supply().get(TileId(2)).is_ok());
        assert_eq!(game.board().filled_count(), 0);
    }

    #[test]
    fn manual_input_waits_for_the_animation() {
        let mut game = session((2, 2), "FFXX");
        game.start_auto_play();

        let err = game.handle_input(InputEvent::Click { tile: TileId(1) }).unwrap_err();

        assert_eq!(err, GameError::PlacementInFlight);
        assert!(!game.can_place());
    }

    #[test]
    fn start_auto_play_twice_is_a_no_op() {
        let mut game = session((2, 2), "FFXX");
        game.start_auto_play();

        assert_eq!(game.start_auto_play(), Advance::IDLE);
        assert_eq!(game.supply().len(), 3);
    }

    #[test]
    fn speed_up_applies_to_the_next_phases_only_once() {
        let mut game = session((2, 2), "FFXX");
        game.start_auto_play();
        assert!(game.can_speed_up());

        assert!(game.speed_up());
        assert!(!game.can_speed_up());
        assert!(!game.speed_up());

        assert_eq!(game.advance().wake_after, ms(50));
        assert_eq!(game.advance().wake_after, ms(50));
        assert_eq!(game.advance().wake_after, ms(10));
        assert_eq!(game.advance().wake_after, ms(100));
    }

    #[test]
    fn speed_up_without_auto_play_does_nothing() {
        let mut game = session((2, 2), "FFXX");
        assert!(!game.speed_up());
        assert!(!game.controls().contains(Controls::SPEED_UP));
    }

    #[test]
    fn late_commit_after_game_end_is_dropped() {
        let mut game = session((2, 2), "FFXX");
        game.start_auto_play();
        game.advance();
        game.status = GameStatus::Lost;

        assert_eq!(game.advance(), Advance::IDLE);
        assert_eq!(game.cell_at(0).unwrap(), Cell::Empty);
        assert!(game.pending().is_none());
        assert!(!game.is_auto_playing());
    }

    #[test]
    fn restart_is_refused_while_auto_playing() {
        let mut game = session((2, 2), "FFXX");
        game.start_auto_play();

        assert!(!game.controls().contains(Controls::RESTART));
        assert_eq!(
            game.restart(TileSupply::parse("FFFF").unwrap()).unwrap_err(),
            GameError::AutoPlayRunning
        );
    }

    #[test]
    fn restart_clears_the_game_but_keeps_stats() {
        let mut game = session((3, 3), "FOXFOXFOX");
        for tile in 0..3 {
            game.handle_input(InputEvent::Click { tile: TileId(tile) }).unwrap();
        }

        game.restart(TileSupply::parse("XXXXXXXXX").unwrap()).unwrap();

        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.board().filled_count(), 0);
        assert!(game.matched().is_none());
        assert_eq!(game.supply().len(), 9);
        assert_eq!(game.stats().attempts, 1);
        assert!(
            game.controls()
                .contains(Controls::PLACE | Controls::AUTO_PLAY | Controls::RESTART)
        );
    }

    #[test]
    fn auto_play_stops_when_tiles_run_out() {
        let mut game = session((2, 2), "FX");
        game.start_auto_play();
        for _ in 0..4 {
            game.advance();
        }
        assert!(game.is_auto_playing());
        for _ in 0..4 {
            game.advance();
        }

        assert_eq!(game.advance(), Advance::IDLE);
        assert!(!game.is_auto_playing());
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.board().filled_count(), 2);
    }
}
