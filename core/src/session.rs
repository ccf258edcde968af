use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn delta(self) -> Coordinate {
        match self {
            Self::Up => Coordinate::UP,
            Self::Down => Coordinate::DOWN,
            Self::Left => Coordinate::LEFT,
            Self::Right => Coordinate::RIGHT,
        }
    }
}

/// A discrete player action, as produced by a [`Frontend`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Move(Direction),
    ToggleFlag,
    Open,
    Quit,
    /// A key without a binding.
    Ignored,
}

/// Valid transitions:
/// - Running -> Won
/// - Running -> Lost
/// - Running -> Quit
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Running,
    Won,
    Lost,
    /// Player left before the game was decided
    Quit,
}

impl SessionStatus {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Won or lost, the outcome is shown to the player.
    pub const fn is_decided(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// No further input is accepted.
    pub const fn is_finished(self) -> bool {
        !self.is_running()
    }
}

/// Read-only state handed to a [`Frontend`] for rendering.
#[derive(Copy, Clone, Debug)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub cursor: Coordinate,
    pub status: SessionStatus,
}

/// One play-through: a board, the player's cursor and the game status.
///
/// Bombs are planted on the first [`InputEvent::Open`], keeping the cell under the cursor free.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomMinefieldGenerator> {
    board: Board,
    cursor: Coordinate,
    generator: G,
    status: SessionStatus,
}

impl<G: MinefieldGenerator> GameSession<G> {
    pub fn new(config: GameConfig, generator: G) -> Result<Self> {
        Ok(Self {
            board: Board::new(config)?,
            cursor: Coordinate::ORIGIN,
            generator,
            status: SessionStatus::Running,
        })
    }

    /// Moves the starting cursor, clamped into the board.
    pub fn with_cursor(mut self, cursor: Coordinate) -> Self {
        self.cursor = cursor.clamp_to(self.board.rows(), self.board.cols());
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> Coordinate {
        self.cursor
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn bombs_placed(&self) -> bool {
        self.board.bombs_planted()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            cursor: self.cursor,
            status: self.status,
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Result<SessionStatus> {
        if self.status.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        log::trace!("event {:?} at {:?}", event, self.cursor);

        match event {
            InputEvent::Move(direction) => {
                self.cursor = (self.cursor + direction.delta())
                    .clamp_to(self.board.rows(), self.board.cols());
            }
            InputEvent::ToggleFlag => {
                if self.board.toggle_flag(self.cursor)? != FlagOutcome::NoOp
                    && self.board.bombs_planted()
                    && self.board.is_fully_cleared()
                {
                    self.end(SessionStatus::Won);
                }
            }
            InputEvent::Open => self.open_at_cursor()?,
            InputEvent::Quit => self.end(SessionStatus::Quit),
            InputEvent::Ignored => {}
        }

        Ok(self.status)
    }

    fn open_at_cursor(&mut self) -> Result<()> {
        if !self.board.bombs_planted() {
            let bombs = self.board.bomb_count();
            self.board.plant_bombs(bombs, self.cursor, &mut self.generator)?;
        }

        match self.board.open_cell(self.cursor)? {
            OpenOutcome::HitBomb => {
                self.board.reveal_all_bombs();
                self.end(SessionStatus::Lost);
            }
            _ if self.board.is_fully_cleared() => self.end(SessionStatus::Won),
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, status: SessionStatus) {
        log::debug!(
            "Session ended {:?}, opened {} flagged {}",
            status,
            self.board.opened_count(),
            self.board.flagged_count()
        );
        self.status = status;
    }
}

impl GameSession<RandomMinefieldGenerator> {
    /// Session with randomly placed bombs, reproducible for a given `seed`.
    pub fn with_seed(config: GameConfig, seed: u64, start_tile: StartTile) -> Result<Self> {
        Self::new(config, RandomMinefieldGenerator::new(seed, start_tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn at(row: Coord, col: Coord) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn fixed(
        rows: Coord,
        cols: Coord,
        bombs: &[Coordinate],
    ) -> GameSession<FixedMinefieldGenerator> {
        let config = GameConfig::new(rows, cols, bombs.len() as CellCount).unwrap();
        GameSession::new(config, FixedMinefieldGenerator::new(bombs)).unwrap()
    }

    fn moves(session: &mut GameSession<impl MinefieldGenerator>, direction: Direction, n: usize) {
        for _ in 0..n {
            session.handle_event(InputEvent::Move(direction)).unwrap();
        }
    }

    #[test]
    fn starts_running_without_bombs() {
        let session =
            GameSession::with_seed(GameConfig::default(), 1, StartTile::SimpleSafe).unwrap();

        assert_eq!(session.status(), SessionStatus::Running);
        assert_eq!(session.cursor(), Coordinate::ORIGIN);
        assert!(!session.bombs_placed());
        assert!(session.board().iter_cells().all(|(_, cell)| !cell.is_bomb()));
    }

    #[test]
    fn cursor_never_leaves_board() {
        let mut session = fixed(4, 6, &[]);
        let pattern = [
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Down,
            Direction::Right,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ];

        for direction in pattern.iter().cycle().take(500) {
            session.handle_event(InputEvent::Move(*direction)).unwrap();
            assert!(session.cursor().is_within_bounds(4, 6));
        }

        moves(&mut session, Direction::Down, 20);
        moves(&mut session, Direction::Right, 20);
        assert_eq!(session.cursor(), at(3, 5));
        moves(&mut session, Direction::Up, 20);
        moves(&mut session, Direction::Left, 20);
        assert_eq!(session.cursor(), at(0, 0));
    }

    #[test]
    fn with_cursor_is_clamped() {
        let session = fixed(3, 3, &[]).with_cursor(at(7, -2));
        assert_eq!(session.cursor(), at(2, 0));
    }

    #[test]
    fn first_open_plants_bombs_away_from_cursor() {
        let config = GameConfig::new(5, 5, 24).unwrap();
        let mut session = GameSession::with_seed(config, 9, StartTile::SimpleSafe)
            .unwrap()
            .with_cursor(at(2, 2));

        let status = session.handle_event(InputEvent::Open).unwrap();

        assert!(session.bombs_placed());
        assert_eq!(status, SessionStatus::Running);
        assert_eq!(session.board().opened_count(), 1);
        assert!(!session.board().cell(at(2, 2)).unwrap().is_bomb());
        let bombs = session
            .board()
            .iter_cells()
            .filter(|(_, cell)| cell.is_bomb())
            .count();
        assert_eq!(bombs, 24);
    }

    #[test]
    fn corner_bomb_scenario() {
        let mut session = fixed(3, 3, &[at(0, 0)]);
        moves(&mut session, Direction::Down, 2);
        moves(&mut session, Direction::Right, 2);
        assert_eq!(session.cursor(), at(2, 2));

        assert_eq!(
            session.handle_event(InputEvent::Open).unwrap(),
            SessionStatus::Running
        );
        assert_eq!(session.board().opened_count(), 8);

        moves(&mut session, Direction::Up, 2);
        moves(&mut session, Direction::Left, 2);
        assert_eq!(
            session.handle_event(InputEvent::ToggleFlag).unwrap(),
            SessionStatus::Won
        );
        assert!(session.board().is_fully_cleared());
        assert_eq!(
            session.handle_event(InputEvent::Open),
            Err(GameError::AlreadyEnded)
        );
        assert!(!session.board().cell(at(0, 0)).unwrap().is_open());
    }

    #[test]
    fn flagging_open_cell_does_not_decide_game() {
        let mut session = fixed(1, 3, &[at(0, 0)]).with_cursor(at(0, 2));
        session.handle_event(InputEvent::Open).unwrap();

        moves(&mut session, Direction::Left, 1);
        // (0,1) is already open, flagging it changes nothing
        assert_eq!(
            session.handle_event(InputEvent::ToggleFlag).unwrap(),
            SessionStatus::Running
        );
        moves(&mut session, Direction::Left, 1);
        assert_eq!(
            session.handle_event(InputEvent::ToggleFlag).unwrap(),
            SessionStatus::Won
        );
    }

    #[test]
    fn flagging_every_cell_before_planting_keeps_running() {
        let mut session = fixed(1, 2, &[at(0, 1)]);
        session.handle_event(InputEvent::ToggleFlag).unwrap();
        moves(&mut session, Direction::Right, 1);

        assert_eq!(
            session.handle_event(InputEvent::ToggleFlag).unwrap(),
            SessionStatus::Running
        );
        assert!(!session.bombs_placed());
    }

    #[test]
    fn flagging_last_bomb_after_opening_wins() {
        let mut session = fixed(1, 3, &[at(0, 0)]).with_cursor(at(0, 2));
        session.handle_event(InputEvent::Open).unwrap();
        assert_eq!(session.board().opened_count(), 2);

        moves(&mut session, Direction::Left, 2);
        session.handle_event(InputEvent::ToggleFlag).unwrap();

        assert_eq!(session.status(), SessionStatus::Won);
    }

    #[test]
    fn opening_bomb_loses_and_reveals_bombs() {
        let bombs = [at(0, 1), at(2, 2)];
        let mut session = fixed(3, 3, &bombs);
        session.handle_event(InputEvent::Open).unwrap();
        moves(&mut session, Direction::Right, 1);

        let status = session.handle_event(InputEvent::Open).unwrap();

        assert_eq!(status, SessionStatus::Lost);
        for bomb in bombs {
            assert!(session.board().cell(bomb).unwrap().is_open());
        }
        assert_eq!(
            session.handle_event(InputEvent::Move(Direction::Down)),
            Err(GameError::AlreadyEnded)
        );
    }

    #[test]
    fn single_cell_wins_immediately() {
        let mut session = fixed(1, 1, &[]);

        assert_eq!(
            session.handle_event(InputEvent::Open).unwrap(),
            SessionStatus::Won
        );
        assert_eq!(
            session.handle_event(InputEvent::Open),
            Err(GameError::AlreadyEnded)
        );
    }

    #[test]
    fn quit_is_terminal_and_distinct() {
        let mut session = fixed(2, 2, &[at(1, 1)]);

        assert_eq!(
            session.handle_event(InputEvent::Ignored).unwrap(),
            SessionStatus::Running
        );
        let status = session.handle_event(InputEvent::Quit).unwrap();

        assert_eq!(status, SessionStatus::Quit);
        assert!(status.is_finished());
        assert!(!status.is_decided());
        assert_eq!(
            session.handle_event(InputEvent::ToggleFlag),
            Err(GameError::AlreadyEnded)
        );
    }

    #[test]
    fn flags_before_first_open_are_kept() {
        let mut session = fixed(2, 2, &[at(1, 1)]);
        session.handle_event(InputEvent::ToggleFlag).unwrap();
        assert_eq!(session.board().flagged_count(), 1);
        assert!(!session.bombs_placed());

        moves(&mut session, Direction::Right, 1);
        session.handle_event(InputEvent::Open).unwrap();

        assert!(session.bombs_placed());
        assert_eq!(session.board().flagged_count(), 1);
        let flagged: Vec<_> = session
            .board()
            .iter_cells()
            .filter(|(_, cell)| cell.is_flagged())
            .map(|(coords, _)| coords)
            .collect();
        assert_eq!(flagged, [at(0, 0)]);
    }
}
