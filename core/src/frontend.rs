use crate::*;

/// Presentation adapter: draws snapshots and turns raw input into [`InputEvent`]s.
///
/// End of input or an interrupt should be reported as [`InputEvent::Quit`].
pub trait Frontend {
    type Error: From<GameError>;

    fn render(&mut self, snapshot: &Snapshot<'_>) -> core::result::Result<(), Self::Error>;

    /// Blocks until the next event.
    fn next_event(&mut self) -> core::result::Result<InputEvent, Self::Error>;

    /// Shows a won or lost game and waits for the player to acknowledge it.
    fn finish(&mut self, snapshot: &Snapshot<'_>) -> core::result::Result<(), Self::Error>;
}

/// Runs the render/read loop until the session is finished.
pub fn play<G, F>(
    session: &mut GameSession<G>,
    frontend: &mut F,
) -> core::result::Result<SessionStatus, F::Error>
where
    G: MinefieldGenerator,
    F: Frontend + ?Sized,
{
    while session.status().is_running() {
        frontend.render(&session.snapshot())?;
        let event = frontend.next_event()?;
        session.handle_event(event)?;
    }

    let status = session.status();
    if status.is_decided() {
        frontend.finish(&session.snapshot())?;
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::VecDeque;
    use alloc::string::String;
    use alloc::vec::Vec;

    /// Replays a fixed list of events, then reports end of input.
    #[derive(Default)]
    struct Scripted {
        events: VecDeque<InputEvent>,
        frames: Vec<String>,
        finished: Option<SessionStatus>,
    }

    impl Scripted {
        fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
            Self {
                events: events.into_iter().collect(),
                ..Default::default()
            }
        }
    }

    impl Frontend for Scripted {
        type Error = GameError;

        fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
            let board = snapshot.board;
            let mut frame = String::new();
            for row in 0..board.rows() {
                for col in 0..board.cols() {
                    frame.push(board.symbol_at(Coordinate::new(row, col))?.as_char());
                }
                frame.push('\n');
            }
            self.frames.push(frame);
            Ok(())
        }

        fn next_event(&mut self) -> Result<InputEvent> {
            Ok(self.events.pop_front().unwrap_or(InputEvent::Quit))
        }

        fn finish(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
            self.finished = Some(snapshot.status);
            Ok(())
        }
    }

    fn session(bombs: &[Coordinate]) -> GameSession<FixedMinefieldGenerator> {
        let config = GameConfig::new(3, 3, bombs.len() as CellCount).unwrap();
        GameSession::new(config, FixedMinefieldGenerator::new(bombs)).unwrap()
    }

    #[test]
    fn layout_on_start_cell_is_an_error() {
        let mut session = session(&[Coordinate::new(0, 0)]);
        let mut frontend = Scripted::new([InputEvent::Open]);

        let result = play(&mut session, &mut frontend);

        assert_eq!(result, Err(GameError::InvalidLayout));
        assert_eq!(frontend.finished, None);
        assert_eq!(frontend.frames, ["...\n...\n...\n"]);
    }

    #[test]
    fn plays_until_won_and_acknowledges() {
        let mut session = session(&[Coordinate::new(0, 0)]).with_cursor(Coordinate::new(2, 2));
        let mut frontend = Scripted::new([
            InputEvent::Open,
            InputEvent::Move(Direction::Up),
            InputEvent::Move(Direction::Up),
            InputEvent::Move(Direction::Left),
            InputEvent::Move(Direction::Left),
            InputEvent::ToggleFlag,
            InputEvent::Open,
        ]);

        let status = play(&mut session, &mut frontend).unwrap();

        assert_eq!(status, SessionStatus::Won);
        assert_eq!(frontend.finished, Some(SessionStatus::Won));
        assert_eq!(frontend.frames[1], ".1 \n11 \n   \n");
        // the last event is never read
        assert_eq!(frontend.events.len(), 1);
    }

    #[test]
    fn plays_until_bomb_hit() {
        let mut session = session(&[Coordinate::new(0, 1)]);
        let mut frontend = Scripted::new([
            InputEvent::Open,
            InputEvent::Move(Direction::Right),
            InputEvent::Open,
        ]);

        let status = play(&mut session, &mut frontend).unwrap();

        assert_eq!(status, SessionStatus::Lost);
        assert_eq!(frontend.finished, Some(SessionStatus::Lost));
        assert_eq!(session.board().symbol_at(Coordinate::new(0, 1)), Ok(CellSymbol::Bomb));
    }

    #[test]
    fn quit_skips_acknowledgement() {
        let mut session = session(&[]);
        let mut frontend = Scripted::new([InputEvent::Ignored, InputEvent::Quit]);

        assert_eq!(play(&mut session, &mut frontend).unwrap(), SessionStatus::Quit);
        assert_eq!(frontend.finished, None);
        assert_eq!(frontend.frames.len(), 2);
    }
}
