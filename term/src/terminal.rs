use std::io::Write;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use minesweep_core::{Board, CellSymbol, Coordinate, Frontend, InputEvent, SessionStatus, Snapshot};

use crate::keymap::{is_acknowledge, map_key};

const HELP: &str = "wasd/arrows: move | f: flag | space/enter: open | q: quit";

/// Crossterm frontend drawing on the alternate screen in raw mode.
///
/// The terminal is restored when this is dropped.
pub struct TerminalFrontend<W: Write> {
    out: W,
}

impl<W: Write> TerminalFrontend<W> {
    pub fn new(out: W) -> Result<Self> {
        terminal::enable_raw_mode().context("Could not enable raw mode")?;
        let mut frontend = Self { out };
        execute!(frontend.out, EnterAlternateScreen, Hide)
            .context("Could not enter alternate screen")?;
        Ok(frontend)
    }

    fn draw(&mut self, snapshot: &Snapshot<'_>) -> Result<u16> {
        let board = snapshot.board;
        let mut line: u16 = 0;

        queue!(self.out, Clear(ClearType::All), MoveTo(0, line))?;
        for (i, (text, color)) in header(board).into_iter().enumerate() {
            if i > 0 {
                queue!(self.out, Print(" | "))?;
            }
            queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)?;
        }

        for row in 0..board.rows() {
            line += 1;
            queue!(self.out, MoveTo(0, line))?;
            for col in 0..board.cols() {
                let coords = Coordinate::new(row, col);
                let symbol = board.symbol_at(coords)?;
                let (open, close) = if coords == snapshot.cursor {
                    ('[', ']')
                } else {
                    (' ', ' ')
                };
                queue!(self.out, Print(open))?;
                match symbol_color(symbol, snapshot.status) {
                    Some(color) => queue!(
                        self.out,
                        SetForegroundColor(color),
                        Print(symbol.as_char()),
                        ResetColor
                    )?,
                    None => queue!(self.out, Print(symbol.as_char()))?,
                }
                queue!(self.out, Print(close))?;
            }
        }

        line += 1;
        Ok(line)
    }
}

impl<W: Write> Frontend for TerminalFrontend<W> {
    type Error = anyhow::Error;

    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        let line = self.draw(snapshot)?;
        queue!(self.out, MoveTo(0, line + 1), Print(HELP))?;
        self.out.flush()?;
        Ok(())
    }

    fn next_event(&mut self) -> Result<InputEvent> {
        loop {
            match event::read().context("Could not read terminal input")? {
                Event::Key(key) => {
                    if let Some(input) = map_key(key) {
                        log::trace!("key {:?} -> {:?}", key.code, input);
                        return Ok(input);
                    }
                }
                // redraw at the new size
                Event::Resize(..) => return Ok(InputEvent::Ignored),
                _ => {}
            }
        }
    }

    fn finish(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        let line = self.draw(snapshot)?;
        let (message, color) = outcome_message(snapshot.status);
        queue!(
            self.out,
            MoveTo(0, line + 1),
            SetForegroundColor(color),
            Print(message),
            MoveTo(0, line + 2),
            SetForegroundColor(Color::Cyan),
            Print("Press Enter to exit."),
            ResetColor
        )?;
        self.out.flush()?;

        loop {
            if let Event::Key(key) = event::read().context("Could not read terminal input")?
                && is_acknowledge(key)
            {
                return Ok(());
            }
        }
    }
}

impl<W: Write> Drop for TerminalFrontend<W> {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.out, ResetColor, Show, LeaveAlternateScreen) {
            log::error!("Could not leave alternate screen: {:?}", err);
        }
        if let Err(err) = terminal::disable_raw_mode() {
            log::error!("Could not restore terminal: {:?}", err);
        }
    }
}

/// Counter line segments with their colours.
fn header(board: &Board) -> [(String, Color); 4] {
    [
        (
            format!("Size: {}x{}", board.rows(), board.cols()),
            Color::Reset,
        ),
        (format!("Bombs: {}", board.bomb_count()), Color::Cyan),
        (format!("Opened: {}", board.opened_count()), Color::Magenta),
        (format!("Flagged: {}", board.flagged_count()), Color::Blue),
    ]
}

fn symbol_color(symbol: CellSymbol, status: SessionStatus) -> Option<Color> {
    match symbol {
        CellSymbol::Bomb if status == SessionStatus::Won => Some(Color::Green),
        CellSymbol::Bomb => Some(Color::Red),
        CellSymbol::Flag => Some(Color::Yellow),
        _ => None,
    }
}

pub fn outcome_message(status: SessionStatus) -> (&'static str, Color) {
    match status {
        SessionStatus::Won => ("You won!", Color::Green),
        SessionStatus::Lost => ("You lost!", Color::Red),
        SessionStatus::Running | SessionStatus::Quit => ("Bye.", Color::Reset),
    }
}
