//! Full-screen status display on top of crossterm.

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Write};
use studyroom_core::error::Result;
use studyroom_core::{render_status, Renderer, TimerState};

/// Raw mode + alternate screen, restored on drop.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on Drop undoes whatever part succeeded.
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            tracing::warn!(%err, "failed to leave alternate screen");
        }
        if let Err(err) = disable_raw_mode() {
            tracing::warn!(%err, "failed to restore terminal mode");
        }
    }
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    size: Option<(u16, u16)>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            size: terminal::size().ok(),
        }
    }

    fn fit<'a>(&self, line: &'a str) -> &'a str {
        match self.size {
            Some((cols, _)) => match line.char_indices().nth(cols as usize) {
                Some((cut, _)) => &line[..cut],
                None => line,
            },
            None => line,
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, state: &TimerState) -> Result<()> {
        let lines = render_status(state);
        let max_rows = self.size.map_or(usize::MAX, |(_, rows)| rows as usize);

        queue!(self.out, Clear(ClearType::All))?;
        for (row, line) in lines.iter().take(max_rows).enumerate() {
            let text = self.fit(line);
            queue!(self.out, MoveTo(0, row as u16), Print(text))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.size = Some((cols, rows));
    }
}
