//! Crossterm terminal driver.
//!
//! [`CrosstermDriver`] owns the terminal: raw mode, alternate screen, mouse
//! capture, and drawing. [`SearchView`] lends it to the search engine as a
//! [`StepObserver`].

use std::error::Error;
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor, event, execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};
use log::warn;
use pathviz_core::{Color, Grid};
use pathviz_paths::StepObserver;

use crate::input::{Key, Msg, translate};
use crate::render::Canvas;

/// Maps a [`pathviz_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    CtColor::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

/// A terminal back end using crossterm.
pub struct CrosstermDriver {
    out: Stdout,
    canvas: Canvas,
    cell_width: u16,
}

impl CrosstermDriver {
    /// Create a driver drawing each cell `cell_width` columns wide.
    pub fn new(cell_width: i32) -> Self {
        Self {
            out: io::stdout(),
            canvas: Canvas::new(),
            cell_width: cell_width.clamp(1, i32::from(u16::MAX)) as u16,
        }
    }

    /// Switch the terminal to raw mode on the alternate screen and capture
    /// the mouse.
    pub fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        self.canvas.invalidate();
        Ok(())
    }

    /// Wait up to `timeout` for one input message.
    pub fn poll(&mut self, timeout: Duration) -> Result<Option<Msg>, Box<dyn Error>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let msg = translate(event::read()?);
        if let Some(Msg::Screen { .. }) = msg {
            execute!(self.out, ResetColor, terminal::Clear(ClearType::All))?;
            self.canvas.invalidate();
        }
        Ok(msg)
    }

    /// Draw the cells that changed since the last call, then the status line
    /// under the grid.
    pub fn draw(&mut self, grid: &Grid, status: &str) -> Result<(), Box<dyn Error>> {
        let w = self.cell_width;
        let block = " ".repeat(usize::from(w));
        for (p, color) in self.canvas.diff(grid) {
            queue!(
                self.out,
                cursor::MoveTo(p.col as u16 * w, p.row as u16),
                SetBackgroundColor(to_ct_color(color)),
                Print(&block)
            )?;
        }
        queue!(
            self.out,
            ResetColor,
            cursor::MoveTo(0, grid.rows() as u16 + 1),
            terminal::Clear(ClearType::UntilNewLine),
            Print(status)
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Restore the terminal. Errors are ignored; there is nothing left to
    /// report them to.
    pub fn close(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

// ---------------------------------------------------------------------------
// SearchView
// ---------------------------------------------------------------------------

const SEARCHING: &str = "searching...  |  esc: stop  q: quit";

/// Redraws the grid after every search step and turns `Esc` / `q` into
/// cancellation. Terminal errors also cancel the search and are handed back
/// by [`finish`](SearchView::finish).
pub struct SearchView<'a> {
    driver: &'a mut CrosstermDriver,
    delay: Duration,
    quit: bool,
    error: Option<Box<dyn Error>>,
}

impl<'a> SearchView<'a> {
    pub fn new(driver: &'a mut CrosstermDriver, delay: Duration) -> Self {
        Self {
            driver,
            delay,
            quit: false,
            error: None,
        }
    }

    /// Whether the user asked to quit the program, and the first terminal
    /// error hit while drawing or polling.
    pub fn finish(self) -> (bool, Option<Box<dyn Error>>) {
        (self.quit, self.error)
    }
}

impl StepObserver for SearchView<'_> {
    fn on_step(&mut self, grid: &Grid) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.driver.draw(grid, SEARCHING) {
            warn!("[driver] draw failed during search: {e}");
            self.error = Some(e);
            return;
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    fn should_cancel(&mut self) -> bool {
        if self.error.is_some() {
            return true;
        }
        loop {
            match self.driver.poll(Duration::ZERO) {
                Ok(None) => return false,
                Ok(Some(msg)) if msg.is_quit() => {
                    self.quit = true;
                    return true;
                }
                Ok(Some(Msg::KeyDown {
                    key: Key::Escape, ..
                })) => return true,
                // Edits are not allowed while a search is running.
                Ok(Some(_)) => {}
                Err(e) => {
                    warn!("[driver] poll failed during search: {e}");
                    self.error = Some(e);
                    return true;
                }
            }
        }
    }
}
