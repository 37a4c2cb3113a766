use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use emu_chip8::emulator::{Framebuffer, RegisterSnapshot, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Draws a framebuffer in the terminal, two characters per pixel so the
/// pixels come out roughly square. Only pixels that changed since the
/// previous frame are redrawn.
pub struct TerminalScreen {
    out: Stdout,
    shown: Framebuffer,
}

impl TerminalScreen {
    pub fn new() -> crossterm::Result<TerminalScreen> {
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;

        let mut screen = TerminalScreen { out, shown: Framebuffer::new() };
        screen.draw_border()?;
        Ok(screen)
    }

    fn draw_border(&mut self) -> crossterm::Result<()> {
        let right = 2 * SCREEN_WIDTH as u16 + 1;
        let bottom = SCREEN_HEIGHT as u16 + 1;
        let horizontal = "━".repeat(2 * SCREEN_WIDTH);
        queue!(self.out, cursor::MoveTo(0, 0), Print(format!("┏{}┓", horizontal)))?;
        for y in 1..bottom {
            queue!(self.out, cursor::MoveTo(0, y), Print('┃'), cursor::MoveTo(right, y), Print('┃'))?;
        }
        queue!(self.out, cursor::MoveTo(0, bottom), Print(format!("┗{}┛", horizontal)))?;
        self.out.flush()?;
        Ok(())
    }

    /// Redraw what changed, and the status line under the screen.
    pub fn render(&mut self, screen: &Framebuffer, registers: &RegisterSnapshot, beeping: bool) -> crossterm::Result<()> {
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                let state = screen.get(x, y);
                if state != self.shown.get(x, y) {
                    let cell = if state { "██" } else { "  " };
                    queue!(self.out, cursor::MoveTo(2 * x as u16 + 1, y as u16 + 1), Print(cell))?;
                }
            }
        }
        self.shown = screen.clone();

        let status = format!(
            "PC={:#05x} I={:#05x} DT={:3} ST={:3} {}",
            registers.program_counter,
            registers.i,
            registers.delay_timer,
            registers.sound_timer,
            if beeping { "♪" } else { " " }
        );
        queue!(self.out, cursor::MoveTo(0, SCREEN_HEIGHT as u16 + 2), Print(status))?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        // Nothing sensible to do if restoring the terminal fails
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
    }
}

/// Wait up to `timeout` for a key press, true if it asks to quit.
pub fn quit_requested(timeout: Duration) -> crossterm::Result<bool> {
    if !event::poll(timeout)? {
        return Ok(false);
    }
    match event::read()? {
        Event::Key(KeyEvent { code: KeyCode::Char('q'), .. })
        | Event::Key(KeyEvent { code: KeyCode::Esc, .. }) => Ok(true),
        _ => Ok(false),
    }
}
