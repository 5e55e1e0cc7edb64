//! Terminal presentation of the shell with `crossterm`.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use crate::animation::phase::Phase;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{DecodeFxError, DecodeFxResult};
use crate::shell::state::{Shell, ShellAction, ShellKey, ShellMode, Status};

/// Raw mode plus alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        let _ = out.flush();
    }
}

/// Map a terminal key event to shell input.
pub fn map_key(ev: KeyEvent) -> Option<ShellKey> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some(ShellKey::Quit),
        KeyCode::Esc => Some(ShellKey::Quit),
        KeyCode::Enter => Some(ShellKey::Enter),
        KeyCode::Backspace => Some(ShellKey::Backspace),
        KeyCode::Char(c) => Some(ShellKey::Char(c)),
        _ => None,
    }
}

/// Run the shell in the current terminal until the user quits.
pub fn run(shell: &mut Shell) -> DecodeFxResult<()> {
    let term_err = |e: io::Error| DecodeFxError::render(format!("terminal: {e}"));
    let mut out = io::stdout();
    let _guard = TerminalGuard::enter(&mut out).map_err(term_err)?;

    let period = shell.settings().timing.tick_fps()?.frame_duration();
    let mut next_tick = Instant::now();
    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        if event::poll(wait).map_err(term_err)?
            && let Event::Key(ev) = event::read().map_err(term_err)?
            && let Some(key) = map_key(ev)
            && shell.handle_key(key) == ShellAction::Quit
        {
            return Ok(());
        }

        if Instant::now() >= next_tick {
            shell.tick()?;
            draw(&mut out, shell).map_err(term_err)?;
            next_tick += period;
            // Skip missed ticks instead of bursting after a stall.
            if next_tick + period < Instant::now() {
                next_tick = Instant::now() + period;
            }
        }
    }
}

fn fg(c: Rgb8) -> SetForegroundColor {
    SetForegroundColor(Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    })
}

fn draw(out: &mut impl Write, shell: &Shell) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let style = &shell.settings().style;
    let mid = rows / 2;

    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    match shell.mode() {
        ShellMode::Editing => {
            let cursor = if shell.cursor_visible() { "|" } else { " " };
            let line = format!("Enter text: {}{cursor}", shell.input());
            let x = cols.saturating_sub(line.chars().count() as u16) / 2;
            queue!(out, MoveTo(x, mid), fg(style.text), Print(line), ResetColor)?;
        }
        ShellMode::Animating => {
            let Some(anim) = shell.animation() else {
                return out.flush();
            };
            let mut cells = vec![' '; anim.len()];
            for (i, ch) in anim.drawn_glyphs() {
                cells[i] = ch;
            }
            let line: String = cells.into_iter().collect();
            let x = cols.saturating_sub(line.chars().count() as u16) / 2;
            queue!(out, MoveTo(x, mid), fg(style.glow), Print(line), ResetColor)?;

            let phase = format!("[{}]", anim.phase());
            queue!(out, MoveTo(0, 0), Print(phase))?;
            if anim.is_recording() {
                let rec = format!("REC {}", anim.captured_frames());
                queue!(
                    out,
                    MoveTo(cols.saturating_sub(rec.len() as u16 + 1), 0),
                    SetForegroundColor(Color::Red),
                    Print(rec),
                    ResetColor
                )?;
            }

            if anim.phase() == Phase::Done {
                let controls = "R replay   N new text   G save GIF   V save video   Esc quit";
                let x = cols.saturating_sub(controls.len() as u16) / 2;
                queue!(out, MoveTo(x, mid + 2), Print(controls))?;
            }
        }
    }

    if let Some(status) = shell.status() {
        let (color, msg) = match status {
            Status::Saved(path) => (Color::Green, format!("saved {}", path.display())),
            Status::Failed(e) => (Color::Red, format!("export failed: {e}")),
        };
        queue!(
            out,
            MoveTo(0, rows.saturating_sub(1)),
            SetForegroundColor(color),
            Print(msg),
            ResetColor
        )?;
    }
    out.flush()
}

#[cfg(test)]
#[path = "../../tests/unit/shell/terminal.rs"]
mod tests;
