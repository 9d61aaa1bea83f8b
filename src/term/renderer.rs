//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Draws are diffed against the previous frame so a quiet board costs almost
//! no terminal I/O.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::fb::{FrameBuffer, Glyph, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forces the next draw to repaint everything. Useful on resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let full = match &self.last {
            Some(prev) => prev.width() != fb.width() || prev.height() != fb.height(),
            None => true,
        };
        if full {
            self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut style: Option<(Rgb, Rgb, bool)> = None;
        for y in 0..fb.height() {
            let mut x = 0;
            let mut cursor_at: Option<u16> = None;
            while x < fb.width() {
                let glyph = fb.get(x, y).unwrap_or_default();
                let unchanged = !full
                    && self
                        .last
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .map_or(false, |prev| prev == glyph);
                if unchanged {
                    x += 1;
                    continue;
                }
                if cursor_at != Some(x) {
                    self.stdout.queue(cursor::MoveTo(x, y))?;
                }
                let wanted = (glyph.fg, glyph.bg, glyph.bold);
                if style != Some(wanted) {
                    self.apply_style(glyph)?;
                    style = Some(wanted);
                }
                self.stdout.queue(Print(glyph.ch))?;
                x += 1;
                cursor_at = Some(x);
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        self.last = Some(fb.clone());
        Ok(())
    }

    fn apply_style(&mut self, glyph: Glyph) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(SetForegroundColor(rgb_to_color(glyph.fg)))?;
        self.stdout.queue(SetBackgroundColor(rgb_to_color(glyph.bg)))?;
        if glyph.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
