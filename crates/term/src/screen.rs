//! Screen: presents canvases on a real terminal.
//!
//! Each frame is diffed against the previous one and only the changed runs of
//! each row are rewritten.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Glyph, Rgb, Style};

pub struct Screen {
    stdout: io::Stdout,
    /// Last presented frame; `None` forces a full redraw
    front: Option<Canvas>,
    buf: Vec<u8>,
    active: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            front: None,
            buf: Vec::with_capacity(32 * 1024),
            active: false,
        }
    }

    /// Raw mode plus alternate screen, cursor hidden
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`Screen::enter`]. Safe to call more than once.
    pub fn leave(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to redraw everything (e.g. after a resize)
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Draw `canvas`, then swap it with the previous frame.
    ///
    /// On return `canvas` holds stale contents the caller can render over,
    /// so two canvases circulate without cloning.
    pub fn present(&mut self, canvas: &mut Canvas) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.front.take() {
            Some(prev) if prev.width() == canvas.width() && prev.height() == canvas.height() => {
                encode_diff_into(&prev, canvas, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(canvas, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| Canvas::new(0, 0));
                prev.resize(canvas.width(), canvas.height());
                prev
            }
        };
        self.flush()?;

        std::mem::swap(&mut prev, canvas);
        self.front = Some(prev);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Encode a full redraw of `canvas` into `out`.
pub fn encode_full_into(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..canvas.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for glyph in canvas.row(y) {
            pen.print(out, *glyph)?;
        }
    }
    pen.reset(out)
}

/// Encode only the runs that differ between `prev` and `next` into `out`.
///
/// Both canvases must have the same size.
pub fn encode_diff_into(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    let mut wrote = false;
    for y in 0..next.height() {
        let row = next.row(y);
        for (start, len) in changed_runs(prev.row(y), row) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for glyph in &row[start..start + len] {
                pen.print(out, *glyph)?;
            }
            wrote = true;
        }
    }
    if wrote {
        pen.reset(out)?;
    }
    Ok(())
}

/// `(start, len)` of each maximal run where the rows differ
pub fn changed_runs<'a>(
    prev: &'a [Glyph],
    next: &'a [Glyph],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        let differs = |i: usize| prev.get(i) != next.get(i);
        while x < next.len() && !differs(x) {
            x += 1;
        }
        if x >= next.len() {
            return None;
        }
        let start = x;
        while x < next.len() && differs(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}

/// Tracks the last emitted style so unchanged styles are not re-sent
#[derive(Default)]
struct Pen {
    style: Option<Style>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, glyph: Glyph) -> Result<()> {
        if self.style != Some(glyph.style) {
            apply_style(out, glyph.style)?;
            self.style = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
        Ok(())
    }

    fn reset(&mut self, out: &mut Vec<u8>) -> Result<()> {
        self.style = None;
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn apply_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
