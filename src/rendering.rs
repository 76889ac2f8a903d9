use std::io::{self, Write};

use anyhow::{Result, bail};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::info;

use crate::assets::{AssetLoader, ImageHandle, SoundHandle};
use crate::types::{Rect, Vector2D};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopRight,
    Center,
}

/// Host drawing surface. Rectangles are in screen pixels, already shifted
/// by the camera.
pub trait Renderer {
    fn begin_frame(&mut self);
    fn draw_image(&mut self, image: ImageHandle, rect: &Rect);
    fn draw_bar(&mut self, rect: &Rect, ratio: f64);
    fn draw_text(&mut self, text: &str, anchor: TextAnchor);
    fn present(&mut self) -> io::Result<()>;
}

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.set_char(self.cursor_x, self.cursor_y, c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.buffer[y as usize][x as usize] = c;
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer.get(y as usize).map(|r| r.iter().collect()).unwrap_or_default()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row(y).contains(needle))
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn queue_move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, MoveTo(x, y)),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(x, y);
                Ok(())
            }
        }
    }

    pub fn queue_color(&mut self, color: Color) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, SetForegroundColor(color)),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }

    pub fn queue_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub color: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', color: Color::Reset };

// --- GameGrid for cell rendering ---
pub struct GameGrid {
    pub grid: Vec<Vec<Glyph>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![BLANK; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set(&mut self, x: i64, y: i64, glyph: Glyph) {
        if x >= 0 && y >= 0 && y < self.height as i64 && x < self.width as i64 {
            self.grid[y as usize][x as usize] = glyph;
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(BLANK);
        }
    }

    pub fn render(&self, out: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            out.queue_move_to(0, y)?;
            let mut color = None;
            for glyph in &self.grid[y as usize] {
                if color != Some(glyph.color) {
                    out.queue_color(glyph.color)?;
                    color = Some(glyph.color);
                }
                write!(out, "{}", glyph.ch)?;
            }
        }
        out.queue_other_command(ResetColor)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellScale {
    pub px_per_col: f64,
    pub px_per_row: f64,
}

impl CellScale {
    pub fn fit(viewport_width: f64, viewport_height: f64, cols: u16, rows: u16) -> Self {
        CellScale {
            px_per_col: viewport_width / cols.max(1) as f64,
            px_per_row: viewport_height / rows.max(1) as f64,
        }
    }

    pub fn cell_of(&self, screen: Vector2D) -> (i64, i64) {
        (
            (screen.x / self.px_per_col).floor() as i64,
            (screen.y / self.px_per_row).floor() as i64,
        )
    }

    pub fn cell_center(&self, col: u16, row: u16) -> Vector2D {
        Vector2D::new(
            (col as f64 + 0.5) * self.px_per_col,
            (row as f64 + 0.5) * self.px_per_row,
        )
    }

    pub fn cell_span(&self, rect: &Rect) -> ((i64, i64), (i64, i64)) {
        let (cx, cy) = self.cell_of(rect.center);
        let first_col = (rect.left() / self.px_per_col).floor() as i64;
        let last_col = ((rect.right() / self.px_per_col).ceil() as i64 - 1).max(first_col);
        let first_row = (rect.top() / self.px_per_row).floor() as i64;
        let last_row = ((rect.bottom() / self.px_per_row).ceil() as i64 - 1).max(first_row);
        ((first_col.min(cx), first_row.min(cy)), (last_col.max(cx), last_row.max(cy)))
    }
}

// Glyph stand-ins for the game's images.
const IMAGE_GLYPHS: &[(&str, char, Color)] = &[
    ("player_right", '>', Color::White),
    ("player_up_right", '/', Color::White),
    ("player_up", '^', Color::White),
    ("player_up_left", '\\', Color::White),
    ("player_left", '<', Color::White),
    ("player_down_left", '/', Color::White),
    ("player_down", 'v', Color::White),
    ("player_down_right", '\\', Color::White),
    ("player_hurt", '*', Color::Red),
    ("player_down_and_out", 'x', Color::DarkRed),
    ("alien1", 'A', Color::Green),
    ("alien2", 'M', Color::Green),
    ("alien3", 'W', Color::Green),
    ("fast_alien", 'f', Color::Yellow),
    ("boss", 'B', Color::Magenta),
    ("boss_hurt", 'B', Color::Red),
    ("beam", 'o', Color::Cyan),
    ("boss_beam", '@', Color::Magenta),
    ("ground", '.', Color::DarkGrey),
];

const SOUND_NAMES: &[&str] = &["player_hit", "enemy_hit", "boss_hit"];

#[derive(Debug, Default)]
pub struct GlyphSheet {
    glyphs: Vec<Glyph>,
}

impl GlyphSheet {
    pub fn glyph(&self, image: ImageHandle) -> Option<Glyph> {
        self.glyphs.get(image.0 as usize).copied()
    }
}

impl AssetLoader for GlyphSheet {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle> {
        let Some(&(_, ch, color)) = IMAGE_GLYPHS.iter().find(|(n, _, _)| *n == name) else {
            bail!("no glyph registered for image '{}'", name);
        };
        self.glyphs.push(Glyph { ch, color });
        Ok(ImageHandle((self.glyphs.len() - 1) as u16))
    }

    fn load_sound(&mut self, name: &str) -> Result<SoundHandle> {
        match SOUND_NAMES.iter().position(|n| *n == name) {
            Some(idx) => Ok(SoundHandle(idx as u16)),
            None => bail!("no sound registered as '{}'", name),
        }
    }
}

pub struct TerminalRenderer {
    pub grid: GameGrid,
    pub output: OutputTarget,
    pub scale: CellScale,
    sheet: GlyphSheet,
    texts: Vec<(String, TextAnchor)>,
}

impl TerminalRenderer {
    pub fn new(sheet: GlyphSheet, output: OutputTarget, cols: u16, rows: u16, scale: CellScale) -> Self {
        TerminalRenderer {
            grid: GameGrid::new(cols, rows),
            output,
            scale,
            sheet,
            texts: Vec::new(),
        }
    }

    fn fill(&mut self, rect: &Rect, glyph: Glyph) {
        let ((x0, y0), (x1, y1)) = self.scale.cell_span(rect);
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.grid.set(x, y, glyph);
            }
        }
    }

    fn text_origin(&self, text: &str, anchor: TextAnchor) -> (u16, u16) {
        let len = text.chars().count() as u16;
        match anchor {
            TextAnchor::TopLeft => (0, 0),
            TextAnchor::TopRight => (self.grid.width.saturating_sub(len), 0),
            TextAnchor::Center => (self.grid.width.saturating_sub(len) / 2, self.grid.height / 2),
        }
    }
}

impl Renderer for TerminalRenderer {
    fn begin_frame(&mut self) {
        self.grid.clear();
        self.texts.clear();
    }

    fn draw_image(&mut self, image: ImageHandle, rect: &Rect) {
        if let Some(glyph) = self.sheet.glyph(image) {
            self.fill(rect, glyph);
        }
    }

    fn draw_bar(&mut self, rect: &Rect, ratio: f64) {
        let ((x0, y0), (x1, _)) = self.scale.cell_span(rect);
        let cells = x1 - x0 + 1;
        let filled = (cells as f64 * ratio.clamp(0.0, 1.0)).round() as i64;
        for i in 0..cells {
            let glyph = if i < filled {
                Glyph { ch: '=', color: Color::Green }
            } else {
                Glyph { ch: '-', color: Color::DarkRed }
            };
            self.grid.set(x0 + i, y0, glyph);
        }
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor) {
        self.texts.push((text.to_string(), anchor));
    }

    fn present(&mut self) -> io::Result<()> {
        let texts = std::mem::take(&mut self.texts);
        if let OutputTarget::ScreenBuffer(sb) = &mut self.output {
            for y in 0..self.grid.height {
                for (x, glyph) in self.grid.grid[y as usize].iter().enumerate() {
                    sb.set_char(x as u16, y, glyph.ch);
                }
            }
        } else {
            self.grid.render(&mut self.output)?;
        }
        for (text, anchor) in &texts {
            let (x, y) = self.text_origin(text, *anchor);
            self.output.queue_move_to(x, y)?;
            write!(self.output, "{}", text)?;
        }
        self.output.flush()?;
        if let OutputTarget::ScreenBuffer(sb) = &self.output {
            sb.print_to_log();
        }
        Ok(())
    }
}
