//! Terminal renderer for scene frames
//!
//! A scene is first composed into a character canvas sized to the terminal,
//! then only the cells that changed since the previous frame are written.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use dwell_survey_core::{Point2D, SceneFrame};

const HAND: char = 'O';
const FILL: char = '#';
const HINT: &str = "arrows: move hand  space: walk in/out  r: reset  q: quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    symbol: char,
    fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            fg: Color::White,
        }
    }
}

/// A frame projected onto the terminal grid
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.cols as i32 || y >= self.rows as i32 {
            return None;
        }
        Some(y as usize * self.cols as usize + x as usize)
    }

    fn put(&mut self, x: i32, y: i32, symbol: char, fg: Color) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell { symbol, fg };
        }
    }

    fn text_centered(&mut self, x: i32, y: i32, text: &str, fg: Color) {
        let start = x - text.chars().count() as i32 / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, y, ch, fg);
        }
    }

    /// Character at a cell, for inspection
    pub fn symbol(&self, x: u16, y: u16) -> Option<char> {
        self.index(x as i32, y as i32).map(|idx| self.cells[idx].symbol)
    }

    /// One row as a string
    pub fn row(&self, y: u16) -> String {
        (0..self.cols)
            .filter_map(|x| self.symbol(x, y))
            .collect()
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }
}

/// Maps scene coordinates to terminal cells
struct Projection {
    sx: f32,
    sy: f32,
}

impl Projection {
    fn new(scene: &SceneFrame, cols: u16, rows: u16) -> Self {
        Self {
            sx: cols as f32 / scene.width,
            sy: rows as f32 / scene.height,
        }
    }

    fn cell(&self, p: Point2D) -> (i32, i32) {
        ((p.x * self.sx).floor() as i32, (p.y * self.sy).floor() as i32)
    }

    /// Scene point at the middle of a cell
    fn point(&self, x: u16, y: u16) -> Point2D {
        Point2D::new((x as f32 + 0.5) / self.sx, (y as f32 + 0.5) / self.sy)
    }
}

/// Lay a scene out on a `cols` x `rows` grid. The last row holds the key hint.
pub fn compose(scene: &SceneFrame, cols: u16, rows: u16) -> Canvas {
    let mut canvas = Canvas::new(cols, rows);
    if cols == 0 || rows < 2 {
        return canvas;
    }

    let field_rows = rows - 1;
    let proj = Projection::new(scene, cols, field_rows);

    if scene.idle {
        let (cx, cy) = proj.cell(Point2D::new(scene.width / 2.0, scene.height / 2.0));
        canvas.text_centered(cx, cy, "RAISE YOUR VOICE", Color::Cyan);
        canvas.text_centered(cx, cy + 2, "step in to answer a question", Color::DarkGrey);
    }

    for target in &scene.targets {
        let (r, g, b) = target.colour;
        let colour = Color::Rgb { r, g, b };
        for y in 0..field_rows {
            for x in 0..cols {
                if proj.point(x, y).distance(&target.center) < target.radius {
                    canvas.put(x as i32, y as i32, FILL, colour);
                }
            }
        }
        let (cx, cy) = proj.cell(target.center);
        canvas.text_centered(cx, cy, target.label, Color::White);
    }

    if let Some(prompt) = &scene.prompt {
        let (cx, cy) = proj.cell(prompt.position);
        canvas.text_centered(cx, cy, &prompt.text, Color::White);
    }

    for overlay in &scene.overlays {
        if overlay.opacity < 0.1 {
            continue;
        }
        let level = (overlay.opacity * 255.0) as u8;
        let (cx, cy) = proj.cell(overlay.center);
        canvas.text_centered(
            cx,
            cy,
            &overlay.text,
            Color::Rgb {
                r: level,
                g: level,
                b: level,
            },
        );
    }

    for hand in &scene.hands {
        let (x, y) = proj.cell(hand.point);
        canvas.put(x, y, HAND, Color::Yellow);
    }

    canvas.text_centered(cols as i32 / 2, field_rows as i32, HINT, Color::DarkGrey);
    canvas
}

/// Owns the terminal while the kiosk runs
pub struct TerminalRenderer {
    stdout: Stdout,
    previous: Option<Canvas>,
}

impl TerminalRenderer {
    /// Switch to the alternate screen in raw mode
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self {
            stdout,
            previous: None,
        })
    }

    pub fn draw(&mut self, scene: &SceneFrame) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let canvas = compose(scene, cols, rows);

        let previous = match self.previous.take() {
            Some(prev) if prev.size() == canvas.size() => prev,
            _ => {
                queue!(self.stdout, terminal::Clear(ClearType::All))?;
                Canvas::new(0, 0)
            }
        };

        for y in 0..rows {
            for x in 0..cols {
                let idx = y as usize * cols as usize + x as usize;
                let cell = canvas.cells[idx];
                if previous.cells.get(idx) == Some(&cell) {
                    continue;
                }
                queue!(
                    self.stdout,
                    cursor::MoveTo(x, y),
                    SetForegroundColor(cell.fg),
                    Print(cell.symbol)
                )?;
            }
        }

        self.stdout.flush()?;
        self.previous = Some(canvas);
        Ok(())
    }

    /// Give the terminal back
    pub fn leave(mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}
