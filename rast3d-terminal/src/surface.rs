/// Terminal output surface: a full-resolution frame buffer shown with half-block cells
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    QueueableCommand,
};
use rast3d_core::{FrameBuffer, Rgb, ScreenTriangle, Surface};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

pub struct TerminalSurface {
    frame: FrameBuffer,
    title: String,
    cols: u16,
    rows: u16,
    needs_clear: bool,
    last_tick: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalSurface {
    /// Surface sized to the current terminal
    pub fn new(title: impl Into<String>, width: usize, height: usize) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_size(title, width, height, cols, rows))
    }

    pub fn with_size(
        title: impl Into<String>,
        width: usize,
        height: usize,
        cols: u16,
        rows: u16,
    ) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
            title: title.into(),
            cols,
            rows,
            needs_clear: true,
            last_tick: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Colors for the top and bottom half of a cell; row 0 is the title bar
    fn sample_cell(&self, col: u16, row: u16) -> (Rgb, Rgb) {
        let pixel_rows = (self.rows.saturating_sub(1) as usize * 2).max(1);
        let cols = self.cols.max(1) as usize;
        let (w, h) = (self.frame.width(), self.frame.height());

        let x = (2 * col as usize + 1) * w / (2 * cols);
        let top = 2 * (row as usize - 1);
        let y = |pr: usize| (2 * pr + 1) * h / (2 * pixel_rows);

        let at = |y: usize| self.frame.pixel(x, y).unwrap_or(Rgb::BLACK);
        (at(y(top)), at(y(top + 1)))
    }

    /// Write the whole frame plus the title bar to `writer`
    pub fn draw<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;

        for row in 1..self.rows {
            writer.queue(cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let cell = self.sample_cell(col, row);
                if current != Some(cell) {
                    let (top, bottom) = cell;
                    writer.queue(SetForegroundColor(to_color(top)))?;
                    writer.queue(SetBackgroundColor(to_color(bottom)))?;
                    current = Some(cell);
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
        }

        queue!(
            writer,
            ResetColor,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | FPS: {:.1} | Q/Esc=Quit",
                self.title, self.fps
            )),
            ResetColor
        )?;
        Ok(())
    }

    fn tick_fps(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        if (now - self.last_tick).as_secs() >= 1 {
            self.fps = self.frame_count as f32 / (now - self.last_tick).as_secs_f32();
            self.frame_count = 0;
            self.last_tick = now;
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl Surface for TerminalSurface {
    fn fill_triangle(&mut self, triangle: &ScreenTriangle, color: Rgb) {
        self.frame.fill_triangle(triangle, color);
    }

    fn fill_background(&mut self, color: Rgb) {
        self.frame.fill_background(color);
    }

    fn present(&mut self) -> io::Result<()> {
        self.tick_fps();

        let mut stdout = stdout();
        if self.needs_clear {
            queue!(stdout, Clear(ClearType::All))?;
            self.needs_clear = false;
        }
        self.draw(&mut stdout)?;
        stdout.flush()
    }

    fn pump_events(&mut self) -> io::Result<bool> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) => return Ok(false),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                    self.needs_clear = true;
                }
                _ => {}
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rast3d_core::ScreenPoint;

    #[test]
    fn test_draw_emits_one_block_per_cell() {
        let surface = TerminalSurface::with_size("test", 8, 8, 4, 3);
        let mut out = Vec::new();
        surface.draw(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 4 * 2);
        assert!(text.contains("test | FPS"));
    }

    #[test]
    fn test_cells_sample_top_and_bottom_halves() {
        // 2 cell rows -> 4 pixel rows over an 8 pixel tall buffer
        let mut surface = TerminalSurface::with_size("test", 8, 8, 4, 3);
        let white = Rgb::gray(255);
        surface.fill_triangle(
            &ScreenTriangle::new(
                ScreenPoint::new(0, 0),
                ScreenPoint::new(8, 0),
                ScreenPoint::new(8, 2),
            ),
            white,
        );
        surface.fill_triangle(
            &ScreenTriangle::new(
                ScreenPoint::new(0, 0),
                ScreenPoint::new(8, 2),
                ScreenPoint::new(0, 2),
            ),
            white,
        );

        // Top two pixel rows are white: only the first sampled row hits them
        assert_eq!(surface.sample_cell(0, 1), (white, Rgb::BLACK));
        assert_eq!(surface.sample_cell(3, 2), (Rgb::BLACK, Rgb::BLACK));

        surface.fill_background(Rgb::new(1, 2, 3));
        assert_eq!(surface.sample_cell(2, 2), (Rgb::new(1, 2, 3), Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
