/// Output surface contract and an in-memory frame buffer
use std::io;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

/// Integer pixel coordinate; may lie outside the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A projected triangle in screen space, in submission winding order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenTriangle {
    pub points: [ScreenPoint; 3],
}

impl ScreenTriangle {
    pub fn new(a: ScreenPoint, b: ScreenPoint, c: ScreenPoint) -> Self {
        Self { points: [a, b, c] }
    }
}

/// Anything the renderer can draw into.
///
/// Implementations own the pixel storage and whatever host presents it.
/// Drawing calls cannot fail; only talking to the host can.
pub trait Surface {
    /// Fill a flat-colored triangle
    fn fill_triangle(&mut self, triangle: &ScreenTriangle, color: Rgb);

    /// Clear the whole buffer
    fn fill_background(&mut self, color: Rgb);

    /// Make the current buffer visible
    fn present(&mut self) -> io::Result<()>;

    /// Service pending host events without blocking.
    ///
    /// Returns `false` once the host has asked to close.
    fn pump_events(&mut self) -> io::Result<bool>;
}

/// A plain RGB pixel buffer with a software triangle fill
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Scan the triangle's bounding box, clipped to the buffer, and fill every
    /// pixel whose center is inside or on an edge.
    fn rasterize_triangle(&mut self, triangle: &ScreenTriangle, color: Rgb) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let [v0, v1, v2] = triangle.points.map(|p| (p.x as f64, p.y as f64));

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor();
        let max_x = v0.0.max(v1.0).max(v2.0).ceil();
        let min_y = v0.1.min(v1.1).min(v2.1).floor();
        let max_y = v0.1.max(v1.1).max(v2.1).ceil();

        // Clip to screen bounds
        let min_x = min_x.max(0.0) as usize;
        let max_x = max_x.min(self.width as f64 - 1.0);
        let min_y = min_y.max(0.0) as usize;
        let max_y = max_y.min(self.height as f64 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as usize, max_y as usize);

        for y in min_y..=max_y {
            let row = y * self.width;
            for x in min_x..=max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);

                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.pixels[row + x] = color;
                    }
                }
            }
        }
    }
}

impl Surface for FrameBuffer {
    fn fill_triangle(&mut self, triangle: &ScreenTriangle, color: Rgb) {
        self.rasterize_triangle(triangle, color);
    }

    fn fill_background(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Nothing to show; the buffer is read back directly
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn pump_events(&mut self) -> io::Result<bool> {
        Ok(true)
    }
}

/// Barycentric coordinates of `p`, independent of winding.
///
/// Returns `None` for a zero-area triangle.
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom == 0.0 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> ScreenTriangle {
        ScreenTriangle::new(
            ScreenPoint::new(a.0, a.1),
            ScreenPoint::new(b.0, b.1),
            ScreenPoint::new(c.0, c.1),
        )
    }

    fn count(fb: &FrameBuffer, color: Rgb) -> usize {
        fb.pixels().iter().filter(|p| **p == color).count()
    }

    #[test]
    fn test_fill_covers_interior() {
        let mut fb = FrameBuffer::new(16, 16);
        let white = Rgb::gray(255);
        fb.fill_triangle(&tri((0, 0), (16, 0), (0, 16)), white);

        assert_eq!(fb.pixel(1, 1), Some(white));
        assert_eq!(fb.pixel(14, 0), Some(white));
        assert_eq!(fb.pixel(15, 15), Some(Rgb::BLACK));
        // Half the 16x16 square plus the diagonal pixels whose centers sit on the edge
        assert_eq!(count(&fb, white), 16 * 17 / 2);
    }

    #[test]
    fn test_fill_ignores_winding() {
        let mut cw = FrameBuffer::new(32, 32);
        let mut ccw = FrameBuffer::new(32, 32);
        let color = Rgb::new(10, 20, 30);

        // No pixel center lies exactly on these edges
        cw.fill_triangle(&tri((2, 3), (28, 8), (12, 30)), color);
        ccw.fill_triangle(&tri((2, 3), (12, 30), (28, 8)), color);

        assert!(count(&cw, color) > 0);
        assert_eq!(cw.pixels(), ccw.pixels());
    }

    #[test]
    fn test_fill_clips_to_buffer() {
        let mut fb = FrameBuffer::new(8, 8);
        let color = Rgb::gray(7);
        fb.fill_triangle(&tri((-100, -100), (200, -100), (-100, 200)), color);
        assert_eq!(count(&fb, color), 64);

        let mut fb = FrameBuffer::new(8, 8);
        fb.fill_triangle(&tri((-30, -30), (-10, -30), (-30, -10)), color);
        assert_eq!(count(&fb, color), 0);
    }

    #[test]
    fn test_degenerate_triangle_fills_nothing() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.fill_triangle(&tri((0, 0), (4, 4), (7, 7)), Rgb::gray(1));
        assert_eq!(count(&fb, Rgb::gray(1)), 0);
    }

    #[test]
    fn test_fill_background() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.fill_triangle(&tri((0, 0), (4, 0), (0, 3)), Rgb::gray(200));
        fb.fill_background(Rgb::new(1, 2, 3));
        assert!(fb.pixels().iter().all(|p| *p == Rgb::new(1, 2, 3)));
        assert_eq!(fb.pixel(4, 0), None);
        assert!(fb.pump_events().unwrap());
    }
}
