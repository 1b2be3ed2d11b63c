/// Terminal rasterizer: consumes the core's draw-command list and
/// translates it to crossterm cells. No game logic is performed here;
/// world coordinates are scaled to whatever grid the terminal offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use skystrike::render::{DrawCmd, Rgb};

const HINT: &str = "← → ↑ ↓ / WASD : Move   SPACE : Fire   T : Transform   B : Bomb   P : Pause   Q : Quit";

// ── World-to-cell mapping ─────────────────────────────────────────────────────

struct Viewport {
    scale_x: f64,
    scale_y: f64,
    cols: i32,
    rows: i32,
}

impl Viewport {
    fn col(&self, x: f64) -> i32 {
        (x * self.scale_x).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * self.scale_y).floor() as i32
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.cols && row >= 0 && row < self.rows
    }

    /// World x of a cell's center, for inside-shape tests.
    fn world_x(&self, col: i32) -> f64 {
        (col as f64 + 0.5) / self.scale_x
    }

    fn world_y(&self, row: i32) -> f64 {
        (row as f64 + 0.5) / self.scale_y
    }
}

fn to_color(color: Rgb) -> Color {
    Color::Rgb { r: color.r, g: color.g, b: color.b }
}

/// Alpha maps to glyph density; nearly transparent shapes are dropped.
fn fill_char(alpha: f64) -> Option<char> {
    if alpha < 0.15 {
        None
    } else if alpha < 0.4 {
        Some('░')
    } else if alpha < 0.75 {
        Some('▒')
    } else {
        Some('█')
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Rasterize one frame of draw commands in painter's order.
pub fn render<W: Write>(
    out: &mut W,
    cmds: &[DrawCmd],
    world_width: f64,
    world_height: f64,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let rows = rows.saturating_sub(1); // last row holds the controls hint
    let vp = Viewport {
        scale_x: cols as f64 / world_width,
        scale_y: rows as f64 / world_height,
        cols: cols as i32,
        rows: rows as i32,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for cmd in cmds {
        match cmd {
            DrawCmd::Rect { x, y, width, height, color, alpha } => {
                // The cleared screen is already black
                if *color == Rgb::new(0, 0, 0) {
                    continue;
                }
                if let Some(ch) = fill_char(*alpha) {
                    fill_region(out, &vp, *x, *y, *width, *height, to_color(*color), ch)?;
                }
            }
            DrawCmd::GradientRect { x, y, width, height, top, bottom, alpha } => {
                if let Some(ch) = fill_char(*alpha) {
                    gradient_region(out, &vp, *x, *y, *width, *height, *top, *bottom, ch)?;
                }
            }
            DrawCmd::Poly { points, color, alpha } => {
                if let Some(ch) = fill_char(*alpha) {
                    fill_poly(out, &vp, points, to_color(*color), ch)?;
                }
            }
            DrawCmd::Circle { x, y, radius, color, alpha } => {
                if let Some(ch) = fill_char(*alpha) {
                    fill_circle(out, &vp, *x, *y, *radius, to_color(*color), ch)?;
                }
            }
            DrawCmd::Ring { x, y, radius, color, alpha } => {
                if fill_char(*alpha).is_some() {
                    stroke_ring(out, &vp, *x, *y, *radius, to_color(*color))?;
                }
            }
            DrawCmd::Glow { x, y, radius, color, alpha } => {
                // Radial gradients collapse to a faint halo at cell resolution
                if *alpha >= 0.25 {
                    fill_circle(out, &vp, *x, *y, *radius, to_color(*color), '░')?;
                }
            }
            DrawCmd::Text { x, y, text, color, .. } => {
                let col = vp.col(*x) - text.chars().count() as i32 / 2;
                let row = vp.row(*y);
                if vp.contains(col.max(0), row) {
                    out.queue(cursor::MoveTo(col.max(0) as u16, row as u16))?;
                    out.queue(style::SetForegroundColor(to_color(*color)))?;
                    out.queue(Print(text))?;
                }
            }
        }
    }

    // Controls hint on the reserved bottom row
    out.queue(cursor::MoveTo(0, rows))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(HINT))?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows))?;
    out.flush()?;
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

fn fill_region<W: Write>(
    out: &mut W,
    vp: &Viewport,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Color,
    ch: char,
) -> std::io::Result<()> {
    let x0 = vp.col(x).max(0);
    let x1 = vp.col(x + width).min(vp.cols - 1);
    let y0 = vp.row(y).max(0);
    let y1 = vp.row(y + height).min(vp.rows - 1);
    if x1 < x0 || y1 < y0 {
        return Ok(());
    }
    let run: String = std::iter::repeat(ch).take((x1 - x0 + 1) as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in y0..=y1 {
        out.queue(cursor::MoveTo(x0 as u16, row as u16))?;
        out.queue(Print(&run))?;
    }
    Ok(())
}

fn gradient_region<W: Write>(
    out: &mut W,
    vp: &Viewport,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    top: Rgb,
    bottom: Rgb,
    ch: char,
) -> std::io::Result<()> {
    let x0 = vp.col(x).max(0);
    let x1 = vp.col(x + width).min(vp.cols - 1);
    let y0 = vp.row(y).max(0);
    let y1 = vp.row(y + height).min(vp.rows - 1);
    if x1 < x0 || y1 < y0 {
        return Ok(());
    }
    let run: String = std::iter::repeat(ch).take((x1 - x0 + 1) as usize).collect();
    let span = (y1 - y0).max(1) as f64;
    for row in y0..=y1 {
        let t = (row - y0) as f64 / span;
        let color = Rgb::new(
            lerp(top.r, bottom.r, t),
            lerp(top.g, bottom.g, t),
            lerp(top.b, bottom.b, t),
        );
        out.queue(style::SetForegroundColor(to_color(color)))?;
        out.queue(cursor::MoveTo(x0 as u16, row as u16))?;
        out.queue(Print(&run))?;
    }
    Ok(())
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

fn fill_poly<W: Write>(
    out: &mut W,
    vp: &Viewport,
    points: &[(f64, f64)],
    color: Color,
    ch: char,
) -> std::io::Result<()> {
    if points.is_empty() {
        return Ok(());
    }
    let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    out.queue(style::SetForegroundColor(color))?;
    let mut drew = false;
    for row in vp.row(min_y).max(0)..=vp.row(max_y).min(vp.rows - 1) {
        for col in vp.col(min_x).max(0)..=vp.col(max_x).min(vp.cols - 1) {
            if point_in_poly(vp.world_x(col), vp.world_y(row), points) {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(Print(ch))?;
                drew = true;
            }
        }
    }
    // Shapes smaller than one cell still get a single glyph
    if !drew {
        let cx = (min_x + max_x) / 2.0;
        let cy = (min_y + max_y) / 2.0;
        let (col, row) = (vp.col(cx), vp.row(cy));
        if vp.contains(col, row) {
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

/// Even-odd crossing test.
fn point_in_poly(x: f64, y: f64, points: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn fill_circle<W: Write>(
    out: &mut W,
    vp: &Viewport,
    cx: f64,
    cy: f64,
    radius: f64,
    color: Color,
    ch: char,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    let mut drew = false;
    for row in vp.row(cy - radius).max(0)..=vp.row(cy + radius).min(vp.rows - 1) {
        for col in vp.col(cx - radius).max(0)..=vp.col(cx + radius).min(vp.cols - 1) {
            let dx = vp.world_x(col) - cx;
            let dy = vp.world_y(row) - cy;
            if dx * dx + dy * dy <= radius * radius {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(Print(ch))?;
                drew = true;
            }
        }
    }
    if !drew {
        let (col, row) = (vp.col(cx), vp.row(cy));
        if vp.contains(col, row) {
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

fn stroke_ring<W: Write>(
    out: &mut W,
    vp: &Viewport,
    cx: f64,
    cy: f64,
    radius: f64,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    let samples = 32;
    for i in 0..samples {
        let angle = i as f64 / samples as f64 * std::f64::consts::TAU;
        let col = vp.col(cx + angle.cos() * radius);
        let row = vp.row(cy + angle.sin() * radius);
        if vp.contains(col, row) {
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print('·'))?;
        }
    }
    Ok(())
}
