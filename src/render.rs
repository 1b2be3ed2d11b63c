//! Declarative rendering layer.
//!
//! The simulation describes one frame as an ordered list of [`DrawCmd`]
//! values with explicit geometry and color. A renderer consumes the list
//! front-to-back as painter's order; the core never queries it for state.

use crate::compute::{GameStatus, Simulation};

// ── Colors ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const HUD_GREEN: Rgb = Rgb::new(0, 255, 0);
pub const OVERLAY_RED: Rgb = Rgb::new(255, 0, 0);

// ── Draw commands ────────────────────────────────────────────────────────────

/// One drawing primitive. Coordinates are world units (not cells/pixels);
/// `alpha` is 0.0..=1.0.
#[derive(Clone, Debug)]
pub enum DrawCmd {
    /// Axis-aligned filled rectangle.
    Rect { x: f64, y: f64, width: f64, height: f64, color: Rgb, alpha: f64 },
    /// Filled rectangle with a vertical linear gradient.
    GradientRect { x: f64, y: f64, width: f64, height: f64, top: Rgb, bottom: Rgb, alpha: f64 },
    /// Filled convex polygon.
    Poly { points: Vec<(f64, f64)>, color: Rgb, alpha: f64 },
    /// Filled circle (arc swept 0..2π).
    Circle { x: f64, y: f64, radius: f64, color: Rgb, alpha: f64 },
    /// Stroked circle outline.
    Ring { x: f64, y: f64, radius: f64, color: Rgb, alpha: f64 },
    /// Radial gradient from `color` at the center to transparent at `radius`.
    Glow { x: f64, y: f64, radius: f64, color: Rgb, alpha: f64 },
    /// Text anchored at its center, `size` in world units.
    Text { x: f64, y: f64, size: f64, text: String, color: Rgb, alpha: f64 },
}

impl DrawCmd {
    fn shift(&mut self, dx: f64, dy: f64) {
        match self {
            DrawCmd::Rect { x, y, .. }
            | DrawCmd::GradientRect { x, y, .. }
            | DrawCmd::Circle { x, y, .. }
            | DrawCmd::Ring { x, y, .. }
            | DrawCmd::Glow { x, y, .. }
            | DrawCmd::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            DrawCmd::Poly { points, .. } => {
                for (px, py) in points.iter_mut() {
                    *px += dx;
                    *py += dy;
                }
            }
        }
    }
}

// ── Frame assembly ───────────────────────────────────────────────────────────

/// Build one full frame in fixed back-to-front order: background,
/// power-ups, enemies, projectiles, player, particles, explosions,
/// overlays, HUD.
pub fn render(sim: &Simulation) -> Vec<DrawCmd> {
    let mut out = Vec::new();

    out.push(DrawCmd::Rect {
        x: 0.0,
        y: 0.0,
        width: sim.width,
        height: sim.height,
        color: BLACK,
        alpha: 1.0,
    });
    sim.starfield.draw(&mut out);

    for power_up in &sim.power_ups {
        power_up.draw(&mut out);
    }
    for enemy in &sim.enemies {
        enemy.draw(&mut out);
    }
    for projectile in &sim.projectiles {
        projectile.draw(&mut out);
    }
    sim.player.draw(sim.ticks, &mut out);
    for particle in &sim.particles {
        particle.draw(&mut out);
    }
    for explosion in &sim.explosions {
        explosion.draw(&mut out);
    }

    draw_overlays(sim, &mut out);
    draw_hud(sim, &mut out);

    if sim.shake_timer > 0 {
        apply_shake(sim, &mut out);
    }

    out
}

/// Decaying deterministic wobble while a smart bomb shake is active.
fn apply_shake(sim: &Simulation, out: &mut [DrawCmd]) {
    let amplitude = sim.shake_timer as f64 * 0.4;
    let phase = sim.ticks as f64;
    let dx = (phase * 1.7).sin() * amplitude;
    let dy = (phase * 2.3).cos() * amplitude;
    for cmd in out.iter_mut() {
        cmd.shift(dx, dy);
    }
}

fn draw_hud(sim: &Simulation, out: &mut Vec<DrawCmd>) {
    out.push(DrawCmd::Rect {
        x: 10.0,
        y: 10.0,
        width: 150.0,
        height: 80.0,
        color: BLACK,
        alpha: 0.5,
    });
    let lines = [
        (35.0, format!("Score: {}", sim.score)),
        (65.0, format!("Level: {}", sim.level)),
        (95.0, format!("Lives: {}", sim.player.lives)),
    ];
    for (y, text) in lines {
        out.push(DrawCmd::Text {
            x: 85.0,
            y,
            size: 20.0,
            text,
            color: HUD_GREEN,
            alpha: 1.0,
        });
    }
}

fn draw_overlays(sim: &Simulation, out: &mut Vec<DrawCmd>) {
    let center_x = sim.width / 2.0;
    let center_y = sim.height / 2.0;

    if sim.paused {
        out.push(DrawCmd::Rect {
            x: 0.0,
            y: 0.0,
            width: sim.width,
            height: sim.height,
            color: BLACK,
            alpha: 0.7,
        });
        out.push(DrawCmd::Text {
            x: center_x,
            y: center_y,
            size: 48.0,
            text: "PAUSED".to_string(),
            color: HUD_GREEN,
            alpha: 1.0,
        });
        out.push(DrawCmd::Text {
            x: center_x,
            y: center_y + 40.0,
            size: 24.0,
            text: "Press P to resume".to_string(),
            color: HUD_GREEN,
            alpha: 1.0,
        });
    }

    if sim.status == GameStatus::GameOver {
        out.push(DrawCmd::Rect {
            x: 0.0,
            y: 0.0,
            width: sim.width,
            height: sim.height,
            color: BLACK,
            alpha: 0.8,
        });
        out.push(DrawCmd::Text {
            x: center_x,
            y: center_y - 40.0,
            size: 48.0,
            text: "GAME OVER".to_string(),
            color: OVERLAY_RED,
            alpha: 1.0,
        });
        out.push(DrawCmd::Text {
            x: center_x,
            y: center_y + 20.0,
            size: 24.0,
            text: format!("Final Score: {}", sim.score),
            color: HUD_GREEN,
            alpha: 1.0,
        });
        out.push(DrawCmd::Text {
            x: center_x,
            y: center_y + 60.0,
            size: 24.0,
            text: "Press R to restart".to_string(),
            color: HUD_GREEN,
            alpha: 1.0,
        });
    }
}
