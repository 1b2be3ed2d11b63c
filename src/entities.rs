/// Shared geometry and the passive simulation objects: projectiles,
/// particles, explosion rings, power-ups, and the scrolling starfield.
/// No I/O happens here; all randomness comes through an injected RNG
/// handle so callers control determinism.

use rand::Rng;

use crate::render::{DrawCmd, Rgb};

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box shared by every collidable entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    /// Strict-overlap test: rectangles sharing only an edge do NOT collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

const PLAYER_SHOT_WIDTH: f64 = 5.0;
const PLAYER_SHOT_HEIGHT: f64 = 15.0;
const ENEMY_SHOT_WIDTH: f64 = 8.0;
const ENEMY_SHOT_HEIGHT: f64 = 8.0;

/// A new trail point is emitted every this many ticks.
const TRAIL_INTERVAL: u32 = 2;

const C_SHOT_TOP: Rgb = Rgb::new(0, 255, 255);
const C_SHOT_BOTTOM: Rgb = Rgb::new(0, 102, 255);
const C_TRAIL_PLAYER: Rgb = Rgb::new(0, 255, 255);
const C_TRAIL_ENEMY: Rgb = Rgb::new(255, 0, 255);
const C_ENEMY_SHOT: Rgb = Rgb::new(255, 0, 255);

/// One fading point of a projectile's cosmetic trail.
#[derive(Clone, Debug)]
struct TrailPoint {
    x: f64,
    y: f64,
    size: f64,
    alpha: f64,
    speed_x: f64,
    speed_y: f64,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub is_player: bool,
    pub damage: i32,
    pub marked_for_deletion: bool,
    trail: Vec<TrailPoint>,
    trail_timer: u32,
}

impl Projectile {
    pub fn player(x: f64, y: f64, speed_x: f64, speed_y: f64) -> Self {
        Projectile {
            x,
            y,
            width: PLAYER_SHOT_WIDTH,
            height: PLAYER_SHOT_HEIGHT,
            speed_x,
            speed_y,
            is_player: true,
            damage: 1,
            marked_for_deletion: false,
            trail: Vec::new(),
            trail_timer: 0,
        }
    }

    pub fn enemy(x: f64, y: f64, speed_x: f64, speed_y: f64) -> Self {
        Projectile {
            x,
            y,
            width: ENEMY_SHOT_WIDTH,
            height: ENEMY_SHOT_HEIGHT,
            speed_x,
            speed_y,
            is_player: false,
            damage: 1,
            marked_for_deletion: false,
            trail: Vec::new(),
            trail_timer: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Advance one tick. `time_scale` is 1.0 normally; slow motion passes
    /// a smaller factor for enemy-owned projectiles only.
    pub fn update(&mut self, width: f64, height: f64, time_scale: f64, rng: &mut impl Rng) {
        self.x += self.speed_x * time_scale;
        self.y += self.speed_y * time_scale;

        self.trail_timer += 1;
        if self.trail_timer >= TRAIL_INTERVAL {
            self.trail_timer = 0;
            self.trail.push(TrailPoint {
                x: self.x + self.width / 2.0,
                y: self.y + self.height / 2.0,
                size: rng.gen_range(2.0..5.0),
                alpha: 0.7,
                speed_x: (rng.gen::<f64>() - 0.5) * 0.5,
                speed_y: (rng.gen::<f64>() - 0.5) * 0.5,
            });
        }

        // Each existing point fades and shrinks independently
        for point in &mut self.trail {
            point.x += point.speed_x;
            point.y += point.speed_y;
            point.alpha -= 0.05;
            point.size *= 0.95;
        }
        self.trail.retain(|point| point.alpha > 0.1);

        if self.y < 0.0 || self.y > height || self.x < 0.0 || self.x > width {
            self.marked_for_deletion = true;
        }
    }

    pub fn draw(&self, out: &mut Vec<DrawCmd>) {
        let trail_color = if self.is_player { C_TRAIL_PLAYER } else { C_TRAIL_ENEMY };
        for point in &self.trail {
            out.push(DrawCmd::Circle {
                x: point.x,
                y: point.y,
                radius: point.size,
                color: trail_color,
                alpha: point.alpha,
            });
        }

        if self.is_player {
            out.push(DrawCmd::GradientRect {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                top: C_SHOT_TOP,
                bottom: C_SHOT_BOTTOM,
                alpha: 1.0,
            });
            out.push(DrawCmd::Glow {
                x: self.x + self.width / 2.0,
                y: self.y + self.height / 2.0,
                radius: self.height,
                color: C_SHOT_TOP,
                alpha: 0.5,
            });
        } else {
            let radius = self.width.max(self.height) / 2.0;
            let cx = self.x + self.width / 2.0;
            let cy = self.y + self.height / 2.0;
            out.push(DrawCmd::Circle { x: cx, y: cy, radius, color: C_ENEMY_SHOT, alpha: 1.0 });
            out.push(DrawCmd::Glow {
                x: cx,
                y: cy,
                radius: radius * 1.5,
                color: C_ENEMY_SHOT,
                alpha: 0.3,
            });
        }
    }
}

// ── Particles ────────────────────────────────────────────────────────────────

const PARTICLE_FRICTION: f64 = 0.98;
const PARTICLE_FADE: f64 = 0.01;

/// Purely cosmetic debris. Velocity decays by friction, gravity pulls the
/// vertical component, alpha fades linearly to zero.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Rgb,
    pub speed_x: f64,
    pub speed_y: f64,
    pub alpha: f64,
    pub marked_for_deletion: bool,
    rotation: f64,
    rotation_speed: f64,
    scale: f64,
    scale_speed: f64,
    gravity: f64,
}

impl Particle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x: f64,
        y: f64,
        size: f64,
        color: Rgb,
        speed_x: f64,
        speed_y: f64,
        rotation_speed: f64,
        scale_speed: f64,
        gravity: f64,
        rng: &mut impl Rng,
    ) -> Self {
        Particle {
            x,
            y,
            size,
            color,
            speed_x,
            speed_y,
            alpha: 1.0,
            marked_for_deletion: false,
            rotation: rng.gen::<f64>() * std::f64::consts::TAU,
            rotation_speed,
            scale: 1.0,
            scale_speed,
            gravity,
        }
    }

    pub fn update(&mut self) {
        self.x += self.speed_x;
        self.y += self.speed_y;

        self.speed_x *= PARTICLE_FRICTION;
        self.speed_y *= PARTICLE_FRICTION;
        self.speed_y += self.gravity;

        self.rotation += self.rotation_speed;
        self.scale += self.scale_speed;

        self.alpha -= PARTICLE_FADE;
        if self.alpha <= 0.0 {
            self.marked_for_deletion = true;
        }
    }

    pub fn draw(&self, out: &mut Vec<DrawCmd>) {
        // Square rotated and scaled around its center
        let half = (self.size * self.scale.max(0.0)) / 2.0;
        let (sin, cos) = self.rotation.sin_cos();
        let points = [(-half, -half), (half, -half), (half, half), (-half, half)]
            .iter()
            .map(|(dx, dy)| (self.x + dx * cos - dy * sin, self.y + dx * sin + dy * cos))
            .collect();
        out.push(DrawCmd::Poly { points, color: self.color, alpha: self.alpha.max(0.0) });
    }
}

// ── Explosion rings ──────────────────────────────────────────────────────────

/// Brief expanding ring left behind by a destroyed enemy.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub max_radius: f64,
    pub color: Rgb,
    pub alpha: f64,
    pub marked_for_deletion: bool,
}

impl Explosion {
    pub fn new(x: f64, y: f64, max_radius: f64, color: Rgb) -> Self {
        Explosion {
            x,
            y,
            radius: 2.0,
            max_radius,
            color,
            alpha: 1.0,
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self) {
        self.radius = (self.radius + self.max_radius / 8.0).min(self.max_radius);
        self.alpha -= 0.06;
        if self.alpha <= 0.0 {
            self.marked_for_deletion = true;
        }
    }

    pub fn draw(&self, out: &mut Vec<DrawCmd>) {
        let alpha = self.alpha.max(0.0);
        out.push(DrawCmd::Ring {
            x: self.x,
            y: self.y,
            radius: self.radius,
            color: self.color,
            alpha,
        });
        out.push(DrawCmd::Glow {
            x: self.x,
            y: self.y,
            radius: self.radius,
            color: self.color,
            alpha: alpha * 0.5,
        });
    }
}

// ── Power-ups ────────────────────────────────────────────────────────────────

pub const POWER_UP_SIZE: f64 = 40.0;
const POWER_UP_FALL_SPEED: f64 = 1.5;
const POWER_UP_PULSE_STEP: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// +1 life, clamped at the player's maximum.
    ExtraLife,
    /// +1 weapon level, clamped at the maximum.
    Weapon,
    /// Timed damage immunity ring.
    Shield,
    /// Timed half-speed for enemies and enemy shots.
    SlowMotion,
    /// Timed movement-speed multiplier.
    Speed,
    /// +1 smart bomb in inventory.
    SmartBomb,
}

impl PowerUpKind {
    /// One uniform sample picks the dropped kind, equal weights.
    pub fn roll(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..6) {
            0 => PowerUpKind::ExtraLife,
            1 => PowerUpKind::Weapon,
            2 => PowerUpKind::Shield,
            3 => PowerUpKind::SlowMotion,
            4 => PowerUpKind::Speed,
            _ => PowerUpKind::SmartBomb,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            PowerUpKind::ExtraLife => Rgb::new(0, 255, 0),
            PowerUpKind::Weapon => Rgb::new(0, 255, 255),
            PowerUpKind::Shield => Rgb::new(0, 0, 255),
            PowerUpKind::SlowMotion => Rgb::new(255, 0, 255),
            PowerUpKind::Speed => Rgb::new(255, 255, 0),
            PowerUpKind::SmartBomb => Rgb::new(255, 128, 0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::ExtraLife => "1UP",
            PowerUpKind::Weapon => "POW",
            PowerUpKind::Shield => "SHLD",
            PowerUpKind::SlowMotion => "SLOW",
            PowerUpKind::Speed => "SPD",
            PowerUpKind::SmartBomb => "BOMB",
        }
    }
}

/// A falling pickup; the effect is applied exactly once on player contact.
#[derive(Clone, Debug)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub marked_for_deletion: bool,
    angle: f64,
    pulse: f64,
}

impl PowerUp {
    /// Centered on the given point (usually a dead enemy's center).
    pub fn new(center_x: f64, center_y: f64, kind: PowerUpKind) -> Self {
        PowerUp {
            kind,
            x: center_x - POWER_UP_SIZE / 2.0,
            y: center_y - POWER_UP_SIZE / 2.0,
            width: POWER_UP_SIZE,
            height: POWER_UP_SIZE,
            speed: POWER_UP_FALL_SPEED,
            marked_for_deletion: false,
            angle: 0.0,
            pulse: 1.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn update(&mut self, height: f64) {
        self.y += self.speed;
        self.angle += POWER_UP_PULSE_STEP;
        self.pulse = 1.0 + self.angle.sin() * 0.1;
        if self.y > height {
            self.marked_for_deletion = true;
        }
    }

    pub fn draw(&self, out: &mut Vec<DrawCmd>) {
        let cx = self.x + self.width / 2.0;
        let cy = self.y + self.height / 2.0;
        let color = self.kind.color();

        out.push(DrawCmd::Glow {
            x: cx,
            y: cy,
            radius: self.width / 2.0 * 1.5,
            color,
            alpha: 0.3,
        });
        out.push(DrawCmd::Circle {
            x: cx,
            y: cy,
            radius: self.width / 2.0 * self.pulse,
            color,
            alpha: 0.8,
        });
        out.push(DrawCmd::Text {
            x: cx,
            y: cy,
            size: 10.0,
            text: self.kind.label().to_string(),
            color: Rgb::new(255, 255, 255),
            alpha: 1.0,
        });
    }
}

// ── Starfield ────────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 200;

#[derive(Clone, Debug)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
}

/// Scrolling background stars, generated once per session.
#[derive(Clone, Debug)]
pub struct Starfield {
    pub stars: Vec<Star>,
    height: f64,
}

impl Starfield {
    pub fn new(width: f64, height: f64, rng: &mut impl Rng) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.gen::<f64>() * width,
                y: rng.gen::<f64>() * height,
                size: rng.gen::<f64>() * 1.5,
                speed: 0.1 + rng.gen::<f64>() * 0.5,
            })
            .collect();
        Starfield { stars, height }
    }

    pub fn update(&mut self) {
        for star in &mut self.stars {
            star.y += star.speed;
            if star.y > self.height {
                star.y = 0.0;
            }
        }
    }

    pub fn draw(&self, out: &mut Vec<DrawCmd>) {
        for star in &self.stars {
            out.push(DrawCmd::Circle {
                x: star.x,
                y: star.y,
                radius: star.size,
                color: Rgb::new(255, 255, 255),
                alpha: 1.0,
            });
        }
    }
}
