/// Enemy variants: a fixed per-type parameter table, sinusoidal weaving
/// descent, and a shoot cooldown for the shooter type. Type is fixed at
/// construction; health and position are the only mutable state.

use rand::Rng;

use crate::entities::{Projectile, Rect};
use crate::render::{DrawCmd, Rgb};

/// Ticks between shooter volleys; each instance starts at a random phase.
pub const SHOOT_INTERVAL: u32 = 120;

const ENEMY_SHOT_SPEED: f64 = 5.0;

const C_HEALTH_BACK: Rgb = Rgb::new(51, 51, 51);
const C_HEALTH_FRONT: Rgb = Rgb::new(0, 255, 0);
const C_DETAIL: Rgb = Rgb::new(0, 0, 0);

// ── Type table ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Shooter,
}

impl EnemyKind {
    pub fn size(&self) -> (f64, f64) {
        match self {
            EnemyKind::Basic => (50.0, 40.0),
            EnemyKind::Fast => (30.0, 30.0),
            EnemyKind::Tank => (70.0, 60.0),
            EnemyKind::Shooter => (40.0, 40.0),
        }
    }

    pub fn max_health(&self) -> i32 {
        match self {
            EnemyKind::Basic | EnemyKind::Fast => 1,
            EnemyKind::Tank => 5,
            EnemyKind::Shooter => 2,
        }
    }

    /// Score credited on destruction.
    pub fn score(&self) -> u32 {
        match self {
            EnemyKind::Basic => 100,
            EnemyKind::Fast => 200,
            EnemyKind::Tank => 1000,
            EnemyKind::Shooter => 500,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            EnemyKind::Basic => Rgb::new(255, 0, 0),
            EnemyKind::Fast => Rgb::new(255, 255, 0),
            EnemyKind::Tank => Rgb::new(255, 0, 255),
            EnemyKind::Shooter => Rgb::new(0, 255, 255),
        }
    }

    fn fall_speed(&self, rng: &mut impl Rng) -> f64 {
        match self {
            EnemyKind::Basic => 1.0 + rng.gen::<f64>() * 1.5,
            EnemyKind::Fast => 3.0 + rng.gen::<f64>() * 2.0,
            EnemyKind::Tank => 0.5 + rng.gen::<f64>() * 0.5,
            EnemyKind::Shooter => 1.0 + rng.gen::<f64>(),
        }
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub health: i32,
    pub max_health: i32,
    pub marked_for_deletion: bool,
    angle: f64,
    angular_velocity: f64,
    amplitude: f64,
    shoot_timer: u32,
}

impl Enemy {
    /// `x` is the spawn center; the bounding box is centered on it.
    pub fn new(x: f64, y: f64, kind: EnemyKind, rng: &mut impl Rng) -> Self {
        let (width, height) = kind.size();
        let speed_x = match kind {
            EnemyKind::Basic => rng.gen::<f64>() * 4.0 - 2.0,
            _ => 0.0,
        };
        Enemy {
            kind,
            x: x - width / 2.0,
            y,
            width,
            height,
            speed_x,
            speed_y: kind.fall_speed(rng),
            health: kind.max_health(),
            max_health: kind.max_health(),
            marked_for_deletion: false,
            angle: 0.0,
            angular_velocity: rng.gen::<f64>() * 0.1 - 0.05,
            amplitude: rng.gen::<f64>() * 3.0 + 1.0,
            shoot_timer: match kind {
                EnemyKind::Shooter => rng.gen_range(0..SHOOT_INTERVAL),
                _ => 0,
            },
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Advance weave and descent by one tick; returns the downward shot
    /// when the shooter cooldown elapses. Off-screen positions (below the
    /// playfield, or fully past either side) mark the enemy for deletion.
    pub fn update(
        &mut self,
        world_width: f64,
        world_height: f64,
        time_scale: f64,
    ) -> Option<Projectile> {
        self.angle += self.angular_velocity * time_scale;
        self.x += (self.speed_x + self.angle.sin() * self.amplitude) * time_scale;
        self.y += self.speed_y * time_scale;

        let shot = match self.kind {
            EnemyKind::Shooter => {
                self.shoot_timer += 1;
                if self.shoot_timer >= SHOOT_INTERVAL {
                    self.shoot_timer = 0;
                    Some(Projectile::enemy(
                        self.x + self.width / 2.0 - 2.5,
                        self.y + self.height,
                        0.0,
                        ENEMY_SHOT_SPEED,
                    ))
                } else {
                    None
                }
            }
            _ => None,
        };

        if self.y > world_height || self.x < -self.width || self.x > world_width {
            self.marked_for_deletion = true;
        }

        shot
    }

    /// Subtract `amount` from health; returns true exactly once, on the
    /// lethal hit. Further calls on a dead instance are no-ops so the
    /// caller can never double-credit a kill.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.health <= 0 {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.marked_for_deletion = true;
            true
        } else {
            false
        }
    }

    pub fn draw(&self, out: &mut Vec<DrawCmd>) {
        let color = self.kind.color();
        match self.kind {
            EnemyKind::Basic => {
                out.push(DrawCmd::Rect {
                    x: self.x,
                    y: self.y,
                    width: self.width,
                    height: self.height,
                    color,
                    alpha: 1.0,
                });
                out.push(DrawCmd::Rect {
                    x: self.x + 5.0,
                    y: self.y + 5.0,
                    width: 10.0,
                    height: 5.0,
                    color: C_DETAIL,
                    alpha: 1.0,
                });
                out.push(DrawCmd::Rect {
                    x: self.x + self.width - 15.0,
                    y: self.y + 5.0,
                    width: 10.0,
                    height: 5.0,
                    color: C_DETAIL,
                    alpha: 1.0,
                });
            }
            EnemyKind::Fast => {
                out.push(DrawCmd::Poly {
                    points: vec![
                        (self.x + self.width / 2.0, self.y),
                        (self.x + self.width, self.y + self.height),
                        (self.x, self.y + self.height),
                    ],
                    color,
                    alpha: 1.0,
                });
            }
            EnemyKind::Tank => {
                out.push(DrawCmd::Rect {
                    x: self.x,
                    y: self.y,
                    width: self.width,
                    height: self.height,
                    color,
                    alpha: 1.0,
                });
                self.draw_health_bar(out);
                out.push(DrawCmd::Rect {
                    x: self.x + 10.0,
                    y: self.y + 10.0,
                    width: 10.0,
                    height: 10.0,
                    color: C_DETAIL,
                    alpha: 1.0,
                });
                out.push(DrawCmd::Rect {
                    x: self.x + self.width - 20.0,
                    y: self.y + 10.0,
                    width: 10.0,
                    height: 10.0,
                    color: C_DETAIL,
                    alpha: 1.0,
                });
            }
            EnemyKind::Shooter => {
                out.push(DrawCmd::Poly {
                    points: vec![
                        (self.x + self.width / 2.0, self.y),
                        (self.x + self.width, self.y + self.height / 2.0),
                        (self.x + self.width / 2.0, self.y + self.height),
                        (self.x, self.y + self.height / 2.0),
                    ],
                    color,
                    alpha: 1.0,
                });
            }
        }
    }

    fn draw_health_bar(&self, out: &mut Vec<DrawCmd>) {
        let bar_width = self.width * 0.8;
        let bar_x = self.x + (self.width - bar_width) / 2.0;
        let bar_y = self.y - 10.0;

        out.push(DrawCmd::Rect {
            x: bar_x,
            y: bar_y,
            width: bar_width,
            height: 5.0,
            color: C_HEALTH_BACK,
            alpha: 1.0,
        });
        let fill = self.health.max(0) as f64 / self.max_health as f64 * bar_width;
        out.push(DrawCmd::Rect {
            x: bar_x,
            y: bar_y,
            width: fill,
            height: 5.0,
            color: C_HEALTH_FRONT,
            alpha: 1.0,
        });
    }
}
