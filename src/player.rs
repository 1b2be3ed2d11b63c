/// The controlled ship: a dual-mode state machine (aircraft and tank
/// profiles with a timed transformation between them), weapon leveling,
/// timed status effects, and the smart-bomb inventory. Exactly one
/// instance exists per session; the simulation owns it directly.

use log::debug;

use crate::entities::{PowerUpKind, Projectile, Rect};
use crate::render::{DrawCmd, Rgb};

pub const TRANSFORM_DURATION: u32 = 30;
pub const INVINCIBLE_DURATION: u32 = 180;
pub const SHIELD_DURATION: u32 = 300;
pub const SPEED_BOOST_DURATION: u32 = 600;
pub const SPEED_BOOST_FACTOR: f64 = 1.5;
pub const START_LIVES: u32 = 3;
pub const MAX_LIVES: u32 = 5;
pub const MAX_WEAPON_LEVEL: u8 = 4;

const C_SHIP: Rgb = Rgb::new(0, 255, 0);
const C_SHIP_HIT: Rgb = Rgb::new(255, 0, 0);
const C_SHIP_DARK: Rgb = Rgb::new(0, 170, 0);
const C_METAL: Rgb = Rgb::new(102, 102, 102);
const C_TREADS: Rgb = Rgb::new(51, 51, 51);
const C_GLOW: Rgb = Rgb::new(255, 255, 0);
const C_SHIELD: Rgb = Rgb::new(0, 255, 255);

// ── Modes ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipMode {
    Aircraft,
    Tank,
}

/// Per-mode dimension/speed/cooldown table, reloaded on every mode flip.
#[derive(Clone, Copy, Debug)]
pub struct ModeProfile {
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub shoot_cooldown: u32,
    pub shot_speed: f64,
}

impl ShipMode {
    pub fn profile(&self) -> ModeProfile {
        match self {
            ShipMode::Aircraft => ModeProfile {
                width: 50.0,
                height: 40.0,
                speed: 6.0,
                shoot_cooldown: 12,
                shot_speed: -12.0,
            },
            ShipMode::Tank => ModeProfile {
                width: 60.0,
                height: 50.0,
                speed: 3.0,
                shoot_cooldown: 8,
                shot_speed: -8.0,
            },
        }
    }

    pub fn other(&self) -> ShipMode {
        match self {
            ShipMode::Aircraft => ShipMode::Tank,
            ShipMode::Tank => ShipMode::Aircraft,
        }
    }
}

// ── Timed effects and inventory ──────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct ActiveEffects {
    pub speed_boost: bool,
    pub speed_boost_timer: u32,
    pub shield: bool,
    pub shield_timer: u32,
    pub smart_bombs: u32,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub mode: ShipMode,
    pub is_transforming: bool,
    pub transform_timer: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub shoot_cooldown: u32,
    pub lives: u32,
    pub is_invincible: bool,
    pub invincible_timer: u32,
    pub weapon_level: u8,
    pub effects: ActiveEffects,
    engine_glow: f64,
}

impl Player {
    pub fn new(world_width: f64, world_height: f64) -> Self {
        let profile = ShipMode::Aircraft.profile();
        Player {
            mode: ShipMode::Aircraft,
            is_transforming: false,
            transform_timer: 0,
            x: world_width / 2.0 - profile.width / 2.0,
            y: world_height - profile.height - 20.0,
            width: profile.width,
            height: profile.height,
            speed: profile.speed,
            shoot_cooldown: 0,
            lives: START_LIVES,
            is_invincible: false,
            invincible_timer: 0,
            weapon_level: 1,
            effects: ActiveEffects::default(),
            engine_glow: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn reload_profile(&mut self) {
        let profile = self.mode.profile();
        self.width = profile.width;
        self.height = profile.height;
        self.speed = profile.speed;
    }

    /// Advance all per-tick timers. Returns true when a transformation
    /// completed this tick (the audio sink's cue).
    pub fn update(&mut self) -> bool {
        let mut transformed = false;

        if self.is_transforming {
            self.transform_timer += 1;
            if self.transform_timer >= TRANSFORM_DURATION {
                self.is_transforming = false;
                self.transform_timer = 0;
                self.mode = self.mode.other();
                self.reload_profile();
                transformed = true;
                debug!("transformation complete, now {:?}", self.mode);
            }
        }

        if self.shoot_cooldown > 0 {
            self.shoot_cooldown -= 1;
        }

        if self.is_invincible {
            self.invincible_timer += 1;
            if self.invincible_timer >= INVINCIBLE_DURATION {
                self.is_invincible = false;
                self.invincible_timer = 0;
            }
        }

        if self.effects.speed_boost {
            self.effects.speed_boost_timer = self.effects.speed_boost_timer.saturating_sub(1);
            if self.effects.speed_boost_timer == 0 {
                self.effects.speed_boost = false;
                self.speed = self.mode.profile().speed;
            }
        }

        if self.effects.shield {
            self.effects.shield_timer = self.effects.shield_timer.saturating_sub(1);
            if self.effects.shield_timer == 0 {
                self.effects.shield = false;
            }
        }

        self.engine_glow += 0.1;
        if self.engine_glow > std::f64::consts::TAU {
            self.engine_glow = 0.0;
        }

        transformed
    }

    // ── Movement (clamped to the playfield) ──────────────────────────────────

    pub fn move_left(&mut self) {
        self.x = (self.x - self.speed).max(0.0);
    }

    pub fn move_right(&mut self, bound: f64) {
        self.x = (self.x + self.speed).min(bound - self.width);
    }

    pub fn move_up(&mut self) {
        self.y = (self.y - self.speed).max(0.0);
    }

    pub fn move_down(&mut self, bound: f64) {
        self.y = (self.y + self.speed).min(bound - self.height);
    }

    // ── Weapons ──────────────────────────────────────────────────────────────

    /// Spawn the weapon-level fan, or nothing while cooling down or
    /// mid-transformation. Resets the cooldown to the mode's constant.
    pub fn shoot(&mut self) -> Vec<Projectile> {
        if self.shoot_cooldown > 0 || self.is_transforming {
            return Vec::new();
        }
        let profile = self.mode.profile();
        let center_x = self.x + self.width / 2.0;

        // (x offset from center, horizontal speed) per fan member
        let pattern: &[(f64, f64)] = match self.weapon_level {
            1 => &[(-2.5, 0.0)],
            2 => &[(-8.0, -1.0), (3.0, 1.0)],
            3 => &[(-10.0, -2.0), (-2.5, 0.0), (5.0, 2.0)],
            _ => &[(-15.0, -3.0), (-5.0, -1.0), (2.5, 1.0), (12.0, 3.0)],
        };

        self.shoot_cooldown = profile.shoot_cooldown;
        pattern
            .iter()
            .map(|&(dx, vx)| Projectile::player(center_x + dx, self.y, vx, profile.shot_speed))
            .collect()
    }

    /// Begin the timed mode flip; a no-op while one is already running.
    pub fn transform(&mut self) {
        if !self.is_transforming {
            self.is_transforming = true;
            self.transform_timer = 0;
        }
    }

    /// Returns true if a bomb was available and consumed.
    pub fn use_smart_bomb(&mut self) -> bool {
        if self.effects.smart_bombs > 0 {
            self.effects.smart_bombs -= 1;
            true
        } else {
            false
        }
    }

    // ── Damage and power-ups ─────────────────────────────────────────────────

    /// Returns true if damage was applied. A no-op while invincible or
    /// shielded; otherwise costs one life and opens the invincibility
    /// window. Lives never go below zero.
    pub fn take_damage(&mut self) -> bool {
        if self.is_invincible || self.effects.shield {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.is_invincible = true;
        self.invincible_timer = 0;
        true
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::ExtraLife => {
                self.lives = (self.lives + 1).min(MAX_LIVES);
            }
            PowerUpKind::Weapon => {
                self.weapon_level = (self.weapon_level + 1).min(MAX_WEAPON_LEVEL);
            }
            PowerUpKind::Shield => {
                self.effects.shield = true;
                self.effects.shield_timer = SHIELD_DURATION;
            }
            PowerUpKind::Speed => {
                self.effects.speed_boost = true;
                self.effects.speed_boost_timer = SPEED_BOOST_DURATION;
                self.speed = self.mode.profile().speed * SPEED_BOOST_FACTOR;
            }
            PowerUpKind::SmartBomb => {
                self.effects.smart_bombs += 1;
            }
            // Timed world effect, owned by the simulation
            PowerUpKind::SlowMotion => {}
        }
    }

    pub fn reset(&mut self, world_width: f64, world_height: f64) {
        *self = Player::new(world_width, world_height);
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    pub fn draw(&self, ticks: u64, out: &mut Vec<DrawCmd>) {
        // Flicker while invincible: hidden every other 6-tick window
        let visible = !self.is_invincible || (ticks / 6) % 2 == 0;
        if visible {
            if self.is_transforming {
                let progress = self.transform_timer as f64 / TRANSFORM_DURATION as f64;
                if progress < 0.5 {
                    self.draw_aircraft(out);
                    out.push(DrawCmd::Rect {
                        x: self.x - 5.0,
                        y: self.y + self.height - 5.0,
                        width: self.width + 10.0,
                        height: 10.0,
                        color: C_METAL,
                        alpha: 1.0,
                    });
                } else {
                    self.draw_tank(out);
                }
            } else {
                match self.mode {
                    ShipMode::Aircraft => self.draw_aircraft(out),
                    ShipMode::Tank => self.draw_tank(out),
                }
            }
        }

        if self.effects.shield {
            let alpha = self.effects.shield_timer as f64 / SHIELD_DURATION as f64 * 0.3;
            out.push(DrawCmd::Ring {
                x: self.x + self.width / 2.0,
                y: self.y + self.height / 2.0,
                radius: self.width.max(self.height) * 0.7,
                color: C_SHIELD,
                alpha,
            });
        }

        self.draw_weapon_level(out);
    }

    fn body_color(&self) -> Rgb {
        if self.is_invincible {
            C_SHIP_HIT
        } else {
            C_SHIP
        }
    }

    fn draw_aircraft(&self, out: &mut Vec<DrawCmd>) {
        let color = self.body_color();
        out.push(DrawCmd::Rect {
            x: self.x + self.width * 0.3,
            y: self.y,
            width: self.width * 0.4,
            height: self.height,
            color,
            alpha: 1.0,
        });
        // Wings
        out.push(DrawCmd::Poly {
            points: vec![
                (self.x, self.y + self.height * 0.3),
                (self.x + self.width * 0.3, self.y + self.height * 0.3),
                (self.x + self.width * 0.3, self.y + self.height * 0.7),
                (self.x, self.y + self.height * 0.7),
            ],
            color,
            alpha: 1.0,
        });
        out.push(DrawCmd::Poly {
            points: vec![
                (self.x + self.width * 0.7, self.y + self.height * 0.3),
                (self.x + self.width, self.y + self.height * 0.3),
                (self.x + self.width, self.y + self.height * 0.7),
                (self.x + self.width * 0.7, self.y + self.height * 0.7),
            ],
            color,
            alpha: 1.0,
        });
        // Cockpit
        out.push(DrawCmd::Rect {
            x: self.x + self.width * 0.4,
            y: self.y + self.height * 0.2,
            width: self.width * 0.2,
            height: self.height * 0.3,
            color: C_SHIP_DARK,
            alpha: 1.0,
        });
        // Engine glow pulse
        let glow_alpha = (self.engine_glow.sin() + 1.0) * 0.3 + 0.2;
        out.push(DrawCmd::Rect {
            x: self.x + self.width * 0.35,
            y: self.y + self.height - 5.0,
            width: self.width * 0.3,
            height: 8.0,
            color: C_GLOW,
            alpha: glow_alpha,
        });
    }

    fn draw_tank(&self, out: &mut Vec<DrawCmd>) {
        out.push(DrawCmd::Rect {
            x: self.x + self.width * 0.2,
            y: self.y,
            width: self.width * 0.6,
            height: self.height,
            color: self.body_color(),
            alpha: 1.0,
        });
        // Treads
        out.push(DrawCmd::Rect {
            x: self.x,
            y: self.y + self.height * 0.7,
            width: self.width,
            height: self.height * 0.3,
            color: C_TREADS,
            alpha: 1.0,
        });
        // Turret base
        out.push(DrawCmd::Rect {
            x: self.x + self.width * 0.35,
            y: self.y + self.height * 0.3,
            width: self.width * 0.3,
            height: self.height * 0.4,
            color: C_SHIP_DARK,
            alpha: 1.0,
        });
        // Cannon
        out.push(DrawCmd::Rect {
            x: self.x + self.width * 0.4,
            y: self.y - 5.0,
            width: self.width * 0.2,
            height: 15.0,
            color: C_METAL,
            alpha: 1.0,
        });
    }

    fn draw_weapon_level(&self, out: &mut Vec<DrawCmd>) {
        let bar_width = 20.0;
        let bar_x = self.x + self.width / 2.0 - bar_width / 2.0;
        let bar_y = self.y - 12.0;

        out.push(DrawCmd::Rect {
            x: bar_x,
            y: bar_y,
            width: bar_width,
            height: 4.0,
            color: C_TREADS,
            alpha: 1.0,
        });
        let fill = self.weapon_level as f64 / MAX_WEAPON_LEVEL as f64 * bar_width;
        out.push(DrawCmd::Rect {
            x: bar_x,
            y: bar_y,
            width: fill,
            height: 4.0,
            color: C_SHIP,
            alpha: 1.0,
        });
        out.push(DrawCmd::Text {
            x: self.x + self.width / 2.0,
            y: bar_y - 6.0,
            size: 8.0,
            text: format!("L{}", self.weapon_level),
            color: Rgb::new(255, 255, 255),
            alpha: 1.0,
        });
    }
}
