/// The simulation core: fixed-timestep accumulation, the per-tick update
/// order, collision resolution between the entity collections, spawn
/// scheduling, and the difficulty ramp.
///
/// All randomness comes through an injected RNG handle so callers control
/// determinism (tests drive a seeded `StdRng`). Deletion is deferred:
/// entities flag themselves and each collection is swept with `retain`
/// after its update pass, never while it is being iterated.

use log::info;
use rand::Rng;

use crate::enemy::{Enemy, EnemyKind};
use crate::entities::{Explosion, Particle, PowerUp, PowerUpKind, Projectile, Starfield};
use crate::player::Player;
use crate::render::Rgb;
use crate::sinks::{AudioSink, HudSink};

// ── Tuning ───────────────────────────────────────────────────────────────────

/// One simulation tick in wall-clock milliseconds (60 ticks per second).
pub const TIME_STEP_MS: f64 = 1000.0 / 60.0;

/// Background scroll advance per tick.
pub const SCROLL_SPEED: f64 = 0.5;

pub const INITIAL_SPAWN_INTERVAL: f64 = 120.0;
const SPAWN_RESAMPLE_FLOOR: f64 = 30.0;
const SPAWN_INTERVAL_FLOOR: f64 = 20.0;
const SPAWN_Y: f64 = -50.0;

/// Ticks between difficulty increases (15 seconds of play).
pub const DIFFICULTY_RAMP_TICKS: u32 = 900;

pub const SHAKE_DURATION: u32 = 20;
pub const SLOW_MOTION_DURATION: u32 = 300;
const SLOW_MOTION_SCALE: f64 = 0.5;
const POWER_UP_DROP_CHANCE: f64 = 0.1;

// ── Input ────────────────────────────────────────────────────────────────────

/// Boolean control map read once per tick. Key bindings are the driver's
/// concern; the simulation only sees intent flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub pause: bool,
    pub transform: bool,
    pub smart_bomb: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Simulation ───────────────────────────────────────────────────────────────

pub struct Simulation {
    pub width: f64,
    pub height: f64,

    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub starfield: Starfield,

    pub score: u32,
    pub level: u32,
    pub status: GameStatus,
    pub paused: bool,
    pub ticks: u64,
    pub scroll: f64,

    pub spawn_timer: f64,
    pub spawn_interval: f64,
    pub difficulty_timer: u32,
    pub shake_timer: u32,
    pub slow_motion_timer: u32,

    accumulator: f64,
    prev_input: InputState,
    audio: Option<Box<dyn AudioSink>>,
    hud: Option<Box<dyn HudSink>>,
}

impl Simulation {
    pub fn new(width: f64, height: f64, rng: &mut impl Rng) -> Self {
        Simulation {
            width,
            height,
            player: Player::new(width, height),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            explosions: Vec::new(),
            starfield: Starfield::new(width, height, rng),
            score: 0,
            level: 1,
            status: GameStatus::Playing,
            paused: false,
            ticks: 0,
            scroll: 0.0,
            spawn_timer: 0.0,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
            difficulty_timer: 0,
            shake_timer: 0,
            slow_motion_timer: 0,
            accumulator: 0.0,
            prev_input: InputState::default(),
            audio: None,
            hud: None,
        }
    }

    pub fn set_audio(&mut self, sink: Box<dyn AudioSink>) {
        self.audio = Some(sink);
    }

    pub fn set_hud(&mut self, sink: Box<dyn HudSink>) {
        self.hud = Some(sink);
    }

    /// Accept one variable wall-clock delta from the frame driver and run
    /// zero or more fixed-size ticks, decoupling simulation rate from the
    /// display refresh rate. Rendering always uses the latest tick's
    /// state; no interpolation.
    pub fn frame(&mut self, elapsed_ms: f64, input: &InputState, rng: &mut impl Rng) {
        self.accumulator += elapsed_ms;
        while self.accumulator >= TIME_STEP_MS {
            self.step(input, rng);
            self.accumulator -= TIME_STEP_MS;
        }
    }

    /// Advance everything by exactly one tick.
    pub fn step(&mut self, input: &InputState, rng: &mut impl Rng) {
        // Pause toggling has to work while the rest of the tick is frozen
        if input.pause && !self.prev_input.pause && self.status == GameStatus::Playing {
            self.paused = !self.paused;
        }
        if self.paused || self.status == GameStatus::GameOver {
            self.prev_input = *input;
            return;
        }

        self.ticks += 1;
        self.scroll += SCROLL_SPEED;
        self.starfield.update();

        self.apply_input(input, rng);

        if self.player.update() {
            if let Some(audio) = self.audio.as_mut() {
                audio.on_transform();
            }
        }
        if self.shake_timer > 0 {
            self.shake_timer -= 1;
        }
        if self.slow_motion_timer > 0 {
            self.slow_motion_timer -= 1;
        }
        let time_scale = if self.slow_motion_timer > 0 { SLOW_MOTION_SCALE } else { 1.0 };

        let mut player_was_hit = false;
        self.update_projectiles(time_scale, &mut player_was_hit, rng);
        self.update_enemies(time_scale, &mut player_was_hit);

        if player_was_hit {
            if let Some(audio) = self.audio.as_mut() {
                audio.on_hit();
            }
            if let Some(hud) = self.hud.as_mut() {
                hud.lives(self.player.lives);
            }
            if self.player.lives == 0 {
                self.status = GameStatus::GameOver;
                info!("game over at level {} with score {}", self.level, self.score);
            }
        }

        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.marked_for_deletion);

        self.update_power_ups();

        for explosion in &mut self.explosions {
            explosion.update();
        }
        self.explosions.retain(|e| !e.marked_for_deletion);

        self.spawn_timer += 1.0;
        if self.spawn_timer > self.spawn_interval {
            self.spawn_enemy(rng);
            self.spawn_timer = 0.0;
            // Resample with level-dependent jitter
            self.spawn_interval = (90.0 - self.level as f64 * 2.0 + rng.gen::<f64>() * 30.0)
                .max(SPAWN_RESAMPLE_FLOOR);
        }

        self.difficulty_timer += 1;
        if self.difficulty_timer >= DIFFICULTY_RAMP_TICKS {
            self.difficulty_timer = 0;
            self.increase_difficulty(rng);
        }

        self.prev_input = *input;
    }

    /// Reinitialize every collection and scalar to construction values.
    /// The only way out of the game-over terminal state.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.player.reset(self.width, self.height);
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.power_ups.clear();
        self.explosions.clear();
        self.starfield = Starfield::new(self.width, self.height, rng);
        self.score = 0;
        self.level = 1;
        self.status = GameStatus::Playing;
        self.paused = false;
        self.ticks = 0;
        self.scroll = 0.0;
        self.spawn_timer = 0.0;
        self.spawn_interval = INITIAL_SPAWN_INTERVAL;
        self.difficulty_timer = 0;
        self.shake_timer = 0;
        self.slow_motion_timer = 0;
        self.accumulator = 0.0;
        self.prev_input = InputState::default();

        if let Some(hud) = self.hud.as_mut() {
            hud.score(0);
            hud.level(1);
            hud.lives(self.player.lives);
        }
        info!("session reset");
    }

    // ── Tick stages ──────────────────────────────────────────────────────────

    fn apply_input(&mut self, input: &InputState, rng: &mut impl Rng) {
        if input.left {
            self.player.move_left();
        }
        if input.right {
            self.player.move_right(self.width);
        }
        if input.up {
            self.player.move_up();
        }
        if input.down {
            self.player.move_down(self.height);
        }
        if input.fire {
            let shots = self.player.shoot();
            if !shots.is_empty() {
                if let Some(audio) = self.audio.as_mut() {
                    audio.on_shoot();
                }
                self.projectiles.extend(shots);
            }
        }
        // One-shot intents fire on the rising edge only
        if input.transform && !self.prev_input.transform {
            self.player.transform();
        }
        if input.smart_bomb && !self.prev_input.smart_bomb {
            self.fire_smart_bomb(rng);
        }
    }

    fn update_projectiles(
        &mut self,
        time_scale: f64,
        player_was_hit: &mut bool,
        rng: &mut impl Rng,
    ) {
        for projectile in &mut self.projectiles {
            let scale = if projectile.is_player { 1.0 } else { time_scale };
            projectile.update(self.width, self.height, scale, rng);
        }

        let player_rect = self.player.rect();
        let mut kills: Vec<(EnemyKind, f64, f64)> = Vec::new();
        for projectile in &mut self.projectiles {
            if projectile.marked_for_deletion {
                continue;
            }
            if projectile.is_player {
                for enemy in &mut self.enemies {
                    if enemy.marked_for_deletion {
                        continue;
                    }
                    if projectile.rect().overlaps(&enemy.rect()) {
                        projectile.marked_for_deletion = true;
                        if enemy.take_damage(projectile.damage) {
                            kills.push((
                                enemy.kind,
                                enemy.x + enemy.width / 2.0,
                                enemy.y + enemy.height / 2.0,
                            ));
                        }
                        // First collision wins
                        break;
                    }
                }
            } else if !self.player.is_invincible && projectile.rect().overlaps(&player_rect) {
                projectile.marked_for_deletion = true;
                if self.player.take_damage() {
                    *player_was_hit = true;
                }
            }
        }
        self.projectiles.retain(|p| !p.marked_for_deletion);

        for (kind, x, y) in kills {
            self.credit_kill(kind, x, y, rng);
            if rng.gen_bool(POWER_UP_DROP_CHANCE) {
                self.power_ups.push(PowerUp::new(x, y, PowerUpKind::roll(rng)));
            }
        }
    }

    fn update_enemies(&mut self, time_scale: f64, player_was_hit: &mut bool) {
        let mut enemy_shots: Vec<Projectile> = Vec::new();
        for enemy in &mut self.enemies {
            if let Some(shot) = enemy.update(self.width, self.height, time_scale) {
                enemy_shots.push(shot);
            }
        }
        if !enemy_shots.is_empty() {
            if let Some(audio) = self.audio.as_mut() {
                for _ in &enemy_shots {
                    audio.on_enemy_shoot();
                }
            }
            self.projectiles.extend(enemy_shots);
        }

        if !self.player.is_invincible {
            let player_rect = self.player.rect();
            for enemy in &mut self.enemies {
                if enemy.marked_for_deletion {
                    continue;
                }
                if enemy.rect().overlaps(&player_rect) {
                    if self.player.take_damage() {
                        // Rammed enemy is destroyed without score credit
                        enemy.marked_for_deletion = true;
                        *player_was_hit = true;
                    }
                    break;
                }
            }
        }
        self.enemies.retain(|e| !e.marked_for_deletion);
    }

    fn update_power_ups(&mut self) {
        let player_rect = self.player.rect();
        let mut collected: Vec<PowerUpKind> = Vec::new();
        for power_up in &mut self.power_ups {
            power_up.update(self.height);
            if power_up.marked_for_deletion {
                continue;
            }
            if power_up.rect().overlaps(&player_rect) {
                power_up.marked_for_deletion = true;
                collected.push(power_up.kind);
            }
        }
        self.power_ups.retain(|p| !p.marked_for_deletion);

        for kind in collected {
            match kind {
                PowerUpKind::SlowMotion => self.slow_motion_timer = SLOW_MOTION_DURATION,
                other => self.player.apply_power_up(other),
            }
            if let Some(audio) = self.audio.as_mut() {
                audio.on_powerup();
            }
            if kind == PowerUpKind::ExtraLife {
                if let Some(hud) = self.hud.as_mut() {
                    hud.lives(self.player.lives);
                }
            }
        }
    }

    // ── Kills, spawning, difficulty ──────────────────────────────────────────

    fn credit_kill(&mut self, kind: EnemyKind, x: f64, y: f64, rng: &mut impl Rng) {
        self.score += kind.score();
        if let Some(hud) = self.hud.as_mut() {
            hud.score(self.score);
        }
        if let Some(audio) = self.audio.as_mut() {
            audio.on_explosion();
        }
        self.spawn_explosion(kind, x, y, rng);
    }

    fn spawn_explosion(&mut self, kind: EnemyKind, x: f64, y: f64, rng: &mut impl Rng) {
        let (count, size, speed, primary, secondary) = match kind {
            EnemyKind::Tank => (50, 4.0, 3.0, Rgb::new(255, 0, 255), Rgb::new(255, 153, 255)),
            EnemyKind::Shooter => (30, 3.0, 2.5, Rgb::new(0, 255, 255), Rgb::new(153, 255, 255)),
            EnemyKind::Fast => (20, 2.0, 2.0, Rgb::new(255, 255, 0), Rgb::new(255, 255, 153)),
            EnemyKind::Basic => (30, 3.0, 2.0, Rgb::new(255, 0, 0), Rgb::new(255, 153, 153)),
        };
        for _ in 0..count {
            let angle = rng.gen::<f64>() * std::f64::consts::TAU;
            let magnitude = rng.gen::<f64>() * speed + 1.0;
            let color = if rng.gen::<f64>() > 0.5 { primary } else { secondary };
            self.particles.push(Particle::new(
                x,
                y,
                rng.gen::<f64>() * size + 1.0,
                color,
                angle.cos() * magnitude,
                angle.sin() * magnitude,
                rng.gen::<f64>() * 0.2 - 0.1,
                rng.gen::<f64>() * 0.2 - 0.1,
                0.02,
                rng,
            ));
        }
        self.explosions.push(Explosion::new(x, y, size * 10.0, primary));
    }

    /// Spawn one enemy at a random x, type drawn from the level-tiered
    /// weighting table with a single uniform sample.
    pub fn spawn_enemy(&mut self, rng: &mut impl Rng) {
        let x = rng.gen::<f64>() * (self.width - 50.0) + 25.0;
        let kind = self.roll_enemy_kind(rng);
        self.enemies.push(Enemy::new(x, SPAWN_Y, kind, rng));
    }

    pub fn roll_enemy_kind(&self, rng: &mut impl Rng) -> EnemyKind {
        let roll = rng.gen::<f64>();
        if self.level < 3 {
            EnemyKind::Basic
        } else if self.level < 6 {
            if roll < 0.8 {
                EnemyKind::Basic
            } else {
                EnemyKind::Fast
            }
        } else if self.level < 10 {
            if roll < 0.6 {
                EnemyKind::Basic
            } else if roll < 0.9 {
                EnemyKind::Fast
            } else {
                EnemyKind::Tank
            }
        } else if roll < 0.5 {
            EnemyKind::Basic
        } else if roll < 0.8 {
            EnemyKind::Fast
        } else if roll < 0.95 {
            EnemyKind::Tank
        } else {
            EnemyKind::Shooter
        }
    }

    fn increase_difficulty(&mut self, rng: &mut impl Rng) {
        self.level += 1;
        if let Some(hud) = self.hud.as_mut() {
            hud.level(self.level);
        }
        self.spawn_interval = (self.spawn_interval - 2.0).max(SPAWN_INTERVAL_FLOOR);
        info!("difficulty up: level {}", self.level);

        // Every 5th level opens with a two-enemy wave
        if self.level % 5 == 0 {
            self.spawn_enemy(rng);
            self.spawn_enemy(rng);
        }
    }

    /// Consume one bomb: clear every live enemy and enemy shot, credit
    /// each cleared enemy's score, and kick off the screen shake.
    fn fire_smart_bomb(&mut self, rng: &mut impl Rng) {
        if !self.player.use_smart_bomb() {
            return;
        }
        let cleared: Vec<(EnemyKind, f64, f64)> = self
            .enemies
            .iter()
            .filter(|e| !e.marked_for_deletion)
            .map(|e| (e.kind, e.x + e.width / 2.0, e.y + e.height / 2.0))
            .collect();
        info!("smart bomb cleared {} enemies", cleared.len());

        self.enemies.clear();
        self.projectiles.retain(|p| p.is_player);
        for (kind, x, y) in cleared {
            self.score += kind.score();
            self.spawn_explosion(kind, x, y, rng);
        }
        self.shake_timer = SHAKE_DURATION;

        if let Some(hud) = self.hud.as_mut() {
            hud.score(self.score);
        }
        if let Some(audio) = self.audio.as_mut() {
            audio.on_smartbomb();
        }
    }
}
