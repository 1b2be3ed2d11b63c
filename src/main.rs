mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use log::debug;
use rand::thread_rng;

use skystrike::compute::{GameStatus, InputState, Simulation};
use skystrike::render;
use skystrike::sinks::AudioSink;

/// Driver pacing, matching the simulation's 60 Hz tick.
const FRAME: Duration = Duration::from_millis(16);

/// World-unit playfield handed to the simulation; the rasterizer scales
/// it to whatever grid the terminal offers.
const WORLD_WIDTH: f64 = 800.0;
const WORLD_HEIGHT: f64 = 600.0;

/// A key is considered "held" if its last press/repeat event arrived
/// within this many frames. Covers terminals that don't emit key-release
/// events: the OS key-repeat rate refreshes the window before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Audio sink ────────────────────────────────────────────────────────────────

/// Audio cues routed to the log file; a real mixer would hang off the
/// same trait.
struct LogAudio;

impl AudioSink for LogAudio {
    fn on_shoot(&mut self) {
        debug!("audio: shoot");
    }
    fn on_explosion(&mut self) {
        debug!("audio: explosion");
    }
    fn on_hit(&mut self) {
        debug!("audio: hit");
    }
    fn on_powerup(&mut self) {
        debug!("audio: powerup");
    }
    fn on_enemy_shoot(&mut self) {
        debug!("audio: enemy shoot");
    }
    fn on_transform(&mut self) {
        debug!("audio: transform");
    }
    fn on_smartbomb(&mut self) {
        debug!("audio: smart bomb");
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Each frame we check which keys are
/// still fresh (within `HOLD_WINDOW`) and build the boolean input map the
/// simulation consumes, so any combination of keys works simultaneously.
///
/// Works on two classes of terminal:
/// * Keyboard-enhancement capable (kitty protocol): proper press/repeat/
///   release events, keys are removed on release.
/// * Classic terminals: only press events; keys expire naturally after
///   `HOLD_WINDOW` frames of silence, which is shorter than the OS
///   repeat interval.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut sim = Simulation::new(WORLD_WIDTH, WORLD_HEIGHT, &mut rng);
    sim.set_audio(Box::new(LogAudio));

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Drain all pending input events (non-blocking)
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if sim.status == GameStatus::GameOver =>
                        {
                            sim.reset(&mut rng);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = InputState {
            left: is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame)
                || is_held(&key_frame, &KeyCode::Char('A'), frame),
            right: is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame),
            up: is_held(&key_frame, &KeyCode::Up, frame)
                || is_held(&key_frame, &KeyCode::Char('w'), frame)
                || is_held(&key_frame, &KeyCode::Char('W'), frame),
            down: is_held(&key_frame, &KeyCode::Down, frame)
                || is_held(&key_frame, &KeyCode::Char('s'), frame)
                || is_held(&key_frame, &KeyCode::Char('S'), frame),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
            pause: is_held(&key_frame, &KeyCode::Char('p'), frame)
                || is_held(&key_frame, &KeyCode::Char('P'), frame),
            transform: is_held(&key_frame, &KeyCode::Char('t'), frame)
                || is_held(&key_frame, &KeyCode::Char('T'), frame),
            smart_bomb: is_held(&key_frame, &KeyCode::Char('b'), frame)
                || is_held(&key_frame, &KeyCode::Char('B'), frame),
        };

        let elapsed_ms = last_tick.elapsed().as_secs_f64() * 1000.0;
        last_tick = Instant::now();
        sim.frame(elapsed_ms, &input, &mut rng);

        display::render(out, &render::render(&sim), WORLD_WIDTH, WORLD_HEIGHT)?;

        let spent = frame_start.elapsed();
        if spent < FRAME {
            thread::sleep(FRAME - spent);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    if let Ok(path) = std::env::var("SKYSTRIKE_LOG") {
        let _ = simple_logging::log_to_file(path, log::LevelFilter::Debug);
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped, program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
