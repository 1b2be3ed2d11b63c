//! Core simulation for a vertically-scrolling shooter.
//!
//! The library holds the fixed-timestep simulation, entity model, and the
//! declarative draw-command renderer. Terminal I/O, key bindings, and the
//! frame driver live in the binary; audio and HUD updates go through the
//! optional sinks in [`sinks`].

pub mod compute;
pub mod enemy;
pub mod entities;
pub mod player;
pub mod render;
pub mod sinks;
