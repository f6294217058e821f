//! Gopher Jump: a side-scrolling platformer for the terminal.
//!
//! The library holds the deterministic simulation (entities, physics, the
//! mode state machine) plus the startup pieces it is configured with; the
//! binary owns the terminal, the frame clock and the renderer.

pub mod assets;
pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod layout;
