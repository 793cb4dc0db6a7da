//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod rect;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use state::{
    Armed, Asteroid, Bullet, DamageTier, GameEvent, GamePhase, GameState, Invader, Player,
    LEVEL_BANNER_TICKS,
};
pub use tick::{TickInput, tick};
