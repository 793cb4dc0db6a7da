//! Pixel Invaders - a fixed-shooter arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `renderer`: Canvas 2D rendering
//! - `audio`: Web Audio sound effects and background music
//! - `highscores`: Persistent scoreboard
//! - `settings`: Persistent audio preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Cannon defaults - the cannon slides along the bottom of the arena
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Distance from the arena bottom to the cannon's top edge
    pub const PLAYER_Y_OFFSET: f32 = 30.0;
    /// Horizontal pixels per tick while a move key is held
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_START_LIVES: u8 = 3;
    /// Ticks between player shots (400 ms at 60 Hz)
    pub const FIRE_COOLDOWN_TICKS: u64 = 24;

    /// Projectile defaults
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    /// Vertical pixels per tick, both directions
    pub const BULLET_SPEED: f32 = 5.0;

    /// Invader formation (rows x cols grid)
    pub const INVADER_ROWS: usize = 3;
    pub const INVADER_COLS: usize = 10;
    pub const INVADER_WIDTH: f32 = 30.0;
    pub const INVADER_HEIGHT: f32 = 20.0;
    /// Spacing between formation columns and rows
    pub const INVADER_COL_STEP: f32 = 40.0;
    pub const INVADER_ROW_STEP: f32 = 30.0;
    /// Offset of the formation's top-left corner from the arena origin
    pub const INVADER_GRID_ORIGIN: f32 = 20.0;
    /// Formation speed at level 1, multiplied on every wave clear
    pub const INVADER_START_SPEED: f32 = 0.2;
    pub const INVADER_SPEED_FACTOR: f32 = 1.5;
    /// Vertical drop when the formation reverses off a wall
    pub const INVADER_DROP: f32 = 20.0;
    /// Points awarded per invader destroyed
    pub const INVADER_SCORE: u64 = 10;

    /// Ticks between enemy volleys at level 1, tightened on every wave clear
    pub const FIRE_THRESHOLD_START: f32 = 150.0;
    pub const FIRE_THRESHOLD_FACTOR: f32 = 0.67;
    /// The volley interval never tightens below this
    pub const FIRE_THRESHOLD_FLOOR: f32 = 50.0;

    /// Bunker defaults - a row of destructible asteroids shields the cannon
    pub const ASTEROID_COUNT: usize = 10;
    /// Bunker edge length, subdivided into ASTEROID_GRID cells per side
    pub const ASTEROID_SIZE: f32 = 40.0;
    pub const ASTEROID_GRID: usize = 10;
    /// Horizontal spacing between bunker origins
    pub const ASTEROID_SPACING: f32 = 70.0;
    /// Offset of the first bunker from the left wall
    pub const ASTEROID_X_MARGIN: f32 = 50.0;
    /// Distance from the arena bottom to the bunker row
    pub const ASTEROID_Y_OFFSET: f32 = 100.0;
    /// Hits a bunker absorbs before cells start breaking off
    pub const ASTEROID_DESTROY_THRESHOLD: u32 = 9;
}
