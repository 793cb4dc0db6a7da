//! Game state and core simulation types
//!
//! Flat entity structs plus the match-level counters. Everything here is
//! deterministic: positions advance in whole ticks and the only randomness
//! is the seeded volley RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Between-wave banner; the arena is frozen while it shows
    LevelTransition,
    /// Run ended, waiting for restart
    GameOver,
}

/// Discrete things that happened during a tick, drained by the host
/// for sound effects and UI triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The cannon fired a shot
    PlayerFired,
    /// An invader was destroyed by a player shot
    InvaderDestroyed,
    /// The player lost a life
    PlayerHit,
    /// The last invader of a wave was destroyed
    WaveCleared,
    /// The player ran out of lives
    GameOver,
}

/// A projectile in flight
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub rect: Rect,
    /// Vertical velocity in pixels per tick (negative = upward)
    pub vy: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, vy: f32) -> Self {
        Self {
            rect: Rect::new(pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT)),
            vy,
        }
    }

    /// Move one tick; projectiles have no horizontal motion
    pub fn advance(&mut self) {
        self.rect.translate(Vec2::new(0.0, self.vy));
    }

    /// Off the top or bottom of the arena
    pub fn is_offscreen(&self, arena_height: f32) -> bool {
        self.rect.pos.y <= 0.0 || self.rect.pos.y >= arena_height
    }
}

/// Shared firing behavior for entities that own projectiles
pub trait Armed {
    fn rect(&self) -> Rect;
    fn bullets_mut(&mut self) -> &mut Vec<Bullet>;

    /// Spawn a projectile at the horizontal center. Upward shots leave from
    /// the top edge, downward shots from the bottom edge.
    fn fire(&mut self, vy: f32) {
        let rect = self.rect();
        let x = rect.pos.x + rect.size.x / 2.0 - BULLET_WIDTH / 2.0;
        let y = if vy < 0.0 { rect.top() } else { rect.bottom() };
        self.bullets_mut().push(Bullet::new(Vec2::new(x, y), vy));
    }

    /// Advance owned projectiles and drop the ones that left the arena
    fn advance_bullets(&mut self, arena_height: f32) {
        let bullets = self.bullets_mut();
        for bullet in bullets.iter_mut() {
            bullet.advance();
        }
        bullets.retain(|b| !b.is_offscreen(arena_height));
    }
}

/// The player's cannon
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Lives remaining; 0 means the run is over
    pub lives: u8,
    /// Earliest tick the next shot is allowed
    pub fire_ready_tick: u64,
    pub bullets: Vec<Bullet>,
}

impl Player {
    pub fn new() -> Self {
        let pos = Vec2::new(
            ARENA_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            ARENA_HEIGHT - PLAYER_Y_OFFSET,
        );
        Self {
            rect: Rect::new(pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            lives: PLAYER_START_LIVES,
            fire_ready_tick: 0,
            bullets: Vec::new(),
        }
    }

    /// Slide horizontally, clamped to the arena walls
    pub fn step(&mut self, dx: f32, arena_width: f32) {
        self.rect.pos.x = (self.rect.pos.x + dx).clamp(0.0, arena_width - self.rect.size.x);
    }

    /// Fire if the cooldown has elapsed; returns whether a shot left the cannon
    pub fn try_fire(&mut self, now: u64) -> bool {
        if now < self.fire_ready_tick {
            return false;
        }
        self.fire(-BULLET_SPEED);
        self.fire_ready_tick = now + FIRE_COOLDOWN_TICKS;
        true
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Armed for Player {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn bullets_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.bullets
    }
}

/// One enemy in the descending formation
#[derive(Debug, Clone)]
pub struct Invader {
    pub rect: Rect,
    pub bullets: Vec<Bullet>,
}

impl Invader {
    pub fn new(pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos, Vec2::new(INVADER_WIDTH, INVADER_HEIGHT)),
            bullets: Vec::new(),
        }
    }
}

impl Armed for Invader {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn bullets_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.bullets
    }
}

/// Visual damage tier of a bunker, keyed on its shared hit counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageTier {
    Light,
    Medium,
    Dark,
}

/// A destructible bunker: a square grid of cells sharing one hit counter
#[derive(Debug, Clone)]
pub struct Asteroid {
    /// Remaining cells; the bunker is gone when this empties
    pub cells: Vec<Rect>,
    /// Total hits absorbed, shared across all cells
    pub hits: u32,
}

impl Asteroid {
    pub fn new(pos: Vec2) -> Self {
        let cell = ASTEROID_SIZE / ASTEROID_GRID as f32;
        let mut cells = Vec::with_capacity(ASTEROID_GRID * ASTEROID_GRID);
        for row in 0..ASTEROID_GRID {
            for col in 0..ASTEROID_GRID {
                cells.push(Rect::new(
                    Vec2::new(pos.x + col as f32 * cell, pos.y + row as f32 * cell),
                    Vec2::new(cell, cell),
                ));
            }
        }
        Self { cells, hits: 0 }
    }

    /// Whether any remaining cell overlaps the given rect
    pub fn overlaps(&self, rect: &Rect) -> bool {
        self.cells.iter().any(|c| c.overlaps(rect))
    }

    /// Absorb a hit. Cells break off only once the destroy threshold is
    /// reached; before that the bunker just darkens.
    pub fn register_hit(&mut self, rect: &Rect) {
        self.hits += 1;
        if self.hits >= ASTEROID_DESTROY_THRESHOLD {
            self.cells.retain(|c| !c.overlaps(rect));
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.cells.is_empty()
    }

    /// Shade for rendering; gameplay never reads this
    pub fn damage_tier(&self) -> DamageTier {
        match self.hits {
            0..=2 => DamageTier::Light,
            3..=5 => DamageTier::Medium,
            _ => DamageTier::Dark,
        }
    }
}

/// Complete match state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Volley RNG, seeded from `seed`
    pub rng: Pcg32,
    /// Player cannon
    pub player: Player,
    /// Live invaders, row-major spawn order
    pub invaders: Vec<Invader>,
    /// Destructible bunkers, built once per match
    pub asteroids: Vec<Asteroid>,
    /// Score
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Formation speed in pixels per tick
    pub invader_speed: f32,
    /// Formation direction: 1.0 = rightward, -1.0 = leftward
    pub invader_dir: f32,
    /// Ticks since the last enemy volley
    pub fire_timer: u32,
    /// Volley interval; a volley fires when `fire_timer` exceeds this
    pub fire_threshold: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Level banner timer (ticks remaining)
    pub transition_ticks: u32,
    /// Formation is at or below the cannon's row; while set, the breach
    /// costs no further lives
    pub breached: bool,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new match with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(),
            invaders: Vec::new(),
            asteroids: Vec::new(),
            score: 0,
            level: 1,
            invader_speed: INVADER_START_SPEED,
            invader_dir: 1.0,
            fire_timer: 0,
            fire_threshold: FIRE_THRESHOLD_START,
            time_ticks: 0,
            phase: GamePhase::Playing,
            transition_ticks: 0,
            breached: false,
            events: Vec::new(),
        };

        state.spawn_wave();
        state.spawn_asteroids();

        state
    }

    /// Spawn a fresh invader grid at the formation origin
    pub fn spawn_wave(&mut self) {
        for row in 0..INVADER_ROWS {
            for col in 0..INVADER_COLS {
                let pos = Vec2::new(
                    col as f32 * INVADER_COL_STEP + INVADER_GRID_ORIGIN,
                    row as f32 * INVADER_ROW_STEP + INVADER_GRID_ORIGIN,
                );
                self.invaders.push(Invader::new(pos));
            }
        }
    }

    /// Spawn the bunker row; called once per match, bunkers persist
    /// across waves
    pub fn spawn_asteroids(&mut self) {
        let y = ARENA_HEIGHT - ASTEROID_Y_OFFSET;
        for i in 0..ASTEROID_COUNT {
            let x = i as f32 * ASTEROID_SPACING + ASTEROID_X_MARGIN;
            self.asteroids.push(Asteroid::new(Vec2::new(x, y)));
        }
    }
}

/// Level banner duration in ticks (2 seconds at 60 Hz)
pub const LEVEL_BANNER_TICKS: u32 = 2 * 60;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_match_layout() {
        let state = GameState::new(7);

        assert_eq!(state.invaders.len(), INVADER_ROWS * INVADER_COLS);
        assert_eq!(state.asteroids.len(), ASTEROID_COUNT);
        for asteroid in &state.asteroids {
            assert_eq!(asteroid.cells.len(), ASTEROID_GRID * ASTEROID_GRID);
            assert_eq!(asteroid.hits, 0);
        }

        assert_eq!(state.player.lives, PLAYER_START_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);

        // Grid anchored at the formation origin
        let first = &state.invaders[0];
        assert_eq!(first.rect.pos, Vec2::new(INVADER_GRID_ORIGIN, INVADER_GRID_ORIGIN));

        // Cannon centered on the bottom row
        assert_eq!(
            state.player.rect.pos,
            Vec2::new(
                ARENA_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                ARENA_HEIGHT - PLAYER_Y_OFFSET
            )
        );
    }

    #[test]
    fn test_player_clamps_to_arena() {
        let mut player = Player::new();
        player.step(-10_000.0, ARENA_WIDTH);
        assert_eq!(player.rect.pos.x, 0.0);
        player.step(10_000.0, ARENA_WIDTH);
        assert_eq!(player.rect.pos.x, ARENA_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_fire_cooldown_gates_shots() {
        let mut player = Player::new();

        assert!(player.try_fire(1));
        assert!(!player.try_fire(2));
        assert!(!player.try_fire(1 + FIRE_COOLDOWN_TICKS - 1));
        assert!(player.try_fire(1 + FIRE_COOLDOWN_TICKS));
        assert_eq!(player.bullets.len(), 2);
    }

    #[test]
    fn test_bullet_spawn_edges() {
        let mut player = Player::new();
        player.fire(-BULLET_SPEED);
        let shot = &player.bullets[0];
        assert_eq!(
            shot.rect.pos.x,
            player.rect.pos.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0
        );
        assert_eq!(shot.rect.pos.y, player.rect.top());

        let mut invader = Invader::new(Vec2::new(100.0, 50.0));
        invader.fire(BULLET_SPEED);
        let shot = &invader.bullets[0];
        assert_eq!(shot.rect.pos.y, invader.rect.bottom());
    }

    #[test]
    fn test_bullet_offscreen_bounds() {
        let mut up = Bullet::new(Vec2::new(100.0, 3.0), -BULLET_SPEED);
        assert!(!up.is_offscreen(ARENA_HEIGHT));
        up.advance();
        assert!(up.is_offscreen(ARENA_HEIGHT));

        let mut down = Bullet::new(Vec2::new(100.0, ARENA_HEIGHT - 3.0), BULLET_SPEED);
        assert!(!down.is_offscreen(ARENA_HEIGHT));
        down.advance();
        assert!(down.is_offscreen(ARENA_HEIGHT));
    }

    #[test]
    fn test_asteroid_absorbs_hits_before_breaking() {
        let mut asteroid = Asteroid::new(Vec2::new(50.0, 500.0));
        let shot = Rect::new(Vec2::new(60.0, 505.0), Vec2::new(BULLET_WIDTH, BULLET_HEIGHT));

        for _ in 0..(ASTEROID_DESTROY_THRESHOLD - 1) {
            asteroid.register_hit(&shot);
        }
        assert_eq!(asteroid.cells.len(), ASTEROID_GRID * ASTEROID_GRID);

        // The 9th hit removes exactly the cells under the shot: 2 columns
        // (x 58..66) by 3 rows (y 504..516)
        asteroid.register_hit(&shot);
        assert_eq!(asteroid.cells.len(), ASTEROID_GRID * ASTEROID_GRID - 6);
        assert!(!asteroid.is_depleted());
    }

    #[test]
    fn test_asteroid_damage_tiers() {
        let mut asteroid = Asteroid::new(Vec2::new(50.0, 500.0));
        let shot = Rect::new(Vec2::new(60.0, 505.0), Vec2::new(BULLET_WIDTH, BULLET_HEIGHT));

        assert_eq!(asteroid.damage_tier(), DamageTier::Light);
        asteroid.register_hit(&shot);
        asteroid.register_hit(&shot);
        assert_eq!(asteroid.damage_tier(), DamageTier::Light);
        asteroid.register_hit(&shot);
        assert_eq!(asteroid.damage_tier(), DamageTier::Medium);
        asteroid.register_hit(&shot);
        asteroid.register_hit(&shot);
        assert_eq!(asteroid.damage_tier(), DamageTier::Medium);
        asteroid.register_hit(&shot);
        assert_eq!(asteroid.damage_tier(), DamageTier::Dark);
    }

    #[test]
    fn test_asteroid_depletes_when_all_cells_gone() {
        let mut asteroid = Asteroid::new(Vec2::new(100.0, 100.0));
        // Covers the whole bunker with margin
        let blast = Rect::new(Vec2::new(90.0, 90.0), Vec2::new(60.0, 60.0));

        for _ in 0..ASTEROID_DESTROY_THRESHOLD {
            asteroid.register_hit(&blast);
        }
        assert!(asteroid.is_depleted());
        assert!(!asteroid.overlaps(&blast));
    }

    proptest! {
        #[test]
        fn player_stays_in_arena(moves in proptest::collection::vec(-10.0f32..10.0, 0..200)) {
            let mut player = Player::new();
            for dx in moves {
                player.step(dx, ARENA_WIDTH);
                prop_assert!(player.rect.left() >= 0.0);
                prop_assert!(player.rect.right() <= ARENA_WIDTH);
            }
        }
    }
}
