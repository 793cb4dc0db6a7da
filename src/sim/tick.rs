//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match deterministically. Order within a
//! tick: input, projectile movement, formation movement, collision
//! resolution, wave clear, enemy fire.

use glam::Vec2;
use rand::Rng;

use super::state::{Armed, GameEvent, GamePhase, GameState, LEVEL_BANNER_TICKS, Player};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Fire the cannon (held; rate-limited by the cooldown)
    pub fire: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::GameOver => return,
        GamePhase::LevelTransition => {
            // The arena is frozen while the banner shows
            state.transition_ticks = state.transition_ticks.saturating_sub(1);
            if state.transition_ticks == 0 {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Player input
    let mut dx = 0.0;
    if input.left {
        dx -= PLAYER_SPEED;
    }
    if input.right {
        dx += PLAYER_SPEED;
    }
    if dx != 0.0 {
        state.player.step(dx, ARENA_WIDTH);
    }
    if input.fire && state.player.try_fire(state.time_ticks) {
        state.events.push(GameEvent::PlayerFired);
    }

    // Advance and prune every projectile before any collision test
    state.player.advance_bullets(ARENA_HEIGHT);
    for invader in &mut state.invaders {
        invader.advance_bullets(ARENA_HEIGHT);
    }

    move_formation(state);
    resolve_collisions(state);

    // Wave clear: next level, faster formation, denser fire
    if state.phase == GamePhase::Playing && state.invaders.is_empty() {
        state.level += 1;
        state.invader_speed *= INVADER_SPEED_FACTOR;
        state.fire_threshold =
            (state.fire_threshold * FIRE_THRESHOLD_FACTOR).max(FIRE_THRESHOLD_FLOOR);
        state.spawn_wave();
        state.transition_ticks = LEVEL_BANNER_TICKS;
        state.phase = GamePhase::LevelTransition;
        state.events.push(GameEvent::WaveCleared);
        log::info!(
            "Level {} (speed {:.2}, volley interval {:.0})",
            state.level,
            state.invader_speed,
            state.fire_threshold
        );
    }

    if state.phase == GamePhase::Playing {
        enemy_fire(state);
    }
}

/// March the formation sideways; reverse and drop when a wall is crossed
fn move_formation(state: &mut GameState) {
    if state.invaders.is_empty() {
        return;
    }

    let dx = state.invader_speed * state.invader_dir;
    for invader in &mut state.invaders {
        invader.rect.translate(Vec2::new(dx, 0.0));
    }

    let left = state
        .invaders
        .iter()
        .map(|i| i.rect.left())
        .fold(f32::INFINITY, f32::min);
    let right = state
        .invaders
        .iter()
        .map(|i| i.rect.right())
        .fold(f32::NEG_INFINITY, f32::max);

    if left < 0.0 || right > ARENA_WIDTH {
        state.invader_dir = -state.invader_dir;
        for invader in &mut state.invaders {
            invader.rect.translate(Vec2::new(0.0, INVADER_DROP));
        }
    }
}

/// Resolve every projectile and body overlap. Within each pass the first
/// overlap in iteration order consumes the projectile.
fn resolve_collisions(state: &mut GameState) {
    let GameState {
        player,
        invaders,
        asteroids,
        score,
        phase,
        breached,
        events,
        ..
    } = state;

    // Player shots: invaders first, then bunkers
    let mut i = 0;
    while i < player.bullets.len() {
        let shot = player.bullets[i].rect;
        if let Some(hit) = invaders.iter().position(|inv| shot.overlaps(&inv.rect)) {
            invaders.remove(hit);
            player.bullets.remove(i);
            *score += INVADER_SCORE;
            events.push(GameEvent::InvaderDestroyed);
            continue;
        }
        if let Some(asteroid) = asteroids.iter_mut().find(|a| a.overlaps(&shot)) {
            asteroid.register_hit(&shot);
            player.bullets.remove(i);
            continue;
        }
        i += 1;
    }

    // Invader shots: the cannon first, then bunkers
    for invader in invaders.iter_mut() {
        let mut i = 0;
        while i < invader.bullets.len() {
            let shot = invader.bullets[i].rect;
            if shot.overlaps(&player.rect) {
                invader.bullets.remove(i);
                lose_life(player, phase, events);
                continue;
            }
            if let Some(asteroid) = asteroids.iter_mut().find(|a| a.overlaps(&shot)) {
                asteroid.register_hit(&shot);
                invader.bullets.remove(i);
                continue;
            }
            i += 1;
        }
    }

    asteroids.retain(|a| !a.is_depleted());

    // Formation breach: reaching the cannon's row costs one life, then
    // costs nothing more until the formation leaves the row again
    let breach_now = invaders
        .iter()
        .any(|inv| inv.rect.bottom() >= player.rect.top());
    if breach_now && !*breached {
        lose_life(player, phase, events);
    }
    *breached = breach_now;
}

fn lose_life(player: &mut Player, phase: &mut GamePhase, events: &mut Vec<GameEvent>) {
    player.lives = player.lives.saturating_sub(1);
    events.push(GameEvent::PlayerHit);
    if player.lives == 0 && *phase != GamePhase::GameOver {
        *phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
    }
}

/// Shared volley timer; one uniformly random invader fires when it crosses
/// the threshold
fn enemy_fire(state: &mut GameState) {
    state.fire_timer += 1;
    if state.fire_timer as f32 > state.fire_threshold {
        if !state.invaders.is_empty() {
            let shooter = state.rng.random_range(0..state.invaders.len());
            state.invaders[shooter].fire(BULLET_SPEED);
        }
        state.fire_timer = 0;
    }
}
