use glam::Vec2;
use pixel_invaders::HighScores;
use pixel_invaders::consts::*;
use pixel_invaders::sim::{
    Bullet, GameEvent, GamePhase, GameState, LEVEL_BANNER_TICKS, TickInput, tick,
};

/// Bullet centered on the target so it still overlaps after one advance
fn shot_at(target_center: Vec2, vy: f32) -> Bullet {
    Bullet::new(
        Vec2::new(
            target_center.x - BULLET_WIDTH / 2.0,
            target_center.y - BULLET_HEIGHT / 2.0,
        ),
        vy,
    )
}

fn run_ticks(state: &mut GameState, input: &TickInput, n: u32) {
    for _ in 0..n {
        tick(state, input);
    }
}

// ── aimed shot across the arena ───────────────────────────────────────────────

#[test]
fn aimed_shot_crosses_the_arena_and_scores() {
    let mut state = GameState::new(11);
    state.asteroids.clear(); // open firing line
    let held_fire = TickInput {
        fire: true,
        ..Default::default()
    };

    // Cannon center is x=400; the first shot leaves on tick 1 at y=570 and
    // falls below y=100 on tick 95, where the drifted rightmost bottom-row
    // invader (x 399..429) covers the bullet (x 398..402).
    run_ticks(&mut state, &held_fire, 100);

    assert_eq!(state.score, INVADER_SCORE);
    assert_eq!(state.invaders.len(), INVADER_ROWS * INVADER_COLS - 1);
    assert!(state.events.contains(&GameEvent::InvaderDestroyed));

    // Shots went out on ticks 1, 25, 49, 73, 97; one was consumed by the kill
    assert_eq!(state.player.bullets.len(), 4);

    // First volley is not due until tick 151
    let enemy_shots: usize = state.invaders.iter().map(|i| i.bullets.len()).sum();
    assert_eq!(enemy_shots, 0);
    assert_eq!(state.player.lives, PLAYER_START_LIVES);
}

// ── bunkers absorb enemy fire ─────────────────────────────────────────────────

#[test]
fn bunker_shields_the_cannon_from_a_falling_shot() {
    let mut state = GameState::new(3);

    // Drop a shot over the first bunker (x 50..90, y 500..540); it flies
    // down from y=120 and reaches the bunker on tick 75
    state.invaders[0]
        .bullets
        .push(Bullet::new(Vec2::new(68.0, 120.0), BULLET_SPEED));

    run_ticks(&mut state, &TickInput::default(), 80);

    assert_eq!(state.asteroids[0].hits, 1);
    // Below the destroy threshold nothing breaks off
    assert_eq!(state.asteroids[0].cells.len(), ASTEROID_GRID * ASTEROID_GRID);
    assert_eq!(state.player.lives, PLAYER_START_LIVES);

    let enemy_shots: usize = state.invaders.iter().map(|i| i.bullets.len()).sum();
    assert_eq!(enemy_shots, 0);
}

#[test]
fn sustained_fire_darkens_a_bunker() {
    use pixel_invaders::sim::DamageTier;

    let mut state = GameState::new(5);
    // Park the cannon directly under the first bunker
    state.player.rect.pos.x = 50.0;
    let held_fire = TickInput {
        fire: true,
        ..Default::default()
    };

    // Shots leave on ticks 1, 25, 49, 73, 97, 121 and each reaches the
    // bunker 6 ticks later: 6 absorbed hits by tick 140
    run_ticks(&mut state, &held_fire, 140);

    assert_eq!(state.asteroids[0].hits, 6);
    assert_eq!(state.asteroids[0].damage_tier(), DamageTier::Dark);
    // Still below the destroy threshold: the bunker only darkened
    assert_eq!(state.asteroids[0].cells.len(), ASTEROID_GRID * ASTEROID_GRID);

    // Every shot was stopped short of the formation
    assert_eq!(state.score, 0);
    assert_eq!(state.invaders.len(), INVADER_ROWS * INVADER_COLS);
}

// ── wave clear through play ───────────────────────────────────────────────────

#[test]
fn clearing_the_last_invader_starts_the_next_level() {
    let mut state = GameState::new(2);
    state.invaders.truncate(1); // lone survivor at the grid origin
    state.asteroids.clear();
    // Line up under the survivor's drift path; the tick-1 shot reaches its
    // row (y 20..40) on tick 107, where the invader covers x 41.4..71.4
    state.player.rect.pos.x = 30.0;
    let held_fire = TickInput {
        fire: true,
        ..Default::default()
    };

    run_ticks(&mut state, &held_fire, 110);

    assert_eq!(state.level, 2);
    assert_eq!(state.phase, GamePhase::LevelTransition);
    assert_eq!(state.invaders.len(), INVADER_ROWS * INVADER_COLS);
    assert_eq!(state.score, INVADER_SCORE);
    assert!(state.events.contains(&GameEvent::InvaderDestroyed));
    assert!(state.events.contains(&GameEvent::WaveCleared));

    // Difficulty stepped up with the level
    assert!((state.invader_speed - INVADER_START_SPEED * INVADER_SPEED_FACTOR).abs() < 1e-4);
    assert!(
        (state.fire_threshold - FIRE_THRESHOLD_START * FIRE_THRESHOLD_FACTOR).abs() < 1e-3
    );

    // Banner runs out and play resumes
    run_ticks(&mut state, &TickInput::default(), LEVEL_BANNER_TICKS);
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn difficulty_compounds_over_waves() {
    let mut state = GameState::new(4);

    for _ in 0..5 {
        state.invaders.clear();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::LevelTransition);
        run_ticks(&mut state, &TickInput::default(), LEVEL_BANNER_TICKS);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    assert_eq!(state.level, 6);
    let expected_speed = INVADER_START_SPEED * INVADER_SPEED_FACTOR.powi(5);
    assert!((state.invader_speed - expected_speed).abs() < 1e-4);
    // 150 → 100.5 → 67.3 → floor; later waves stay there
    assert_eq!(state.fire_threshold, FIRE_THRESHOLD_FLOOR);
}

// ── losing a run feeds the scoreboard ─────────────────────────────────────────

#[test]
fn three_hits_end_the_run_and_the_score_makes_the_board() {
    let mut state = GameState::new(9);
    state.score = 120; // as if 12 kills happened earlier
    let player_center = state.player.rect.pos + state.player.rect.size / 2.0;

    for expected_lives in [2, 1, 0] {
        state.invaders[0]
            .bullets
            .push(shot_at(player_center, BULLET_SPEED));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, expected_lives);
    }

    assert_eq!(state.phase, GamePhase::GameOver);
    let game_overs = state
        .events
        .iter()
        .filter(|e| **e == GameEvent::GameOver)
        .count();
    assert_eq!(game_overs, 1);

    let mut board = HighScores::new();
    assert!(board.qualifies(state.score));
    assert_eq!(board.add_score("ACE", state.score), Some(1));
    assert_eq!(board.top_score(), Some(120));
}

// ── long seeded session ───────────────────────────────────────────────────────

#[test]
fn long_session_keeps_the_arena_consistent() {
    let mut state = GameState::new(0xFEED);
    let patterns = [
        TickInput {
            right: true,
            fire: true,
            ..Default::default()
        },
        TickInput {
            left: true,
            ..Default::default()
        },
        TickInput {
            fire: true,
            ..Default::default()
        },
    ];

    let mut prev_lives = state.player.lives;
    let mut prev_score = state.score;

    // One minute of play
    for i in 0..3600u32 {
        let input = &patterns[(i as usize / 90) % patterns.len()];
        tick(&mut state, input);

        // Cannon never leaves the arena
        assert!(state.player.rect.left() >= 0.0);
        assert!(state.player.rect.right() <= ARENA_WIDTH);

        // Surviving projectiles are strictly inside the vertical bounds
        for bullet in &state.player.bullets {
            assert!(bullet.rect.pos.y > 0.0 && bullet.rect.pos.y < ARENA_HEIGHT);
        }
        for invader in &state.invaders {
            for bullet in &invader.bullets {
                assert!(bullet.rect.pos.y > 0.0 && bullet.rect.pos.y < ARENA_HEIGHT);
            }
        }

        // Counters move one way only
        assert!(state.invaders.len() <= INVADER_ROWS * INVADER_COLS);
        assert!(state.player.lives <= prev_lives);
        assert!(state.score >= prev_score);
        assert_eq!(state.score % INVADER_SCORE, 0);
        prev_lives = state.player.lives;
        prev_score = state.score;

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let game_overs = state
        .events
        .iter()
        .filter(|e| **e == GameEvent::GameOver)
        .count();
    assert!(game_overs <= 1);
}
