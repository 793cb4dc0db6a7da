//! Pixel Invaders entry point
//!
//! Boots the wasm host, wires the page up, and drives the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use pixel_invaders::audio::AudioManager;
    use pixel_invaders::consts::*;
    use pixel_invaders::renderer::CanvasRenderer;
    use pixel_invaders::sim::{GamePhase, GameState, TickInput, tick};
    use pixel_invaders::{HighScores, Settings};

    /// Everything the frame loop touches
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        settings: Settings,
        highscores: HighScores,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        // Browsers block audio until a user gesture
        music_started: bool,
        // Whether this run's score is already on the board
        score_saved: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_sfx_muted(settings.sfx_muted);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_music_muted(settings.music_muted);
            audio.set_music_volume(settings.music_volume);

            Self {
                state: GameState::new(seed),
                renderer: None,
                audio,
                settings,
                highscores: HighScores::load(),
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                music_started: false,
                score_saved: false,
            }
        }

        /// Advance the simulation by wall-clock time, in fixed steps
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Map events from the ticks just run onto sound effects
        fn drain_events(&mut self) {
            for event in self.state.events.drain(..) {
                self.audio.play(event);
            }
        }

        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state);
            }
        }

        /// Push score/lives/level into the page and toggle the overlay panels
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Update score
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            // Update lives
            if let Some(el) = document.query_selector("#hud-lives .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.player.lives.to_string()));
            }

            // Update level
            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.level.to_string()));
            }

            let game_over = self.state.phase == GamePhase::GameOver;

            // Show/hide restart button
            if let Some(el) = document.get_element_by_id("restart-btn") {
                if game_over {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show/hide save-score panel (stays hidden once the score is saved)
            if let Some(el) = document.get_element_by_id("game-over") {
                if game_over && !self.score_saved {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Fresh run on a new seed; settings and the board carry over
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.accumulator = 0.0;
            self.input = TickInput::default();
            self.score_saved = false;
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("console_log init failed");

        log::info!("Pixel Invaders starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("canvas element missing")
            .dyn_into()
            .expect("#canvas is not a canvas");

        // Fixed arena size, no DPI scaling
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        match CanvasRenderer::new(&canvas) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Failed to acquire 2d context: {:?}", e),
        }

        log::info!("New game, seed {}", seed);

        render_scoreboard(&game.borrow().highscores);

        // Wire up the page, then hand control to the frame loop
        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_score_form(game.clone());
        setup_mute_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Pixel Invaders running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down - set held flags; first key press also unlocks audio
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if !g.music_started {
                    g.audio.resume();
                    g.audio.start_music();
                    g.music_started = true;
                }
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    " " => g.input.fire = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up - release held flags
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    " " => g.input.fire = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // First frame has no previous timestamp
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.drain_events();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Restarting, seed {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_score_form(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("save-score-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let Some(input) = document
                    .get_element_by_id("player-name")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                let value = input.value();
                let name = value.trim();
                if name.is_empty() {
                    return;
                }

                let mut g = game.borrow_mut();
                let score = g.state.score;
                match g.highscores.add_score(name, score) {
                    Some(rank) => log::info!("Saved score {} for {} (rank {})", score, name, rank),
                    None => log::info!("Score {} did not make the board", score),
                }
                g.highscores.save();
                g.score_saved = true;
                render_scoreboard(&g.highscores);
                input.set_value("");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mute_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Music toggle
        if let Some(btn) = document.get_element_by_id("mute-music-btn") {
            let game = game.clone();
            btn.set_text_content(Some(music_label(&game.borrow().settings)));
            let btn_handle = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.music_muted = !g.settings.music_muted;
                let muted = g.settings.music_muted;
                g.audio.set_music_muted(muted);
                g.settings.save();
                btn_handle.set_text_content(Some(music_label(&g.settings)));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Sound effects toggle
        if let Some(btn) = document.get_element_by_id("mute-sfx-btn") {
            btn.set_text_content(Some(sfx_label(&game.borrow().settings)));
            let btn_handle = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.sfx_muted = !g.settings.sfx_muted;
                let muted = g.settings.sfx_muted;
                g.audio.set_sfx_muted(muted);
                g.settings.save();
                btn_handle.set_text_content(Some(sfx_label(&g.settings)));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn music_label(settings: &Settings) -> &'static str {
        if settings.music_muted {
            "Unmute Music"
        } else {
            "Mute Music"
        }
    }

    fn sfx_label(settings: &Settings) -> &'static str {
        if settings.sfx_muted {
            "Unmute Sound Effects"
        } else {
            "Mute Sound Effects"
        }
    }

    /// Rebuild the scoreboard list from the stored entries
    fn render_scoreboard(highscores: &HighScores) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let Some(list) = document.get_element_by_id("score-list") else {
            return;
        };
        list.set_inner_html("");
        for entry in &highscores.entries {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some(&format!("{}: {}", entry.name, entry.score)));
                let _ = list.append_child(&li);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Invaders (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Run a short scripted session
    println!("\nRunning simulation smoke test...");
    test_headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Real entry point is wasm_main; the bin target still wants a main
}

#[cfg(not(target_arch = "wasm32"))]
fn test_headless_session() {
    use pixel_invaders::consts::ARENA_WIDTH;
    use pixel_invaders::sim::{GameState, TickInput, tick};

    let mut state = GameState::new(0xC0FFEE);
    let strafe_and_fire = TickInput {
        left: false,
        right: true,
        fire: true,
    };
    let drift = TickInput {
        left: true,
        ..TickInput::default()
    };

    // 30 seconds of play at 60 Hz, weaving while shooting
    for i in 0..1800 {
        let input = if i % 120 < 60 { &strafe_and_fire } else { &drift };
        tick(&mut state, input);
        assert!(state.player.rect.left() >= 0.0);
        assert!(state.player.rect.right() <= ARENA_WIDTH);
    }

    println!(
        "✓ Simulated 30s: score {}, lives {}, level {}, phase {:?}",
        state.score, state.player.lives, state.level, state.phase
    );
}
