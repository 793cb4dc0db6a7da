//! Sound for the game, driven by the Web Audio API
//!
//! Procedurally generated sound effects, plus a looping background music
//! track taken from the page's audio element.

use wasm_bindgen::JsCast;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Element id of the background music tag in index.html
const MUSIC_ELEMENT_ID: &str = "background-music";

/// Owns the audio context and the page's music element
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music: Option<HtmlAudioElement>,
    sfx_volume: f32,
    sfx_muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // AudioContext creation can fail outside a secure context
        let ctx = match AudioContext::new() {
            Ok(ctx) => Some(ctx),
            Err(_) => {
                log::warn!("AudioContext unavailable - sound effects disabled");
                None
            }
        };

        let music = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(MUSIC_ELEMENT_ID))
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        match &music {
            Some(music) => music.set_loop(true),
            None => log::warn!("No #{MUSIC_ELEMENT_ID} element - background music disabled"),
        }

        Self {
            ctx,
            music,
            sfx_volume: 1.0,
            sfx_muted: false,
        }
    }

    /// Resume the context after the first user gesture
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Start the background track; browsers only allow this after a gesture
    pub fn start_music(&self) {
        if let Some(music) = &self.music {
            let _ = music.play();
        }
    }

    /// Mute/unmute the background track
    pub fn set_music_muted(&self, muted: bool) {
        if let Some(music) = &self.music {
            music.set_muted(muted);
        }
    }

    /// Set background track volume (0.0 - 1.0)
    pub fn set_music_volume(&self, vol: f32) {
        if let Some(music) = &self.music {
            music.set_volume(vol.clamp(0.0, 1.0) as f64);
        }
    }

    /// Mute/unmute sound effects
    pub fn set_sfx_muted(&mut self, muted: bool) {
        self.sfx_muted = muted;
    }

    /// Set effect volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    fn effective_volume(&self) -> f32 {
        if self.sfx_muted { 0.0 } else { self.sfx_volume }
    }

    /// Play the sound cue for a game event
    pub fn play(&self, event: GameEvent) {
        let Some(ctx) = &self.ctx else { return };
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        // The context starts suspended until a user gesture lands
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match event {
            GameEvent::PlayerFired => self.play_shot(ctx, vol),
            GameEvent::InvaderDestroyed => self.play_invader_killed(ctx, vol),
            GameEvent::PlayerHit => self.play_player_hit(ctx, vol),
            GameEvent::WaveCleared => self.play_wave_clear(ctx, vol),
            GameEvent::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Effect generators ===

    /// New oscillator wired through its own gain node to the output
    fn voice(
        &self,
        ctx: &AudioContext,
        shape: OscillatorType,
        freq: f32,
    ) -> Option<(OscillatorNode, GainNode)> {
        let gain = ctx.create_gain().ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let osc = ctx.create_oscillator().ok()?;
        osc.set_type(shape);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;

        Some((osc, gain))
    }

    /// Cannon shot - quick falling zap
    fn play_shot(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.voice(ctx, OscillatorType::Square, 900.0) else {
            return;
        };
        let t = ctx.current_time();

        decay(&gain, vol * 0.25, t, 0.12);
        glide(&osc, 900.0, 150.0, t, 0.12);
        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Invader destroyed - short crunchy pop
    fn play_invader_killed(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.voice(ctx, OscillatorType::Sawtooth, 250.0) {
            decay(&gain, vol * 0.35, t, 0.15);
            glide(&osc, 250.0, 40.0, t, 0.15);
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        // High tick on top
        if let Some((osc, gain)) = self.voice(ctx, OscillatorType::Square, 2000.0) {
            decay(&gain, vol * 0.1, t, 0.05);
            osc.start().ok();
            osc.stop_with_when(t + 0.08).ok();
        }
    }

    /// Player hit - harsh low buzz
    fn play_player_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.voice(ctx, OscillatorType::Square, 220.0) else {
            return;
        };
        let t = ctx.current_time();

        decay(&gain, vol * 0.5, t, 0.25);
        glide(&osc, 220.0, 55.0, t, 0.25);
        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Wave clear - rising fanfare
    fn play_wave_clear(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [392.0, 523.0, 659.0, 784.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.voice(ctx, OscillatorType::Triangle, freq) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * 0.1;
            decay(&gain, vol * 0.3, t, 0.4);
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.5).ok();
        }
    }

    /// Game over - boom plus sad descending notes
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.voice(ctx, OscillatorType::Sawtooth, 100.0) {
            decay(&gain, vol * 0.5, t, 0.4);
            glide(&osc, 100.0, 30.0, t, 0.4);
            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        for (i, freq) in [400.0, 350.0, 300.0, 200.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.voice(ctx, OscillatorType::Sine, freq) else {
                continue;
            };
            let t = t + 0.2 + i as f64 * 0.2;
            decay(&gain, vol * 0.3, t, 0.3);
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.4).ok();
        }
    }
}

/// Set a gain level at `at`, then fade to silence over `dur` seconds
fn decay(gain: &GainNode, level: f32, at: f64, dur: f64) {
    gain.gain().set_value_at_time(level, at).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, at + dur)
        .ok();
}

/// Sweep oscillator pitch from `from` to `to` over `dur` seconds
fn glide(osc: &OscillatorNode, from: f32, to: f32, at: f64, dur: f64) {
    osc.frequency().set_value_at_time(from, at).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(to, at + dur)
        .ok();
}
