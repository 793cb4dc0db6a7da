//! Canvas 2D rendering
//!
//! Draws one frame from a `&GameState`: every entity is a filled rectangle,
//! plus the banner text for level transitions and game over.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::{DamageTier, GamePhase, GameState, Rect};

const BACKGROUND_COLOR: &str = "#000";
const PLAYER_COLOR: &str = "green";
const INVADER_COLOR: &str = "red";
const BULLET_COLOR: &str = "white";
/// Bunker shades, one per damage tier
const ASTEROID_LIGHT: &str = "#a8a8a8";
const ASTEROID_MEDIUM: &str = "#787878";
const ASTEROID_DARK: &str = "#484848";

const BANNER_FONT: &str = "30px 'Press Start 2P', monospace";
const BANNER_COLOR: &str = "white";

/// Owns the 2D context of the game canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Render the current frame
    pub fn render(&self, state: &GameState) {
        self.ctx.set_fill_style_str(BACKGROUND_COLOR);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        self.draw_rect(&state.player.rect, PLAYER_COLOR);

        for invader in &state.invaders {
            self.draw_rect(&invader.rect, INVADER_COLOR);
        }

        // One fill color per bunker; the whole grid shares the damage tier
        for asteroid in &state.asteroids {
            let shade = match asteroid.damage_tier() {
                DamageTier::Light => ASTEROID_LIGHT,
                DamageTier::Medium => ASTEROID_MEDIUM,
                DamageTier::Dark => ASTEROID_DARK,
            };
            self.ctx.set_fill_style_str(shade);
            for cell in &asteroid.cells {
                self.ctx.fill_rect(
                    cell.pos.x as f64,
                    cell.pos.y as f64,
                    cell.size.x as f64,
                    cell.size.y as f64,
                );
            }
        }

        self.ctx.set_fill_style_str(BULLET_COLOR);
        for bullet in &state.player.bullets {
            self.fill_rect(&bullet.rect);
        }
        for invader in &state.invaders {
            for bullet in &invader.bullets {
                self.fill_rect(&bullet.rect);
            }
        }

        match state.phase {
            GamePhase::LevelTransition => self.draw_banner(&format!("Level {}", state.level)),
            GamePhase::GameOver => self.draw_banner("Game Over"),
            GamePhase::Playing => {}
        }
    }

    fn draw_rect(&self, rect: &Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.fill_rect(rect);
    }

    fn fill_rect(&self, rect: &Rect) {
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    /// Centered banner text over the arena
    fn draw_banner(&self, text: &str) {
        self.ctx.set_font(BANNER_FONT);
        self.ctx.set_fill_style_str(BANNER_COLOR);
        self.ctx.set_text_align("center");
        let _ = self
            .ctx
            .fill_text(text, self.width / 2.0, self.height / 2.0);
    }
}
