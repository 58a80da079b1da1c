//! Canvas 2D renderer
//!
//! Draws a [`GameState`] in field coordinates; the canvas transform maps the
//! 800x200 field onto whatever size the canvas element has.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::state::{GamePhase, GameState, ObstacleKind, PowerUpKind};

const DAY_INK: &str = "#535353";
const NIGHT_INK: &str = "#f7f7f7";
const SHIELD_COLOR: &str = "#4facfe";
const PICKUP_COLOR: &str = "#4facfe";
const SPEED_LINE_COLOR: &str = "#ff6b6b";
const SLOW_MO_TINT: &str = "rgba(0, 150, 255, 0.1)";
const PAUSE_VEIL: &str = "rgba(0, 0, 0, 0.7)";

pub struct Renderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    /// Attach to a canvas; `None` if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Render one frame
    pub fn render(&self, state: &GameState) {
        let ctx = &self.ctx;
        let sx = self.canvas.width() as f64 / FIELD_WIDTH as f64;
        let sy = self.canvas.height() as f64 / FIELD_HEIGHT as f64;
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        ctx.set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0).ok();

        let ink = if state.night_mode { NIGHT_INK } else { DAY_INK };

        self.draw_ground(state, ink);
        self.draw_character(state, ink);

        match state.phase {
            GamePhase::Ready => self.draw_start_screen(ink),
            GamePhase::Running | GamePhase::Paused => {
                self.draw_obstacles(state, ink);
                self.draw_pickups(state);
                self.draw_effects(state);
                if state.phase == GamePhase::Paused {
                    self.draw_pause_overlay();
                }
            }
            GamePhase::GameOver => {
                self.draw_obstacles(state, ink);
                self.draw_game_over(state, ink);
            }
        }
    }

    fn fill_rect(&self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn draw_ground(&self, state: &GameState, ink: &str) {
        let s = FIELD_SCALE;
        self.ctx.set_fill_style_str(ink);
        self.fill_rect(0.0, GROUND_LINE_Y, FIELD_WIDTH, 2.0 * s);

        let mut x = -state.ground_offset;
        while x < FIELD_WIDTH {
            self.fill_rect(x, GROUND_LINE_Y + 2.0 * s, 10.0 * s, 2.0 * s);
            self.fill_rect(x + 5.0 * s, GROUND_LINE_Y + 4.0 * s, 5.0 * s, 1.0 * s);
            x += GROUND_PATTERN;
        }
    }

    fn draw_character(&self, state: &GameState, ink: &str) {
        let s = FIELD_SCALE;
        let c = &state.character;

        if c.has_shield() {
            let center = c.pos + c.size * 0.5;
            self.ctx.set_stroke_style_str(SHIELD_COLOR);
            self.ctx.set_line_width(3.0);
            self.ctx.begin_path();
            self.ctx
                .arc(
                    center.x as f64,
                    center.y as f64,
                    (30.0 * s) as f64,
                    0.0,
                    std::f64::consts::TAU,
                )
                .ok();
            self.ctx.stroke();
        }

        self.ctx.set_fill_style_str(ink);
        self.fill_rect(c.pos.x, c.pos.y, c.size.x, c.size.y);
        // Head, legs, eye
        self.fill_rect(c.pos.x + 35.0 * s, c.pos.y - 10.0 * s, 8.0 * s, 10.0 * s);
        self.fill_rect(c.pos.x + 5.0 * s, c.pos.y + 35.0 * s, 8.0 * s, 10.0 * s);
        self.fill_rect(c.pos.x + 25.0 * s, c.pos.y + 35.0 * s, 8.0 * s, 10.0 * s);
        self.fill_rect(c.pos.x + 30.0 * s, c.pos.y + 5.0 * s, 3.0 * s, 3.0 * s);
    }

    fn draw_obstacles(&self, state: &GameState, ink: &str) {
        let s = FIELD_SCALE;
        self.ctx.set_fill_style_str(ink);
        for o in &state.obstacles {
            self.fill_rect(o.pos.x, o.pos.y, o.size.x, o.size.y);
            if o.kind == ObstacleKind::Tall {
                self.fill_rect(o.pos.x + 5.0 * s, o.pos.y - 5.0 * s, 10.0 * s, 5.0 * s);
                self.fill_rect(o.pos.x + 2.0 * s, o.pos.y + 10.0 * s, 16.0 * s, 3.0 * s);
            }
        }
    }

    fn draw_pickups(&self, state: &GameState) {
        self.ctx.set_font(&format!("{}px Arial", 16.0 * FIELD_SCALE));
        self.ctx.set_text_align("center");
        for p in &state.pickups {
            self.ctx.set_fill_style_str(PICKUP_COLOR);
            self.fill_rect(p.pos.x, p.pos.y, p.size.x, p.size.y);

            self.ctx.set_fill_style_str("#fff");
            self.ctx
                .fill_text(
                    pickup_icon(p.kind),
                    (p.pos.x + p.size.x / 2.0) as f64,
                    (p.pos.y + p.size.y / 2.0 + 5.0 * FIELD_SCALE) as f64,
                )
                .ok();
        }
    }

    fn draw_effects(&self, state: &GameState) {
        let s = FIELD_SCALE;
        let c = &state.character;

        if state.effects.speed_boost.is_active() {
            self.ctx.set_stroke_style_str(SPEED_LINE_COLOR);
            self.ctx.set_line_width(2.0);
            for i in 0..5 {
                let i = i as f32;
                self.ctx.begin_path();
                self.ctx.move_to(
                    (c.pos.x - (10.0 + i * 3.0) * s) as f64,
                    (c.pos.y + (10.0 + i * 5.0) * s) as f64,
                );
                self.ctx.line_to(
                    (c.pos.x - (20.0 + i * 3.0) * s) as f64,
                    (c.pos.y + (15.0 + i * 5.0) * s) as f64,
                );
                self.ctx.stroke();
            }
        }

        if state.effects.slow_mo.is_active() {
            self.ctx.set_fill_style_str(SLOW_MO_TINT);
            self.fill_rect(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT);
        }
    }

    fn draw_pause_overlay(&self) {
        self.ctx.set_fill_style_str(PAUSE_VEIL);
        self.fill_rect(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT);

        self.ctx.set_fill_style_str("#fff");
        self.centered_text("PAUSED", 40.0, 0.0);
        self.centered_text("Tap to resume", 16.0, 30.0);
    }

    fn draw_game_over(&self, state: &GameState, ink: &str) {
        self.ctx.set_fill_style_str(ink);
        self.centered_text("GAME OVER", 30.0, -20.0);
        self.centered_text(
            &format!("Final Score: {} | Level: {}", state.score, state.level),
            16.0,
            10.0,
        );
        self.centered_text("Tap to restart", 16.0, 40.0);
    }

    fn draw_start_screen(&self, ink: &str) {
        self.ctx.set_fill_style_str(ink);
        self.centered_text("Dino Dash", 24.0, -20.0);
        self.centered_text("Tap to start", 16.0, 20.0);
    }

    /// Text centered horizontally, `dy` below the field's middle
    fn centered_text(&self, text: &str, size: f32, dy: f32) {
        self.ctx.set_font(&format!("{}px Arial", size * FIELD_SCALE));
        self.ctx.set_text_align("center");
        self.ctx
            .fill_text(
                text,
                (FIELD_WIDTH / 2.0) as f64,
                (FIELD_HEIGHT / 2.0 + dy * FIELD_SCALE) as f64,
            )
            .ok();
    }
}

fn pickup_icon(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::SpeedBoost => "\u{26a1}",
        PowerUpKind::Shield => "\u{1f6e1}",
        PowerUpKind::SlowMo => "\u{23f1}",
    }
}
