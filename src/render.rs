//! Canvas-2D renderer
//!
//! Flat shapes in logical field coordinates; the host sets the DPI
//! transform so everything here draws in 960x540 units. Menu frames show
//! only the idle player, Over frames keep the final field layout on screen.

use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameCore, Phase, SpawnedObject};

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Size the backing store for the device pixel ratio and set the
    /// logical-units transform. Call on startup and on resize.
    pub fn fit_canvas(&self, canvas: &HtmlCanvasElement, dpr: f64) {
        canvas.set_width((FIELD_WIDTH as f64 * dpr) as u32);
        canvas.set_height((FIELD_HEIGHT as f64 * dpr) as u32);
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    /// Draw one frame of the current core state. `time_s` drives the idle
    /// bob animation only.
    pub fn draw(&self, core: &GameCore, settings: &Settings, time_s: f64) {
        self.ctx
            .clear_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
        self.draw_background();

        if core.phase == Phase::Menu {
            self.draw_player(core, settings, time_s);
            return;
        }

        for object in core.field.objects() {
            self.draw_object(object);
        }
        self.draw_player(core, settings, time_s);
    }

    fn draw_background(&self) {
        let ctx = &self.ctx;
        let w = FIELD_WIDTH as f64;
        let h = FIELD_HEIGHT as f64;

        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        let _ = gradient.add_color_stop(0.0, "#0a1222");
        let _ = gradient.add_color_stop(1.0, "#152238");
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Lane guide lines between the three lanes
        ctx.set_stroke_style_str("#ffffff15");
        ctx.set_line_width(2.0);
        for i in [-0.5, 0.5] {
            let x = w / 2.0 + i * LANE_SPACING as f64 * 2.0;
            ctx.begin_path();
            ctx.move_to(x, h * 0.15);
            ctx.line_to(x, h);
            ctx.stroke();
        }

        // Ground band
        ctx.set_fill_style_str("#0c172a");
        ctx.fill_rect(0.0, h - 80.0, w, 80.0);
    }

    fn draw_player(&self, core: &GameCore, settings: &Settings, time_s: f64) {
        let ctx = &self.ctx;
        let player = &core.player;
        let bob = if settings.reduced_motion || !player.grounded {
            0.0
        } else {
            (time_s * 3.3).sin() * 2.0
        };

        ctx.save();
        let _ = ctx.translate(player.pos.x as f64, player.pos.y as f64 + bob);
        if player.invulnerable_remaining > 0.0 {
            ctx.set_global_alpha(0.5);
        }

        // Shadow
        ctx.set_fill_style_str("rgba(0,0,0,.35)");
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, 40.0, 26.0, 10.0, 0.0, 0.0, PI * 2.0);
        ctx.fill();

        // Board
        ctx.set_fill_style_str("#10b981");
        ctx.fill_rect(-26.0, 20.0, 52.0, 8.0);

        // Body
        ctx.set_fill_style_str("#cbd5e1");
        self.round_rect(-22.0, -36.0, 44.0, 56.0, 10.0);

        // Mask stripe
        ctx.set_fill_style_str("#0b1220");
        ctx.fill_rect(-22.0, -18.0, 44.0, 12.0);

        // Face
        ctx.set_fill_style_str("#e2e8f0");
        self.round_rect(-18.0, -32.0, 36.0, 20.0, 8.0);

        // Ears
        ctx.set_fill_style_str("#94a3b8");
        ctx.begin_path();
        ctx.move_to(-22.0, -36.0);
        ctx.line_to(-6.0, -52.0);
        ctx.line_to(0.0, -36.0);
        ctx.fill();
        ctx.begin_path();
        ctx.move_to(22.0, -36.0);
        ctx.line_to(6.0, -52.0);
        ctx.line_to(0.0, -36.0);
        ctx.fill();

        // Eye glints
        ctx.set_fill_style_str("#fff");
        ctx.begin_path();
        let _ = ctx.arc(-8.0, -22.0, 2.0, 0.0, PI * 2.0);
        ctx.fill();
        ctx.begin_path();
        let _ = ctx.arc(8.0, -22.0, 2.0, 0.0, PI * 2.0);
        ctx.fill();

        ctx.restore();
    }

    fn draw_object(&self, object: &SpawnedObject) {
        let ctx = &self.ctx;
        let pos = object.pos();
        ctx.save();
        let _ = ctx.translate(pos.x as f64, pos.y as f64);

        match object {
            SpawnedObject::Obstacle { .. } => {
                // Crate block
                ctx.set_fill_style_str("#4b5563");
                self.round_rect(-26.0, -26.0, 52.0, 52.0, 8.0);
                ctx.set_stroke_style_str("#9ca3af");
                ctx.stroke_rect(-26.0, -26.0, 52.0, 52.0);
            }
            SpawnedObject::Star { .. } => {
                ctx.set_fill_style_str("#ffd640");
                ctx.begin_path();
                let (outer, inner) = (20.0f64, 9.0f64);
                for i in 0..10 {
                    let angle = -PI / 2.0 + i as f64 * PI / 5.0;
                    let radius = if i % 2 == 0 { outer } else { inner };
                    let px = angle.cos() * radius;
                    let py = angle.sin() * radius;
                    if i == 0 {
                        ctx.move_to(px, py);
                    } else {
                        ctx.line_to(px, py);
                    }
                }
                ctx.close_path();
                ctx.fill();
            }
            SpawnedObject::Cat { width, height, .. } => {
                let (w, h) = (*width as f64, *height as f64);
                ctx.set_fill_style_str("#f59e0b");
                self.round_rect(-w / 2.0, -h / 2.0, w, h, 12.0);
                // Ears
                ctx.set_fill_style_str("#d97706");
                ctx.begin_path();
                ctx.move_to(-w / 2.0 + 10.0, -h / 2.0);
                ctx.line_to(-w / 2.0 + 30.0, -h / 2.0 - 18.0);
                ctx.line_to(-w / 2.0 + 40.0, -h / 2.0);
                ctx.fill();
                ctx.begin_path();
                ctx.move_to(w / 2.0 - 10.0, -h / 2.0);
                ctx.line_to(w / 2.0 - 30.0, -h / 2.0 - 18.0);
                ctx.line_to(w / 2.0 - 40.0, -h / 2.0);
                ctx.fill();
            }
        }

        ctx.restore();
    }

    /// Rounded rect path, filled with the current fill style.
    fn round_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = ctx.arc_to(x, y + h, x, y, r);
        let _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
        ctx.fill();
    }
}
