use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::dom::{self, Listener};
use super::render::{Animate, RenderLoop};
use crate::config::LiquidConfig;
use crate::error::{Result, SurfaceError};
use crate::particles::{Particle, ParticleField};

struct LiquidScene {
    field: ParticleField,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl LiquidScene {
    fn resize(&mut self) {
        let (w, h) = fit_to_parent(&self.canvas);
        self.field.resize(w, h);
    }

    fn draw(&self) -> Result<()> {
        let ctx = &self.ctx;
        let (w, h) = self.field.size();
        // translucent fill leaves a short trail
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.05)");
        ctx.fill_rect(0.0, 0.0, w, h);

        for p in self.field.particles() {
            self.draw_particle(p)?;
        }

        let transparency = self.field.config().transparency;
        ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", transparency * 0.1));
        ctx.set_line_width(1.0);
        let particles = self.field.particles();
        for link in self.field.links() {
            let (a, b) = (&particles[link.a], &particles[link.b]);
            ctx.begin_path();
            ctx.move_to(a.x, a.y);
            ctx.line_to(b.x, b.y);
            ctx.stroke();
        }
        Ok(())
    }

    fn draw_particle(&self, p: &Particle) -> Result<()> {
        let ctx = &self.ctx;
        let alpha = self.field.alpha(p);
        let r = p.radius;
        ctx.save();

        let glow = ctx.create_radial_gradient(p.x, p.y, 0.0, p.x, p.y, r * 2.0)?;
        stops(&glow, &[
            (0.0, format!("rgba(255, 255, 255, {})", alpha * 0.3)),
            (0.5, format!("rgba(200, 230, 255, {})", alpha * 0.2)),
            (1.0, "rgba(255, 255, 255, 0)".to_owned()),
        ])?;
        fill_circle(ctx, &glow, p.x, p.y, r * 2.0)?;

        let body = ctx.create_radial_gradient(p.x - r * 0.3, p.y - r * 0.3, 0.0, p.x, p.y, r)?;
        stops(&body, &[
            (0.0, format!("rgba(255, 255, 255, {})", alpha * 0.8)),
            (0.3, format!("rgba(200, 230, 255, {})", alpha * 0.6)),
            (0.7, format!("rgba(150, 200, 255, {})", alpha * 0.4)),
            (1.0, format!("rgba(100, 150, 255, {})", alpha * 0.2)),
        ])?;
        fill_circle(ctx, &body, p.x, p.y, r)?;

        let (hx, hy) = (p.x - r * 0.3, p.y - r * 0.3);
        let highlight = ctx.create_radial_gradient(p.x - r * 0.5, p.y - r * 0.5, 0.0, hx, hy, r * 0.5)?;
        stops(&highlight, &[
            (0.0, format!("rgba(255, 255, 255, {})", alpha * 0.9)),
            (1.0, "rgba(255, 255, 255, 0)".to_owned()),
        ])?;
        fill_circle(ctx, &highlight, hx, hy, r * 0.3)?;

        ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.3));
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.arc(p.x, p.y, r, 0.0, TAU)?;
        ctx.stroke();

        ctx.restore();
        Ok(())
    }
}

fn stops(gradient: &CanvasGradient, colors: &[(f32, String)]) -> Result<()> {
    for (offset, color) in colors {
        gradient.add_color_stop(*offset, color)?;
    }
    Ok(())
}

fn fill_circle(ctx: &CanvasRenderingContext2d, gradient: &CanvasGradient, x: f64, y: f64, r: f64) -> Result<()> {
    ctx.set_fill_style_canvas_gradient(gradient);
    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, TAU)?;
    ctx.fill();
    Ok(())
}

impl Animate for LiquidScene {
    fn frame(&mut self, _frame: u64) {
        self.field.step();
        if let Err(err) = self.draw() {
            log::debug!("liquid frame skipped: {err}");
        }
    }
}

/// Particle canvas; listeners and the frame loop go away on drop.
pub struct LiquidCanvas {
    anim: RenderLoop<LiquidScene>,
    _listeners: Vec<Listener>,
}

impl LiquidCanvas {
    pub fn mount(canvas_id: &str) -> Result<Self> {
        let document = dom::document()?;
        let canvas: HtmlCanvasElement = dom::by_id(&document, canvas_id)?;
        Self::attach(canvas, LiquidConfig::default())
    }

    pub fn attach(canvas: HtmlCanvasElement, config: LiquidConfig) -> Result<Self> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(SurfaceError::NoContext("2d"))?
            .dyn_into()
            .map_err(|_| SurfaceError::NoContext("2d"))?;

        let (w, h) = fit_to_parent(&canvas);
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let scene = LiquidScene {
            field: ParticleField::new(config, w, h, seed),
            canvas: canvas.clone(),
            ctx,
        };

        let anim = RenderLoop::new(scene)?;
        let listeners = listen(&canvas, &anim)?;
        anim.start()?;
        log::debug!("liquid canvas mounted at {w}x{h}");

        Ok(Self {
            anim,
            _listeners: listeners,
        })
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_running()
    }
}

impl Drop for LiquidCanvas {
    fn drop(&mut self) {
        self.anim.stop();
    }
}

/// Sizes the canvas backing store to its parent, when it has one.
fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
    if let Some(parent) = canvas.parent_element() {
        canvas.set_width(parent.client_width().max(0) as u32);
        canvas.set_height(parent.client_height().max(0) as u32);
    }
    (canvas.width() as f64, canvas.height() as f64)
}

fn listen(canvas: &HtmlCanvasElement, anim: &RenderLoop<LiquidScene>) -> Result<Vec<Listener>> {
    let on_move = {
        let canvas = canvas.clone();
        let scene = anim.handle();
        move |event: web_sys::Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = canvas.get_bounding_client_rect();
            let pos = (event.client_x() as f64 - rect.left(), event.client_y() as f64 - rect.top());
            scene.with(|scene| scene.field.set_pointer(Some(pos)));
        }
    };
    let on_leave = {
        let scene = anim.handle();
        move |_: web_sys::Event| {
            scene.with(|scene| scene.field.set_pointer(None));
        }
    };
    let on_resize = {
        let scene = anim.handle();
        move |_: web_sys::Event| {
            scene.with(LiquidScene::resize);
        }
    };

    Ok(vec![
        Listener::new(canvas, "mousemove", on_move)?,
        Listener::new(canvas, "mouseleave", on_leave)?,
        Listener::new(&dom::window()?, "resize", on_resize)?,
    ])
}
