//! Procedural displacement map for the glass window.
//!
//! Every frame the generator evaluates a rounded-rectangle SDF lens, a
//! pointer bulge and a few travelling waves per pixel, then packs the
//! resulting offsets into an RGBA buffer for `feDisplacementMap`
//! (R = horizontal, G = vertical). The filter's `scale` attribute is set to
//! [`DisplacementMap::scale`], which undoes the per-pixel normalization.

use crate::config::GlassConfig;

/// Smallest denominator used when normalizing offsets.
pub const MIN_SCALE: f64 = 1e-6;

/// Pointer position normalized to the container bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Default for Pointer {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl Pointer {
    /// Normalizes client coordinates against a bounding box.
    ///
    /// A zero-sized box maps to the center.
    pub fn from_client(client: (f64, f64), origin: (f64, f64), size: (f64, f64)) -> Self {
        let norm = |c: f64, o: f64, s: f64| if s > 0.0 { (c - o) / s } else { 0.5 };
        Self {
            x: norm(client.0, origin.0, size.0),
            y: norm(client.1, origin.1, size.1),
        }
    }
}

/// Inputs that vary between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub time: f64,
    pub pointer: Pointer,
}

/// Cubic Hermite ramp from `a` to `b`. `a > b` gives a falling ramp.
pub fn smooth_step(a: f64, b: f64, t: f64) -> f64 {
    let t = ((t - a) / (b - a)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Signed distance from `(x, y)` to a rounded box centered on the origin.
/// Negative inside.
pub fn rounded_rect_sdf(x: f64, y: f64, half_w: f64, half_h: f64, radius: f64) -> f64 {
    let qx = x.abs() - half_w + radius;
    let qy = y.abs() - half_h + radius;
    qx.max(qy).min(0.0) + qx.max(0.0).hypot(qy.max(0.0)) - radius
}

/// Maps a signed offset into a clamped 8-bit channel value.
///
/// Matches `Uint8ClampedArray` stores: round half to even, clamp, NaN to 0.
pub fn encode_channel(value: f64, scale: f64) -> u8 {
    let v = (value / scale.max(MIN_SCALE) + 0.5) * 255.0;
    if v.is_nan() {
        return 0;
    }
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Per-pixel kernel parameters, derived once from [`GlassConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldParams {
    pub width: u32,
    pub height: u32,
    pub dpi: f64,
    half_extent: (f64, f64),
    corner_radius: f64,
    edge: (f64, f64),
    lens_strength: f64,
    pointer_weight: f64,
    pointer_falloff: f64,
    wave_amplitude: f64,
    wave_frequency: f64,
    ripple_amplitude: f64,
    ripple_frequency: f64,
    gain: f64,
}

impl From<&GlassConfig> for FieldParams {
    fn from(cfg: &GlassConfig) -> Self {
        let (width, height) = cfg.pixel_size();
        Self {
            width,
            height,
            dpi: cfg.dpi,
            half_extent: cfg.half_extent,
            corner_radius: cfg.corner_radius,
            edge: cfg.edge,
            lens_strength: cfg.lens_strength,
            pointer_weight: cfg.pointer_weight,
            pointer_falloff: cfg.pointer_falloff,
            wave_amplitude: cfg.wave_amplitude,
            wave_frequency: cfg.wave_frequency,
            ripple_amplitude: cfg.ripple_amplitude,
            ripple_frequency: cfg.ripple_frequency,
            gain: cfg.gain,
        }
    }
}

impl FieldParams {
    /// Lens scale for a centered uv position.
    pub fn lens(&self, ix: f64, iy: f64) -> f64 {
        let (hw, hh) = self.half_extent;
        let d = rounded_rect_sdf(ix, iy, hw, hh, self.corner_radius);
        let ramp = smooth_step(self.edge.0, self.edge.1, d);
        smooth_step(0.0, 1.0, ramp) * self.lens_strength
    }

    /// Pixel-space `(dx, dy)` for pixel `(x, y)`.
    pub fn sample(&self, x: u32, y: u32, input: &FrameInput) -> (f64, f64) {
        let w = self.width as f64;
        let h = self.height as f64;
        let (x, y) = (x as f64, y as f64);
        let (u, v) = (x / w, y / h);
        let (ix, iy) = (u - 0.5, v - 0.5);
        let scale = self.lens(ix, iy);

        let mx = u - input.pointer.x;
        let my = v - input.pointer.y;
        let dist = mx.hypot(my);
        let falloff = (-dist * self.pointer_falloff).exp();
        let influence = falloff * self.pointer_weight;

        let t = input.time;
        let wave_x = (v * self.wave_frequency + t * 2.0).sin() * self.wave_amplitude;
        let wave_y = (u * self.wave_frequency + t * 2.0).cos() * self.wave_amplitude;
        let ripple = (dist * self.ripple_frequency - t * 3.0).sin() * self.ripple_amplitude * falloff;

        let dx = ((ix * scale + 0.5 + mx * influence + wave_x + ripple) * w - x) * self.gain;
        let dy = ((iy * scale + 0.5 + my * influence + wave_y + ripple) * h - y) * self.gain;
        (dx, dy)
    }
}

/// One frame's encoded map.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementMap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA.
    pub rgba: Vec<u8>,
    /// Twice the largest absolute offset seen this frame.
    pub scale: f64,
}

impl DisplacementMap {
    /// Value for the filter's `scale` attribute. A non-positive dpi is
    /// treated as [`MIN_SCALE`].
    pub fn filter_scale(&self, dpi: f64) -> f64 {
        self.scale / dpi.max(MIN_SCALE)
    }
}

/// Reuses its buffers between frames; output depends only on the inputs.
#[derive(Debug, Clone)]
pub struct FieldGenerator {
    params: FieldParams,
    raw: Vec<(f64, f64)>,
    map: DisplacementMap,
}

impl FieldGenerator {
    pub fn new(params: FieldParams) -> Self {
        let len = params.width as usize * params.height as usize;
        let map = DisplacementMap {
            width: params.width,
            height: params.height,
            rgba: vec![0; len * 4],
            scale: 0.0,
        };
        Self {
            params,
            raw: Vec::with_capacity(len),
            map,
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn render(&mut self, input: &FrameInput) -> &DisplacementMap {
        let FieldParams { width, height, .. } = self.params;

        self.raw.clear();
        let mut peak = 0.0_f64;
        for y in 0..height {
            for x in 0..width {
                let (dx, dy) = self.params.sample(x, y, input);
                peak = peak.max(dx.abs()).max(dy.abs());
                self.raw.push((dx, dy));
            }
        }
        let scale = peak * 2.0;

        for (px, &(dx, dy)) in self.map.rgba.chunks_exact_mut(4).zip(&self.raw) {
            px[0] = encode_channel(dx, scale);
            px[1] = encode_channel(dy, scale);
            px[2] = 0;
            px[3] = 255;
        }
        self.map.scale = scale;
        &self.map
    }
}

/// Convenience one-shot form of [`FieldGenerator::render`].
pub fn generate(params: &FieldParams, input: &FrameInput) -> DisplacementMap {
    FieldGenerator::new(params.clone()).render(input).clone()
}
