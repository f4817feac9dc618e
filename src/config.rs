//! Tunables for every effect on the page.
//!
//! Values mirror what the site ships with; `Default` is the production
//! configuration and tests override individual fields.

/// Glass-window displacement effect.
#[derive(Debug, Clone, PartialEq)]
pub struct GlassConfig {
    /// Logical canvas width in CSS pixels.
    pub width: u32,
    /// Logical canvas height in CSS pixels.
    pub height: u32,
    /// Device-pixel ratio applied to the backing canvas.
    pub dpi: f64,
    /// Half extents of the rounded pane in centered uv space.
    pub half_extent: (f64, f64),
    pub corner_radius: f64,
    /// `smoothstep(edge.0, edge.1, d)` maps the signed distance to a ramp.
    pub edge: (f64, f64),
    /// Peak lens scale deep inside the pane. `1.0` is identity.
    pub lens_strength: f64,
    pub pointer_weight: f64,
    pub pointer_falloff: f64,
    pub wave_amplitude: f64,
    pub wave_frequency: f64,
    pub ripple_amplitude: f64,
    pub ripple_frequency: f64,
    /// Multiplier applied to the pixel-space offset.
    pub gain: f64,
    /// Animation time added per frame.
    pub time_step: f64,
    /// Delay before the continuous loop starts after the mount render.
    pub start_delay_ms: i32,
}

impl Default for GlassConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 700,
            dpi: 1.0,
            half_extent: (0.48, 0.48),
            corner_radius: 0.3,
            edge: (1.0, -0.2),
            lens_strength: 1.5,
            pointer_weight: 0.5,
            pointer_falloff: 2.0,
            wave_amplitude: 0.08,
            wave_frequency: 15.0,
            ripple_amplitude: 0.05,
            ripple_frequency: 20.0,
            gain: 5.0,
            time_step: 0.1,
            start_delay_ms: 100,
        }
    }
}

impl GlassConfig {
    /// Backing-store size of the map canvas.
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = (self.width as f64 * self.dpi).round().max(1.0) as u32;
        let h = (self.height as f64 * self.dpi).round().max(1.0) as u32;
        (w, h)
    }
}

/// Particle field drawn behind the hero text.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidConfig {
    pub viscosity: f64,
    /// Velocity multiplier (negated) applied on a wall hit.
    pub refraction: f64,
    pub wave_speed: f64,
    pub transparency: f64,
    pub particle_count: usize,
    /// Pointer attraction reach in pixels.
    pub interaction_radius: f64,
    /// Pairs closer than this are joined by a line.
    pub link_distance: f64,
    pub radius_range: (f64, f64),
    pub decay_range: (f64, f64),
}

impl Default for LiquidConfig {
    fn default() -> Self {
        Self {
            viscosity: 0.05,
            refraction: 1.5,
            wave_speed: 0.02,
            transparency: 0.7,
            particle_count: 30,
            interaction_radius: 100.0,
            link_distance: 100.0,
            radius_range: (8.0, 28.0),
            decay_range: (0.001, 0.006),
        }
    }
}

/// Section tracking in the scroll container.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollConfig {
    pub sections: usize,
    /// `scrollTop` above which the scroll hint hides.
    pub hint_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            sections: 4,
            hint_threshold: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glass_pixel_size_follows_dpi() {
        let mut cfg = GlassConfig::default();
        assert_eq!(cfg.pixel_size(), (900, 700));
        cfg.dpi = 2.0;
        assert_eq!(cfg.pixel_size(), (1800, 1400));
        cfg.dpi = 0.0;
        assert_eq!(cfg.pixel_size(), (1, 1));
    }
}
