//! "Liquid glass" particle field behind the hero section.

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::LiquidConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub life: f64,
    pub decay: f64,
    pub phase: f64,
}

/// Pair of particles close enough to be linked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    config: LiquidConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: Option<(f64, f64)>,
    rng: SmallRng,
}

impl ParticleField {
    pub fn new(config: LiquidConfig, width: f64, height: f64, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(config.particle_count),
            config,
            width,
            height,
            pointer: None,
            rng: SmallRng::seed_from_u64(seed),
        };
        for _ in 0..field.config.particle_count {
            let p = field.spawn();
            field.particles.push(p);
        }
        field
    }

    pub fn config(&self) -> &LiquidConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Existing particles keep their positions; walls apply on the next step.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Pointer in canvas pixels, or `None` once it leaves the canvas.
    pub fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
        self.pointer = pointer;
    }

    pub fn step(&mut self) {
        for i in 0..self.particles.len() {
            if let Some(pointer) = self.pointer {
                attract(&mut self.particles[i], pointer, self.config.interaction_radius);
            }
            let alive = advance(&mut self.particles[i], &self.config, self.width, self.height);
            if !alive {
                self.respawn(i);
            }
        }
    }

    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (a, pa) in self.particles.iter().enumerate() {
            for (b, pb) in self.particles.iter().enumerate().skip(a + 1) {
                let distance = (pa.x - pb.x).hypot(pa.y - pb.y);
                if distance < self.config.link_distance {
                    links.push(Link { a, b, distance });
                }
            }
        }
        links
    }

    /// Draw alpha for a particle.
    pub fn alpha(&self, p: &Particle) -> f64 {
        p.life * self.config.transparency
    }

    /// Fresh position, velocity, radius and phase at full life. The
    /// particle keeps its decay, so its lifetime is fixed at spawn.
    fn respawn(&mut self, i: usize) {
        let decay = self.particles[i].decay;
        self.particles[i] = Particle {
            decay,
            ..self.spawn()
        };
    }

    fn spawn(&mut self) -> Particle {
        let (r_lo, r_hi) = self.config.radius_range;
        let (d_lo, d_hi) = self.config.decay_range;
        Particle {
            x: self.rng.random::<f64>() * self.width,
            y: self.rng.random::<f64>() * self.height,
            vx: (self.rng.random::<f64>() - 0.5) * 2.0,
            vy: (self.rng.random::<f64>() - 0.5) * 2.0,
            radius: r_lo + self.rng.random::<f64>() * (r_hi - r_lo),
            life: 1.0,
            decay: d_lo + self.rng.random::<f64>() * (d_hi - d_lo),
            phase: self.rng.random::<f64>() * TAU,
        }
    }
}

fn attract(p: &mut Particle, (px, py): (f64, f64), radius: f64) {
    let dx = px - p.x;
    let dy = py - p.y;
    let distance = dx.hypot(dy);
    if distance > 0.0 && distance < radius {
        let force = (radius - distance) / radius;
        p.vx += dx / distance * force * 0.5;
        p.vy += dy / distance * force * 0.5;
    }
}

/// Integrates one frame. Returns `false` when the particle has expired.
fn advance(p: &mut Particle, cfg: &LiquidConfig, width: f64, height: f64) -> bool {
    p.vx *= 1.0 - cfg.viscosity;
    p.vy *= 1.0 - cfg.viscosity;

    p.x += p.vx + p.phase.sin() * cfg.wave_speed * 10.0;
    p.y += p.vy + p.phase.cos() * cfg.wave_speed * 10.0;
    p.phase += cfg.wave_speed;

    if p.x - p.radius < 0.0 || p.x + p.radius > width {
        p.vx *= -cfg.refraction;
        p.x = clamp_inside(p.x, p.radius, width);
    }
    if p.y - p.radius < 0.0 || p.y + p.radius > height {
        p.vy *= -cfg.refraction;
        p.y = clamp_inside(p.y, p.radius, height);
    }

    p.life -= p.decay;
    p.life > 0.0
}

// `max` before `min`: a canvas narrower than the disc pins it to the far wall.
fn clamp_inside(v: f64, radius: f64, extent: f64) -> f64 {
    v.max(radius).min(extent - radius)
}
