use std::f32::consts::TAU;
use std::time::Duration;

use engine::graphics::{hsl_to_rgba, Renderer2d};
use engine::surface::SurfaceSize;
use serde::{Deserialize, Serialize};

use crate::rng::Rng;

pub const PARTICLE_DRAG: f32 = 0.98;
pub const PARTICLE_GRAVITY: f32 = 0.1;
pub const MIN_SPEED: f32 = 2.0;
pub const MAX_SPEED: f32 = 7.0;
pub const MIN_DECAY: f32 = 0.015;
pub const MAX_DECAY: f32 = 0.03;
pub const MIN_RADIUS: f32 = 2.0;
pub const MAX_RADIUS: f32 = 4.0;
pub const MIN_BRIGHTNESS: f32 = 50.0;
pub const MAX_BRIGHTNESS: f32 = 100.0;

pub const BURST_MIN_PARTICLES: u32 = 50;
/// Exclusive upper bound, matching speed/decay/radius ranges.
pub const BURST_MAX_PARTICLES: u32 = 100;
pub const BURST_SPAWN_PROBABILITY: f32 = 0.1;

pub const SESSION_DURATION: Duration = Duration::from_secs(30);
pub const ARENA_CAPACITY: usize = 4096;
const COMPACT_DEAD_THRESHOLD: usize = ARENA_CAPACITY / 4;

pub type BurstId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub hue: f32,
    pub alpha: f32,
    pub decay: f32,
    pub radius: f32,
    pub brightness: f32,
    pub burst: BurstId,
    pub alive: bool,
}

/// Fixed-capacity particle storage.
///
/// Dead particles are tombstoned in place and the vector is compacted once
/// tombstones pile up, so steady-state frames neither allocate nor filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleArena {
    particles: Vec<Particle>,
    dead: usize,
    capacity: usize,
}

impl ParticleArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            dead: 0,
            capacity,
        }
    }

    pub fn live_count(&self) -> usize {
        self.particles.len() - self.dead
    }

    pub fn iter_live(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.alive)
    }

    /// Inserts a particle; compacts first when the vector is full of
    /// tombstones. Returns false only when the arena is truly full.
    pub fn spawn(&mut self, particle: Particle) -> bool {
        if self.particles.len() == self.capacity && self.dead > 0 {
            self.compact();
        }
        if self.particles.len() < self.capacity {
            self.particles.push(particle);
            true
        } else {
            false
        }
    }

    /// One physics step over every live particle. Deaths are reported via
    /// `on_death` with the owning burst id.
    pub fn step(&mut self, mut on_death: impl FnMut(BurstId)) {
        let mut new_deaths = 0usize;
        for p in &mut self.particles {
            if !p.alive {
                continue;
            }
            p.vx *= PARTICLE_DRAG;
            p.vy *= PARTICLE_DRAG;
            p.vy += PARTICLE_GRAVITY;
            p.x += p.vx;
            p.y += p.vy;
            p.alpha -= p.decay;
            if p.alpha <= 0.0 {
                p.alive = false;
                new_deaths += 1;
                on_death(p.burst);
            }
        }
        self.dead += new_deaths;
        if self.dead >= COMPACT_DEAD_THRESHOLD {
            self.compact();
        }
    }

    fn compact(&mut self) {
        self.particles.retain(|p| p.alive);
        self.dead = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    pub id: BurstId,
    pub hue: f32,
    pub live: u32,
}

/// A fireworks run over one rendering surface.
///
/// Per frame it may spawn a burst (p = 0.1) somewhere in the top half of
/// the bounds, then advances every live particle exactly one step; decay is
/// defined in frame units, so stepping is tied to the frame callback while
/// only the session lifetime is wall-clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireworksSession {
    arena: ParticleArena,
    bursts: Vec<Burst>,
    next_burst_id: BurstId,
    bounds: SurfaceSize,
    #[serde(with = "crate::serde_duration")]
    elapsed: Duration,
    #[serde(with = "crate::serde_duration")]
    duration: Duration,
    cancelled: bool,
}

impl FireworksSession {
    pub fn new(duration: Duration, bounds: SurfaceSize) -> Self {
        Self {
            arena: ParticleArena::with_capacity(ARENA_CAPACITY),
            bursts: Vec::new(),
            next_burst_id: 0,
            bounds,
            elapsed: Duration::ZERO,
            duration,
            cancelled: false,
        }
    }

    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    /// Updates spawn bounds for future bursts only; live particles keep
    /// their positions.
    pub fn resize(&mut self, bounds: SurfaceSize) {
        self.bounds = bounds;
    }

    pub fn live_particles(&self) -> usize {
        self.arena.live_count()
    }

    pub fn live_bursts(&self) -> usize {
        self.bursts.len()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.arena.iter_live()
    }

    /// Stops the session early. Safe to call any number of times.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled || self.elapsed >= self.duration
    }

    /// Spawns one burst with a random particle count in [50, 100). Returns
    /// `None` when the arena is full and no particle made it in.
    pub fn spawn_burst(&mut self, x: f32, y: f32, rng: &mut Rng) -> Option<BurstId> {
        let count = BURST_MIN_PARTICLES + rng.gen_index(BURST_MAX_PARTICLES - BURST_MIN_PARTICLES);
        self.spawn_burst_with_count(x, y, count, rng)
    }

    /// Spawns one burst; out-of-range counts are clamped into [50, 100).
    /// An id is only consumed when at least one particle spawned.
    pub fn spawn_burst_with_count(
        &mut self,
        x: f32,
        y: f32,
        count: u32,
        rng: &mut Rng,
    ) -> Option<BurstId> {
        let count = count.clamp(BURST_MIN_PARTICLES, BURST_MAX_PARTICLES - 1);
        let id = self.next_burst_id;
        let hue = rng.range_f32(0.0, 360.0);

        let mut spawned = 0u32;
        for _ in 0..count {
            let angle = rng.range_f32(0.0, TAU);
            let speed = rng.range_f32(MIN_SPEED, MAX_SPEED);
            let particle = Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                hue,
                alpha: 1.0,
                decay: rng.range_f32(MIN_DECAY, MAX_DECAY),
                radius: rng.range_f32(MIN_RADIUS, MAX_RADIUS),
                brightness: rng.range_f32(MIN_BRIGHTNESS, MAX_BRIGHTNESS),
                burst: id,
                alive: true,
            };
            if self.arena.spawn(particle) {
                spawned += 1;
            }
        }
        if spawned == 0 {
            return None;
        }
        self.next_burst_id += 1;
        self.bursts.push(Burst {
            id,
            hue,
            live: spawned,
        });
        Some(id)
    }

    /// One simulation step: particle physics, burst bookkeeping.
    pub fn step(&mut self) {
        let bursts = &mut self.bursts;
        self.arena.step(|burst_id| {
            if let Some(b) = bursts.iter_mut().find(|b| b.id == burst_id) {
                b.live = b.live.saturating_sub(1);
            }
        });
        bursts.retain(|b| b.live > 0);
    }

    /// Per-frame entry point: accumulates wall-clock time, stops once the
    /// session duration has elapsed, otherwise rolls the spawn dice and
    /// steps exactly once.
    pub fn advance_frame(&mut self, dt: Duration, rng: &mut Rng) {
        if self.is_finished() {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            return;
        }
        if rng.chance(BURST_SPAWN_PROBABILITY) {
            let x = rng.range_f32(0.0, self.bounds.width as f32);
            let y = rng.range_f32(0.0, self.bounds.height as f32 * 0.5);
            self.spawn_burst(x, y, rng);
        }
        self.step();
    }

    pub fn draw(&self, gfx: &mut dyn Renderer2d) {
        for p in self.arena.iter_live() {
            let color = hsl_to_rgba(p.hue, 100.0, p.brightness);
            let alpha = (p.alpha.clamp(0.0, 1.0) * 255.0) as u8;
            gfx.fill_circle(p.x, p.y, p.radius, color, alpha);
        }
    }
}
