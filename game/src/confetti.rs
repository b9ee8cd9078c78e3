use std::time::Duration;

use engine::graphics::{Color, Renderer2d};
use engine::surface::SurfaceSize;
use engine::ui::Rect;
use serde::{Deserialize, Serialize};

use crate::rng::Rng;

pub const CONFETTI_COUNT: usize = 100;
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(30);
pub const PIECE_LIFETIME: Duration = Duration::from_secs(3);
/// Fall time across the full surface height, drawn uniformly per piece.
pub const MIN_FALL_SECS: f32 = 2.0;
pub const MAX_FALL_SECS: f32 = 4.0;

const PIECE_W: u32 = 6;
const PIECE_H: u32 = 10;

pub const PALETTE: [Color; 6] = [
    [236, 72, 153, 255],
    [139, 92, 246, 255],
    [59, 130, 246, 255],
    [20, 184, 166, 255],
    [245, 158, 11, 255],
    [244, 63, 94, 255],
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ConfettiPiece {
    x: f32,
    y: f32,
    fall_speed: f32,
    color: Color,
    #[serde(with = "crate::serde_duration")]
    age: Duration,
    alive: bool,
}

/// The confetti rain over the reveal screen: 100 pieces released on a 30 ms
/// cadence, each living 3 seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfettiField {
    pieces: Vec<ConfettiPiece>,
    spawned: usize,
    #[serde(with = "crate::serde_duration")]
    spawn_accum: Duration,
    bounds: SurfaceSize,
    rng: Rng,
}

impl ConfettiField {
    pub fn new(bounds: SurfaceSize, seed: u64) -> Self {
        Self {
            pieces: Vec::with_capacity(CONFETTI_COUNT),
            spawned: 0,
            spawn_accum: SPAWN_INTERVAL, // first piece appears immediately
            bounds,
            rng: Rng::new(seed),
        }
    }

    pub fn live_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.alive).count()
    }

    pub fn spawned_count(&self) -> usize {
        self.spawned
    }

    pub fn is_done(&self) -> bool {
        self.spawned == CONFETTI_COUNT && self.live_count() == 0
    }

    pub fn tick(&mut self, dt: Duration) {
        self.spawn_accum = self.spawn_accum.saturating_add(dt);
        while self.spawn_accum >= SPAWN_INTERVAL && self.spawned < CONFETTI_COUNT {
            self.spawn_accum -= SPAWN_INTERVAL;
            self.spawn_piece();
        }

        let height = self.bounds.height as f32;
        for p in &mut self.pieces {
            if !p.alive {
                continue;
            }
            p.age = p.age.saturating_add(dt);
            p.y += p.fall_speed * dt.as_secs_f32();
            if p.age >= PIECE_LIFETIME || p.y > height {
                p.alive = false;
            }
        }
    }

    fn spawn_piece(&mut self) {
        let width = self.bounds.width as f32;
        let height = self.bounds.height as f32;
        let fall_secs = self.rng.range_f32(MIN_FALL_SECS, MAX_FALL_SECS);
        let color = PALETTE[self.rng.gen_index(PALETTE.len() as u32) as usize];
        self.pieces.push(ConfettiPiece {
            x: self.rng.range_f32(0.0, width),
            y: 0.0,
            fall_speed: height / fall_secs,
            color,
            age: Duration::ZERO,
            alive: true,
        });
        self.spawned += 1;
    }

    pub fn draw(&self, gfx: &mut dyn Renderer2d) {
        for p in self.pieces.iter().filter(|p| p.alive) {
            let rect = Rect::new(p.x.max(0.0) as u32, p.y.max(0.0) as u32, PIECE_W, PIECE_H);
            gfx.blend_rect(rect, p.color, 230);
        }
    }
}
