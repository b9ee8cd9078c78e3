//! Screen layout and scene drawing.
//!
//! Layout is pure data so hit-testing can be unit tested headlessly; the
//! draw path only reads state and never mutates it.

use engine::graphics::{hsl_to_rgba, text_width, Color, Renderer2d};
use engine::surface::SurfaceSize;
use engine::ui::Rect;

use crate::gender::GenderChoice;
use crate::puzzle_core::{TileId, GRID_SIDE, TILE_COUNT};
use crate::reveal::RevealPhase;
use crate::stage::Stage;
use crate::state::GameState;

const BACKGROUND: Color = [18, 12, 32, 255];
const PANEL: Color = [40, 30, 64, 255];
const ACCENT: Color = [139, 92, 246, 255];
const TEXT: Color = [235, 230, 245, 255];
const CARD_BOY: Color = [59, 130, 246, 255];
const CARD_GIRL: Color = [236, 72, 153, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub surface: Rect,
    pub progress_bar: Rect,
    pub sound_toggle: Rect,
    pub gender_cards: [Rect; 2],
    pub grid_slots: [Rect; TILE_COUNT],
    pub tray_tiles: [Rect; TILE_COUNT],
    pub continue_button: Rect,
}

pub fn layout(size: SurfaceSize) -> Layout {
    let surface = Rect::from_size(size.width, size.height);
    let margin = 16u32;

    let progress_bar = Rect::new(margin, margin, size.width.saturating_sub(margin * 2), 8);
    let sound_toggle = Rect::new(size.width.saturating_sub(margin + 28), margin + 16, 28, 28);

    // Stage 1: two cards centered.
    let card_w = (size.width / 3).max(60);
    let card_h = (size.height / 3).max(80);
    let card_y = size.height / 3;
    let gap = card_w / 4;
    let total = card_w * 2 + gap;
    let card_x0 = size.width.saturating_sub(total) / 2;
    let gender_cards = [
        Rect::new(card_x0, card_y, card_w, card_h),
        Rect::new(card_x0 + card_w + gap, card_y, card_w, card_h),
    ];

    // Stage 2: the 3x3 board on the left, the tray on the right. The full
    // row costs board_x + 7 cells + 5 pads, so cells are sized from the
    // width that remains after the margins; the height bound keeps the
    // continue button above the window bottom.
    let avail_w = size.width.saturating_sub(margin * 4);
    let cell = (avail_w / 8).min(size.height / 6).max(24);
    let pad = cell / 8;
    let board_x = margin * 2;
    let board_y = size.height / 6;
    let mut grid_slots = [Rect::default(); TILE_COUNT];
    let mut tray_tiles = [Rect::default(); TILE_COUNT];
    let tray_x = board_x + (cell + pad) * GRID_SIDE as u32 + cell;
    for i in 0..TILE_COUNT {
        let row = (i / GRID_SIDE) as u32;
        let col = (i % GRID_SIDE) as u32;
        grid_slots[i] = Rect::new(
            board_x + col * (cell + pad),
            board_y + row * (cell + pad),
            cell,
            cell,
        );
        tray_tiles[i] = Rect::new(
            tray_x + col * (cell + pad),
            board_y + row * (cell + pad),
            cell,
            cell,
        );
    }

    let continue_button = Rect::new(
        board_x,
        board_y + (cell + pad) * GRID_SIDE as u32 + cell / 2,
        cell * 3,
        cell / 2,
    );

    Layout {
        surface,
        progress_bar,
        sound_toggle,
        gender_cards,
        grid_slots,
        tray_tiles,
        continue_button,
    }
}

impl Layout {
    pub fn hit_slot(&self, x: u32, y: u32) -> Option<usize> {
        self.grid_slots.iter().position(|r| r.contains(x, y))
    }

    pub fn hit_tray_tile(&self, x: u32, y: u32) -> Option<TileId> {
        self.tray_tiles.iter().position(|r| r.contains(x, y))
    }

    pub fn hit_gender_card(&self, x: u32, y: u32) -> Option<GenderChoice> {
        if self.gender_cards[0].contains(x, y) {
            Some(GenderChoice::Male)
        } else if self.gender_cards[1].contains(x, y) {
            Some(GenderChoice::Female)
        } else {
            None
        }
    }

    pub fn hit_continue(&self, x: u32, y: u32) -> bool {
        self.continue_button.contains(x, y)
    }

    pub fn hit_sound_toggle(&self, x: u32, y: u32) -> bool {
        self.sound_toggle.contains(x, y)
    }
}

fn tile_color(correct_slot: usize) -> Color {
    hsl_to_rgba(correct_slot as f32 * 40.0, 70.0, 50.0)
}

fn centered_text(gfx: &mut dyn Renderer2d, rect: Rect, text: &str, color: Color, scale: u32) {
    let w = text_width(text, scale);
    let x = rect.x + rect.w.saturating_sub(w) / 2;
    let y = rect.y + rect.h.saturating_sub(5 * scale) / 2;
    gfx.draw_text_scaled(x, y, text, color, scale);
}

pub fn draw_scene(
    gfx: &mut dyn Renderer2d,
    state: &GameState,
    layout: &Layout,
    pointer: Option<(u32, u32)>,
) {
    gfx.clear(BACKGROUND);

    // Progress bar, stage N of 3.
    gfx.rect_outline(layout.progress_bar, PANEL);
    let fill_w = (layout.progress_bar.w as f32 * state.stage.progress()) as u32;
    gfx.fill_rect(
        Rect::new(
            layout.progress_bar.x,
            layout.progress_bar.y,
            fill_w,
            layout.progress_bar.h,
        ),
        ACCENT,
    );

    // Sound toggle.
    let toggle_color = if state.settings.sound_enabled {
        ACCENT
    } else {
        PANEL
    };
    gfx.fill_rect(layout.sound_toggle, toggle_color);
    centered_text(gfx, layout.sound_toggle, "S", TEXT, 2);

    match state.stage {
        Stage::GenderSelect => draw_gender_select(gfx, layout),
        Stage::Puzzle => draw_puzzle(gfx, state, layout, pointer),
        Stage::Reveal => draw_reveal(gfx, state, layout),
    }
}

fn draw_gender_select(gfx: &mut dyn Renderer2d, layout: &Layout) {
    centered_text(
        gfx,
        Rect::new(0, layout.surface.h / 8, layout.surface.w, 24),
        "WHO ARE YOU?",
        TEXT,
        3,
    );
    gfx.fill_rect(layout.gender_cards[0], CARD_BOY);
    centered_text(gfx, layout.gender_cards[0], "BOY", TEXT, 3);
    gfx.fill_rect(layout.gender_cards[1], CARD_GIRL);
    centered_text(gfx, layout.gender_cards[1], "GIRL", TEXT, 3);
}

fn draw_puzzle(
    gfx: &mut dyn Renderer2d,
    state: &GameState,
    layout: &Layout,
    pointer: Option<(u32, u32)>,
) {
    let shake = state.shake();
    for slot in state.puzzle.slots() {
        let rect = layout.grid_slots[slot.position];
        if slot.filled {
            gfx.fill_rect(rect, tile_color(slot.position));
            centered_text(gfx, rect, &format!("{}", slot.position + 1), TEXT, 2);
        } else {
            gfx.rect_outline(rect, PANEL);
        }
    }

    for tile in state.puzzle.tiles() {
        if tile.placed || Some(tile.id) == state.puzzle.active_drag() {
            continue;
        }
        let mut rect = layout.tray_tiles[tile.id];
        if let Some((shaking, remaining)) = shake {
            if shaking == tile.id {
                // Wobble left/right while the shake timer runs down.
                let step = (remaining.as_millis() / 50) % 2;
                rect.x = rect.x.saturating_add(step as u32 * 4).saturating_sub(2);
            }
        }
        gfx.fill_rect(rect, tile_color(tile.correct_slot));
        centered_text(gfx, rect, &format!("{}", tile.correct_slot + 1), TEXT, 2);
    }

    // The dragged tile follows the pointer; its target slot lights up.
    if let (Some(drag), Some((px, py))) = (state.puzzle.active_drag(), pointer) {
        if let Some(slot) = layout.hit_slot(px, py) {
            gfx.rect_outline(layout.grid_slots[slot], ACCENT);
        }
        if let Some(tile) = state.puzzle.tile(drag) {
            let size = layout.tray_tiles[drag];
            let rect = Rect::new(
                px.saturating_sub(size.w / 2),
                py.saturating_sub(size.h / 2),
                size.w,
                size.h,
            );
            gfx.blend_rect(rect, tile_color(tile.correct_slot), 200);
        }
    }

    if state.puzzle.is_complete() {
        gfx.fill_rect(layout.continue_button, ACCENT);
        centered_text(gfx, layout.continue_button, "CONTINUE", TEXT, 2);
    }
}

fn draw_reveal(gfx: &mut dyn Renderer2d, state: &GameState, layout: &Layout) {
    let center = Rect::new(0, layout.surface.h / 3, layout.surface.w, 40);
    match state.reveal_phase() {
        Some(RevealPhase::Countdown { current }) => {
            centered_text(gfx, center, &format!("{current}"), TEXT, 8);
        }
        Some(RevealPhase::Celebrate) | Some(RevealPhase::Done) => {
            let text = state.reveal_text();
            centered_text(gfx, center, text.greeting, ACCENT, 4);
            let below = Rect::new(0, layout.surface.h / 3 + 60, layout.surface.w, 24);
            centered_text(gfx, below, text.message, TEXT, 2);
        }
        None => {}
    }

    if let Some(confetti) = state.confetti() {
        confetti.draw(gfx);
    }
    if state.fireworks_visible() {
        if let Some(fw) = state.fireworks() {
            fw.draw(gfx);
        }
    }
}
