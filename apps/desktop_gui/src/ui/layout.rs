//! Board geometry: a square arena with one card beyond each axis extreme
//! and the two sliders along the bottom and right edges.

use eframe::egui::{self, pos2, vec2, Pos2, Rect};
use shared::{
    domain::CardRole,
    protocol::{ArenaRect, KeyInput},
};

pub const CARD_SIZE: egui::Vec2 = egui::Vec2::new(170.0, 210.0);
pub const GAP: f32 = 10.0;
pub const SLIDER_STRIP: f32 = 40.0;
pub const MIN_ARENA_SIDE: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub arena: Rect,
    pub cards: [Rect; 4],
    pub x_slider: Rect,
    pub y_slider: Rect,
}

impl BoardLayout {
    pub fn compute(available: Rect) -> Self {
        let board = Rect::from_min_max(
            available.min,
            pos2(
                available.max.x - SLIDER_STRIP,
                available.max.y - SLIDER_STRIP,
            ),
        );
        let side = (board.width() - 2.0 * (CARD_SIZE.x + GAP))
            .min(board.height() - 2.0 * (CARD_SIZE.y + GAP))
            .max(MIN_ARENA_SIDE);
        let arena = Rect::from_center_size(board.center(), vec2(side, side));
        let center = arena.center();

        let card_at = |center: Pos2| Rect::from_center_size(center, CARD_SIZE);
        let cards = CardRole::ALL.map(|role| match role {
            CardRole::YMax => card_at(pos2(center.x, arena.top() - GAP - CARD_SIZE.y / 2.0)),
            CardRole::YMin => card_at(pos2(center.x, arena.bottom() + GAP + CARD_SIZE.y / 2.0)),
            CardRole::XMin => card_at(pos2(arena.left() - GAP - CARD_SIZE.x / 2.0, center.y)),
            CardRole::XMax => card_at(pos2(arena.right() + GAP + CARD_SIZE.x / 2.0, center.y)),
        });

        Self {
            arena,
            cards,
            x_slider: Rect::from_min_max(
                pos2(arena.left(), board.bottom() + 4.0),
                pos2(arena.right(), available.bottom() - 4.0),
            ),
            y_slider: Rect::from_min_max(
                pos2(board.right() + 4.0, arena.top()),
                pos2(available.right() - 4.0, arena.bottom()),
            ),
        }
    }

    pub fn card(&self, role: CardRole) -> Rect {
        self.cards[role.index()]
    }
}

pub fn to_arena_rect(rect: Rect) -> ArenaRect {
    ArenaRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

/// Keys the game reacts to; everything else stays with egui.
pub fn key_input(key: egui::Key) -> Option<KeyInput> {
    use egui::Key;
    Some(match key {
        Key::Num1 => KeyInput::Digit(1),
        Key::Num2 => KeyInput::Digit(2),
        Key::Num3 => KeyInput::Digit(3),
        Key::Num4 => KeyInput::Digit(4),
        Key::ArrowUp => KeyInput::ArrowUp,
        Key::ArrowDown => KeyInput::ArrowDown,
        Key::ArrowLeft => KeyInput::ArrowLeft,
        Key::ArrowRight => KeyInput::ArrowRight,
        Key::Enter => KeyInput::Enter,
        _ => return None,
    })
}

#[cfg(test)]
#[path = "../tests/layout_tests.rs"]
mod tests;
