use serde::{Deserialize, Serialize};

use crate::domain::{
    Axis, CardRole, ContentItem, PlayerIndex, CARD_COUNT, PLAYER_COUNT,
};

/// Screen-space bounding box of the arena.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArenaRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ArenaRect {
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }
}

/// What an input layer reports as the element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum InteractionTarget {
    ArenaBackground,
    Marker(PlayerIndex),
    CardEdit(CardRole),
    CardReroll(CardRole),
    CardSearchField(CardRole),
    CardBody(CardRole),
    Refresh,
}

impl InteractionTarget {
    pub fn card(self) -> Option<CardRole> {
        match self {
            InteractionTarget::CardEdit(card)
            | InteractionTarget::CardReroll(card)
            | InteractionTarget::CardSearchField(card)
            | InteractionTarget::CardBody(card) => Some(card),
            _ => None,
        }
    }
}

/// The control that currently holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum FocusTarget {
    #[default]
    None,
    Arena,
    Slider(Axis),
    CardLink(CardRole),
    CardSearch(CardRole),
    CardControl(CardRole),
    Refresh,
}

impl FocusTarget {
    pub fn card(self) -> Option<CardRole> {
        match self {
            FocusTarget::CardLink(card)
            | FocusTarget::CardSearch(card)
            | FocusTarget::CardControl(card) => Some(card),
            _ => None,
        }
    }

    pub fn is_text_entry(self) -> bool {
        matches!(self, FocusTarget::CardSearch(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum KeyInput {
    Digit(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Other,
}

impl KeyInput {
    /// Axis and signed delta for arrow keys.
    pub fn nudge(self) -> Option<(Axis, f32)> {
        match self {
            KeyInput::ArrowUp => Some((Axis::Y, 1.0)),
            KeyInput::ArrowDown => Some((Axis::Y, -1.0)),
            KeyInput::ArrowLeft => Some((Axis::X, -1.0)),
            KeyInput::ArrowRight => Some((Axis::X, 1.0)),
            _ => None,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "ArrowUp" | "up" => KeyInput::ArrowUp,
            "ArrowDown" | "down" => KeyInput::ArrowDown,
            "ArrowLeft" | "left" => KeyInput::ArrowLeft,
            "ArrowRight" | "right" => KeyInput::ArrowRight,
            "Enter" | "enter" => KeyInput::Enter,
            other => match other.as_bytes() {
                [digit @ b'0'..=b'9'] => KeyInput::Digit(digit - b'0'),
                _ => KeyInput::Other,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        target: InteractionTarget,
        client_x: f32,
        client_y: f32,
    },
    PointerMove {
        client_x: f32,
        client_y: f32,
    },
    PointerUp,
    PointerLeave,
    /// Both slider values, read together.
    SliderCommit {
        x: f32,
        y: f32,
    },
    KeyPress {
        key: KeyInput,
    },
    Click {
        target: InteractionTarget,
        client_x: f32,
        client_y: f32,
    },
    SearchInput {
        card: CardRole,
        text: String,
    },
    FocusChanged {
        target: FocusTarget,
    },
    Resize {
        arena: ArenaRect,
    },
}

/// Identifies one outstanding request for one card slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardTicket {
    pub card: CardRole,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ContentRequest {
    Round { tickets: [CardTicket; CARD_COUNT] },
    Reroll { ticket: CardTicket },
    Search { ticket: CardTicket, query: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ContentResponse {
    Round {
        tickets: [CardTicket; CARD_COUNT],
        items: Vec<ContentItem>,
    },
    Reroll {
        ticket: CardTicket,
        item: Option<ContentItem>,
    },
    Search {
        ticket: CardTicket,
        query: String,
        items: Vec<ContentItem>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub role: CardRole,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub link_href: Option<String>,
    pub is_editing: bool,
    pub search_text: String,
    pub pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerProjection {
    pub pixel_left: f32,
    pub pixel_top: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerView {
    pub player: PlayerIndex,
    pub pixel_left: f32,
    pub pixel_top: f32,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderView {
    pub axis: Axis,
    pub value: f32,
    pub accessible_label: String,
}

/// Everything a view layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub cards: [CardView; CARD_COUNT],
    pub markers: [MarkerView; PLAYER_COUNT],
    pub sliders: [SliderView; 2],
    pub current_player: PlayerIndex,
    pub focus: FocusTarget,
    pub focus_epoch: u64,
    pub select_search_text: bool,
    pub pointer_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl GameView {
    pub fn card(&self, role: CardRole) -> &CardView {
        &self.cards[role.index()]
    }

    pub fn marker(&self, player: PlayerIndex) -> &MarkerView {
        &self.markers[player.index()]
    }

    pub fn slider(&self, axis: Axis) -> &SliderView {
        match axis {
            Axis::X => &self.sliders[0],
            Axis::Y => &self.sliders[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browser_and_short_key_names() {
        assert_eq!(KeyInput::parse("ArrowUp"), KeyInput::ArrowUp);
        assert_eq!(KeyInput::parse("left"), KeyInput::ArrowLeft);
        assert_eq!(KeyInput::parse("3"), KeyInput::Digit(3));
        assert_eq!(KeyInput::parse("12"), KeyInput::Other);
        assert_eq!(KeyInput::parse("Escape"), KeyInput::Other);
    }

    #[test]
    fn arrow_keys_nudge_one_unit_on_their_axis() {
        assert_eq!(KeyInput::ArrowUp.nudge(), Some((Axis::Y, 1.0)));
        assert_eq!(KeyInput::ArrowLeft.nudge(), Some((Axis::X, -1.0)));
        assert_eq!(KeyInput::Enter.nudge(), None);
    }

    #[test]
    fn input_events_use_tagged_json() {
        let event = InputEvent::Click {
            target: InteractionTarget::CardReroll(CardRole::XMin),
            client_x: 1.0,
            client_y: 2.0,
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "click");
        assert_eq!(json["payload"]["target"]["kind"], "card_reroll");
        assert_eq!(json["payload"]["target"]["of"], "x_min");

        let back: InputEvent = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, event);
    }
}
