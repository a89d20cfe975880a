//! Per-frame collection of game input and the widget-id to focus-target map.

use std::collections::HashMap;

use eframe::egui;
use shared::protocol::{FocusTarget, InputEvent};

/// Focus the coordinator asked for and the UI has yet to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingFocus {
    pub target: FocusTarget,
    pub select_text: bool,
}

#[derive(Debug, Default)]
pub struct FrameState {
    events: Vec<InputEvent>,
    focus_ids: HashMap<egui::Id, FocusTarget>,
    pending_focus: Option<PendingFocus>,
}

impl FrameState {
    pub fn new(pending_focus: Option<PendingFocus>) -> Self {
        Self {
            pending_focus,
            ..Self::default()
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Record which game focus target a widget stands for. Returns `true`
    /// when the widget was just handed the requested focus.
    pub fn register(&mut self, response: &egui::Response, target: FocusTarget) -> bool {
        self.focus_ids.insert(response.id, target);
        if self.pending_focus.is_some_and(|pending| pending.target == target) {
            response.request_focus();
            return true;
        }
        false
    }

    pub fn wants_text_selected(&self, target: FocusTarget) -> bool {
        self.pending_focus
            .is_some_and(|pending| pending.target == target && pending.select_text)
    }

    pub fn pending_focus(&self) -> Option<PendingFocus> {
        self.pending_focus
    }

    pub fn target_of(&self, focused: Option<egui::Id>) -> FocusTarget {
        focused
            .and_then(|id| self.focus_ids.get(&id).copied())
            .unwrap_or_default()
    }

    pub fn into_events(self) -> Vec<InputEvent> {
        self.events
    }
}
