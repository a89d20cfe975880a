//! Single-editor state machine for card search fields.

use shared::{domain::CardRole, protocol::FocusTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(CardRole),
}

/// A state change the caller must reflect in the view (field text, focus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTransition {
    Opened(CardRole),
    Closed(CardRole),
}

#[derive(Debug, Clone, Default)]
pub struct EditCoordinator {
    state: EditState,
}

impl EditCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn editing(&self) -> Option<CardRole> {
        match self.state {
            EditState::Idle => None,
            EditState::Editing(card) => Some(card),
        }
    }

    pub fn is_editing(&self, card: CardRole) -> bool {
        self.state == EditState::Editing(card)
    }

    /// `force = None` flips the card, `Some(true)` only opens, `Some(false)`
    /// only closes. Switching editors always emits the close before the open.
    pub fn toggle(&mut self, card: CardRole, force: Option<bool>) -> Vec<EditTransition> {
        let open = force.unwrap_or(!self.is_editing(card));
        if open {
            self.open(card)
        } else {
            self.close(card).into_iter().collect()
        }
    }

    fn open(&mut self, card: CardRole) -> Vec<EditTransition> {
        match self.state {
            EditState::Editing(active) if active == card => Vec::new(),
            EditState::Editing(active) => {
                let closed = self.close(active);
                self.state = EditState::Editing(card);
                closed
                    .into_iter()
                    .chain([EditTransition::Opened(card)])
                    .collect()
            }
            EditState::Idle => {
                self.state = EditState::Editing(card);
                vec![EditTransition::Opened(card)]
            }
        }
    }

    /// Close `card` if it is the active editor; anything else is a no-op.
    pub fn close(&mut self, card: CardRole) -> Option<EditTransition> {
        if !self.is_editing(card) {
            return None;
        }
        self.state = EditState::Idle;
        Some(EditTransition::Closed(card))
    }

    /// Focus moved to `target`. The editor closes once focus leaves its card.
    pub fn focus_moved(&mut self, target: FocusTarget) -> Option<EditTransition> {
        let active = self.editing()?;
        if target.card() == Some(active) {
            return None;
        }
        self.close(active)
    }
}

#[cfg(test)]
#[path = "tests/edit_tests.rs"]
mod tests;
