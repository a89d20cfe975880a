//! The four axis-extreme card slots and their request generations.

use shared::{
    domain::{Axis, CardRole, ContentItem, CARD_COUNT},
    protocol::CardTicket,
};
use tracing::debug;

const EMPTY_SLOT_LABEL: &str = "nothing";

#[derive(Debug, Clone)]
pub struct CardModel {
    role: CardRole,
    content: Option<ContentItem>,
    search_text: String,
    generation: u64,
    settled: u64,
}

impl CardModel {
    fn new(role: CardRole) -> Self {
        Self {
            role,
            content: None,
            search_text: String::new(),
            generation: 0,
            settled: 0,
        }
    }

    pub fn role(&self) -> CardRole {
        self.role
    }

    pub fn content(&self) -> Option<&ContentItem> {
        self.content.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.content.as_ref().map(|item| item.title.as_str())
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// A request for this slot is still outstanding.
    pub fn is_pending(&self) -> bool {
        self.settled < self.generation
    }
}

#[derive(Debug, Clone)]
pub struct CardSet {
    cards: [CardModel; CARD_COUNT],
}

impl Default for CardSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CardSet {
    pub fn new() -> Self {
        Self {
            cards: CardRole::ALL.map(CardModel::new),
        }
    }

    pub fn card(&self, role: CardRole) -> &CardModel {
        &self.cards[role.index()]
    }

    /// Start a new request for `role`; earlier tickets for it become stale.
    pub fn issue(&mut self, role: CardRole) -> CardTicket {
        let card = &mut self.cards[role.index()];
        card.generation += 1;
        CardTicket {
            card: role,
            generation: card.generation,
        }
    }

    pub fn issue_round(&mut self) -> [CardTicket; CARD_COUNT] {
        CardRole::ALL.map(|role| self.issue(role))
    }

    pub fn is_current(&self, ticket: CardTicket) -> bool {
        self.card(ticket.card).generation == ticket.generation
    }

    /// Mark the request as answered without changing content. Returns false
    /// for stale tickets.
    pub fn settle(&mut self, ticket: CardTicket) -> bool {
        if !self.is_current(ticket) {
            debug!(card = ?ticket.card, generation = ticket.generation, "discarding stale content response");
            return false;
        }
        self.cards[ticket.card.index()].settled = ticket.generation;
        true
    }

    /// Bind `item` to the ticket's slot if the ticket is still current and the
    /// item carries a thumbnail.
    pub fn bind(&mut self, ticket: CardTicket, item: ContentItem) -> bool {
        if !item.has_thumbnail() {
            debug!(card = ?ticket.card, title = %item.title, "refusing item without thumbnail");
            return false;
        }
        if !self.settle(ticket) {
            return false;
        }
        self.cards[ticket.card.index()].content = Some(item);
        true
    }

    pub fn set_search_text(&mut self, role: CardRole, text: impl Into<String>) {
        self.cards[role.index()].search_text = text.into();
    }

    /// Accessible label for an axis slider, derived from its two cards.
    pub fn axis_label(&self, axis: Axis) -> String {
        let min = self.card(axis.min_role()).title().unwrap_or(EMPTY_SLOT_LABEL);
        let max = self.card(axis.max_role()).title().unwrap_or(EMPTY_SLOT_LABEL);
        format!("{min} versus {max}")
    }
}

#[cfg(test)]
#[path = "tests/cards_tests.rs"]
mod tests;
