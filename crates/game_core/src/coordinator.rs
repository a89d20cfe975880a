//! Routes typed input events into the position model, the editor state
//! machine and the card set, and produces the view the front end draws.

use shared::{
    domain::{Axis, CardRole, PlayerIndex, PlayerPosition},
    protocol::{
        ArenaRect, CardView, ContentRequest, ContentResponse, FocusTarget, GameView,
        InputEvent, InteractionTarget, KeyInput, MarkerProjection, MarkerView, SliderView,
    },
};
use tracing::{debug, info};
use url::Url;

use crate::{
    cards::{CardModel, CardSet},
    edit::{EditCoordinator, EditState, EditTransition},
    position::{pointer_to_position, PositionModel, ViewSync},
    wikipedia::article_href,
};

const NO_RANDOM_CONTENT: &str = "No random content available right now";

/// Outcome of routing one input event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Content fetches to run; feed their responses back through
    /// [`GameCoordinator::apply`].
    pub requests: Vec<ContentRequest>,
    /// The event was consumed and native handling should be suppressed.
    pub prevent_default: bool,
}

impl Dispatch {
    fn request(request: ContentRequest) -> Self {
        Self {
            requests: vec![request],
            prevent_default: false,
        }
    }

    fn consumed() -> Self {
        Self {
            requests: Vec::new(),
            prevent_default: true,
        }
    }
}

pub struct GameCoordinator {
    positions: PositionModel,
    view: ViewSync,
    editor: EditCoordinator,
    cards: CardSet,
    pointer_active: bool,
    focus: FocusTarget,
    focus_epoch: u64,
    select_search_text: bool,
    status: Option<String>,
    article_url: Url,
}

impl GameCoordinator {
    /// `article_url` is the base that card links are built from.
    pub fn new(arena: ArenaRect, article_url: Url) -> Self {
        let positions = PositionModel::new();
        let mut view = ViewSync::new(arena);
        view.resize(arena, &positions);
        Self {
            positions,
            view,
            editor: EditCoordinator::new(),
            cards: CardSet::new(),
            pointer_active: false,
            focus: FocusTarget::None,
            focus_epoch: 0,
            select_search_text: false,
            status: None,
            article_url,
        }
    }

    pub fn position(&self, player: PlayerIndex) -> PlayerPosition {
        self.positions.position(player)
    }

    pub fn current_player(&self) -> PlayerIndex {
        self.positions.current_player()
    }

    pub fn edit_state(&self) -> EditState {
        self.editor.state()
    }

    pub fn card(&self, role: CardRole) -> &CardModel {
        self.cards.card(role)
    }

    pub fn arena(&self) -> &ArenaRect {
        self.view.arena()
    }

    pub fn pointer_active(&self) -> bool {
        self.pointer_active
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Clamped store plus marker projection. Sliders follow only when the
    /// player is the current one.
    pub fn set_position(&mut self, player: PlayerIndex, x: f32, y: f32) -> MarkerProjection {
        let stored = self.positions.set_position(player, x, y);
        if player == self.positions.current_player() {
            self.view.sync_sliders(stored);
        }
        self.view.sync_marker(player, stored)
    }

    pub fn set_current_player(&mut self, player: PlayerIndex) {
        let selected = self.positions.set_current_player(player);
        self.view.sync_sliders(selected);
    }

    /// Rebind all four cards. Player positions are kept.
    pub fn start_round(&mut self) -> ContentRequest {
        info!("requesting a new round of cards");
        ContentRequest::Round {
            tickets: self.cards.issue_round(),
        }
    }

    pub fn request_reroll(&mut self, card: CardRole) -> ContentRequest {
        debug!(card = ?card, "requesting random replacement");
        ContentRequest::Reroll {
            ticket: self.cards.issue(card),
        }
    }

    /// Settle the tickets of a request that never reached a provider. Card
    /// content is left as it was.
    pub fn abandon(&mut self, request: &ContentRequest) {
        match request {
            ContentRequest::Round { tickets } => {
                for ticket in tickets {
                    self.cards.settle(*ticket);
                }
            }
            ContentRequest::Reroll { ticket } | ContentRequest::Search { ticket, .. } => {
                self.cards.settle(*ticket);
            }
        }
    }

    pub fn toggle_edit(&mut self, card: CardRole, force: Option<bool>) {
        for transition in self.editor.toggle(card, force) {
            match transition {
                EditTransition::Opened(opened) => {
                    let title = self.cards.card(opened).title().unwrap_or_default().to_string();
                    self.cards.set_search_text(opened, title);
                    self.move_focus(FocusTarget::CardSearch(opened), true);
                }
                EditTransition::Closed(closed) => {
                    self.move_focus(FocusTarget::CardLink(closed), false);
                }
            }
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Dispatch {
        match event {
            InputEvent::PointerDown { target, .. } => {
                match target {
                    InteractionTarget::ArenaBackground => self.pointer_active = true,
                    InteractionTarget::Marker(player) => {
                        self.set_current_player(player);
                        self.pointer_active = true;
                    }
                    _ => {}
                }
                Dispatch::default()
            }
            InputEvent::PointerMove { client_x, client_y } => {
                if self.pointer_active {
                    self.move_current_to_pointer(client_x, client_y);
                }
                Dispatch::default()
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                self.pointer_active = false;
                Dispatch::default()
            }
            InputEvent::SliderCommit { x, y } => {
                self.set_position(self.current_player(), x, y);
                Dispatch::default()
            }
            InputEvent::KeyPress { key } => self.handle_key(key),
            InputEvent::Click {
                target,
                client_x,
                client_y,
            } => self.handle_click(target, client_x, client_y),
            InputEvent::SearchInput { card, text } => {
                if self.editor.is_editing(card) {
                    self.cards.set_search_text(card, text);
                }
                Dispatch::default()
            }
            InputEvent::FocusChanged { target } => {
                self.focus_changed(target);
                Dispatch::default()
            }
            InputEvent::Resize { arena } => {
                self.view.resize(arena, &self.positions);
                Dispatch::default()
            }
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Dispatch {
        if self.focus.is_text_entry() && key != KeyInput::Enter {
            return Dispatch::default();
        }

        match key {
            KeyInput::Digit(digit) => {
                if let Some(player) = PlayerIndex::from_digit(digit) {
                    self.set_current_player(player);
                }
                Dispatch::default()
            }
            KeyInput::Enter => match self.editor.editing() {
                Some(card) if self.focus.card() == Some(card) => self.commit_search(card),
                _ => Dispatch::default(),
            },
            KeyInput::ArrowUp | KeyInput::ArrowDown | KeyInput::ArrowLeft | KeyInput::ArrowRight => {
                let Some((axis, delta)) = key.nudge() else {
                    return Dispatch::default();
                };
                let slider = FocusTarget::Slider(axis);
                let consumed = self.focus != slider;
                if consumed {
                    self.nudge_current(axis, delta);
                }
                self.move_focus(slider, false);
                Dispatch {
                    requests: Vec::new(),
                    prevent_default: consumed,
                }
            }
            KeyInput::Other => Dispatch::default(),
        }
    }

    fn handle_click(&mut self, target: InteractionTarget, client_x: f32, client_y: f32) -> Dispatch {
        match target {
            InteractionTarget::CardEdit(card) => {
                self.toggle_edit(card, None);
                Dispatch::default()
            }
            InteractionTarget::CardReroll(card) => Dispatch::request(self.request_reroll(card)),
            InteractionTarget::CardSearchField(_) | InteractionTarget::CardBody(_) => {
                Dispatch::default()
            }
            InteractionTarget::ArenaBackground | InteractionTarget::Marker(_) => {
                self.move_current_to_pointer(client_x, client_y);
                Dispatch::default()
            }
            InteractionTarget::Refresh => Dispatch::request(self.start_round()),
        }
    }

    fn commit_search(&mut self, card: CardRole) -> Dispatch {
        let query = self.cards.card(card).search_text().trim().to_string();
        let ticket = self.cards.issue(card);
        debug!(card = ?card, query = %query, "submitting search");
        let mut dispatch = Dispatch::consumed();
        dispatch.requests.push(ContentRequest::Search { ticket, query });
        dispatch
    }

    fn move_current_to_pointer(&mut self, client_x: f32, client_y: f32) {
        let target = pointer_to_position(self.view.arena(), client_x, client_y);
        self.set_position(self.current_player(), target.x, target.y);
    }

    fn nudge_current(&mut self, axis: Axis, delta: f32) {
        let player = self.current_player();
        let stored = self.positions.nudge(player, axis, delta);
        self.view.sync_sliders(stored);
        self.view.sync_marker(player, stored);
    }

    /// Focus moved by the coordinator itself; the front end applies it when
    /// `focus_epoch` changes.
    fn move_focus(&mut self, target: FocusTarget, select_search_text: bool) {
        self.focus = target;
        self.focus_epoch += 1;
        self.select_search_text = select_search_text;
        if !matches!(target, FocusTarget::CardSearch(_) | FocusTarget::CardLink(_)) {
            self.editor.focus_moved(target);
        }
    }

    /// Focus moved by the user.
    fn focus_changed(&mut self, target: FocusTarget) {
        self.focus = target;
        if let Some(EditTransition::Closed(card)) = self.editor.focus_moved(target) {
            debug!(card = ?card, "editor lost focus");
            if target == FocusTarget::None {
                self.move_focus(FocusTarget::CardLink(card), false);
            }
        }
    }

    pub fn apply(&mut self, response: ContentResponse) {
        match response {
            ContentResponse::Round { tickets, items } => {
                if items.is_empty() {
                    for ticket in tickets {
                        self.cards.settle(ticket);
                    }
                    self.status = Some(NO_RANDOM_CONTENT.to_string());
                    return;
                }
                let mut items = items.into_iter();
                for ticket in tickets {
                    let bound = match items.next() {
                        Some(item) => self.cards.bind(ticket, item),
                        None => false,
                    };
                    if !bound {
                        self.cards.settle(ticket);
                    }
                }
                self.status = None;
            }
            ContentResponse::Reroll { ticket, item } => match item {
                Some(item) => {
                    if self.cards.bind(ticket, item) {
                        self.status = None;
                    } else {
                        self.cards.settle(ticket);
                    }
                }
                None => {
                    if self.cards.settle(ticket) {
                        self.status = Some(NO_RANDOM_CONTENT.to_string());
                    }
                }
            },
            ContentResponse::Search {
                ticket,
                query,
                items,
            } => {
                if !self.cards.is_current(ticket) {
                    debug!(card = ?ticket.card, "discarding stale search response");
                    return;
                }
                match items.into_iter().next() {
                    Some(item) => {
                        if self.cards.bind(ticket, item) {
                            self.status = None;
                            self.toggle_edit(ticket.card, Some(false));
                        } else {
                            self.cards.settle(ticket);
                        }
                    }
                    None => {
                        self.cards.settle(ticket);
                        self.status = Some(format!("No content found for \"{query}\""));
                    }
                }
            }
        }
    }

    pub fn view(&self) -> GameView {
        let current = self.current_player();
        let sliders = self.view.slider_values();
        GameView {
            cards: CardRole::ALL.map(|role| self.card_view(role)),
            markers: PlayerIndex::ALL.map(|player| {
                let projection = self.view.marker(player);
                MarkerView {
                    player,
                    pixel_left: projection.pixel_left,
                    pixel_top: projection.pixel_top,
                    is_current: player == current,
                }
            }),
            sliders: Axis::ALL.map(|axis| SliderView {
                axis,
                value: sliders.along(axis),
                accessible_label: self.cards.axis_label(axis),
            }),
            current_player: current,
            focus: self.focus,
            focus_epoch: self.focus_epoch,
            select_search_text: self.select_search_text,
            pointer_active: self.pointer_active,
            status: self.status.clone(),
        }
    }

    fn card_view(&self, role: CardRole) -> CardView {
        let card = self.cards.card(role);
        let content = card.content();
        CardView {
            role,
            title: content.map(|item| item.title.clone()),
            image_url: content.and_then(|item| item.thumbnail_url.clone()),
            link_href: content.map(|item| article_href(&self.article_url, item.id)),
            is_editing: self.editor.is_editing(role),
            search_text: card.search_text().to_string(),
            pending: card.is_pending(),
        }
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
