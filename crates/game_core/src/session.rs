//! Runs the content requests a [`GameCoordinator`] emits and feeds the
//! responses back in.

use futures::future::join_all;
use shared::{
    domain::CARD_COUNT,
    protocol::{ContentRequest, ContentResponse, InputEvent},
};
use tracing::debug;

use crate::{
    content::ContentAdapter,
    coordinator::{Dispatch, GameCoordinator},
};

#[derive(Clone)]
pub struct GameSession {
    adapter: ContentAdapter,
}

impl GameSession {
    pub fn new(adapter: ContentAdapter) -> Self {
        Self { adapter }
    }

    pub async fn execute(&self, request: ContentRequest) -> ContentResponse {
        match request {
            ContentRequest::Round { tickets } => {
                let items = self.adapter.fetch_random_batch(CARD_COUNT).await;
                ContentResponse::Round { tickets, items }
            }
            ContentRequest::Reroll { ticket } => {
                let item = self.adapter.fetch_random_batch(1).await.into_iter().next();
                ContentResponse::Reroll { ticket, item }
            }
            ContentRequest::Search { ticket, query } => {
                let items = self.adapter.search_content(&query).await;
                ContentResponse::Search {
                    ticket,
                    query,
                    items,
                }
            }
        }
    }

    /// Responses come back in request order.
    pub async fn execute_all(&self, requests: Vec<ContentRequest>) -> Vec<ContentResponse> {
        join_all(requests.into_iter().map(|request| self.execute(request))).await
    }

    /// Route one event and settle every request it produced before returning.
    pub async fn dispatch(&self, game: &mut GameCoordinator, event: InputEvent) -> Dispatch {
        let dispatch = game.handle(event);
        if !dispatch.requests.is_empty() {
            debug!(requests = dispatch.requests.len(), "running content requests");
            for response in self.execute_all(dispatch.requests.clone()).await {
                game.apply(response);
            }
        }
        dispatch
    }

    pub async fn start_round(&self, game: &mut GameCoordinator) {
        let request = game.start_round();
        let response = self.execute(request).await;
        game.apply(response);
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
