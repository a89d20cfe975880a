use super::*;

use crossbeam_channel::bounded;
use shared::{
    domain::{CardRole, ContentItem, PageId},
    protocol::{ArenaRect, CardTicket, ContentResponse},
};
use url::Url;

fn reroll(card: CardRole) -> ContentRequest {
    ContentRequest::Reroll {
        ticket: CardTicket {
            card,
            generation: 1,
        },
    }
}

fn game() -> GameCoordinator {
    GameCoordinator::new(
        ArenaRect::default(),
        Url::parse("https://en.wikipedia.org/").expect("article url"),
    )
}

fn dealt_game() -> GameCoordinator {
    let mut game = game();
    let ContentRequest::Round { tickets } = game.start_round() else {
        panic!("expected a round request");
    };
    let items = (1..=4)
        .map(|id| ContentItem {
            id: PageId(id),
            title: format!("Article {id}"),
            thumbnail_url: Some(format!("https://upload.example/{id}.jpg")),
        })
        .collect();
    game.apply(ContentResponse::Round { tickets, items });
    game
}

#[test]
fn queues_each_request_in_order() {
    let (tx, rx) = bounded(4);
    let mut game = game();
    let mut status = String::new();

    dispatch_content_requests(
        &tx,
        vec![reroll(CardRole::XMin), reroll(CardRole::YMax)],
        &mut game,
        &mut status,
    );

    assert!(status.is_empty());
    assert_eq!(rx.try_recv().ok(), Some(BackendCommand::Content(reroll(CardRole::XMin))));
    assert_eq!(rx.try_recv().ok(), Some(BackendCommand::Content(reroll(CardRole::YMax))));
}

#[test]
fn full_queue_reports_status() {
    let (tx, _rx) = bounded(1);
    let mut game = game();
    let mut status = String::new();

    dispatch_content_requests(
        &tx,
        vec![reroll(CardRole::XMin), reroll(CardRole::YMax)],
        &mut game,
        &mut status,
    );

    assert_eq!(status, "UI command queue is full; please retry");
}

#[test]
fn full_queue_leaves_no_card_stuck_loading() {
    let (tx, rx) = bounded(1);
    let mut game = dealt_game();
    let mut status = String::new();
    let first = game.request_reroll(CardRole::XMin);
    let second = game.request_reroll(CardRole::YMax);

    dispatch_content_requests(&tx, vec![first, second], &mut game, &mut status);

    let view = game.view();
    assert!(view.card(CardRole::XMin).pending);
    assert!(!view.card(CardRole::YMax).pending);
    assert_eq!(view.card(CardRole::YMax).title.as_deref(), Some("Article 1"));
    assert!(rx.try_recv().is_ok());
}

#[test]
fn disconnected_worker_settles_a_whole_round() {
    let (tx, rx) = bounded(4);
    drop(rx);
    let mut game = dealt_game();
    let mut status = String::new();
    let round = game.start_round();

    dispatch_content_requests(&tx, vec![round], &mut game, &mut status);

    assert!(status.contains("disconnected"));
    assert!(game.view().cards.iter().all(|card| !card.pending));
}

#[test]
fn disconnected_worker_reports_status() {
    let (tx, rx) = bounded(1);
    drop(rx);
    let mut status = String::new();

    let queued = dispatch_backend_command(
        &tx,
        BackendCommand::FetchThumbnail {
            url: "https://upload.example/a.jpg".into(),
        },
        &mut status,
    );

    assert!(!queued);
    assert!(status.contains("disconnected"));
}
