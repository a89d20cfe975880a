use super::*;
use shared::domain::PageId;

fn article(id: i64, title: &str) -> ContentItem {
    ContentItem {
        id: PageId(id),
        title: title.to_string(),
        thumbnail_url: Some(format!("https://upload.example/{id}.jpg")),
    }
}

#[test]
fn roles_are_fixed_at_creation() {
    let cards = CardSet::new();
    for role in CardRole::ALL {
        assert_eq!(cards.card(role).role(), role);
        assert!(cards.card(role).content().is_none());
        assert!(!cards.card(role).is_pending());
    }
}

#[test]
fn axis_labels_default_to_nothing() {
    let mut cards = CardSet::new();
    assert_eq!(cards.axis_label(Axis::X), "nothing versus nothing");

    let ticket = cards.issue(CardRole::XMax);
    assert!(cards.bind(ticket, article(7, "Cats")));

    assert_eq!(cards.axis_label(Axis::X), "nothing versus Cats");
    assert_eq!(cards.axis_label(Axis::Y), "nothing versus nothing");
}

#[test]
fn newer_ticket_wins_over_slower_older_one() {
    let mut cards = CardSet::new();
    let older = cards.issue(CardRole::YMin);
    let newer = cards.issue(CardRole::YMin);
    assert!(cards.card(CardRole::YMin).is_pending());

    assert!(cards.bind(newer, article(2, "Newer")));
    assert!(!cards.bind(older, article(1, "Older")));

    assert_eq!(cards.card(CardRole::YMin).title(), Some("Newer"));
    assert!(!cards.card(CardRole::YMin).is_pending());
}

#[test]
fn stale_ticket_is_discarded_even_before_newer_response_arrives() {
    let mut cards = CardSet::new();
    let older = cards.issue(CardRole::XMin);
    let _newer = cards.issue(CardRole::XMin);

    assert!(!cards.bind(older, article(1, "Older")));
    assert!(cards.card(CardRole::XMin).content().is_none());
    assert!(cards.card(CardRole::XMin).is_pending());
}

#[test]
fn round_tickets_are_per_card() {
    let mut cards = CardSet::new();
    let round = cards.issue_round();
    let reroll = cards.issue(CardRole::XMax);

    assert!(cards.is_current(round[CardRole::YMax.index()]));
    assert!(!cards.is_current(round[CardRole::XMax.index()]));
    assert!(cards.is_current(reroll));
}

#[test]
fn items_without_thumbnails_are_refused() {
    let mut cards = CardSet::new();
    let ticket = cards.issue(CardRole::YMax);
    let mut bare = article(3, "Bare");
    bare.thumbnail_url = None;

    assert!(!cards.bind(ticket, bare));
    assert!(cards.card(CardRole::YMax).content().is_none());
    assert!(cards.card(CardRole::YMax).is_pending());
}

#[test]
fn settle_clears_pending_without_touching_content() {
    let mut cards = CardSet::new();
    let first = cards.issue(CardRole::YMax);
    cards.bind(first, article(4, "Kept"));

    let second = cards.issue(CardRole::YMax);
    assert!(cards.settle(second));

    assert_eq!(cards.card(CardRole::YMax).title(), Some("Kept"));
    assert!(!cards.card(CardRole::YMax).is_pending());
}
