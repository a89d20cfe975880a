//! Line commands for `spectrum play`.

use anyhow::{anyhow, bail, Context, Result};
use shared::{
    domain::{CardRole, PlayerIndex},
    protocol::{ArenaRect, FocusTarget, GameView, InputEvent, InteractionTarget, KeyInput},
};

pub const HELP: &str = "\
commands:
  player N            select player N (1-4)
  move X Y            set the current player's position (0-100)
  click X Y           click the arena at pixel X Y
  nudge DIR           up | down | left | right
  key NAME            raw key press to whatever has focus (ArrowUp, Enter, 3, ...)
  edit ROLE           toggle the editor on a card (y-max, x-max, y-min, x-min)
  type ROLE TEXT      replace the search text of an open editor
  enter               submit the open editor
  reroll ROLE         replace a card with random content
  refresh             new round of four cards
  resize W H          resize the arena
  view                print the full view as json
  help                this text
  quit                leave";

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Dispatched in order.
    Events(Vec<InputEvent>),
    View,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((line, ""));

    let event = match verb {
        "player" => {
            let number: u8 = rest.parse().context("player expects a number 1-4")?;
            if PlayerIndex::from_digit(number).is_none() {
                bail!("no player {number}");
            }
            return Ok(on_arena(InputEvent::KeyPress {
                key: KeyInput::Digit(number),
            }));
        }
        "move" => {
            let (x, y) = parse_pair(rest)?;
            InputEvent::SliderCommit { x, y }
        }
        "click" => {
            let (client_x, client_y) = parse_pair(rest)?;
            return Ok(on_arena(InputEvent::Click {
                target: InteractionTarget::ArenaBackground,
                client_x,
                client_y,
            }));
        }
        "nudge" => {
            let key = KeyInput::parse(rest);
            if key.nudge().is_none() {
                bail!("nudge expects up, down, left or right");
            }
            return Ok(on_arena(InputEvent::KeyPress { key }));
        }
        "key" => InputEvent::KeyPress {
            key: KeyInput::parse(rest),
        },
        "edit" => click(InteractionTarget::CardEdit(parse_role(rest)?)),
        "reroll" => click(InteractionTarget::CardReroll(parse_role(rest)?)),
        "type" => {
            let (role, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            InputEvent::SearchInput {
                card: parse_role(role)?,
                text: text.trim().to_string(),
            }
        }
        "enter" => InputEvent::KeyPress {
            key: KeyInput::Enter,
        },
        "refresh" => click(InteractionTarget::Refresh),
        "resize" => {
            let (width, height) = parse_pair(rest)?;
            InputEvent::Resize {
                arena: ArenaRect::sized(width, height),
            }
        }
        "view" => return Ok(ReplCommand::View),
        "help" | "?" => return Ok(ReplCommand::Help),
        "quit" | "exit" => return Ok(ReplCommand::Quit),
        "" => bail!("empty command"),
        other => bail!("unknown command '{other}', try 'help'"),
    };
    Ok(ReplCommand::Events(vec![event]))
}

/// Board commands act as if the arena was focused first, so an open search
/// field does not swallow them and every nudge lands.
fn on_arena(event: InputEvent) -> ReplCommand {
    ReplCommand::Events(vec![
        InputEvent::FocusChanged {
            target: FocusTarget::Arena,
        },
        event,
    ])
}

fn click(target: InteractionTarget) -> InputEvent {
    InputEvent::Click {
        target,
        client_x: 0.0,
        client_y: 0.0,
    }
}

fn parse_role(raw: &str) -> Result<CardRole> {
    CardRole::parse(raw.trim()).ok_or_else(|| anyhow!("unknown card '{raw}'"))
}

fn parse_pair(raw: &str) -> Result<(f32, f32)> {
    let mut parts = raw.split_whitespace();
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected two numbers");
    };
    let a = a.parse().with_context(|| format!("'{a}' is not a number"))?;
    let b = b.parse().with_context(|| format!("'{b}' is not a number"))?;
    Ok((a, b))
}

/// Compact text rendering of the board.
pub fn render_view(view: &GameView) -> String {
    let mut out = String::new();
    for card in &view.cards {
        let title = card.title.as_deref().unwrap_or("(empty)");
        let mut flags = Vec::new();
        if card.pending {
            flags.push("loading".to_string());
        }
        if card.is_editing {
            flags.push(format!("editing \"{}\"", card.search_text));
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        out.push_str(&format!("{:>6}: {title}{flags}\n", card.role.slug()));
    }
    for slider in &view.sliders {
        out.push_str(&format!(
            "{:?} slider {:.0} ({})\n",
            slider.axis, slider.value, slider.accessible_label
        ));
    }
    for marker in &view.markers {
        let current = if marker.is_current { " *" } else { "" };
        out.push_str(&format!(
            "player {} at {:.0},{:.0}px{current}\n",
            marker.player.number(),
            marker.pixel_left,
            marker.pixel_top
        ));
    }
    if let Some(status) = &view.status {
        out.push_str(&format!("status: {status}\n"));
    }
    out
}

#[cfg(test)]
#[path = "tests/repl_tests.rs"]
mod tests;
