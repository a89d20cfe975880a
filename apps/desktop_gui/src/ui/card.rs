use eframe::egui::{
    self,
    text::{CCursor, CCursorRange},
    Rect,
};
use shared::protocol::{CardView, FocusTarget, InputEvent, InteractionTarget};

use crate::ui::frame::FrameState;

pub enum Thumbnail<'a> {
    None,
    Loading,
    Ready(&'a egui::TextureHandle),
    Failed,
}

fn ui_in_rect(ui: &mut egui::Ui, rect: Rect, add: impl FnOnce(&mut egui::Ui)) {
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect)
            .layout(egui::Layout::top_down(egui::Align::Center)),
    );
    child.set_clip_rect(rect);
    add(&mut child);
}

fn click(target: InteractionTarget) -> InputEvent {
    InputEvent::Click {
        target,
        client_x: 0.0,
        client_y: 0.0,
    }
}

pub fn show_card(
    ui: &mut egui::Ui,
    rect: Rect,
    card: &CardView,
    thumbnail: Thumbnail<'_>,
    frame: &mut FrameState,
) {
    let role = card.role;
    ui.painter()
        .rect_filled(rect, 8.0, ui.visuals().faint_bg_color);

    ui_in_rect(ui, rect.shrink(6.0), |ui| {
        ui.horizontal(|ui| {
            let edit = ui
                .button(if card.is_editing { "Done" } else { "Edit" })
                .on_hover_text("Search for a specific article");
            frame.register(&edit, FocusTarget::CardControl(role));
            if edit.clicked() {
                frame.push(click(InteractionTarget::CardEdit(role)));
            }

            let reroll = ui
                .add_enabled(!card.pending, egui::Button::new("Random"))
                .on_hover_text("Replace with a random article");
            frame.register(&reroll, FocusTarget::CardControl(role));
            if reroll.clicked() {
                frame.push(click(InteractionTarget::CardReroll(role)));
            }

            if card.pending {
                ui.spinner();
            }
        });

        if card.is_editing {
            let target = FocusTarget::CardSearch(role);
            let mut text = card.search_text.clone();
            let mut output = egui::TextEdit::singleline(&mut text)
                .id(ui.id().with(("card-search", role.index())))
                .hint_text("Search Wikipedia")
                .desired_width(f32::INFINITY)
                .show(ui);
            let select = frame.wants_text_selected(target);
            if frame.register(&output.response, target) && select {
                let end = CCursor::new(text.chars().count());
                output
                    .state
                    .cursor
                    .set_char_range(Some(CCursorRange::two(CCursor::new(0), end)));
                output.state.store(ui.ctx(), output.response.id);
            }
            if output.response.changed() {
                frame.push(InputEvent::SearchInput { card: role, text });
            }
        }

        let image_size = egui::vec2(ui.available_width(), ui.available_height() - 28.0);
        let (image_rect, _) =
            ui.allocate_exact_size(image_size.max(egui::Vec2::ZERO), egui::Sense::hover());
        match thumbnail {
            Thumbnail::Ready(texture) => {
                egui::Image::new(texture).paint_at(ui, fit_inside(image_rect, texture.size_vec2()));
            }
            Thumbnail::Loading => {
                let spinner = Rect::from_center_size(image_rect.center(), egui::Vec2::splat(24.0));
                egui::Spinner::new().paint_at(ui, spinner);
            }
            Thumbnail::None | Thumbnail::Failed => {
                ui.painter().text(
                    image_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "no image",
                    egui::FontId::proportional(12.0),
                    ui.visuals().weak_text_color(),
                );
            }
        }

        match (&card.title, &card.link_href) {
            (Some(title), Some(href)) => {
                let link = ui.hyperlink_to(title, href);
                frame.register(&link, FocusTarget::CardLink(role));
            }
            (Some(title), None) => {
                ui.label(title);
            }
            _ => {
                ui.weak(if card.pending { "Loading..." } else { "No article" });
            }
        }
    });
}

/// Largest rect with the image's aspect ratio centered in `bounds`.
pub fn fit_inside(bounds: Rect, image: egui::Vec2) -> Rect {
    if image.x <= 0.0 || image.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.width() / image.x).min(bounds.height() / image.y);
    Rect::from_center_size(bounds.center(), image * scale)
}

#[cfg(test)]
#[path = "../tests/card_tests.rs"]
mod tests;
