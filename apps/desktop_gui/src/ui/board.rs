use eframe::egui::{
    self, vec2, Align2, Color32, FontId, Rect, Sense, Stroke, Vec2, WidgetInfo, WidgetType,
};
use shared::{
    domain::{Axis, PlayerIndex},
    protocol::{FocusTarget, GameView, InputEvent, InteractionTarget},
};

use crate::ui::frame::FrameState;

const MARKER_RADIUS: f32 = 14.0;

pub fn player_color(player: PlayerIndex) -> Color32 {
    match player.index() {
        0 => Color32::from_rgb(220, 68, 68),
        1 => Color32::from_rgb(56, 132, 220),
        2 => Color32::from_rgb(64, 176, 96),
        _ => Color32::from_rgb(226, 168, 40),
    }
}

fn pointer_event(response: &egui::Response, target: InteractionTarget, frame: &mut FrameState) {
    let Some(pos) = response.interact_pointer_pos() else {
        return;
    };
    if response.drag_started() {
        frame.push(InputEvent::PointerDown {
            target,
            client_x: pos.x,
            client_y: pos.y,
        });
    }
    if response.dragged() {
        frame.push(InputEvent::PointerMove {
            client_x: pos.x,
            client_y: pos.y,
        });
    }
    if response.clicked() {
        frame.push(InputEvent::Click {
            target,
            client_x: pos.x,
            client_y: pos.y,
        });
    }
}

pub fn show_arena(ui: &mut egui::Ui, rect: Rect, view: &GameView, frame: &mut FrameState) {
    let response = ui.interact(rect, ui.id().with("arena"), Sense::click_and_drag());
    frame.register(&response, FocusTarget::Arena);
    pointer_event(&response, InteractionTarget::ArenaBackground, frame);

    let painter = ui.painter_at(rect);
    let visuals = ui.visuals();
    painter.rect_filled(rect, 6.0, visuals.extreme_bg_color);
    let axis_stroke = Stroke::new(1.0, visuals.weak_text_color());
    let center = rect.center();
    painter.line_segment([egui::pos2(rect.left(), center.y), egui::pos2(rect.right(), center.y)], axis_stroke);
    painter.line_segment([egui::pos2(center.x, rect.top()), egui::pos2(center.x, rect.bottom())], axis_stroke);

    let mut drag_ended = response.drag_stopped();
    for marker in &view.markers {
        let center = rect.min + vec2(marker.pixel_left, marker.pixel_top);
        let hit = Rect::from_center_size(center, Vec2::splat(MARKER_RADIUS * 2.0));
        let marker_response = ui.interact(
            hit,
            ui.id().with(("marker", marker.player.index())),
            Sense::click_and_drag(),
        );
        pointer_event(&marker_response, InteractionTarget::Marker(marker.player), frame);
        drag_ended |= marker_response.drag_stopped();

        let color = player_color(marker.player);
        if marker.is_current {
            painter.circle_stroke(center, MARKER_RADIUS + 3.0, Stroke::new(2.5, visuals.strong_text_color()));
        }
        painter.circle_filled(center, MARKER_RADIUS, color);
        painter.text(
            center,
            Align2::CENTER_CENTER,
            marker.player.number().to_string(),
            FontId::proportional(14.0),
            Color32::WHITE,
        );
    }

    if drag_ended {
        frame.push(InputEvent::PointerUp);
    } else if view.pointer_active {
        let outside = ui
            .input(|i| i.pointer.hover_pos())
            .is_some_and(|pos| !rect.contains(pos));
        if outside {
            frame.push(InputEvent::PointerLeave);
        }
    }
}

pub fn show_sliders(
    ui: &mut egui::Ui,
    x_rect: Rect,
    y_rect: Rect,
    view: &GameView,
    frame: &mut FrameState,
) {
    let x_view = view.slider(Axis::X);
    let y_view = view.slider(Axis::Y);
    let mut x = x_view.value;
    let mut y = y_view.value;

    let x_response = slider_in_rect(ui, x_rect, &mut x, false, &x_view.accessible_label);
    frame.register(&x_response, FocusTarget::Slider(Axis::X));
    let y_response = slider_in_rect(ui, y_rect, &mut y, true, &y_view.accessible_label);
    frame.register(&y_response, FocusTarget::Slider(Axis::Y));

    if x_response.changed() || y_response.changed() {
        frame.push(InputEvent::SliderCommit { x, y });
    }
}

fn slider_in_rect(
    ui: &mut egui::Ui,
    rect: Rect,
    value: &mut f32,
    vertical: bool,
    label: &str,
) -> egui::Response {
    let mut child = ui.new_child(egui::UiBuilder::new().max_rect(rect).layout(if vertical {
        egui::Layout::top_down(egui::Align::Center)
    } else {
        egui::Layout::left_to_right(egui::Align::Center)
    }));
    child.spacing_mut().slider_width = if vertical { rect.height() } else { rect.width() };
    let mut slider = egui::Slider::new(value, 0.0..=100.0).show_value(false);
    if vertical {
        slider = slider.vertical();
    }
    let response = child.add(slider).on_hover_text(label);
    response.widget_info(|| WidgetInfo::labeled(WidgetType::Slider, true, label));
    response
}
