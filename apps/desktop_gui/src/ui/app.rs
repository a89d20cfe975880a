use std::{collections::HashMap, time::Duration};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use game_core::GameCoordinator;
use shared::protocol::{ArenaRect, FocusTarget, GameView, InputEvent, InteractionTarget};
use url::Url;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{PreviewImage, UiEvent},
        orchestration::{dispatch_backend_command, dispatch_content_requests},
    },
    ui::{
        board::{show_arena, show_sliders},
        card::{show_card, Thumbnail},
        frame::{FrameState, PendingFocus},
        layout::{key_input, to_arena_rect, BoardLayout},
    },
};

enum ThumbnailState {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

pub struct SpectrumApp {
    game: GameCoordinator,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    thumbnails: HashMap<String, ThumbnailState>,
    worker_status: String,
    applied_focus_epoch: u64,
    observed_focus: FocusTarget,
}

impl SpectrumApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, article_url: Url) -> Self {
        let mut app = Self {
            game: GameCoordinator::new(ArenaRect::default(), article_url),
            cmd_tx,
            ui_rx,
            thumbnails: HashMap::new(),
            worker_status: String::new(),
            applied_focus_epoch: 0,
            observed_focus: FocusTarget::None,
        };
        let first_round = app.game.start_round();
        dispatch_content_requests(
            &app.cmd_tx,
            vec![first_round],
            &mut app.game,
            &mut app.worker_status,
        );
        app
    }

    fn route(&mut self, event: InputEvent) -> bool {
        let dispatch = self.game.handle(event);
        dispatch_content_requests(
            &self.cmd_tx,
            dispatch.requests,
            &mut self.game,
            &mut self.worker_status,
        );
        dispatch.prevent_default
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    tracing::debug!("{message}");
                    self.worker_status = message;
                }
                UiEvent::Error(message) => {
                    tracing::error!("{message}");
                    self.worker_status = message;
                }
                UiEvent::Content(response) => self.game.apply(response),
                UiEvent::ThumbnailLoaded { url, image } => {
                    let texture = load_preview(ctx, &url, &image);
                    self.thumbnails.insert(url, ThumbnailState::Ready(texture));
                }
                UiEvent::ThumbnailFailed { url, reason } => {
                    tracing::debug!(%url, %reason, "thumbnail failed");
                    self.thumbnails.insert(url, ThumbnailState::Failed);
                }
            }
        }
    }

    /// Game keys run before any widget sees them so a consumed key never
    /// reaches the focused widget.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let pressed: Vec<egui::Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } if modifiers.is_none() => Some(*key),
                    _ => None,
                })
                .collect()
        });

        for key in pressed {
            let Some(input) = key_input(key) else {
                continue;
            };
            if self.route(InputEvent::KeyPress { key: input }) {
                ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, key));
            }
        }
    }

    fn request_thumbnails(&mut self, view: &GameView) {
        for card in &view.cards {
            let Some(url) = &card.image_url else {
                continue;
            };
            if self.thumbnails.contains_key(url) {
                continue;
            }
            let queued = dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::FetchThumbnail { url: url.clone() },
                &mut self.worker_status,
            );
            let state = if queued {
                ThumbnailState::Loading
            } else {
                ThumbnailState::Failed
            };
            self.thumbnails.insert(url.clone(), state);
        }
    }

    fn thumbnail_for(&self, url: Option<&String>) -> Thumbnail<'_> {
        match url.and_then(|url| self.thumbnails.get(url)) {
            None if url.is_none() => Thumbnail::None,
            None | Some(ThumbnailState::Loading) => Thumbnail::Loading,
            Some(ThumbnailState::Ready(texture)) => Thumbnail::Ready(texture),
            Some(ThumbnailState::Failed) => Thumbnail::Failed,
        }
    }

    fn show_top_bar(&self, ctx: &egui::Context, view: &GameView, frame: &mut FrameState) {
        egui::TopBottomPanel::top("spectrum_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Spectrum");
                let refresh = ui
                    .button("New round")
                    .on_hover_text("Deal four new articles");
                frame.register(&refresh, FocusTarget::Refresh);
                if refresh.clicked() {
                    frame.push(InputEvent::Click {
                        target: InteractionTarget::Refresh,
                        client_x: 0.0,
                        client_y: 0.0,
                    });
                }
                ui.separator();
                ui.label(format!("Player {}", view.current_player.number()));
                ui.separator();
                let status = view.status.as_deref().unwrap_or(&self.worker_status);
                ui.weak(status);
            });
        });
    }

    fn show_board(&mut self, ctx: &egui::Context, frame: &mut FrameState) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let layout = BoardLayout::compute(ui.available_rect_before_wrap());
            let arena = to_arena_rect(layout.arena);
            if arena != *self.game.arena() {
                self.route(InputEvent::Resize { arena });
            }

            let view = self.game.view();
            show_arena(ui, layout.arena, &view, frame);
            show_sliders(ui, layout.x_slider, layout.y_slider, &view, frame);
            for card in &view.cards {
                let thumbnail = self.thumbnail_for(card.image_url.as_ref());
                show_card(ui, layout.card(card.role), card, thumbnail, frame);
            }
        });
    }

    fn observe_focus(&mut self, ctx: &egui::Context, frame: &FrameState) {
        if let Some(pending) = frame.pending_focus() {
            self.observed_focus = pending.target;
            return;
        }
        let focused = frame.target_of(ctx.memory(|m| m.focused()));
        if focused != self.observed_focus {
            self.observed_focus = focused;
            if focused != self.game.focus() {
                self.route(InputEvent::FocusChanged { target: focused });
            }
        }
    }
}

fn load_preview(ctx: &egui::Context, url: &str, image: &PreviewImage) -> egui::TextureHandle {
    let color_image =
        egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
    ctx.load_texture(
        format!("thumbnail:{url}"),
        color_image,
        egui::TextureOptions::LINEAR,
    )
}

impl eframe::App for SpectrumApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);
        self.handle_keys(ctx);

        let view = self.game.view();
        let pending = (view.focus_epoch != self.applied_focus_epoch).then_some(PendingFocus {
            target: view.focus,
            select_text: view.select_search_text,
        });
        self.applied_focus_epoch = view.focus_epoch;
        if pending.is_some_and(|pending| pending.target == FocusTarget::None) {
            ctx.memory_mut(|m| {
                if let Some(id) = m.focused() {
                    m.surrender_focus(id);
                }
            });
        }

        let mut frame = FrameState::new(pending);
        self.show_top_bar(ctx, &view, &mut frame);
        self.show_board(ctx, &mut frame);
        self.observe_focus(ctx, &frame);

        let events = frame.into_events();
        let changed = !events.is_empty();
        for event in events {
            self.route(event);
        }
        let view = self.game.view();
        self.request_thumbnails(&view);

        if changed || self.game.pointer_active() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
