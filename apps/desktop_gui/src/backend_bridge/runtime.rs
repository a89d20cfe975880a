//! Backend worker thread: owns the tokio runtime, the content session and
//! the thumbnail http client.

use std::{sync::Arc, thread};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use game_core::{ContentAdapter, GameSession, Settings, WikipediaProvider};
use reqwest::Client as HttpClient;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{PreviewImage, UiEvent},
};

const THUMBNAIL_MAX_EDGE: u32 = 320;

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(format!(
                    "content worker failed to start: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let (session, http) = match build_clients(&settings) {
                Ok(clients) => clients,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(format!("{err:#}")));
                    tracing::error!("content worker startup failure: {err:#}");
                    return;
                }
            };
            tracing::info!(api_url = %settings.api_url, "content worker ready");
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Connected to {}",
                settings.api_url
            )));

            while let Ok(cmd) = cmd_rx.recv() {
                let ui_tx = ui_tx.clone();
                match cmd {
                    BackendCommand::Content(request) => {
                        let session = session.clone();
                        tokio::spawn(async move {
                            let response = session.execute(request).await;
                            let _ = ui_tx.send(UiEvent::Content(response));
                        });
                    }
                    BackendCommand::FetchThumbnail { url } => {
                        let http = http.clone();
                        tokio::spawn(async move {
                            let event = match fetch_thumbnail(&http, &url).await {
                                Ok(image) => UiEvent::ThumbnailLoaded { url, image },
                                Err(err) => {
                                    tracing::warn!(%url, "thumbnail unavailable: {err:#}");
                                    UiEvent::ThumbnailFailed {
                                        url,
                                        reason: format!("{err:#}"),
                                    }
                                }
                            };
                            let _ = ui_tx.send(event);
                        });
                    }
                }
            }
            tracing::info!("ui command channel closed; content worker exiting");
        });
    });
}

fn build_clients(settings: &Settings) -> Result<(GameSession, HttpClient)> {
    let provider = WikipediaProvider::new(settings)?;
    let session = GameSession::new(ContentAdapter::from_settings(Arc::new(provider), settings));
    let http = HttpClient::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(settings.request_timeout())
        .build()
        .context("failed to build thumbnail http client")?;
    Ok((session, http))
}

async fn fetch_thumbnail(http: &HttpClient, url: &str) -> Result<PreviewImage> {
    let bytes = http
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .context("thumbnail request failed")?
        .bytes()
        .await
        .context("thumbnail body unreadable")?;
    decode_thumbnail(&bytes)
}

pub fn decode_thumbnail(bytes: &[u8]) -> Result<PreviewImage> {
    let dynamic = image::load_from_memory(bytes).context("unsupported thumbnail format")?;
    let resized = dynamic
        .thumbnail(THUMBNAIL_MAX_EDGE, THUMBNAIL_MAX_EDGE)
        .to_rgba8();
    Ok(PreviewImage {
        width: resized.width() as usize,
        height: resized.height() as usize,
        rgba: resized.into_raw(),
    })
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
