//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use game_core::GameCoordinator;
use shared::protocol::ContentRequest;

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend queue full");
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Content worker disconnected; restart the app".to_string();
            false
        }
    }
}

/// Queue each request for the worker. A request that cannot be queued is
/// abandoned so its cards do not stay pending.
pub fn dispatch_content_requests(
    cmd_tx: &Sender<BackendCommand>,
    requests: Vec<ContentRequest>,
    game: &mut GameCoordinator,
    status: &mut String,
) {
    for request in requests {
        if !dispatch_backend_command(cmd_tx, BackendCommand::Content(request.clone()), status) {
            game.abandon(&request);
        }
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
