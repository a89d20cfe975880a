//! Normalized player positions and their pixel projection.

use shared::{
    domain::{Axis, PlayerIndex, PlayerPosition, PLAYER_COUNT},
    protocol::{ArenaRect, MarkerProjection},
};

/// Map a pointer location to normalized arena coordinates. Used for both
/// background clicks and marker drags.
pub fn pointer_to_position(arena: &ArenaRect, client_x: f32, client_y: f32) -> PlayerPosition {
    let x = if arena.width > 0.0 {
        (client_x - arena.left) / arena.width * 100.0
    } else {
        0.0
    };
    let y = if arena.height > 0.0 {
        100.0 - (client_y - arena.top) / arena.height * 100.0
    } else {
        0.0
    };
    PlayerPosition::clamped(x, y)
}

/// Pixel offset of a marker inside the arena. `y = 100` is the top edge.
pub fn project(arena: &ArenaRect, position: PlayerPosition) -> MarkerProjection {
    MarkerProjection {
        pixel_left: position.x / 100.0 * arena.width,
        pixel_top: (100.0 - position.y) / 100.0 * arena.height,
    }
}

#[derive(Debug, Clone, Default)]
pub struct PositionModel {
    positions: [PlayerPosition; PLAYER_COUNT],
    current_player: PlayerIndex,
}

impl PositionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The only writer of stored positions.
    pub fn set_position(&mut self, player: PlayerIndex, x: f32, y: f32) -> PlayerPosition {
        let position = PlayerPosition::clamped(x, y);
        self.positions[player.index()] = position;
        position
    }

    /// Apply a relative step; the result still goes through the clamped setter.
    pub fn nudge(&mut self, player: PlayerIndex, axis: Axis, delta: f32) -> PlayerPosition {
        let current = self.position(player);
        match axis {
            Axis::X => self.set_position(player, current.x + delta, current.y),
            Axis::Y => self.set_position(player, current.x, current.y + delta),
        }
    }

    pub fn position(&self, player: PlayerIndex) -> PlayerPosition {
        self.positions[player.index()]
    }

    pub fn positions(&self) -> &[PlayerPosition; PLAYER_COUNT] {
        &self.positions
    }

    pub fn current_player(&self) -> PlayerIndex {
        self.current_player
    }

    pub fn set_current_player(&mut self, player: PlayerIndex) -> PlayerPosition {
        self.current_player = player;
        self.position(player)
    }
}

/// One-way projection of the position model onto marker pixels and slider
/// values.
#[derive(Debug, Clone, Default)]
pub struct ViewSync {
    arena: ArenaRect,
    markers: [MarkerProjection; PLAYER_COUNT],
    slider_values: PlayerPosition,
}

impl ViewSync {
    pub fn new(arena: ArenaRect) -> Self {
        Self {
            arena,
            ..Self::default()
        }
    }

    pub fn arena(&self) -> &ArenaRect {
        &self.arena
    }

    pub fn marker(&self, player: PlayerIndex) -> MarkerProjection {
        self.markers[player.index()]
    }

    pub fn slider_values(&self) -> PlayerPosition {
        self.slider_values
    }

    pub fn sync_marker(&mut self, player: PlayerIndex, position: PlayerPosition) -> MarkerProjection {
        let projection = project(&self.arena, position);
        self.markers[player.index()] = projection;
        projection
    }

    pub fn sync_sliders(&mut self, position: PlayerPosition) {
        self.slider_values = position;
    }

    /// Re-project every stored position against a new bounding box. Stored
    /// coordinates are only read.
    pub fn resize(&mut self, arena: ArenaRect, model: &PositionModel) {
        self.arena = arena;
        for (player, position) in PlayerIndex::ALL.into_iter().zip(*model.positions()) {
            self.sync_marker(player, position);
        }
        self.sync_sliders(model.position(model.current_player()));
    }
}

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod tests;
