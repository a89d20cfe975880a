//! UI layer for the game window: app shell, board layout, arena and cards.

pub mod app;
pub mod board;
pub mod card;
pub mod frame;
pub mod layout;

pub use app::SpectrumApp;
