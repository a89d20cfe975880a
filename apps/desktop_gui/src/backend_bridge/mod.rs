//! Bridge between the egui thread and the async content worker.

pub mod commands;
pub mod runtime;
