//! Terminal view layer: command parsing, rendering, and the interactive loop.

pub mod app;
pub mod commands;
pub mod render;
