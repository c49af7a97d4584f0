//! Controller layer: UI events, owned dashboard state, and CRUD orchestration.

pub mod alerts;
pub mod events;
pub mod orchestration;
pub mod state;
