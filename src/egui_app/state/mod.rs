//! Shared state types for the egui UI.

mod drop_zone;
mod session;
mod status;
mod table;

pub use drop_zone::*;
pub use session::*;
pub use status::*;
pub use table::*;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub status: StatusBarState,
    pub drop_zone: DropZoneState,
    pub session: SessionState,
}
