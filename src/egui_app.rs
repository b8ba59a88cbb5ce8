//! egui front end: state, controller and renderer.

/// Controller that runs uploads and downloads for the UI.
pub mod controller;
/// Plain state consumed by the renderer.
pub mod state;
/// egui rendering.
pub mod ui;
