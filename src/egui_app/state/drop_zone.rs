use std::path::PathBuf;

use crate::summary_api::SelectedFile;

/// File extensions offered by the native picker. Drops are not filtered.
pub const PICKER_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv"];

/// Presentation state of the file acquisition surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropZoneState {
    /// Files are hovering the window.
    pub drag_over: bool,
}

/// Input reaching the drop zone from the window or the picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropZoneEvent {
    DragEnter,
    DragLeave,
    /// Files released over the window; entries without a path are `None`.
    Drop(Vec<Option<PathBuf>>),
    /// Result of the native picker, empty when cancelled.
    PickerChanged(Vec<PathBuf>),
    Click,
}

/// What the controller should do after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropZoneAction {
    None,
    Selected(SelectedFile),
    OpenPicker,
}

impl DropZoneState {
    /// Apply `event` and report the follow-up action.
    pub fn handle(&mut self, event: DropZoneEvent) -> DropZoneAction {
        match event {
            DropZoneEvent::DragEnter => {
                self.drag_over = true;
                DropZoneAction::None
            }
            DropZoneEvent::DragLeave => {
                self.drag_over = false;
                DropZoneAction::None
            }
            DropZoneEvent::Drop(files) => {
                self.drag_over = false;
                files
                    .into_iter()
                    .flatten()
                    .next()
                    .map(|path| DropZoneAction::Selected(SelectedFile::from_path(path)))
                    .unwrap_or(DropZoneAction::None)
            }
            DropZoneEvent::PickerChanged(files) => files
                .into_iter()
                .next()
                .map(|path| DropZoneAction::Selected(SelectedFile::from_path(path)))
                .unwrap_or(DropZoneAction::None),
            DropZoneEvent::Click => DropZoneAction::OpenPicker,
        }
    }
}
