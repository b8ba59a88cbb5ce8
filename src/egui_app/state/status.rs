use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

const MAX_LOG_ENTRIES: usize = 50;

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
    /// Rolling status log entries, oldest first.
    pub log: Vec<String>,
}

impl StatusBarState {
    /// Status shown before the first upload.
    pub fn idle() -> Self {
        Self {
            text: "Drop a spreadsheet to get started".into(),
            badge_label: StatusTone::Idle.label().into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
            log: Vec::new(),
        }
    }

    /// Replace the current message and append it to the log.
    pub fn set(&mut self, text: impl Into<String>, tone: StatusTone) {
        let text = text.into();
        self.badge_label = tone.label().into();
        self.badge_color = style::status_badge_color(tone);
        self.log.push(text.clone());
        if self.log.len() > MAX_LOG_ENTRIES {
            let overflow = self.log.len() - MAX_LOG_ENTRIES;
            self.log.drain(..overflow);
        }
        self.text = text;
    }

    /// Concatenate log entries into a single displayable string.
    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self::idle()
    }
}
