use super::jobs::UploadJobResult;
use super::*;
use crate::summary_api::SelectedFile;

impl SummaryController {
    /// Start analyzing `file`, replacing whatever the window showed before.
    pub fn handle_file(&mut self, file: SelectedFile) {
        let ticket = self.ui.session.begin_upload(file);
        tracing::info!(
            "Dispatching upload #{} for {}",
            ticket.request_id,
            ticket.file.path.display()
        );
        self.set_status(format!("Analyzing {}...", ticket.file.name), StatusTone::Busy);
        self.jobs.begin_upload(self.service.clone(), ticket);
    }
}

pub(super) fn handle_upload_finished(controller: &mut SummaryController, message: UploadJobResult) {
    controller.jobs.clear_upload();
    let failure = message.result.as_ref().err().map(ToString::to_string);
    match controller
        .ui
        .session
        .finish_upload(message.request_id, message.result)
    {
        UploadOutcome::Stale => {
            tracing::debug!(
                "Dropping stale upload #{} for {}",
                message.request_id,
                message.file_name
            );
        }
        UploadOutcome::Committed => match failure {
            None => {
                tracing::info!("Upload #{} summarized {}", message.request_id, message.file_name);
                controller.set_status(format!("Summarized {}", message.file_name), StatusTone::Info);
            }
            Some(err) => {
                tracing::warn!("Upload of {} failed: {err}", message.file_name);
                let shown = controller
                    .ui
                    .session
                    .error()
                    .unwrap_or(UPLOAD_FAILED_FALLBACK)
                    .to_string();
                controller.set_status(shown, StatusTone::Error);
            }
        },
    }
}
