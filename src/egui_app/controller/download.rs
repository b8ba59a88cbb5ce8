use super::jobs::DownloadJobResult;
use super::*;

impl SummaryController {
    /// Fetch the current report into the download folder.
    ///
    /// Does nothing without a downloadable result or while a fetch is running.
    pub fn request_download(&mut self) {
        let Some(ticket) = self.ui.session.begin_download() else {
            return;
        };
        tracing::info!(
            "Requesting report {}",
            self.report_url(&ticket.report_key)
        );
        self.set_status("Preparing report...", StatusTone::Busy);
        self.jobs
            .begin_download(self.service.clone(), self.download_dir.clone(), ticket);
    }

    /// Open the current report URL in the system browser.
    pub fn open_report_directly(&mut self) {
        let Some(key) = self.selected_report_key() else {
            return;
        };
        let url = self.report_url(&key);
        match self.opener.open_url(&url) {
            Ok(()) => self.set_status(format!("Opened {url}"), StatusTone::Info),
            Err(err) => {
                tracing::warn!("Failed to open {url}: {err}");
                self.set_status(format!("Could not open {url}: {err}"), StatusTone::Warning);
            }
        }
    }

    /// Last-resort navigation after a failed fetch. Errors are only logged.
    fn open_report_fallback(&self, key: &str) {
        let url = self.report_url(key);
        tracing::info!("Falling back to opening {url}");
        if let Err(err) = self.opener.open_url(&url) {
            tracing::warn!("Fallback navigation to {url} failed: {err}");
        }
    }
}

pub(super) fn handle_download_finished(
    controller: &mut SummaryController,
    message: DownloadJobResult,
) {
    controller.jobs.clear_download();
    let failure = controller
        .ui
        .session
        .finish_download(&message.ticket, &message.result);
    match (message.result, failure) {
        (Ok(saved), _) => {
            tracing::info!("Saved report to {} ({} bytes)", saved.path.display(), saved.bytes);
            controller.set_status(
                format!("Saved report to {}", saved.path.display()),
                StatusTone::Info,
            );
        }
        (Err(err), shown) => {
            tracing::warn!("Report {} download failed: {err}", message.ticket.report_key);
            controller.open_report_fallback(&message.ticket.report_key);
            let shown = shown.unwrap_or_else(|| DOWNLOAD_FAILED_FALLBACK.to_string());
            controller.set_status(shown, StatusTone::Error);
        }
    }
}
