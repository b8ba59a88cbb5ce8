use super::jobs::JobMessage;
use super::*;

impl SummaryController {
    pub(super) fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::UploadFinished(message) => {
                    upload::handle_upload_finished(self, message);
                }
                JobMessage::DownloadFinished(message) => {
                    download::handle_download_finished(self, message);
                }
            }
        }
    }
}
