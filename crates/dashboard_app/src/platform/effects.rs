use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use dashboard_client::{ApiError, ClientEvent, ClientHandle, ClientSettings};
use dashboard_core::{Effect, Msg, StatusPatch};
use dashboard_logging::dash_info;

/// Executes core effects against the HTTP worker and forwards its events
/// back into the controller's message channel.
pub struct EffectRunner {
    handle: ClientHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, ApiError> {
        let handle = ClientHandle::new(settings)?;
        let runner = Self { handle, msg_tx };
        runner.spawn_event_loop();
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitUpload { source } => match std::fs::read(&source) {
                    Ok(bytes) => {
                        dash_info!("SubmitUpload source={} bytes={}", source, bytes.len());
                        self.handle.submit_upload(file_display_name(&source), bytes);
                    }
                    Err(err) => {
                        // The request never started; fail the upload locally
                        // so the submit control is released.
                        let _ = self.msg_tx.send(Msg::UploadFailed {
                            reason: format!("could not read {source}: {err}"),
                        });
                    }
                },
                Effect::PollStatus { job_id } => {
                    self.handle.poll_status(job_id);
                }
            }
        }
    }

    fn spawn_event_loop(&self) {
        let handle = self.handle.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = handle.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::UploadFinished { result } => match result {
            Ok(receipt) => Msg::UploadCompleted {
                job_id: receipt.job_id,
                filename: receipt.filename,
                status: receipt.status,
            },
            Err(err) => Msg::UploadFailed {
                reason: err.to_string(),
            },
        },
        ClientEvent::StatusFetched { job_id, result } => match result {
            Ok(update) => Msg::PollSucceeded {
                job_id,
                patch: StatusPatch {
                    filename: update.filename,
                    status: update.status,
                    error_message: update.error_message,
                },
            },
            Err(err) => {
                // Transient by definition: the job is retried next tick.
                // The controller logs it with the current tick stamped.
                Msg::PollFailed {
                    job_id,
                    reason: err.to_string(),
                }
            }
        },
    }
}

pub(crate) fn file_display_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_client::{StatusUpdate, UploadReceipt};

    #[test]
    fn upload_receipt_maps_to_upload_completed() {
        let msg = map_event(ClientEvent::UploadFinished {
            result: Ok(UploadReceipt {
                job_id: "42".to_string(),
                filename: None,
                status: Some("pending".to_string()),
            }),
        });
        assert_eq!(
            msg,
            Msg::UploadCompleted {
                job_id: "42".to_string(),
                filename: None,
                status: Some("pending".to_string()),
            }
        );
    }

    #[test]
    fn upload_error_maps_to_upload_failed() {
        let msg = map_event(ClientEvent::UploadFinished {
            result: Err(ApiError::MissingJobId),
        });
        assert!(matches!(msg, Msg::UploadFailed { .. }));
    }

    #[test]
    fn poll_error_maps_to_poll_failed_for_the_same_job() {
        let msg = map_event(ClientEvent::StatusFetched {
            job_id: "42".to_string(),
            result: Err(ApiError::PollHttp(500)),
        });
        assert_eq!(
            msg,
            Msg::PollFailed {
                job_id: "42".to_string(),
                reason: ApiError::PollHttp(500).to_string(),
            }
        );
    }

    #[test]
    fn poll_update_becomes_a_patch() {
        let msg = map_event(ClientEvent::StatusFetched {
            job_id: "42".to_string(),
            result: Ok(StatusUpdate {
                status: Some("done".to_string()),
                ..StatusUpdate::default()
            }),
        });
        assert_eq!(
            msg,
            Msg::PollSucceeded {
                job_id: "42".to_string(),
                patch: StatusPatch {
                    status: Some("done".to_string()),
                    ..StatusPatch::default()
                },
            }
        );
    }

    #[test]
    fn display_name_is_the_final_path_component() {
        assert_eq!(file_display_name("/tmp/uploads/report.pdf"), "report.pdf");
        assert_eq!(file_display_name("report.pdf"), "report.pdf");
    }
}
