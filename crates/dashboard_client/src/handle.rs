use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use dashboard_logging::dash_debug;

use crate::{ApiClient, ApiError, ClientEvent, ClientSettings, HttpApiClient, JobId};

enum ClientCommand {
    SubmitUpload { filename: String, bytes: Vec<u8> },
    PollStatus { job_id: JobId },
}

/// Handle to the HTTP worker: commands in, events out.
///
/// The worker runs on its own thread with a dedicated tokio runtime. Each
/// command becomes an independent task, so a tick's status fetches run
/// concurrently and one job's failure never blocks or cancels siblings.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let api: Arc<dyn ApiClient> = Arc::new(HttpApiClient::new(settings)?);
        Ok(Self::with_client(api))
    }

    /// Wires the worker to an arbitrary [`ApiClient`]; tests use this to
    /// substitute a scripted client.
    pub fn with_client(api: Arc<dyn ApiClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit_upload(&self, filename: impl Into<String>, bytes: Vec<u8>) {
        let _ = self.cmd_tx.send(ClientCommand::SubmitUpload {
            filename: filename.into(),
            bytes,
        });
    }

    pub fn poll_status(&self, job_id: impl Into<JobId>) {
        let _ = self.cmd_tx.send(ClientCommand::PollStatus {
            job_id: job_id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn ApiClient,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::SubmitUpload { filename, bytes } => {
            dash_debug!("upload start filename={} bytes={}", filename, bytes.len());
            let result = api.upload(&filename, bytes).await;
            let _ = event_tx.send(ClientEvent::UploadFinished { result });
        }
        ClientCommand::PollStatus { job_id } => {
            let result = api.fetch_status(&job_id).await;
            let _ = event_tx.send(ClientEvent::StatusFetched { job_id, result });
        }
    }
}
