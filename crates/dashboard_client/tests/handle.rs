use std::sync::Arc;
use std::time::{Duration, Instant};

use dashboard_client::{
    ApiClient, ApiError, ClientEvent, ClientHandle, StatusUpdate, UploadReceipt,
};

/// Scripted stand-in for the HTTP layer: uploads always succeed, status
/// checks fail for the job id "bad".
struct ScriptedClient;

#[async_trait::async_trait]
impl ApiClient for ScriptedClient {
    async fn upload(&self, filename: &str, _bytes: Vec<u8>) -> Result<UploadReceipt, ApiError> {
        Ok(UploadReceipt {
            job_id: "42".to_string(),
            filename: Some(filename.to_string()),
            status: Some("pending".to_string()),
        })
    }

    async fn fetch_status(&self, job_id: &str) -> Result<StatusUpdate, ApiError> {
        if job_id == "bad" {
            Err(ApiError::PollHttp(500))
        } else {
            Ok(StatusUpdate {
                status: Some("done".to_string()),
                ..StatusUpdate::default()
            })
        }
    }
}

fn drain_events(handle: &ClientHandle, expected: usize) -> Vec<ClientEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    while events.len() < expected {
        assert!(Instant::now() < deadline, "timed out waiting for events");
        match handle.try_recv() {
            Some(event) => events.push(event),
            None => std::thread::sleep(Duration::from_millis(10)),
        }
    }
    events
}

#[test]
fn commands_come_back_as_events() {
    let handle = ClientHandle::with_client(Arc::new(ScriptedClient));
    handle.submit_upload("report.pdf", b"%PDF-1.4".to_vec());
    let events = drain_events(&handle, 1);

    match &events[0] {
        ClientEvent::UploadFinished { result } => {
            let receipt = result.as_ref().expect("upload ok");
            assert_eq!(receipt.job_id, "42");
            assert_eq!(receipt.filename.as_deref(), Some("report.pdf"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn one_failing_poll_does_not_block_its_siblings() {
    let handle = ClientHandle::with_client(Arc::new(ScriptedClient));
    handle.poll_status("good");
    handle.poll_status("bad");
    handle.poll_status("also-good");

    let events = drain_events(&handle, 3);
    let mut ok = 0;
    let mut failed = 0;
    for event in events {
        match event {
            ClientEvent::StatusFetched { job_id, result } => match result {
                Ok(update) => {
                    assert_ne!(job_id, "bad");
                    assert_eq!(update.status.as_deref(), Some("done"));
                    ok += 1;
                }
                Err(err) => {
                    assert_eq!(job_id, "bad");
                    assert_eq!(err, ApiError::PollHttp(500));
                    failed += 1;
                }
            },
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!((ok, failed), (2, 1));
}
