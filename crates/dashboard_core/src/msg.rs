#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file and submitted the upload form.
    UploadSubmitted {
        source: String,
        display_name: String,
    },
    /// Upload accepted by the server; the receipt fields are already
    /// validated (non-empty job id) by the client layer.
    UploadCompleted {
        job_id: crate::JobId,
        filename: Option<String>,
        status: Option<String>,
    },
    /// Upload rejected, or the request itself failed.
    UploadFailed { reason: String },
    /// Restore jobs from a server-provided seed snapshot at startup.
    SeedJobs(Vec<crate::JobSeed>),
    /// Periodic poll tick.
    Tick,
    /// Status fetch for one job came back.
    PollSucceeded {
        job_id: crate::JobId,
        patch: crate::StatusPatch,
    },
    /// Status fetch for one job failed; the job is retried next tick.
    /// The reason is carried for reporting only and never touches state.
    PollFailed {
        job_id: crate::JobId,
        reason: String,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
