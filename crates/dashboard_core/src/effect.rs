#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the file at `source` and POST it to the upload endpoint.
    SubmitUpload { source: String },
    /// Fetch the current status of one tracked job.
    PollStatus { job_id: crate::JobId },
}
