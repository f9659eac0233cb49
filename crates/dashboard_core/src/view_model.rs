use crate::state::{Job, JobId, UploadNote};

/// Display name for jobs whose filename the server never reported.
pub const NAME_PLACEHOLDER: &str = "(unnamed document)";

/// The one status value with a side effect: it enables the download link.
pub const DONE_STATUS: &str = "done";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub jobs: Vec<JobRowView>,
    pub job_count: usize,
    pub submit_enabled: bool,
    pub note: Option<UploadNote>,
    /// True once every tracked job has reached a terminal status.
    pub all_terminal: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub name: String,
    /// Raw status string, case preserved for display.
    pub status: String,
    /// Lowercased status, used for styling so casing never changes the look.
    pub badge_class: String,
    /// Relative download path, present only for finished jobs.
    pub download: Option<String>,
    pub error: Option<String>,
}

impl JobRowView {
    pub(crate) fn from_job(job: &Job) -> Self {
        Self {
            job_id: job.id.clone(),
            name: job
                .filename
                .clone()
                .unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
            status: job.status.clone(),
            badge_class: job.status.to_lowercase(),
            download: download_href(&job.id, &job.status),
            error: job.error_message.clone(),
        }
    }
}

/// Download link for a job. Active iff the lowercased status is `done`;
/// recomputed from the status on every render, never cached.
pub fn download_href(job_id: &str, status: &str) -> Option<String> {
    if status.to_lowercase() == DONE_STATUS {
        Some(format!("/api/download/{job_id}"))
    } else {
        None
    }
}
