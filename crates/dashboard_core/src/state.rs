use std::collections::{BTreeMap, BTreeSet};

use crate::view_model::{AppViewModel, JobRowView};

pub type JobId = String;

/// Status assumed for a job the server accepted without naming one.
pub const DEFAULT_STATUS: &str = "pending";

/// Last-known state of a single translation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub filename: Option<String>,
    pub status: String,
    pub error_message: Option<String>,
}

impl Job {
    /// Terminal jobs are no longer worth polling. Only `done` affects
    /// rendering, but `failed` is equally final server-side.
    pub fn is_terminal(&self) -> bool {
        self.status.eq_ignore_ascii_case("done") || self.status.eq_ignore_ascii_case("failed")
    }
}

/// One entry of the seed snapshot handed to the state at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobSeed {
    pub id: String,
    pub filename: Option<String>,
    pub status: Option<String>,
}

/// Fields of a status response. Absent fields leave the stored job
/// untouched (merge, not replace).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusPatch {
    pub filename: Option<String>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

/// Outcome note for the most recent upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadNote {
    Accepted { job_id: JobId },
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    jobs: BTreeMap<JobId, Job>,
    polls_in_flight: BTreeSet<JobId>,
    submit_in_flight: bool,
    pending_upload_name: Option<String>,
    note: Option<UploadNote>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            jobs: self.jobs.values().map(JobRowView::from_job).collect(),
            job_count: self.jobs.len(),
            submit_enabled: !self.submit_in_flight,
            note: self.note.clone(),
            all_terminal: !self.jobs.is_empty() && self.jobs.values().all(Job::is_terminal),
            dirty: self.dirty,
        }
    }

    pub fn get(&self, job_id: &str) -> Option<&Job> {
        self.jobs.get(job_id)
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Marks the upload control busy. Returns false when an upload is
    /// already in flight (the control is disabled; the message is ignored).
    pub(crate) fn begin_upload(&mut self, display_name: String) -> bool {
        if self.submit_in_flight {
            return false;
        }
        self.submit_in_flight = true;
        self.pending_upload_name = Some(display_name);
        self.note = None;
        self.dirty = true;
        true
    }

    pub(crate) fn complete_upload(
        &mut self,
        job_id: JobId,
        filename: Option<String>,
        status: Option<String>,
    ) {
        self.submit_in_flight = false;
        let fallback_name = self.pending_upload_name.take();
        let job = Job {
            id: job_id.clone(),
            filename: filename.or(fallback_name),
            status: status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            error_message: None,
        };
        // Last write wins if the server ever reuses an id.
        self.jobs.insert(job_id.clone(), job);
        self.note = Some(UploadNote::Accepted { job_id });
        self.dirty = true;
    }

    pub(crate) fn fail_upload(&mut self, reason: String) {
        self.submit_in_flight = false;
        self.pending_upload_name = None;
        self.note = Some(UploadNote::Rejected { reason });
        self.dirty = true;
    }

    /// Inserts seeded jobs, skipping entries without an id.
    pub(crate) fn seed(&mut self, seeds: Vec<JobSeed>) {
        let mut inserted = false;
        for seed in seeds {
            if seed.id.is_empty() {
                continue;
            }
            let job = Job {
                id: seed.id.clone(),
                filename: seed.filename,
                status: seed.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
                error_message: None,
            };
            self.jobs.insert(seed.id, job);
            inserted = true;
        }
        if inserted {
            self.dirty = true;
        }
    }

    /// Starts one poll tick and returns the job ids to fetch.
    ///
    /// Empty when there is nothing to do: no tracked jobs, every job
    /// already terminal, or a previous tick still has polls unsettled
    /// (overlapping ticks would duplicate requests).
    pub(crate) fn begin_tick(&mut self) -> Vec<JobId> {
        if self.jobs.is_empty() || !self.polls_in_flight.is_empty() {
            return Vec::new();
        }
        if self.jobs.values().all(Job::is_terminal) {
            return Vec::new();
        }
        let ids: Vec<JobId> = self.jobs.keys().cloned().collect();
        self.polls_in_flight.extend(ids.iter().cloned());
        ids
    }

    /// Merges a successful status response over the stored job. Only the
    /// fields present in the patch overwrite; a row re-renders only when
    /// something actually changed.
    pub(crate) fn apply_status(&mut self, job_id: &str, patch: StatusPatch) {
        self.polls_in_flight.remove(job_id);
        let Some(job) = self.jobs.get_mut(job_id) else {
            return;
        };
        let before = job.clone();
        if let Some(filename) = patch.filename {
            job.filename = Some(filename);
        }
        if let Some(status) = patch.status {
            job.status = status;
        }
        if let Some(message) = patch.error_message {
            job.error_message = Some(message);
        }
        if *job != before {
            self.dirty = true;
        }
    }

    /// A failed poll settles its in-flight mark and nothing else; the
    /// previous rendered state stays untouched and the job is retried on
    /// the next tick.
    pub(crate) fn settle_failed_poll(&mut self, job_id: &str) {
        self.polls_in_flight.remove(job_id);
    }
}
