use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UploadSubmitted {
            source,
            display_name,
        } => {
            if state.begin_upload(display_name) {
                vec![Effect::SubmitUpload { source }]
            } else {
                // An upload is already in flight; the submit control is
                // disabled and repeat submissions are dropped.
                Vec::new()
            }
        }
        Msg::UploadCompleted {
            job_id,
            filename,
            status,
        } => {
            debug_assert!(!job_id.is_empty(), "client layer must reject empty job ids");
            state.complete_upload(job_id, filename, status);
            Vec::new()
        }
        Msg::UploadFailed { reason } => {
            state.fail_upload(reason);
            Vec::new()
        }
        Msg::SeedJobs(seeds) => {
            state.seed(seeds);
            Vec::new()
        }
        Msg::Tick => state
            .begin_tick()
            .into_iter()
            .map(|job_id| Effect::PollStatus { job_id })
            .collect(),
        Msg::PollSucceeded { job_id, patch } => {
            state.apply_status(&job_id, patch);
            Vec::new()
        }
        Msg::PollFailed { job_id, reason: _ } => {
            state.settle_failed_poll(&job_id);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
