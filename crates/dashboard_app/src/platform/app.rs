//! Controller loop: owns the state, the poll ticker, and render output.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use dashboard_core::{update, AppState, AppViewModel, Effect, Msg};
use dashboard_logging::{dash_debug, dash_info, dash_warn, get_poll_tick, set_poll_tick};

use super::config::AppConfig;
use super::effects::{file_display_name, EffectRunner};
use super::logging::{self, LogDestination};
use super::seed;
use super::ui;

const USAGE: &str = "usage: dashboard_app [--seed <seed.json>] [FILE.pdf ...]";

pub fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    logging::initialize(LogDestination::File);

    let args = CliArgs::parse(std::env::args().skip(1))?;
    let config = AppConfig::from_env();

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(config.client.clone(), msg_tx.clone())?;
    let mut controller = DashboardController::new(msg_tx, config.poll_interval);

    // Seed first so pre-existing jobs render and poll from the first tick.
    if let Some(seed_path) = &args.seed {
        let (view, effects) = controller.dispatch(Msg::SeedJobs(seed::load_seed(seed_path)));
        runner.enqueue(effects);
        if let Some(view) = view {
            ui::render::print_view(&view, &config.client.base_url);
        }
    }

    // One upload at a time: the submit control stays disabled while a
    // request is in flight, so the rest of the files wait in line.
    let mut pending_uploads: VecDeque<String> = args.uploads.into_iter().collect();
    submit_next(&mut controller, &runner, &mut pending_uploads, &config);

    if pending_uploads.is_empty() && controller.finished() {
        // An empty or unreadable seed and nothing to upload.
        println!("Nothing to track.");
        return Ok(());
    }

    controller.ensure_ticker();

    loop {
        let msg = match msg_rx.recv_timeout(Duration::from_millis(250)) {
            Ok(msg) => msg,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        let (view, effects) = controller.dispatch(msg);
        runner.enqueue(effects);

        if let Some(view) = &view {
            ui::render::print_view(view, &config.client.base_url);
            if view.submit_enabled {
                submit_next(&mut controller, &runner, &mut pending_uploads, &config);
            }
        }

        if pending_uploads.is_empty() && controller.finished() {
            dash_info!("Nothing left to track; leaving the dashboard loop");
            break;
        }
    }

    Ok(())
}

fn submit_next(
    controller: &mut DashboardController,
    runner: &EffectRunner,
    pending_uploads: &mut VecDeque<String>,
    config: &AppConfig,
) {
    let Some(source) = pending_uploads.pop_front() else {
        return;
    };
    let display_name = file_display_name(&source);
    let (view, effects) = controller.dispatch(Msg::UploadSubmitted {
        source,
        display_name,
    });
    runner.enqueue(effects);
    if let Some(view) = view {
        ui::render::print_view(&view, &config.client.base_url);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct CliArgs {
    seed: Option<PathBuf>,
    uploads: Vec<String>,
}

impl CliArgs {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Self::default();
        let mut args = args;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let path = args.next().ok_or_else(|| USAGE.to_string())?;
                    parsed.seed = Some(PathBuf::from(path));
                }
                "--help" | "-h" => return Err(USAGE.to_string()),
                _ => parsed.uploads.push(arg),
            }
        }
        // With neither uploads nor a seed there is nothing to track.
        if parsed.seed.is_none() && parsed.uploads.is_empty() {
            return Err(USAGE.to_string());
        }
        Ok(parsed)
    }
}

/// Owns the application state and the single recurring poll timer, so no
/// job table or timer handle ever lives in module-level globals.
pub struct DashboardController {
    state: AppState,
    msg_tx: mpsc::Sender<Msg>,
    poll_interval: Duration,
    ticker_started: bool,
    tick_count: u64,
}

impl DashboardController {
    pub fn new(msg_tx: mpsc::Sender<Msg>, poll_interval: Duration) -> Self {
        Self {
            state: AppState::new(),
            msg_tx,
            poll_interval,
            ticker_started: false,
            tick_count: 0,
        }
    }

    /// Starts the recurring tick thread. Idempotent: repeat calls never
    /// spawn a second timer.
    pub fn ensure_ticker(&mut self) {
        if self.ticker_started {
            return;
        }
        self.ticker_started = true;
        let msg_tx = self.msg_tx.clone();
        let interval = self.poll_interval;
        thread::spawn(move || {
            while msg_tx.send(Msg::Tick).is_ok() {
                thread::sleep(interval);
            }
        });
    }

    #[allow(dead_code)]
    pub fn ticker_started(&self) -> bool {
        self.ticker_started
    }

    /// True when no message can change state anymore: no upload in flight
    /// and either nothing tracked (a failed sole upload, an empty seed) or
    /// every tracked job terminal. Ticks are no-ops in both cases.
    pub fn finished(&self) -> bool {
        let view = self.state.view();
        view.submit_enabled && (view.job_count == 0 || view.all_terminal)
    }

    /// Applies one message. Returns the view when a render is due, plus
    /// any effects to execute.
    pub fn dispatch(&mut self, msg: Msg) -> (Option<AppViewModel>, Vec<Effect>) {
        match &msg {
            Msg::Tick => {
                self.tick_count += 1;
                set_poll_tick(self.tick_count);
            }
            Msg::PollFailed { job_id, reason } => {
                dash_warn!(
                    "Status poll failed for job {} at tick {}: {}",
                    job_id,
                    get_poll_tick(),
                    reason
                );
            }
            _ => {}
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if !effects.is_empty() {
            dash_debug!("tick {}: {} effect(s)", self.tick_count, effects.len());
        }
        let view = state.consume_dirty().then(|| state.view());
        self.state = state;
        (view, effects)
    }
}
