mod app;
mod config;
mod effects;
mod logging;
mod seed;
mod ui;

pub use app::run_app;
