use chrono::Local;
use dashboard_core::{AppViewModel, JobRowView, UploadNote};

/// Renders the whole view as terminal lines. Pure over the view model so
/// tests can assert rows directly; the timestamp footer is added by
/// [`print_view`].
pub fn render(view: &AppViewModel, base_url: &str) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(note) = &view.note {
        lines.push(match note {
            UploadNote::Accepted { job_id } => format!("Upload accepted (job {job_id})."),
            UploadNote::Rejected { reason } => format!("Upload failed: {reason}"),
        });
    }
    if !view.submit_enabled {
        lines.push("Uploading...".to_string());
    }

    if view.jobs.is_empty() {
        lines.push("No jobs yet.".to_string());
    } else {
        for row in &view.jobs {
            lines.push(format_job_row(row, base_url));
        }
    }

    lines
}

pub fn print_view(view: &AppViewModel, base_url: &str) {
    for line in render(view, base_url) {
        println!("{line}");
    }
    println!(
        "{} job(s) | updated {}",
        view.job_count,
        Local::now().format("%H:%M:%S")
    );
    println!();
}

fn format_job_row(row: &JobRowView, base_url: &str) -> String {
    let download = match &row.download {
        Some(href) => format!("download: {base_url}{href}"),
        None => "download unavailable".to_string(),
    };
    let mut line = format!(
        "[{id}] {marker} {name} | {status} ({download})",
        id = row.job_id,
        marker = status_marker(&row.badge_class),
        name = row.name,
        status = row.status,
        download = download
    );
    if let Some(error) = &row.error {
        line.push_str(&format!(" [{error}]"));
    }
    line
}

/// Terminal stand-in for the badge style: keyed off the lowercased badge
/// class so casing never changes the look.
fn status_marker(badge_class: &str) -> &'static str {
    match badge_class {
        "done" => "+",
        "failed" => "x",
        _ => "~",
    }
}
