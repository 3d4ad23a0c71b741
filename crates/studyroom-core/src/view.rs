//! Status text for a snapshot.
//!
//! Pure formatting; the terminal renderer decides where the lines go.

use std::time::Duration;

use crate::timer::{Phase, TimerState};

const SEPARATOR: &str = "*********************";
const FOOTER: &str = "Press q to quit.";
const BAR_WIDTH: usize = 20;

/// Lines to display for `state`, footer included.
pub fn render_status(state: &TimerState) -> Vec<String> {
    let mut lines = Vec::with_capacity(5);
    match phase_label(state.phase()) {
        Some(label) if state.is_running() => {
            lines.push(SEPARATOR.to_string());
            lines.push(format!(
                "{label} Time remaining: {}",
                format_duration(state.remaining())
            ));
            lines.push(format!(
                "Elapsed: {} | Cycles completed: {} | Progress: {:.0}%",
                format_duration(state.total_elapsed()),
                state.cycle(),
                state.percent_complete() * 100.0
            ));
            lines.push(progress_bar(state.percent_complete()));
        }
        _ => lines.push("Press 's' to start the timer.".to_string()),
    }
    lines.push(FOOTER.to_string());
    lines
}

fn phase_label(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Idle => None,
        Phase::Studying => Some("Study time!"),
        Phase::OnBreak => Some("Break time!"),
        Phase::OnBigBreak => Some("Big Break time!"),
    }
}

fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// `1h2m3s`, `4m0s`, `59s`. Sub-second remainders are dropped.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
