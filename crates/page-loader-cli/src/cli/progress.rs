//! Per-resource progress on stderr (stdout carries only the result path).

use page_loader_core::ResourceProgress;
use std::io::Write;
use std::sync::mpsc::Receiver;

pub fn print_progress(rx: Receiver<ResourceProgress>) {
    let mut printed = false;
    for event in rx {
        let _ = write!(std::io::stderr(), "\r{}\x1b[K", format_line(&event));
        printed = true;
    }
    if printed {
        let _ = writeln!(std::io::stderr());
    }
}

pub(crate) fn format_line(event: &ResourceProgress) -> String {
    let pct = event.done as f64 / event.total.max(1) as f64 * 100.0;
    let mark = if event.saved { "ok" } else { "skipped" };
    format!(
        "  [{}/{}] {:>3.0}%  {} ({})",
        event.done, event.total, pct, event.url, mark
    )
}
