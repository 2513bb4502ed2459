#![cfg(feature = "egui")]

use eframe::egui::text::LayoutJob;
use eframe::egui::{Color32, TextFormat};

use crate::search::SearchArguments;

/// Build a LayoutJob for a result label, marking every term occurrence with
/// the highlighting pattern of `arguments`. The matched substrings keep the
/// casing of `text`.
pub fn highlight_label_job(text: &str, arguments: Option<&SearchArguments>) -> LayoutJob {
    let mut job = LayoutJob::default();
    let Some(re) = arguments.and_then(|a| a.highlighting_expression()) else {
        job.append(text, 0.0, TextFormat::default());
        return job;
    };
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            job.append(&text[last..m.start()], 0.0, TextFormat::default());
        }
        let mut format = TextFormat::default();
        format.background = Color32::YELLOW;
        job.append(m.as_str(), 0.0, format);
        last = m.end();
    }
    if last < text.len() {
        job.append(&text[last..], 0.0, TextFormat::default());
    }
    job
}
