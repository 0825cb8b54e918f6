//! # ASCII Rendering
//!
//! Terminal stand-in for the page's presentation layer. The controllers only report indices;
//! this module decides what "active" looks like: the slide label, its position, the indicator
//! dots, and the play/pause icon.

use crate::carousel::RotatingDisplayController;
use crate::gallery::Gallery;
use crate::scheduler::Scheduler;
use crate::SlideChanged;
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Icon class for the play/pause button: it shows the action a click would take.
pub fn playback_icon(playing: bool) -> &'static str {
    if playing {
        "fas fa-pause"
    } else {
        "fas fa-play"
    }
}

/// Indicator row, `●` for the active slide and `○` for the rest.
pub fn indicator_row(count: usize, active: usize) -> String {
    (0..count)
        .map(|i| if i == active { '●' } else { '○' })
        .flat_map(|dot| [dot, ' '])
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Render one slider's current state.
///
/// Labels beyond the slide count are ignored; a missing label renders as `slide N`.
pub fn render_slider<S: Scheduler + 'static>(
    name: &str,
    controller: &RotatingDisplayController<S>,
    labels: &[String],
    show_indicators: bool,
) -> String {
    let current = controller.current_index();
    let count = controller.slide_count();
    let playing = controller.is_playing();

    let state = match (playing, controller.is_suspended()) {
        (true, false) => "playing",
        (true, true) => "suspended",
        (false, _) => "paused",
    };

    let label = labels
        .get(current)
        .cloned()
        .unwrap_or_else(|| format!("slide {}", current + 1));

    let mut out = String::new();
    let _ = writeln!(out, "{} [{}] ({})", name, state, playback_icon(playing));
    let _ = writeln!(out, "  ▶ {} ({}/{})", label, current + 1, count);
    if show_indicators {
        let _ = writeln!(out, "  {}", indicator_row(count, current));
    }
    out
}

/// Render the gallery grid under its current filter, and the modal if one is open.
pub fn render_gallery(gallery: &Gallery) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "gallery [filter: {}]", gallery.filter());
    for (position, item) in gallery.visible().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. #{} {:<9} {}",
            position,
            item.id,
            item.category.as_str(),
            item.caption
        );
    }
    if let Some(item) = gallery.modal_item() {
        let _ = writeln!(out, "  ┌ modal: {}", item.caption);
        let _ = writeln!(out, "  └ {}", item.image);
    }
    out
}

/// Print a slider frame to stdout under a local timestamp, e.g. `10/15 3:04:09PM`.
pub fn draw_ascii<S: Scheduler + 'static>(
    name: &str,
    controller: &RotatingDisplayController<S>,
    labels: &[String],
    show_indicators: bool,
    at: DateTime<Local>,
) {
    println!("{}", at.format("%-m/%-d %-I:%M:%S%p"));
    print!("{}", render_slider(name, controller, labels, show_indicators));
}

/// One-line summary of a transition, for hosts that log changes as they happen.
pub fn render_change(name: &str, change: SlideChanged, labels: &[String]) -> String {
    let label = |index: usize| {
        labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("slide {}", index + 1))
    };
    format!(
        "{}: {} -> {}",
        name,
        label(change.previous),
        label(change.current)
    )
}
