use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub struct SpinnerHandle {
    pub spinner: ProgressBar,
}

impl SpinnerHandle {
    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }

    pub fn set_message(&self, msg: String) {
        self.spinner.set_message(msg);
    }
}

pub(crate) static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

/// The terminal spinner, created and started on first use.
pub fn get_spinner() -> &'static SpinnerHandle {
    SPINNER.get_or_init(init_spinner)
}

/// Runs `f` with the spinner hidden, if one was ever started.
pub fn suspend<F: FnOnce() -> R, R>(f: F) -> R {
    match SPINNER.get() {
        Some(handle) => handle.spinner.suspend(f),
        None => f(),
    }
}

fn init_spinner() -> SpinnerHandle {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));

    SpinnerHandle { spinner: pb }
}
