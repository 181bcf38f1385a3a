use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Duration;

use dochub_tasks::TaskEvent;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::ui;

pub struct Progress {
    bar: Option<ProgressBar>,
}

static MULTI_PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

fn multi_progress() -> &'static MultiProgress {
    MULTI_PROGRESS.get_or_init(MultiProgress::new)
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = multi_progress().add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// One spinner per running task, driven by runner events.
#[derive(Default)]
pub struct TaskProgress {
    running: Mutex<HashMap<String, Progress>>,
}

impl TaskProgress {
    pub fn observe(&self, event: TaskEvent<'_>) {
        let mut running = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match event {
            TaskEvent::Started(name) => {
                running.insert(name.to_string(), Progress::spinner(name));
            }
            TaskEvent::Succeeded(name) => {
                if let Some(progress) = running.remove(name) {
                    progress.finish_ok(&format!("{name} done"));
                }
            }
            TaskEvent::Failed(name) => {
                if let Some(progress) = running.remove(name) {
                    progress.finish_err(&format!("{name} failed"));
                }
            }
            TaskEvent::Skipped(name) => {
                Progress::spinner(name).finish_err(&format!("{name} skipped"));
            }
        }
    }
}
