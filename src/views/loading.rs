use std::time::{Duration, Instant};

/// How long the sheet stays up with every label marked loaded
pub const LOADING_LINGER: Duration = Duration::from_millis(300);

/// State of one label on the loading sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingLabel {
    pub name: String,
    pub done: bool,
}

/// Overlay shown while the scope collection is being fetched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingIndicator {
    visible: bool,
    labels: Vec<LoadingLabel>,
    hide_at: Option<Instant>,
}

impl LoadingIndicator {
    /// Show the sheet with a single pending label
    pub fn show(&mut self, name: &str) {
        self.visible = true;
        self.hide_at = None;
        self.labels = vec![LoadingLabel {
            name: name.to_string(),
            done: false,
        }];
    }

    /// Flag a label as loaded
    pub fn mark_done(&mut self, name: &str) {
        for label in self.labels.iter_mut().filter(|l| l.name == name) {
            label.done = true;
        }
    }

    /// Flag a label as loaded and hide the sheet once it has been seen
    pub fn finish(&mut self, name: &str, now: Instant) {
        self.mark_done(name);
        if self.visible {
            self.hide_at = Some(now + LOADING_LINGER);
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.hide_at = None;
    }

    /// Hide a finished sheet once its time is up. Returns whether it is still lingering.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(at) if now >= at => {
                self.hide();
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn labels(&self) -> &[LoadingLabel] {
        &self.labels
    }
}
