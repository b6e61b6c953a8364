//! Transient notification shown in the top-right corner.
use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(2800);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Info,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub show: bool,
    pub variant: ToastVariant,
    pub message: String,
    shown_at: Option<Instant>,
    ttl: Duration,
}

impl Toast {
    pub fn new(ttl: Duration) -> Self {
        Self {
            show: false,
            variant: ToastVariant::Success,
            message: String::new(),
            shown_at: None,
            ttl,
        }
    }

    /// Show `message`, replacing any toast already visible and restarting the timer.
    pub fn show(&mut self, variant: ToastVariant, message: impl Into<String>, now: Instant) {
        self.show = true;
        self.variant = variant;
        self.message = message.into();
        self.shown_at = Some(now);
    }

    /// Dismiss early. The message is kept so a re-render does not flicker.
    pub fn hide(&mut self) {
        self.show = false;
        self.shown_at = None;
    }

    /// Auto-dismiss once the toast has been visible for its ttl.
    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.shown_at {
            if now.saturating_duration_since(at) >= self.ttl {
                self.hide();
            }
        }
    }
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_dismisses_after_ttl() {
        let start = Instant::now();
        let mut toast = Toast::new(Duration::from_millis(100));
        toast.show(ToastVariant::Success, "User added successfully", start);
        toast.tick(start + Duration::from_millis(99));
        assert!(toast.show);
        toast.tick(start + Duration::from_millis(100));
        assert!(!toast.show);
        assert_eq!(toast.message, "User added successfully");
    }

    #[test]
    fn showing_again_restarts_timer() {
        let start = Instant::now();
        let mut toast = Toast::new(Duration::from_millis(100));
        toast.show(ToastVariant::Success, "one", start);
        toast.show(ToastVariant::Info, "two", start + Duration::from_millis(80));
        toast.tick(start + Duration::from_millis(150));
        assert!(toast.show);
        assert_eq!(toast.variant, ToastVariant::Info);
    }

    #[test]
    fn hide_dismisses_early() {
        let mut toast = Toast::default();
        toast.show(ToastVariant::Success, "x", Instant::now());
        toast.hide();
        assert!(!toast.show);
    }
}
