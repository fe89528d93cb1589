use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    shown_at: Instant,
    lifetime: Duration,
}

impl Toast {
    pub fn new(text: impl Into<String>, shown_at: Instant, lifetime: Duration) -> Self {
        Self {
            text: text.into(),
            shown_at,
            lifetime,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.lifetime
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.lifetime
            .saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_lifetime() {
        let start = Instant::now();
        let toast = Toast::new("Row cleared", start, DEFAULT_TOAST_DURATION);
        assert!(!toast.is_expired(start));
        assert_eq!(toast.remaining(start), DEFAULT_TOAST_DURATION);
        let later = start + Duration::from_millis(2199);
        assert!(!toast.is_expired(later));
        assert_eq!(toast.remaining(later), Duration::from_millis(1));
        let done = start + DEFAULT_TOAST_DURATION;
        assert!(toast.is_expired(done));
        assert_eq!(toast.remaining(done + Duration::from_secs(5)), Duration::ZERO);
    }
}
