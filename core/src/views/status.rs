//! Form status flag and the mount-generation tickets shared by the views.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Button colour hint for the submit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Busy,
    Success,
    Danger,
}

/// A `FormStatus` that falls back to `Idle` a fixed delay after it settled
/// on `Success` or `Error`.
#[derive(Debug, Clone)]
pub struct StatusFlag {
    status: FormStatus,
    settled_at: Option<Instant>,
    reset_after: Duration,
}

impl StatusFlag {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            status: FormStatus::Idle,
            settled_at: None,
            reset_after,
        }
    }

    pub fn get(&self) -> FormStatus {
        self.status
    }

    pub fn set(&mut self, status: FormStatus, now: Instant) {
        self.status = status;
        self.settled_at = match status {
            FormStatus::Success | FormStatus::Error => Some(now),
            FormStatus::Idle | FormStatus::Loading => None,
        };
    }

    /// Resets to `Idle` once the delay has elapsed. Returns true on reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.settled_at {
            Some(at) if now.saturating_duration_since(at) >= self.reset_after => {
                self.status = FormStatus::Idle;
                self.settled_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn tone(&self) -> Tone {
        match self.status {
            FormStatus::Idle => Tone::Primary,
            FormStatus::Loading => Tone::Busy,
            FormStatus::Success => Tone::Success,
            FormStatus::Error => Tone::Danger,
        }
    }
}

/// Identifies a request issued by a view during one mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Mount generation of a view. Unmounting invalidates every earlier ticket.
#[derive(Debug, Clone, Default)]
pub(crate) struct Lifecycle {
    generation: u64,
    mounted: bool,
}

impl Lifecycle {
    pub(crate) fn mounted() -> Self {
        Self {
            generation: 0,
            mounted: true,
        }
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub(crate) fn ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    pub(crate) fn accepts(&self, ticket: Ticket) -> bool {
        self.mounted && ticket.0 == self.generation
    }

    pub(crate) fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_resets_only_after_delay() {
        let start = Instant::now();
        let mut flag = StatusFlag::new(Duration::from_millis(1500));
        flag.set(FormStatus::Error, start);
        assert!(!flag.tick(start + Duration::from_millis(1499)));
        assert_eq!(flag.get(), FormStatus::Error);
        assert!(flag.tick(start + Duration::from_millis(1500)));
        assert_eq!(flag.get(), FormStatus::Idle);
    }

    #[test]
    fn success_resets_only_after_delay() {
        let start = Instant::now();
        let mut flag = StatusFlag::new(Duration::from_millis(1500));
        flag.set(FormStatus::Success, start);
        assert_eq!(flag.tone(), Tone::Success);
        assert!(!flag.tick(start + Duration::from_millis(1499)));
        assert_eq!(flag.get(), FormStatus::Success);
        assert!(flag.tick(start + Duration::from_millis(1500)));
        assert_eq!(flag.get(), FormStatus::Idle);
        assert_eq!(flag.tone(), Tone::Primary);
        assert!(!flag.tick(start + Duration::from_secs(10)));
    }

    #[test]
    fn setting_again_restarts_the_delay() {
        let start = Instant::now();
        let mut flag = StatusFlag::new(Duration::from_millis(1500));
        flag.set(FormStatus::Error, start);
        flag.set(FormStatus::Success, start + Duration::from_millis(1000));
        assert!(!flag.tick(start + Duration::from_millis(1600)));
        assert!(flag.tick(start + Duration::from_millis(2500)));
    }

    #[test]
    fn loading_never_resets() {
        let start = Instant::now();
        let mut flag = StatusFlag::new(Duration::ZERO);
        flag.set(FormStatus::Loading, start);
        assert!(!flag.tick(start + Duration::from_secs(60)));
        assert_eq!(flag.get(), FormStatus::Loading);
        assert_eq!(flag.tone(), Tone::Busy);
    }

    #[test]
    fn unmount_invalidates_tickets() {
        let mut life = Lifecycle::mounted();
        let ticket = life.ticket();
        assert!(life.accepts(ticket));
        life.unmount();
        assert!(!life.accepts(ticket));
        assert!(!life.is_mounted());
    }
}
